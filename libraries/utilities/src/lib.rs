//!
//! A crate containing the ordered collection primitives shared by the
//! automata libraries.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod ord_set;
mod synchronized_iterator;

pub use ord_set::*;
pub use synchronized_iterator::*;
