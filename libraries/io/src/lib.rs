//!
//! A crate containing the textual section exchange for automata: parsed
//! sections, symbol alphabets, and construction and serialization of
//! alternating automata.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod afa_format;
mod alphabet;
mod error;
mod line_iterator;
mod parsed_section;

pub use afa_format::*;
pub use alphabet::*;
pub use error::*;
pub use parsed_section::*;
