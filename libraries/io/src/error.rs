use thiserror::Error;

/// Errors raised at the section exchange boundary.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SectionError {
    #[error("expected a section of type {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: String,
    },

    #[error("cannot translate {kind} {identifier}")]
    Translation {
        kind: &'static str,
        identifier: String,
    },

    #[error("invalid transition line: {0}")]
    InvalidTransitionLine(String),

    #[error("invalid section header: {0}")]
    InvalidHeader(&'static str),
}
