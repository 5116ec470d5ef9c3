use thiserror::Error;

/// Input errors of a review session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// Load names look like `MAY0712A`: month, day, two-digit year, revision letter.
    #[error("invalid load name \"{0}\": expected e.g. MAY0712A")]
    InvalidLoadName(String),

    #[error("unknown plot view \"{0}\"")]
    UnknownView(String),
}
