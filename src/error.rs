use std::fmt;

/// Errors returned by fallible [`IntervalTree`](crate::IntervalTree)
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// No entry has a key equal to the requested key.
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => f.write_str("no entry with the requested interval key"),
        }
    }
}

impl std::error::Error for Error {}
