#![forbid(unsafe_code)]

//! Errors returned by navigation operations.

use std::fmt;

/// Result alias for navigation operations.
pub type NavResult<T> = Result<T, NavError>;

/// Errors that can occur while navigating the history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// `go_to_index` was given an index outside the published stack.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "history index {index} out of range (stack length {len})")
            }
        }
    }
}

impl std::error::Error for NavError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_index_and_length() {
        let err = NavError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "history index 4 out of range (stack length 2)"
        );
    }
}
