//! TOSEC Error Types
//!
//! Parsing a filename never fails: anything that doesn't follow the TOSEC
//! grammar is reported as unrecognized. Errors only come from converting
//! strings back into the classification enums.

use derive_more::{Display, Error};

/// A TOSEC error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for TOSEC operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value could not be converted into one of the classification enums.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending input.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Conversions are pure; the same input fails the same way every time.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        let kind = ErrorKind::ParseError { field: "era", value: "modern".to_string() };
        assert_eq!(kind.to_string(), "failed to parse field 'era', found value: modern");
        assert!(!kind.is_retryable());
    }
}
