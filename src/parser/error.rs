use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("{parser} parser rejected '{raw}': {reason}")]
    Validation {
        parser: &'static str,
        raw: String,
        reason: String,
    },
    #[error("expected a {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("constraint pattern '{pattern}' is invalid: {error}")]
    InvalidPattern { pattern: String, error: String },
}

impl ParserError {
    pub(crate) fn validation(parser: &'static str, raw: &str, reason: impl Into<String>) -> Self {
        ParserError::Validation {
            parser,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ParserResult<T> = Result<T, ParserError>;
