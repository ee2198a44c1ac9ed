use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("literal '{literal}' not found in '{pathname}' (template '{template}')")]
    LocationMismatch {
        literal: String,
        pathname: String,
        template: String,
    },
    #[error("required parameter '{name}' is missing from the location (template '{template}')")]
    MissingParameter { name: String, template: String },
    #[error("location component '{input}' is not valid percent-encoded UTF-8")]
    InvalidEncoding { input: String },
}

pub type MatchResult<T> = Result<T, MatchError>;
