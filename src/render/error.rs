use thiserror::Error;

use crate::parser::ParserError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("required parameter '{name}' has no value (template '{template}')")]
    MissingRequiredParameter { name: String, template: String },
    #[error("parameter '{name}' could not be serialized")]
    Serialize {
        name: String,
        #[source]
        source: ParserError,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;
