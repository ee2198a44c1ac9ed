use thiserror::Error;

use crate::parser::ParserError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("required parameter '{name}' has no value (template '{template}')")]
    MissingRequiredParameter { name: String, template: String },
    #[error("parameter '{name}' could not be parsed")]
    Parse {
        name: String,
        #[source]
        source: ParserError,
    },
}

pub type ParamsResult<T> = Result<T, ParamsError>;
