use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("route '{node}' declares both a path and a template")]
    PathAndTemplate { node: String },
    #[error("route name '{name}' is invalid: {reason}")]
    InvalidNodeName { name: String, reason: &'static str },
    #[error("parameter name in route '{node}' is empty")]
    ParameterNameEmpty { node: String },
    #[error(
        "parameter name '{name}' in route '{node}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        node: String,
        name: String,
        found: char,
    },
    #[error("parameter name '{name}' in route '{node}' contains invalid character '{invalid}'")]
    ParameterInvalidCharacter {
        node: String,
        name: String,
        invalid: char,
    },
    #[error("duplicate parameter name '{name}' in route '{node}'")]
    DuplicateParamName { name: String, node: String },
    #[error("route '{node}' contains an empty literal segment")]
    EmptyLiteral { node: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
