use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("route '{name}' not found while resolving selector '{selector}'")]
    NameNotFound { name: String, selector: String },
}

pub type CompileResult<T> = Result<T, CompileError>;
