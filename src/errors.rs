use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::compiler::CompileError;
use crate::matcher::MatchError;
use crate::params::ParamsError;
use crate::parser::ParserError;
use crate::render::RenderError;
use crate::route::TreeError;
use crate::routes::OptionsError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutesError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

pub type RoutesResult<T> = Result<T, RoutesError>;

/// Non-failing view of a [`RoutesResult`].
///
/// Serializes as `{"success": true, "data": ..}` or
/// `{"success": false, "error": "<message>"}`.
#[derive(Debug, PartialEq)]
pub enum SafeOutcome<T> {
    Success(T),
    Failure(RoutesError),
}

impl<T> SafeOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, SafeOutcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SafeOutcome::Success(data) => Some(data),
            SafeOutcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RoutesError> {
        match self {
            SafeOutcome::Success(_) => None,
            SafeOutcome::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> RoutesResult<T> {
        match self {
            SafeOutcome::Success(data) => Ok(data),
            SafeOutcome::Failure(error) => Err(error),
        }
    }
}

impl<T> From<RoutesResult<T>> for SafeOutcome<T> {
    fn from(result: RoutesResult<T>) -> Self {
        match result {
            Ok(data) => SafeOutcome::Success(data),
            Err(error) => SafeOutcome::Failure(error),
        }
    }
}

impl<T: Serialize> Serialize for SafeOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SafeOutcome", 2)?;
        match self {
            SafeOutcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            SafeOutcome::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.to_string())?;
            }
        }
        state.end()
    }
}

/// Runs `call` and captures its error instead of propagating it.
pub fn safe_call<T, F>(call: F) -> SafeOutcome<T>
where
    F: FnOnce() -> RoutesResult<T>,
{
    let outcome = SafeOutcome::from(call());
    if let SafeOutcome::Failure(error) = &outcome {
        tracing::debug!(%error, "safe_call captured an error");
    }
    outcome
}
