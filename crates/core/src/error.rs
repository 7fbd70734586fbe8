use crate::domain::command::ParamName;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("{}", .parameter.missing_message())]
    MissingRequiredParameter { parameter: ParamName },
}

/// Every validation failure of a single dispatch, reported together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<CoreError>);

fn join_messages(errors: &[CoreError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, CoreError>;
