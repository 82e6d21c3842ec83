// src/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Policy resolves to an empty character pool")]
    EmptyCharacterPool,

    #[error("Policy name '{0}' is already taken")]
    PolicyNameTaken(String),

    #[error("Policy name is reserved for the default policy")]
    PolicyNameReserved,

    #[error("No policy named '{0}'")]
    PolicyNotFound(String),

    #[error("Maximum number of named policies reached")]
    MaxPoliciesReached,

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
