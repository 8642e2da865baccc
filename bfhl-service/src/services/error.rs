use crate::services::math::MathError;
use crate::services::providers::ProviderError;
use thiserror::Error;

/// Everything that can go wrong between receiving a `/bfhl` body and
/// producing its `data`.
///
/// Callers never see these variants: the handler collapses all of them
/// into the same 400 envelope and only logs the cause.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Malformed body: {0}")]
    MalformedBody(String),

    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Unknown operation: {0:?}")]
    UnknownOperation(String),

    #[error("Invalid value for {operation}: expected {expected}")]
    InvalidValue {
        operation: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("AI provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Worker error: {0}")]
    Worker(String),
}
