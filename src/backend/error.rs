//! Errors raised at the backend boundary

use crate::state::{DefinitionError, ValidationErrors};
use thiserror::Error;

/// Transport or backend failure while talking to the comparison API
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid backend URL `{0}`")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("backend rejected the request ({code}): {message}")]
    Backend { code: String, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl GatewayError {
    /// Transient failures worth offering a manual retry for
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Backend { code, .. } => code.starts_with('5'),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Why a wizard submission did not produce offers
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form has {} invalid field(s)", .0.len())]
    Incomplete(ValidationErrors),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
