//! Trait abstraction for the backend client to enable mocking in tests

use super::error::GatewayError;
use super::types::{ComparisonResponse, SubmissionRequest};
use crate::state::FormDefinition;
use async_trait::async_trait;

/// Operations the wizard needs from the comparison backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    /// Fetch the form definition for a comparison category
    async fn fetch_definition(&self, category: &str) -> Result<FormDefinition, GatewayError>;

    /// Submit a normalized payload and receive offers
    async fn submit(&self, request: &SubmissionRequest) -> Result<ComparisonResponse, GatewayError>;
}
