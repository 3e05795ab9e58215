//! Backend module for the comparison REST API
//!
//! The engine only crosses this boundary twice: once to fetch a form
//! definition and once to submit the normalized payload. Neither call is
//! retried here; callers resubmit on failure.

mod client;
mod error;
mod traits;
mod types;

pub use client::{BackendClient, REQUEST_ID_HEADER};
pub use error::{GatewayError, SubmissionError};
pub use traits::BackendClientTrait;
pub use types::{BackendErrorBody, ComparisonMetadata, ComparisonResponse, Offer, SubmissionRequest};

#[cfg(test)]
pub use traits::MockBackendClientTrait;

use crate::normalize::normalize_with_report;
use crate::state::WizardState;

/// Build the submission body for a wizard session.
///
/// Refuses to build a request while any visible field is invalid.
pub fn prepare_submission(state: &WizardState) -> Result<SubmissionRequest, SubmissionError> {
    if !state.is_complete() {
        return Err(SubmissionError::Incomplete(state.errors.clone()));
    }

    let report = normalize_with_report(state.category(), &state.values);
    if !report.dropped.is_empty() {
        tracing::warn!(
            category = state.category(),
            dropped = ?report.dropped,
            "fields omitted from submission"
        );
    }

    Ok(SubmissionRequest {
        category: state.category().to_string(),
        form_data: report.payload,
    })
}

/// Validate, normalize and submit a wizard session
pub async fn submit_wizard<C>(client: &C, state: &WizardState) -> Result<ComparisonResponse, SubmissionError>
where
    C: BackendClientTrait + ?Sized,
{
    let request = prepare_submission(state)?;
    let response = client.submit(&request).await?;
    Ok(response)
}
