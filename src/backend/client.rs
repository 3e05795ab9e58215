//! HTTP client for the comparison backend

use super::error::GatewayError;
use super::traits::BackendClientTrait;
use super::types::{BackendErrorBody, ComparisonResponse, SubmissionRequest};
use crate::config::ApiSettings;
use crate::state::FormDefinition;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use uuid::Uuid;

/// Header carrying the client-generated request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Client for the comparison REST API
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client from resolved settings
    pub fn new(settings: &ApiSettings) -> Result<Self, GatewayError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GatewayError::InvalidUrl(settings.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn definition_url(&self, category: &str) -> String {
        format!("{}/forms/{}", self.base_url, category)
    }

    pub fn submission_url(&self) -> String {
        format!("{}/comparisons", self.base_url)
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn fetch_definition(&self, category: &str) -> Result<FormDefinition, GatewayError> {
        let url = self.definition_url(category);
        tracing::debug!(%url, "fetching form definition");

        let response = self.http.get(&url).send().await?;
        let response = ensure_success(response).await?;
        let definition: FormDefinition = response.json().await?;
        definition.check()?;

        tracing::info!(
            category,
            fields = definition.field_count(),
            "loaded form definition"
        );
        Ok(definition)
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<ComparisonResponse, GatewayError> {
        let request_id = Uuid::new_v4();
        let url = self.submission_url();
        tracing::info!(
            category = %request.category,
            %request_id,
            fields = request.form_data.len(),
            "submitting comparison request"
        );

        let response = self
            .http
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(request)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let comparison: ComparisonResponse = response.json().await?;

        tracing::info!(%request_id, offers = comparison.offers.len(), "comparison received");
        Ok(comparison)
    }
}

/// Turn non-2xx responses into [`GatewayError::Backend`]
async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let err = backend_error(status, &body);
    tracing::warn!(status = status.as_u16(), error = %err, "backend returned an error");
    Err(err)
}

fn backend_error(status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<BackendErrorBody>(body) {
        Ok(BackendErrorBody { code, message }) => GatewayError::Backend { code, message },
        Err(_) => GatewayError::Backend {
            code: status.as_str().to_string(),
            message: if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(url: &str) -> ApiSettings {
        ApiSettings {
            base_url: url.to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = BackendClient::new(&settings("http://localhost:8080/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.definition_url("auto"), "http://localhost:8080/api/forms/auto");
        assert_eq!(client.submission_url(), "http://localhost:8080/api/comparisons");
    }

    #[test]
    fn test_new_rejects_non_http_url() {
        let result = BackendClient::new(&settings("ftp://example.com"));
        assert!(matches!(result, Err(GatewayError::InvalidUrl(_))));
    }

    mod errors {
        use super::*;

        #[test]
        fn test_structured_body() {
            let err = backend_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                r#"{"code":"INVALID_FIELD","message":"postalCode is invalid"}"#,
            );
            match err {
                GatewayError::Backend { code, message } => {
                    assert_eq!(code, "INVALID_FIELD");
                    assert_eq!(message, "postalCode is invalid");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_plain_body_falls_back_to_status() {
            let err = backend_error(StatusCode::BAD_GATEWAY, "upstream down");
            match err {
                GatewayError::Backend { code, message } => {
                    assert_eq!(code, "502");
                    assert_eq!(message, "upstream down");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_empty_body_uses_reason() {
            let err = backend_error(StatusCode::SERVICE_UNAVAILABLE, "");
            assert!(err.to_string().contains("Service Unavailable"));
            assert!(err.is_retryable());
        }
    }
}
