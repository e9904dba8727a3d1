// src/vision/client.rs
use log::info;
use reqwest::Client;
use std::time::Duration;

use super::error::VisionError;
use super::model::AnalysisResult;
use super::request::{analyze_url, AnalysisRequest};
use super::{decode_response, default_headers};
use crate::credentials::Credentials;

/// Asynchronous Image Analysis client bound to one endpoint and key.
///
/// The connection pool lives as long as the client; dropping it releases
/// every connection, on success and error paths alike.
pub struct VisionClient {
    endpoint: String,
    client: Client,
}

impl VisionClient {
    pub fn new(credentials: &Credentials, timeout: Option<Duration>) -> Result<Self, VisionError> {
        info!("Initializing Image Analysis client for {}", credentials.endpoint());

        let mut builder = Client::builder().default_headers(default_headers(credentials.api_key())?);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: credentials.endpoint().to_string(),
            client: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one analysis request. This is the single suspension point of a run.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, VisionError> {
        let url = analyze_url(&self.endpoint);
        info!(
            "Sending {} bytes to {} (features: {})",
            request.image_data().len(),
            url,
            request.features_param()
        );

        let response = self
            .client
            .post(&url)
            .query(&request.query()[..])
            .body(request.image_data().to_vec())
            .send()
            .await?;

        let status = response.status();
        info!("Image Analysis responded with status: {}", status);
        let body = response.bytes().await?;

        decode_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::request::VisualFeature;
    use crate::vision::test_utils::{sample_response, TEST_API_KEY};
    use reqwest::StatusCode;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_mock_client(server: &MockServer) -> VisionClient {
        let credentials = Credentials::new(TEST_API_KEY, server.uri());
        VisionClient::new(&credentials, None).expect("should build client")
    }

    #[tokio::test]
    async fn analyze_decodes_every_facet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/computervision/imageanalysis:analyze"))
            .and(query_param("features", "tags,objects,read"))
            .and(header("Ocp-Apim-Subscription-Key", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let result = client
            .analyze(&AnalysisRequest::new(b"jpeg".to_vec(), &VisualFeature::ALL))
            .await
            .unwrap();

        let object = &result.objects_result.as_ref().unwrap().values[0];
        assert_eq!(object.primary_tag().unwrap().name, "cat");
        let lines: Vec<_> = result.read_result.as_ref().unwrap().lines().map(|l| l.text.clone()).collect();
        assert_eq!(lines, vec!["Hello", "World"]);
        assert_eq!(serde_json::to_value(&result).unwrap(), sample_response());
    }

    #[tokio::test]
    async fn requests_only_selected_features() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("features", "read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "modelVersion": "2023-10-01",
                "readResult": { "blocks": [] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let result = client
            .analyze(&AnalysisRequest::new(vec![0], &[VisualFeature::Read]))
            .await
            .unwrap();

        assert!(result.tags_result.is_none());
        assert_eq!(result.read_result.unwrap().lines().count(), 0);
    }

    #[tokio::test]
    async fn quota_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string(
                r#"{"error":{"code":"429","message":"Rate limit is exceeded."}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = client.analyze(&AnalysisRequest::new(vec![0], &[])).await.unwrap_err();

        match err {
            VisionError::Service { status, message, .. } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(message, "Rate limit is exceeded.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let credentials = Credentials::new(TEST_API_KEY, "http://127.0.0.1:1");
        let client = VisionClient::new(&credentials, None).unwrap();
        let err = client.analyze(&AnalysisRequest::new(vec![0], &[])).await.unwrap_err();
        assert!(matches!(err, VisionError::Transport(_)));
    }
}
