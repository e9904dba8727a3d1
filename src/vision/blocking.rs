// src/vision/blocking.rs
use log::info;
use reqwest::blocking::Client;
use std::time::Duration;

use super::connector::VisionConnector;
use super::error::VisionError;
use super::model::AnalysisResult;
use super::request::{analyze_url, AnalysisRequest};
use super::{decode_response, default_headers};
use crate::credentials::Credentials;

//Image Analysis client without an async runtime
pub struct BlockingVisionClient {
    endpoint: String,
    client: Client,
}

impl BlockingVisionClient {
    pub fn new(credentials: &Credentials, timeout: Option<Duration>) -> Result<Self, VisionError> {
        info!("Initializing blocking Image Analysis client for {}", credentials.endpoint());

        //None disables the blocking client's 30s default timeout
        let client = Client::builder()
            .default_headers(default_headers(credentials.api_key())?)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: credentials.endpoint().to_string(),
            client,
        })
    }
}

impl VisionConnector for BlockingVisionClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, VisionError> {
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
            .send()?;

        let status = response.status();
        info!("Image Analysis responded with status: {}", status);
        let body = response.bytes()?;

        decode_response(status, &body)
    }
}
