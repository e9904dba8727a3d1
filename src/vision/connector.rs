// src/vision/connector.rs
use super::error::VisionError;
use super::model::AnalysisResult;
use super::request::AnalysisRequest;

/// Trait defining the interface for a synchronous image analysis backend
pub trait VisionConnector: Send + Sync {
    /// Endpoint the connector is bound to
    fn endpoint(&self) -> &str;

    /// Submit one analysis request and return the decoded response
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, VisionError>;
}
