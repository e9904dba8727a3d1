// src/vision/mod.rs
pub mod blocking;
pub mod client;
pub mod connector;
pub mod error;
pub mod model;
pub mod request;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;

use self::error::VisionError;
use self::model::AnalysisResult;
use self::request::SUBSCRIPTION_KEY_HEADER;

/// Default headers shared by the async and blocking clients
fn default_headers(api_key: &str) -> Result<HeaderMap, VisionError> {
    let mut key = HeaderValue::from_str(api_key).map_err(|_| VisionError::InvalidKey)?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(SUBSCRIPTION_KEY_HEADER, key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
    Ok(headers)
}

/// Map a finished HTTP exchange to an analysis result
fn decode_response(status: StatusCode, body: &[u8]) -> Result<AnalysisResult, VisionError> {
    if !status.is_success() {
        return Err(VisionError::from_status(status, &String::from_utf8_lossy(body)));
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use serde_json::{json, Value};

    /// Test API key (not a real key).
    pub const TEST_API_KEY: &str = "test-api-key";

    pub fn sample_response() -> Value {
        json!({
            "modelVersion": "2023-10-01",
            "metadata": { "width": 320, "height": 240 },
            "objectsResult": { "values": [
                { "boundingBox": { "x": 4, "y": 8, "w": 120, "h": 90 },
                  "tags": [ { "name": "cat", "confidence": 0.87 } ] }
            ]},
            "readResult": { "blocks": [ { "lines": [
                { "text": "Hello", "boundingPolygon": [], "words": [] },
                { "text": "World", "boundingPolygon": [], "words": [] }
            ]}]},
            "tagsResult": { "values": [ { "name": "animal", "confidence": 0.953 } ] }
        })
    }
}
