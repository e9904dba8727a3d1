// src/vision/request.rs
use clap::ValueEnum;

pub const API_VERSION: &str = "2023-10-01";
pub const ANALYZE_PATH: &str = "computervision/imageanalysis:analyze";
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A category of visual analysis requested per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisualFeature {
    Tags,
    Objects,
    Read,
}

impl VisualFeature {
    pub const ALL: [VisualFeature; 3] = [VisualFeature::Tags, VisualFeature::Objects, VisualFeature::Read];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualFeature::Tags => "tags",
            VisualFeature::Objects => "objects",
            VisualFeature::Read => "read",
        }
    }
}

/// Image payload plus the ordered set of features to request
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image_data: Vec<u8>,
    features: Vec<VisualFeature>,
}

impl AnalysisRequest {
    /// Duplicate features are dropped, first occurrence wins. An empty list means all.
    pub fn new(image_data: Vec<u8>, features: &[VisualFeature]) -> Self {
        let requested: &[VisualFeature] = if features.is_empty() {
            &VisualFeature::ALL
        } else {
            features
        };

        let mut unique = Vec::with_capacity(requested.len());
        for feature in requested {
            if !unique.contains(feature) {
                unique.push(*feature);
            }
        }

        Self {
            image_data,
            features: unique,
        }
    }

    pub fn image_data(&self) -> &[u8] {
        &self.image_data
    }

    pub fn features_param(&self) -> String {
        self.features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("api-version", API_VERSION.to_string()),
            ("features", self.features_param()),
        ]
    }
}

/// Full analyze URL for an endpoint, without the query string
pub fn analyze_url(endpoint: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), ANALYZE_PATH)
}
