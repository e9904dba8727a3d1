// src/vision/model.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of an Image Analysis call. Facets are present only when requested
/// and returned by the service. Every struct keeps fields it does not name
/// in `extra`, so re-serializing reproduces the whole response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects_result: Option<ObjectsResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_result: Option<ReadResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_result: Option<TagsResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectedTag {
    pub name: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagsResult {
    #[serde(default)]
    pub values: Vec<DetectedTag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: i64,
    pub y: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub tags: Vec<DetectedTag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectedObject {
    /// The primary classification is the first tag, if any
    pub fn primary_tag(&self) -> Option<&DetectedTag> {
        self.tags.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectsResult {
    #[serde(default)]
    pub values: Vec<DetectedObject>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTextWord {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<ImagePoint>,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTextLine {
    pub text: String,
    #[serde(default)]
    pub bounding_polygon: Vec<ImagePoint>,
    #[serde(default)]
    pub words: Vec<DetectedTextWord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectedTextBlock {
    #[serde(default)]
    pub lines: Vec<DetectedTextLine>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub blocks: Vec<DetectedTextBlock>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReadResult {
    /// All recognized lines, block by block, in reading order
    pub fn lines(&self) -> impl Iterator<Item = &DetectedTextLine> {
        self.blocks.iter().flat_map(|block| block.lines.iter())
    }
}
