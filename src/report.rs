// src/report.rs
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::vision::model::AnalysisResult;

pub const DEFAULT_OUTPUT_FILE: &str = "analysis_result.json";

/// Render the human-readable summary printed after an analysis.
/// A section appears only when its facet is present in the result.
pub fn format_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str("\nImage Analysis Results:\n");

    if let Some(objects) = &result.objects_result {
        out.push_str("\nObjects Detected:\n");
        for tag in objects.values.iter().filter_map(|o| o.primary_tag()) {
            out.push_str(&format!("  - {} (confidence: {:.2})\n", tag.name, tag.confidence));
        }
    }

    if let Some(read) = &result.read_result {
        out.push_str("\nText Found in Image:\n");
        for line in read.lines() {
            out.push_str(&format!("  - {}\n", line.text));
        }
    }

    if let Some(tags) = &result.tags_result {
        out.push_str("\nTags:\n");
        for tag in &tags.values {
            out.push_str(&format!("  - {} (confidence: {:.2})\n", tag.name, tag.confidence));
        }
    }

    out
}

/// Write the full result as 4-space indented JSON, replacing any existing file
pub fn save_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    result
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize analysis result to '{}'", path.display()))?;
    writer.flush()?;

    info!("Analysis result written to {}", path.display());
    Ok(())
}
