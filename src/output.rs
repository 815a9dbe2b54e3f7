use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reduced projection of a ranked section; content is dropped from the
/// external view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: usize,
    pub section_title: String,
    pub importance_rank: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubSection {
    pub document: String,
    pub page_number: usize,
    pub refined_text: String,
    pub relevance_score: f64,
}

/// The result record for one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub sub_section_analysis: Vec<SubSection>,
}

impl AnalysisOutput {
    /// Record produced when a collection's processing fails: empty
    /// extracted data, failure description in the metadata.
    pub fn error_record(message: &str) -> AnalysisOutput {
        AnalysisOutput {
            metadata: Metadata {
                input_documents: Vec::new(),
                persona: String::new(),
                job_to_be_done: String::new(),
                processing_timestamp: timestamp(),
                error: Some(message.to_string()),
            },
            extracted_sections: Vec::new(),
            sub_section_analysis: Vec::new(),
        }
    }
}

/// ISO-8601 processing timestamp.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

pub fn write_output(record: &AnalysisOutput, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ── Tests ──
