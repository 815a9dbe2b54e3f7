pub mod passages;
pub mod rank;
pub mod score;
pub mod segment;

use std::path::Path;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::{CollectionConfig, DOCS_DIR};
use crate::extract::{self, TextBlock};
use crate::output::{self, AnalysisOutput, ExtractedSection, Metadata, SubSection};

use passages::extract_passages;
use rank::rank_sections;
use score::Scorer;
use segment::segment_blocks;

/// Sections kept in `extracted_sections`.
const TOP_SECTIONS: usize = 20;
/// Only sections ranked at or above this qualify for passage extraction.
const PASSAGE_RANK_CUTOFF: usize = 10;
/// Passages kept per qualifying section.
const PASSAGES_PER_SECTION: usize = 3;

/// Run the full pipeline for one collection. Failures are contained
/// here: the caller always gets a record, error-marked if processing
/// broke. Nothing propagates past this boundary.
pub fn run_collection(
    config: &CollectionConfig,
    collection_dir: &Path,
    scorer: &Scorer,
) -> AnalysisOutput {
    match process_collection(config, collection_dir, scorer) {
        Ok(record) => record,
        Err(e) => {
            error!("Error processing document collection: {e:#}");
            AnalysisOutput::error_record(&format!("{e:#}"))
        }
    }
}

fn process_collection(
    config: &CollectionConfig,
    collection_dir: &Path,
    scorer: &Scorer,
) -> Result<AnalysisOutput> {
    info!("Processing collection for persona: {}", config.persona);
    info!("Job: {}", config.job_to_be_done);

    let blocks = collect_blocks(config, collection_dir)?;
    Ok(analyze_blocks(
        &blocks,
        &config.persona,
        &config.job_to_be_done,
        &config.documents,
        scorer,
    ))
}

/// Extract blocks for every listed document, in list order. A missing
/// document is a warn-and-skip, not a failure.
pub fn collect_blocks(config: &CollectionConfig, collection_dir: &Path) -> Result<Vec<TextBlock>> {
    let mut blocks = Vec::new();
    for name in &config.documents {
        let path = collection_dir.join(DOCS_DIR).join(name);
        if path.exists() {
            info!("Processing document: {name}");
            blocks.extend(extract::extract_document(&path)?);
        } else {
            warn!("Document not found: {}", path.display());
        }
    }
    Ok(blocks)
}

/// The pure pipeline: segment the cross-document block stream, rank all
/// sections, project the top 20, and extract passages for ranks 1-10.
pub fn analyze_blocks(
    blocks: &[TextBlock],
    persona: &str,
    job: &str,
    input_documents: &[String],
    scorer: &Scorer,
) -> AnalysisOutput {
    let mut sections = segment_blocks(blocks);
    rank_sections(&mut sections, scorer, persona, job);

    let mut extracted_sections = Vec::new();
    let mut sub_section_analysis = Vec::new();

    for section in sections.iter().take(TOP_SECTIONS) {
        extracted_sections.push(ExtractedSection {
            document: section.document.clone(),
            page_number: section.page,
            section_title: section.title.clone(),
            importance_rank: section.importance_rank,
        });

        if section.importance_rank <= PASSAGE_RANK_CUTOFF {
            let top = extract_passages(section, scorer, persona, job);
            sub_section_analysis.extend(top.into_iter().take(PASSAGES_PER_SECTION).map(|p| {
                SubSection {
                    document: p.document,
                    page_number: p.page,
                    refined_text: p.refined_text,
                    relevance_score: p.relevance_score,
                }
            }));
        }
    }

    AnalysisOutput {
        metadata: Metadata {
            input_documents: input_documents.to_vec(),
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            processing_timestamp: output::timestamp(),
            error: None,
        },
        extracted_sections,
        sub_section_analysis,
    }
}

// ── Tests ──
