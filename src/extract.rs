use std::path::Path;

use anyhow::{Context, Result};

/// Paragraphs at or under this many characters are dropped as noise
/// (page furniture, stray captions, line fragments).
pub const MIN_BLOCK_LEN: usize = 50;

/// One paragraph of extracted document text, tagged with its origin.
/// Blocks are ordered by (document, page, paragraph) and that order is
/// load-bearing: segmentation relies on sequential adjacency.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub document: String,
    /// 1-based page number.
    pub page: usize,
    /// Position among the page's non-empty paragraphs.
    pub para_index: usize,
    pub text: String,
    pub word_count: usize,
}

/// Read a document's plain-text rendition and split it into blocks.
/// Pages are separated by form feeds, paragraphs by blank lines.
pub fn extract_document(path: &Path) -> Result<Vec<TextBlock>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(blocks_from_text(&name, &raw))
}

/// Split raw document text into filtered, ordered blocks.
pub fn blocks_from_text(document: &str, raw: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    for (page_idx, page) in raw.split('\x0c').enumerate() {
        let paragraphs = page
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .enumerate();

        for (para_idx, paragraph) in paragraphs {
            if paragraph.chars().count() > MIN_BLOCK_LEN {
                blocks.push(TextBlock {
                    document: document.to_string(),
                    page: page_idx + 1,
                    para_index: para_idx,
                    text: paragraph.to_string(),
                    word_count: paragraph.split_whitespace().count(),
                });
            }
        }
    }

    blocks
}

// ── Tests ──
