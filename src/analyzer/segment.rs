use std::sync::LazyLock;

use regex::Regex;

use crate::extract::TextBlock;

/// Header candidates must be longer than this many characters.
const MIN_HEADER_LEN: usize = 5;
/// ...and shorter than this many.
const MAX_HEADER_LEN: usize = 200;
/// Section titles are capped at this length.
const TITLE_CAP: usize = 100;

// All patterns are matched case-insensitively, so the all-caps and
// title-case shapes also fire on lowercase runs. Precision-over-recall:
// a missed header grows the preceding section, a false positive splits
// one. Both degrade, neither is an error.
static HEADER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\d+\.?\s+[A-Z]",                                                            // 1. Numbered
        r"^[A-Z\s]{5,50}$",                                                            // ALL CAPS
        r"^(Abstract|Introduction|Methodology|Results|Discussion|Conclusion|References)",
        r"^(Chapter|Section|Part)\s+\d+",
        r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s*$",                                        // Title Case
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect()
});

/// A contiguous run of blocks under one detected (or synthesized)
/// header. Score and rank start unset and are filled in by ranking.
#[derive(Debug, Clone)]
pub struct Section {
    pub document: String,
    /// Page the section starts on.
    pub page: usize,
    pub title: String,
    pub blocks: Vec<TextBlock>,
    pub relevance_score: f64,
    pub importance_rank: usize,
}

impl Section {
    fn open(block: &TextBlock, title: String) -> Section {
        Section {
            document: block.document.clone(),
            page: block.page,
            title,
            blocks: vec![block.clone()],
            relevance_score: 0.0,
            importance_rank: 0,
        }
    }

    /// All block text joined with single spaces, the form the ranker scores.
    pub fn joined_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Fold the ordered block stream into sections. A header candidate
/// closes the current section and opens a new one; anything else is
/// appended, opening an orphan section if none is open yet.
pub fn segment_blocks(blocks: &[TextBlock]) -> Vec<Section> {
    let (mut sections, open) = blocks.iter().fold(
        (Vec::new(), None::<Section>),
        |(mut done, mut current), block| {
            if is_section_header(&block.text) {
                if let Some(finished) = current.take() {
                    done.push(finished);
                }
                current = Some(Section::open(block, derive_title(&block.text)));
            } else {
                match current.as_mut() {
                    Some(section) => section.blocks.push(block.clone()),
                    None => {
                        current = Some(Section::open(
                            block,
                            format!("Section starting at page {}", block.page),
                        ));
                    }
                }
            }
            (done, current)
        },
    );

    sections.extend(open);
    sections
}

/// Header heuristic: short-ish text matching one of the structural
/// patterns above.
pub fn is_section_header(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if len <= MIN_HEADER_LEN || len >= MAX_HEADER_LEN {
        return false;
    }
    HEADER_PATTERNS.iter().any(|re| re.is_match(text))
}

fn derive_title(text: &str) -> String {
    if text.chars().count() > TITLE_CAP {
        let truncated: String = text.chars().take(TITLE_CAP).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

// ── Tests ──
