use std::sync::LazyLock;

use regex::Regex;

use super::score::Scorer;
use super::segment::Section;

static SENTENCE_DELIM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Sentences grouped per passage.
const SENTENCES_PER_PASSAGE: usize = 4;
/// Reconstructed passages at or under this length are discarded.
const MIN_PASSAGE_LEN: usize = 50;
/// Upper bound on passages returned per section.
const MAX_PASSAGES: usize = 10;

/// A sentence-grouped sub-unit of a section, independently scored.
/// Transient: exists only for the ranked top-K selection.
#[derive(Debug, Clone)]
pub struct Passage {
    pub document: String,
    pub page: usize,
    pub refined_text: String,
    pub relevance_score: f64,
}

/// Split a section's blocks into 4-sentence passages, score each, and
/// return the top 10 by descending score (stable on ties).
pub fn extract_passages(
    section: &Section,
    scorer: &Scorer,
    persona: &str,
    job: &str,
) -> Vec<Passage> {
    let mut passages = Vec::new();

    for block in &section.blocks {
        let sentences: Vec<&str> = SENTENCE_DELIM_RE.split(&block.text).collect();

        for chunk in sentences.chunks(SENTENCES_PER_PASSAGE) {
            let refined = chunk
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(". ");

            if refined.chars().count() > MIN_PASSAGE_LEN {
                let relevance_score = scorer.score(&refined, persona, job);
                passages.push(Passage {
                    document: block.document.clone(),
                    page: block.page,
                    refined_text: refined,
                    relevance_score,
                });
            }
        }
    }

    passages.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    passages.truncate(MAX_PASSAGES);
    passages
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::TextBlock;

    fn section_with(texts: &[&str]) -> Section {
        let blocks: Vec<TextBlock> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextBlock {
                document: "doc.txt".to_string(),
                page: 1,
                para_index: i,
                text: t.to_string(),
                word_count: t.split_whitespace().count(),
            })
            .collect();
        Section {
            document: "doc.txt".to_string(),
            page: 1,
            title: "t".to_string(),
            blocks,
            relevance_score: 0.0,
            importance_rank: 0,
        }
    }

    #[test]
    fn groups_four_sentences_per_passage() {
        let text = "First sentence is here. Second sentence follows it! Third sentence asks a question? \
                    Fourth sentence closes the group. Fifth sentence starts the next passage and \
                    carries enough length to survive the minimum-size filter on its own.";
        let section = section_with(&[text]);
        let passages = extract_passages(&section, &Scorer::default(), "", "");
        assert_eq!(passages.len(), 2);
        assert!(passages.iter().any(|p| p.refined_text.starts_with("First sentence")));
        assert!(passages.iter().any(|p| p.refined_text.starts_with("Fifth sentence")));
    }

    #[test]
    fn short_reconstructions_are_discarded() {
        let section = section_with(&["Tiny. Bits. Here. Now."]);
        let passages = extract_passages(&section, &Scorer::default(), "", "");
        assert!(passages.is_empty());
    }

    #[test]
    fn never_more_than_ten_passages() {
        // 60 sentences -> 15 candidate passages, all well over 50 chars.
        let sentence = "This sentence pads the passage with enough characters to pass the filter. ";
        let text = sentence.repeat(60);
        let section = section_with(&[&text]);
        let passages = extract_passages(&section, &Scorer::default(), "", "");
        assert_eq!(passages.len(), MAX_PASSAGES);
        assert!(passages
            .iter()
            .all(|p| p.refined_text.chars().count() > MIN_PASSAGE_LEN));
    }

    #[test]
    fn passages_sorted_by_descending_score() {
        let relevant = "The methodology and results are analyzed in depth here, \
                        covering the experiment data and findings at length.";
        let filler = "Gardening advice for the mild seasons fills this particular \
                      sentence with unrelated horticultural content.";
        let section = section_with(&[filler, relevant]);
        let passages =
            extract_passages(&section, &Scorer::default(), "researcher", "analyze the methodology");
        assert_eq!(passages.len(), 2);
        assert!(passages[0].relevance_score >= passages[1].relevance_score);
        assert!(passages[0].refined_text.contains("methodology"));
    }

    #[test]
    fn sentences_rejoined_with_dot_space() {
        let section = section_with(&[
            "Alpha beta gamma delta epsilon zeta! Eta theta iota kappa lambda mu?",
        ]);
        let passages = extract_passages(&section, &Scorer::default(), "", "");
        assert_eq!(passages.len(), 1);
        assert_eq!(
            passages[0].refined_text,
            "Alpha beta gamma delta epsilon zeta. Eta theta iota kappa lambda mu"
        );
    }
}
