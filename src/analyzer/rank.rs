use super::score::Scorer;
use super::segment::Section;

/// Score every section against the persona/job context and assign dense
/// importance ranks 1..N. Descending by score, ties broken by input
/// order (stable sort). Mutates in place; never filters.
pub fn rank_sections(sections: &mut Vec<Section>, scorer: &Scorer, persona: &str, job: &str) {
    for section in sections.iter_mut() {
        section.relevance_score = scorer.score(&section.joined_text(), persona, job);
    }

    sections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

    for (i, section) in sections.iter_mut().enumerate() {
        section.importance_rank = i + 1;
    }
}

// ── Tests ──
