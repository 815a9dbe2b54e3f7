use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

const JOB_OVERLAP_WEIGHT: f64 = 40.0;
const PERSONA_WEIGHT: f64 = 30.0;
const CONTEXT_POINTS: f64 = 5.0;
const LENGTH_BONUS_CAP: f64 = 10.0;
const LENGTH_BONUS_THRESHOLD: usize = 100;
const MAX_SCORE: f64 = 100.0;

/// Canonical reader types a free-text persona label is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaType {
    Researcher,
    Student,
    Analyst,
    Manager,
    Developer,
    Consultant,
}

/// Keyword tables driving the scorer. Immutable once constructed;
/// tests can inject alternates via `Scorer::new`.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    /// Markers mapping a persona label onto a type. Checked in order,
    /// first match wins.
    pub persona_markers: Vec<(PersonaType, Vec<String>)>,
    /// Focus vocabulary per type, matched as substrings of the text.
    pub persona_keywords: Vec<(PersonaType, Vec<String>)>,
    pub academic_keywords: Vec<String>,
    pub business_keywords: Vec<String>,
    /// Job-description words that switch on the academic/business bonus.
    pub academic_triggers: Vec<String>,
    pub business_triggers: Vec<String>,
}

fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        use PersonaType::*;
        KeywordTables {
            persona_markers: vec![
                (Researcher, list(&["researcher", "scientist", "phd", "academic"])),
                (Student, list(&["student", "undergraduate", "graduate", "learner"])),
                (Analyst, list(&["analyst", "investment", "financial", "business analyst"])),
                (Manager, list(&["manager", "director", "executive", "leader"])),
                (Developer, list(&["developer", "engineer", "programmer", "technical"])),
                (Consultant, list(&["consultant", "advisor", "specialist"])),
            ],
            persona_keywords: vec![
                (Researcher, list(&[
                    "methodology", "results", "analysis", "experiment", "data",
                    "study", "research", "findings", "hypothesis", "literature",
                ])),
                (Student, list(&[
                    "definition", "example", "concept", "theory", "principle",
                    "basics", "fundamentals", "explanation", "overview", "summary",
                ])),
                (Analyst, list(&[
                    "trend", "performance", "metric", "revenue", "growth",
                    "market", "financial", "investment", "risk", "return",
                ])),
                (Manager, list(&[
                    "strategy", "implementation", "team", "project", "planning",
                    "execution", "leadership", "management", "objectives", "goals",
                ])),
                (Developer, list(&[
                    "code", "implementation", "algorithm", "technical", "system",
                    "architecture", "framework", "api", "database", "optimization",
                ])),
                (Consultant, list(&[
                    "recommendation", "solution", "best practice", "assessment",
                    "evaluation", "improvement", "process", "efficiency", "optimization",
                ])),
            ],
            academic_keywords: list(&[
                "abstract", "introduction", "methodology", "results",
                "discussion", "conclusion", "references", "literature review",
            ]),
            business_keywords: list(&[
                "executive summary", "financial", "revenue", "profit",
                "market", "strategy", "competitive", "analysis",
            ]),
            academic_triggers: list(&["research", "study", "academic", "paper"]),
            business_triggers: list(&["business", "financial", "market", "revenue"]),
        }
    }
}

/// Lexical relevance scorer. Pure and deterministic: the same
/// (text, persona, job) triple always yields the same score in [0, 100].
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    tables: KeywordTables,
}

impl Scorer {
    pub fn new(tables: KeywordTables) -> Self {
        Scorer { tables }
    }

    /// Score `text` against the persona/job context. Four additive
    /// factors: job-word overlap (x40), persona keyword coverage (x30),
    /// academic/business context hits (+5 each), and a length bonus
    /// (max 10). Clamped to 100; every factor is non-negative.
    pub fn score(&self, text: &str, persona: &str, job: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let persona_lower = persona.to_lowercase();
        let job_lower = job.to_lowercase();

        let mut score = 0.0;

        // 1. Direct word overlap with the job description.
        let job_words: HashSet<&str> =
            WORD_RE.find_iter(&job_lower).map(|m| m.as_str()).collect();
        let text_words: HashSet<&str> =
            WORD_RE.find_iter(&text_lower).map(|m| m.as_str()).collect();
        if !job_words.is_empty() {
            let common = job_words.intersection(&text_words).count();
            score += common as f64 / job_words.len() as f64 * JOB_OVERLAP_WEIGHT;
        }

        // 2. Coverage of the matched persona type's vocabulary.
        if let Some(ptype) = self.persona_type(&persona_lower) {
            let keywords = self
                .tables
                .persona_keywords
                .iter()
                .find(|(t, _)| *t == ptype)
                .map(|(_, words)| words.as_slice())
                .unwrap_or_default();
            if !keywords.is_empty() {
                let hits = keywords
                    .iter()
                    .filter(|w| text_lower.contains(w.as_str()))
                    .count();
                score += hits as f64 / keywords.len() as f64 * PERSONA_WEIGHT;
            }
        }

        // 3. Academic and business context bonuses. Independent checks;
        // both may fire for the same job.
        if contains_any(&job_lower, &self.tables.academic_triggers) {
            let hits = count_hits(&text_lower, &self.tables.academic_keywords);
            score += hits as f64 * CONTEXT_POINTS;
        }
        if contains_any(&job_lower, &self.tables.business_triggers) {
            let hits = count_hits(&text_lower, &self.tables.business_keywords);
            score += hits as f64 * CONTEXT_POINTS;
        }

        // 4. Longer passages tend to carry more information.
        let word_count = text.split_whitespace().count();
        if word_count > LENGTH_BONUS_THRESHOLD {
            score += (word_count as f64 / LENGTH_BONUS_THRESHOLD as f64).min(LENGTH_BONUS_CAP);
        }

        score.min(MAX_SCORE)
    }

    /// Map a lowercased persona label to its canonical type, if any
    /// marker matches as a substring. First matching type wins.
    pub fn persona_type(&self, persona_lower: &str) -> Option<PersonaType> {
        self.tables
            .persona_markers
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| persona_lower.contains(m.as_str())))
            .map(|(ptype, _)| *ptype)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

fn count_hits(haystack: &str, needles: &[String]) -> usize {
    needles.iter().filter(|n| haystack.contains(n.as_str())).count()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> Scorer {
        Scorer::default()
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(scorer().score("", "", ""), 0.0);
        assert_eq!(scorer().score("some text here", "", ""), 0.0);
        assert_eq!(scorer().score("", "researcher", "find results"), 0.0);
    }

    #[test]
    fn score_is_bounded() {
        // Saturate every factor: full job overlap, full researcher
        // vocabulary, all academic keywords, >1000 words.
        let loaded = "research study academic paper abstract introduction \
                      methodology results discussion conclusion references \
                      literature review analysis experiment data findings hypothesis ";
        let text = loaded.repeat(60);
        let s = scorer().score(&text, "PhD Researcher", &text);
        assert_eq!(s, 100.0);
    }

    #[test]
    fn persona_type_first_match_wins() {
        let s = scorer();
        assert_eq!(
            s.persona_type("phd researcher in computational biology"),
            Some(PersonaType::Researcher)
        );
        // "business analyst leader" contains both analyst and manager
        // markers; analyst is checked first.
        assert_eq!(s.persona_type("business analyst leader"), Some(PersonaType::Analyst));
        assert_eq!(s.persona_type("undergraduate learner"), Some(PersonaType::Student));
        assert_eq!(s.persona_type("ship captain"), None);
    }

    #[test]
    fn job_overlap_weight() {
        // Text repeats the job verbatim: overlap fraction 1.0 -> 40.
        let job = "summarize quarterly shipping manifests";
        let s = scorer().score(job, "", job);
        assert_eq!(s, 40.0);
    }

    #[test]
    fn methodology_block_outscores_unrelated_block() {
        let persona = "PhD Researcher in Computational Biology";
        let job = "Prepare a literature review on methodology";
        let relevant =
            "The methodology section describes our experimental results and findings";
        let unrelated =
            "The cafeteria menu rotates weekly between soups and sandwiches daily";
        let s = scorer();
        assert!(s.score(relevant, persona, job) > s.score(unrelated, persona, job));
    }

    #[test]
    fn academic_and_business_bonuses_are_independent() {
        let s = scorer();
        let text = "financial results";
        // "market research" trips both trigger sets; "results" is an
        // academic keyword and "financial" a business keyword.
        let both = s.score(text, "", "market research");
        let academic_only = s.score(text, "", "research");
        let business_only = s.score(text, "", "market");
        assert!(both > academic_only);
        assert!(both > business_only);
    }

    #[test]
    fn length_bonus_requires_over_100_words() {
        let s = scorer();
        let filler_100 = "zyx ".repeat(100);
        let filler_300 = "zyx ".repeat(300);
        assert_eq!(s.score(&filler_100, "", ""), 0.0);
        assert_eq!(s.score(&filler_300, "", ""), 3.0);
    }

    #[test]
    fn injected_tables_replace_defaults() {
        let mut tables = KeywordTables::default();
        tables.persona_markers = vec![(PersonaType::Developer, list(&["ferris"]))];
        let s = Scorer::new(tables);
        assert_eq!(s.persona_type("ferris the crab"), Some(PersonaType::Developer));
        assert_eq!(s.persona_type("phd researcher"), None);
    }
}
