//! Readability insights: Flesch Reading Ease plus sentence-length and
//! passive-voice signals for each prose block of a resume.
//!
//! Syllables are vowel groups and passive voice is an auxiliary followed by
//! an `-ed`/`-en` word, so "was amazed" counts as passive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

static SENTENCE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence regex"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").expect("valid word regex"));
static VOWEL_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]{1,2}").expect("valid vowel regex"));
static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(am|is|are|was|were|be|been|being)\b\s+\b(\w+ed|\w+en)\b")
        .expect("valid passive voice regex")
});

/// Sentences above this word count are flagged as long.
pub const LONG_SENTENCE_WORDS: usize = 25;
const MAX_WORDS_PER_SENTENCE: u32 = 22;
const MAX_SYLLABLES_PER_WORD: f64 = 1.7;
const MIN_COMFORTABLE_EASE: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityMetrics {
    /// Flesch Reading Ease, 0 – 100.
    pub reading_ease: u32,
    pub words_per_sentence: u32,
    /// Two decimal places.
    pub syllables_per_word: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityInsight {
    pub section: String,
    pub metrics: ReadabilityMetrics,
    pub long_sentences: usize,
    pub passive_voice: bool,
    pub suggestions: Vec<String>,
}

/// A labelled piece of prose pulled out of a resume.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub section: String,
    pub text: String,
}

pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK_RE
        .split(text)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Vowel-group syllable estimate. Returns 0 only for words with no letters.
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut syllables = VOWEL_GROUP_RE.find_iter(&letters).count();
    if letters.ends_with('e') {
        syllables = syllables.saturating_sub(1).max(1);
    }
    syllables.max(1)
}

pub fn is_passive(text: &str) -> bool {
    PASSIVE_RE.is_match(text)
}

/// Flesch metrics for a block of text. Empty counts are treated as 1 so the
/// formula never divides by zero.
pub fn flesch(text: &str) -> ReadabilityMetrics {
    let sentence_count = split_sentences(text).len().max(1) as f64;
    let ws = words(text);
    let word_count = ws.len().max(1) as f64;
    let syllable_count = ws.iter().map(|w| count_syllables(w)).sum::<usize>().max(1) as f64;

    let words_per_sentence = word_count / sentence_count;
    let syllables_per_word = syllable_count / word_count;
    let ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;

    ReadabilityMetrics {
        reading_ease: ease.round().clamp(0.0, 100.0) as u32,
        words_per_sentence: words_per_sentence.round() as u32,
        syllables_per_word: (syllables_per_word * 100.0).round() / 100.0,
    }
}

pub fn count_long_sentences(text: &str) -> usize {
    split_sentences(text)
        .into_iter()
        .filter(|s| words(s).len() > LONG_SENTENCE_WORDS)
        .count()
}

pub fn analyze_block(block: &TextBlock) -> ReadabilityInsight {
    let metrics = flesch(&block.text);
    let long_sentences = count_long_sentences(&block.text);
    let passive_voice = is_passive(&block.text);

    let mut suggestions = Vec::new();
    if metrics.words_per_sentence > MAX_WORDS_PER_SENTENCE {
        suggestions.push("Use shorter sentences (aim 12-18 words).".to_string());
    }
    if metrics.syllables_per_word > MAX_SYLLABLES_PER_WORD {
        suggestions.push("Prefer simpler wording and reduce jargon.".to_string());
    }
    if long_sentences > 0 {
        suggestions.push(format!(
            "Split {long_sentences} long sentence(s) into concise bullets."
        ));
    }
    if passive_voice {
        suggestions
            .push("Use active voice (Led, Built, Delivered) instead of passive.".to_string());
    }
    if suggestions.is_empty() && metrics.reading_ease < MIN_COMFORTABLE_EASE {
        suggestions.push("Tighten phrasing to improve clarity.".to_string());
    }

    ReadabilityInsight {
        section: block.section.clone(),
        metrics,
        long_sentences,
        passive_voice,
        suggestions,
    }
}

/// Collects the prose blocks worth scoring: summary, each experience
/// (title, company, bullets) and each project (name, description).
pub fn text_blocks(resume: &ResumeData) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    if !resume.summary.is_empty() {
        blocks.push(TextBlock {
            section: "Summary".to_string(),
            text: resume.summary.clone(),
        });
    }

    for (idx, exp) in resume.experience.iter().enumerate() {
        let text = join_present(&[&exp.job_title, &exp.company, &exp.responsibilities]);
        if !text.is_empty() {
            blocks.push(TextBlock {
                section: format!("Experience #{}", idx + 1),
                text,
            });
        }
    }

    for (idx, project) in resume.projects.iter().enumerate() {
        let text = join_present(&[&project.name, &project.description]);
        if !text.is_empty() {
            blocks.push(TextBlock {
                section: format!("Project #{}", idx + 1),
                text,
            });
        }
    }

    blocks
}

fn join_present(parts: &[&String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(". ")
}

pub fn analyze_readability(resume: &ResumeData) -> Vec<ReadabilityInsight> {
    text_blocks(resume).iter().map(analyze_block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RESPONSIBLE_SUMMARY: &str = "I am responsible for managing teams.";

    #[test]
    fn test_syllables_basic() {
        assert_eq!(count_syllables("team"), 1);
        assert_eq!(count_syllables("managing"), 3);
        assert_eq!(count_syllables("responsible"), 3);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("I"), 1);
    }

    #[test]
    fn test_syllables_floor_and_empty() {
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("''"), 0);
    }

    #[test]
    fn test_sentence_split_requires_whitespace_after_terminator() {
        assert_eq!(split_sentences("One. Two! Three?").len(), 3);
        assert_eq!(split_sentences("Node.js rocks.").len(), 1);
    }

    #[test]
    fn test_responsible_summary_metrics() {
        let sentences = split_sentences(RESPONSIBLE_SUMMARY);
        assert_eq!(sentences.len(), 1);
        assert_eq!(words(sentences[0]).len(), 6);
        assert_eq!(count_long_sentences(RESPONSIBLE_SUMMARY), 0);

        // 6 words, 10 syllables, 1 sentence → 59.745
        let m = flesch(RESPONSIBLE_SUMMARY);
        assert_eq!(m.reading_ease, 60);
        assert_eq!(m.words_per_sentence, 6);
        assert!((m.syllables_per_word - 1.67).abs() < 1e-9);
    }

    #[test]
    fn test_responsible_summary_is_not_passive() {
        // "am responsible": the participle must end in -ed or -en.
        assert!(!is_passive(RESPONSIBLE_SUMMARY));
    }

    #[test]
    fn test_passive_detection() {
        assert!(is_passive("The migration was completed ahead of schedule."));
        assert!(is_passive("Engineers have BEEN CHOSEN for the pilot."));
        assert!(!is_passive("Led the migration ahead of schedule."));
    }

    #[test]
    fn test_passive_false_positive_is_kept() {
        assert!(is_passive("I was amazed by the results."));
    }

    #[test]
    fn test_reading_ease_clamped() {
        assert_eq!(flesch("").reading_ease, 100);
        let dense = "Internationalization interoperability institutionalization characterization.";
        assert_eq!(flesch(dense).reading_ease, 0);
    }

    #[test]
    fn test_long_sentence_flagged_with_suggestion() {
        let long = vec!["word"; 30].join(" ") + ".";
        let insight = analyze_block(&TextBlock {
            section: "Summary".to_string(),
            text: long,
        });
        assert_eq!(insight.long_sentences, 1);
        assert!(insight
            .suggestions
            .contains(&"Split 1 long sentence(s) into concise bullets.".to_string()));
        assert!(insight
            .suggestions
            .contains(&"Use shorter sentences (aim 12-18 words).".to_string()));
    }

    #[test]
    fn test_clean_block_has_no_suggestions() {
        let insight = analyze_block(&TextBlock {
            section: "Summary".to_string(),
            text: RESPONSIBLE_SUMMARY.to_string(),
        });
        assert!(insight.suggestions.is_empty());
        assert!(!insight.passive_voice);
    }

    #[test]
    fn test_tighten_phrasing_only_when_nothing_else_fired() {
        let insight = analyze_block(&TextBlock {
            section: "Summary".to_string(),
            text: "Managed operational budgets.".to_string(),
        });
        // 3 words, 10 syllables: ease clamps to 0, syllables/word is 3.33
        assert!(insight
            .suggestions
            .contains(&"Prefer simpler wording and reduce jargon.".to_string()));
        assert!(!insight
            .suggestions
            .contains(&"Tighten phrasing to improve clarity.".to_string()));
    }

    #[test]
    fn test_text_blocks_from_resume() {
        let resume = ResumeData::from_value(&json!({
            "summary": "Backend engineer.",
            "experience": [
                {"jobTitle": "Engineer", "company": "Acme", "responsibilities": "Built APIs"},
                {},
                {"company": "Globex"}
            ],
            "projects": [{"name": "Engine", "description": "A parser"}]
        }));
        let blocks = text_blocks(&resume);
        let sections: Vec<&str> = blocks.iter().map(|b| b.section.as_str()).collect();
        assert_eq!(
            sections,
            vec!["Summary", "Experience #1", "Experience #3", "Project #1"]
        );
        assert_eq!(blocks[1].text, "Engineer. Acme. Built APIs");
        assert_eq!(blocks[3].text, "Engine. A parser");
    }

    #[test]
    fn test_empty_resume_has_no_insights() {
        assert!(analyze_readability(&ResumeData::default()).is_empty());
    }

    #[test]
    fn test_insight_serializes_camel_case() {
        let insight = analyze_block(&TextBlock {
            section: "Summary".to_string(),
            text: RESPONSIBLE_SUMMARY.to_string(),
        });
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["metrics"]["readingEase"], 60);
        assert_eq!(json["passiveVoice"], false);
        assert_eq!(json["longSentences"], 0);
    }
}
