use std::fmt;

use serde::Serialize;

use crate::nlp::Sentence;
use crate::review::analyzer::Analysis;

/// Sections every résumé is expected to mention, in suggestion order.
pub const EXPECTED_SECTIONS: [&str; 5] = [
    "education",
    "experience",
    "skills",
    "projects",
    "certifications",
];

pub const NO_GRAMMAR_ISSUES: &str = "No major grammar issues detected.";
pub const SHORT_RESUME: &str = "Your resume is very short. Consider expanding details.";
pub const LONG_RESUME: &str =
    "Your resume is quite long. Aim for concise content (ideally 1–2 pages).";
pub const FEW_KEYWORDS: &str = "Add more technical and domain-specific keywords.";

#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    pub keyword_points: u32,
    pub keyword_cap: usize,
    pub section_points: u32,
    pub grammar_points: u32,
    /// Issue count at which the grammar component bottoms out.
    pub grammar_allowance: usize,
    pub max_grammar_notes: usize,
    /// Sentences with more tokens than this are flagged as too long.
    pub long_sentence_tokens: usize,
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    pub length_bonus: u32,
    pub short_resume_words: usize,
    pub long_resume_words: usize,
    pub min_keywords: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            keyword_points: 2,
            keyword_cap: 10,
            section_points: 10,
            grammar_points: 2,
            grammar_allowance: 10,
            max_grammar_notes: 5,
            long_sentence_tokens: 30,
            ideal_min_words: 300,
            ideal_max_words: 800,
            length_bonus: 10,
            short_resume_words: 100,
            long_resume_words: 1000,
            min_keywords: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarNote {
    Incomplete { sentence: usize },
    TooLong { sentence: usize },
}

impl fmt::Display for GrammarNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarNote::Incomplete { sentence } => {
                write!(f, "Sentence {sentence} might be incomplete.")
            }
            GrammarNote::TooLong { sentence } => {
                write!(f, "Sentence {sentence} is too long. Consider splitting.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub keywords: u32,
    pub sections: u32,
    pub grammar: u32,
    pub length_bonus: u32,
    pub total: u8,
}

#[derive(Debug, Clone)]
pub struct Scoring {
    /// Rendered notes; a single "no issues" line when `issues` is empty.
    pub grammar_notes: Vec<String>,
    pub issues: Vec<GrammarNote>,
    pub suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub score: u8,
}

/// Grammar notes, suggestions and the composite score for one analysis.
pub fn score_and_suggest(analysis: &Analysis, text: &str, policy: &ScoringPolicy) -> Scoring {
    let issues = check_grammar(&analysis.sentences, policy);
    let grammar_notes = if issues.is_empty() {
        vec![NO_GRAMMAR_ISSUES.to_string()]
    } else {
        issues.iter().map(ToString::to_string).collect()
    };

    let missing = missing_sections(&text.to_lowercase());
    let suggestions = suggest(&missing, analysis.word_count, analysis.keywords.len(), policy);
    let breakdown = compute_score(
        analysis.keywords.len(),
        missing.len(),
        issues.len(),
        analysis.word_count,
        policy,
    );

    Scoring {
        grammar_notes,
        issues,
        suggestions,
        score: breakdown.total,
        breakdown,
    }
}

/// Flags verbless and overlong sentences, stopping once the note cap is hit.
pub fn check_grammar(sentences: &[Sentence], policy: &ScoringPolicy) -> Vec<GrammarNote> {
    let mut notes = Vec::new();
    for (i, sentence) in sentences.iter().enumerate() {
        let number = i + 1;
        if !sentence.has_verb() {
            notes.push(GrammarNote::Incomplete { sentence: number });
        } else if sentence.len() > policy.long_sentence_tokens {
            notes.push(GrammarNote::TooLong { sentence: number });
        }
        if notes.len() >= policy.max_grammar_notes {
            break;
        }
    }
    notes
}

/// Expected sections not found as substrings of the lowercased text.
pub fn missing_sections(lower_text: &str) -> Vec<&'static str> {
    EXPECTED_SECTIONS
        .iter()
        .copied()
        .filter(|section| !lower_text.contains(section))
        .collect()
}

pub fn suggest(
    missing: &[&str],
    word_count: usize,
    keyword_count: usize,
    policy: &ScoringPolicy,
) -> Vec<String> {
    let mut suggestions: Vec<String> = missing
        .iter()
        .map(|section| format!("Consider adding a '{}' section.", capitalize(section)))
        .collect();

    if word_count < policy.short_resume_words {
        suggestions.push(SHORT_RESUME.to_string());
    } else if word_count > policy.long_resume_words {
        suggestions.push(LONG_RESUME.to_string());
    }
    if keyword_count < policy.min_keywords {
        suggestions.push(FEW_KEYWORDS.to_string());
    }
    suggestions
}

/// Composite score: keyword, section and grammar components plus a length
/// bonus, clamped to [0, 100].
pub fn compute_score(
    keyword_count: usize,
    missing_count: usize,
    issue_count: usize,
    word_count: usize,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    let keywords = points(keyword_count.min(policy.keyword_cap), policy.keyword_points);
    let present = EXPECTED_SECTIONS.len().saturating_sub(missing_count);
    let sections = points(present, policy.section_points);
    let grammar = points(
        policy.grammar_allowance.saturating_sub(issue_count),
        policy.grammar_points,
    );
    let length_bonus = if (policy.ideal_min_words..=policy.ideal_max_words).contains(&word_count) {
        policy.length_bonus
    } else {
        0
    };

    let sum = keywords
        .saturating_add(sections)
        .saturating_add(grammar)
        .saturating_add(length_bonus);

    ScoreBreakdown {
        keywords,
        sections,
        grammar,
        length_bonus,
        total: sum.clamp(0, 100) as u8,
    }
}

fn points(count: usize, weight: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(weight)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
