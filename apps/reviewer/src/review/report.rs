use serde::Serialize;

use crate::review::analyzer::KeywordSet;

pub const MAX_KEYWORDS: usize = 10;
pub const NO_KEYWORDS: &str = "No strong keywords found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub keywords: Vec<String>,
    pub grammar_notes: Vec<String>,
    pub suggestions: Vec<String>,
    pub score: u8,
}

/// Builds the final report, keeping the first ten keywords in first-seen order.
pub fn assemble(
    keywords: &KeywordSet,
    grammar_notes: Vec<String>,
    suggestions: Vec<String>,
    score: u8,
) -> FeedbackReport {
    FeedbackReport {
        keywords: keywords.iter().take(MAX_KEYWORDS).map(String::from).collect(),
        grammar_notes,
        suggestions,
        score,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    NeedsWork,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Grade::Excellent,
            60..=84 => Grade::Good,
            _ => Grade::NeedsWork,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::NeedsWork => "Needs work",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent! Your resume is strong and well-structured.",
            Grade::Good => "Good, but there's room for improvement.",
            Grade::NeedsWork => "Needs work. Consider improving grammar, content, and structure.",
        }
    }

    pub fn summary(&self) -> GradeSummary {
        GradeSummary {
            tier: *self,
            label: self.label(),
            message: self.message(),
        }
    }
}

/// Wire form of a grade.
#[derive(Debug, Clone, Serialize)]
pub struct GradeSummary {
    pub tier: Grade,
    pub label: &'static str,
    pub message: &'static str,
}

/// Plain-text rendering of a report, one section per block.
pub fn render_text(report: &FeedbackReport) -> String {
    let grade = Grade::from_score(report.score);
    let mut out = String::new();

    out.push_str("Keywords:\n");
    if report.keywords.is_empty() {
        out.push_str(NO_KEYWORDS);
    } else {
        out.push_str(&report.keywords.join(", "));
    }

    out.push_str("\n\nGrammar:\n");
    for note in &report.grammar_notes {
        out.push_str(note);
        out.push('\n');
    }

    out.push_str("\nSuggestions:\n");
    for suggestion in &report.suggestions {
        out.push_str("- ");
        out.push_str(suggestion);
        out.push('\n');
    }

    out.push_str(&format!(
        "\nYour Resume Score: {} / 100\n{}\n",
        report.score,
        grade.message()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_set(n: usize) -> KeywordSet {
        (0..n).map(|i| format!("kw{i}")).collect()
    }

    fn report(keywords: &[&str], score: u8) -> FeedbackReport {
        FeedbackReport {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            grammar_notes: vec!["Sentence 2 might be incomplete.".to_string()],
            suggestions: vec!["Consider adding a 'Projects' section.".to_string()],
            score,
        }
    }

    #[test]
    fn test_assemble_truncates_keywords() {
        let r = assemble(&keyword_set(14), vec![], vec![], 70);
        assert_eq!(r.keywords.len(), MAX_KEYWORDS);
        assert_eq!(r.keywords[0], "kw0");
        assert_eq!(r.keywords[9], "kw9");
    }

    #[test]
    fn test_assemble_copies_fields() {
        let notes = vec!["Sentence 1 might be incomplete.".to_string()];
        let suggestions = vec!["Add more technical and domain-specific keywords.".to_string()];
        let r = assemble(&keyword_set(3), notes.clone(), suggestions.clone(), 42);
        assert_eq!(r.keywords, vec!["kw0", "kw1", "kw2"]);
        assert_eq!(r.grammar_notes, notes);
        assert_eq!(r.suggestions, suggestions);
        assert_eq!(r.score, 42);
    }

    #[test]
    fn test_grade_tiers() {
        assert_eq!(Grade::from_score(100), Grade::Excellent);
        assert_eq!(Grade::from_score(85), Grade::Excellent);
        assert_eq!(Grade::from_score(84), Grade::Good);
        assert_eq!(Grade::from_score(60), Grade::Good);
        assert_eq!(Grade::from_score(59), Grade::NeedsWork);
        assert_eq!(Grade::from_score(0), Grade::NeedsWork);
    }

    #[test]
    fn test_grade_summary_serializes() {
        let value = serde_json::to_value(Grade::NeedsWork.summary()).unwrap();
        assert_eq!(value["tier"], "needs_work");
        assert_eq!(value["label"], "Needs work");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&report(&["rust", "kafka"], 72));
        assert!(text.contains("rust, kafka"));
        assert!(text.contains("Sentence 2 might be incomplete.\n"));
        assert!(text.contains("- Consider adding a 'Projects' section.\n"));
        assert!(text.contains("Your Resume Score: 72 / 100\nGood, but there's room for improvement."));
    }

    #[test]
    fn test_render_text_without_keywords() {
        let text = render_text(&report(&[], 90));
        assert!(text.contains(NO_KEYWORDS));
        assert!(text.ends_with("Excellent! Your resume is strong and well-structured.\n"));
    }
}
