//! Résumé review: extraction, analysis, scoring and report assembly.
//!
//! `review_document` is synchronous and CPU-bound. The HTTP layer runs it on
//! the blocking pool.

pub mod analyzer;
pub mod handlers;
pub mod report;
pub mod scoring;

use serde::Serialize;
use tracing::debug;

use crate::extraction::{extract_text, NoTextError};
use crate::nlp::LanguagePipeline;
use crate::review::analyzer::analyze;
use crate::review::report::{assemble, FeedbackReport, Grade};
use crate::review::scoring::{score_and_suggest, ScoreBreakdown, ScoringPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub report: FeedbackReport,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    pub stats: ReviewStats,
}

/// Extracts, analyzes and scores one uploaded PDF.
///
/// Extraction failure stops the run before any analysis happens.
pub fn review_document(
    pipeline: &dyn LanguagePipeline,
    policy: &ScoringPolicy,
    raw: &[u8],
) -> Result<Review, NoTextError> {
    let extracted = extract_text(raw)?;
    Ok(review_text(
        pipeline,
        policy,
        extracted.as_str(),
        extracted.page_count(),
    ))
}

pub(crate) fn review_text(
    pipeline: &dyn LanguagePipeline,
    policy: &ScoringPolicy,
    text: &str,
    page_count: usize,
) -> Review {
    let analysis = analyze(pipeline, text);
    let scoring = score_and_suggest(&analysis, text, policy);

    debug!(
        "Scored with '{}': {} keywords, {} sentences, {} grammar issues, score {}",
        pipeline.name(),
        analysis.keywords.len(),
        analysis.sentences.len(),
        scoring.issues.len(),
        scoring.score
    );

    let stats = ReviewStats {
        word_count: analysis.word_count,
        sentence_count: analysis.sentences.len(),
        page_count,
    };

    Review {
        report: assemble(
            &analysis.keywords,
            scoring.grammar_notes,
            scoring.suggestions,
            scoring.score,
        ),
        grade: Grade::from_score(scoring.score),
        breakdown: scoring.breakdown,
        stats,
    }
}
