//! Keyword extraction, sentence list and word count for one résumé.

use std::collections::HashSet;

use crate::nlp::{LanguagePipeline, Sentence, Token};

/// Tokens at or below this many characters never become keywords.
const MIN_KEYWORD_CHARS: usize = 2;

/// Deduplicated keywords in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl KeywordSet {
    /// Adds a keyword; returns false if it was already present.
    pub fn insert(&mut self, keyword: String) -> bool {
        if self.seen.contains(&keyword) {
            return false;
        }
        self.seen.insert(keyword.clone());
        self.ordered.push(keyword);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = KeywordSet::default();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub keywords: KeywordSet,
    pub sentences: Vec<Sentence>,
    /// Whitespace-delimited words in the raw text, independent of tokenization.
    pub word_count: usize,
}

/// Runs the pipeline over `text` and extracts keyword candidates.
///
/// `text` is expected to be non-empty extracted text; the function is total
/// regardless and yields an empty analysis for blank input.
pub fn analyze(pipeline: &dyn LanguagePipeline, text: &str) -> Analysis {
    let sentences = pipeline.process(text);

    let keywords = sentences
        .iter()
        .flat_map(|s| s.tokens.iter())
        .filter(|t| is_keyword_candidate(t))
        .filter_map(keyword_form)
        .collect::<KeywordSet>();

    Analysis {
        keywords,
        sentences,
        word_count: text.split_whitespace().count(),
    }
}

/// Noun or proper noun, not a stopword, purely alphabetic, longer than 2 chars.
pub fn is_keyword_candidate(token: &Token) -> bool {
    token.pos.is_nominal()
        && !token.is_stop
        && token.is_alpha
        && token.text.chars().count() > MIN_KEYWORD_CHARS
}

/// Lowercased lemma, or the lowercased surface when the lemma is not a plain word.
/// Lowercasing can add combining marks (`İ`), so the result is checked again.
fn keyword_form(token: &Token) -> Option<String> {
    let lemma = token.lemma.to_lowercase();
    let form = if !lemma.is_empty() && lemma.chars().all(char::is_alphabetic) {
        lemma
    } else {
        token.text.to_lowercase()
    };
    form.chars().all(char::is_alphabetic).then_some(form)
}
