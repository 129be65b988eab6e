//! English language pipeline: sentence segmentation, POS tagging, lemmas and
//! stopword flags.
//!
//! The pipeline is built once at startup and shared read-only; `AppState` carries
//! it as `Arc<dyn LanguagePipeline>` so reviews never reach for ambient globals.

pub mod blocks;
pub mod stopwords;
pub mod tags;

use std::time::Instant;

use anyhow::Context;
use nlprule::{tokenizer_filename, Tokenizer};
use tracing::info;

use crate::nlp::blocks::split_blocks;

/// Tokenizer binary fetched by `nlprule-build` at compile time.
static TOKENIZER_BYTES: &[u8] = include_bytes!(concat!(
    env!("OUT_DIR"),
    "/",
    tokenizer_filename!("en")
));

/// Coarse universal-style part-of-speech tags (UD: NOUN, PROPN, VERB, AUX, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    /// be, modals, and do/have when they support another verb. Never counted as Verb.
    Auxiliary,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    CoordinatingConjunction,
    SubordinatingConjunction,
    Particle,
    Numeral,
    Punctuation,
    Symbol,
    Other,
}

impl PartOfSpeech {
    pub fn is_nominal(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_alpha: bool,
    /// Byte offset of the token in the analyzed text.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_verb(&self) -> bool {
        self.tokens.iter().any(|t| t.pos == PartOfSpeech::Verb)
    }
}

/// A language pipeline turns raw text into tagged sentences.
///
/// Implementations must be deterministic and free of per-call mutable state.
pub trait LanguagePipeline: Send + Sync {
    fn name(&self) -> &str;
    fn process(&self, text: &str) -> Vec<Sentence>;
}

/// English pipeline on nlprule's LanguageTool-derived tokenizer.
///
/// Text is first cut into layout blocks (blank lines, bullets); nlprule then
/// splits each block into sentences and tags every token.
pub struct EnglishPipeline {
    tokenizer: Tokenizer,
}

impl EnglishPipeline {
    pub const NAME: &'static str = "en_nlprule";

    pub fn load() -> anyhow::Result<Self> {
        let started = Instant::now();
        let tokenizer = Tokenizer::from_reader(TOKENIZER_BYTES)
            .context("Failed to load the English tokenizer binary")?;
        info!(
            "Language pipeline '{}' loaded in {}ms",
            Self::NAME,
            started.elapsed().as_millis()
        );
        Ok(Self { tokenizer })
    }

    fn tag_block(&self, block: &str, base: usize, out: &mut Vec<Sentence>) {
        let mut cursor = 0;
        for piped in self.tokenizer.pipe(block) {
            let mut tokens = Vec::new();
            for token in piped.tokens() {
                let word = token.word();
                let text = word.text().as_str();
                if text.trim().is_empty() {
                    continue;
                }
                // Cursor only moves past an exact match, so it stays on a char boundary
                let local = match block[cursor..].find(text) {
                    Some(i) => {
                        let at = cursor + i;
                        cursor = at + text.len();
                        at
                    }
                    None => cursor,
                };

                let lower = text.to_lowercase();
                // After a determiner or adjective, a surviving noun reading wins over a verb one
                let nominal_context = tokens.last().is_some_and(|t: &Token| {
                    matches!(t.pos, PartOfSpeech::Determiner | PartOfSpeech::Adjective)
                });
                let mut readings = word
                    .tags()
                    .iter()
                    .filter(|data| tags::is_word_tag(data.pos().as_str()));
                let tagged = if nominal_context {
                    let first = readings.clone().next();
                    readings
                        .find(|data| !data.pos().as_str().starts_with("VB"))
                        .or(first)
                } else {
                    readings.next()
                };
                let (lemma, pos) = match tagged {
                    Some(data) => {
                        let lemma = data.lemma().as_str().to_lowercase();
                        let lemma = if lemma.is_empty() { lower.clone() } else { lemma };
                        let pos = tags::from_penn(data.pos().as_str(), &lower, &lemma);
                        (lemma, pos)
                    }
                    None => (lower.clone(), tags::from_shape(text)),
                };

                tokens.push(Token {
                    text: text.to_string(),
                    lemma,
                    pos,
                    is_stop: stopwords::is_stop(&lower),
                    is_alpha: text.chars().all(char::is_alphabetic),
                    offset: base + local,
                });
            }
            mark_supporting_verbs(&mut tokens);
            if !tokens.is_empty() {
                out.push(Sentence { tokens });
            }
        }
    }
}

impl LanguagePipeline for EnglishPipeline {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        for block in split_blocks(text) {
            self.tag_block(block.text, block.offset, &mut sentences);
        }
        sentences
    }
}

/// "have led", "did not ship": do/have followed by a verb are auxiliaries.
fn mark_supporting_verbs(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if tokens[i].pos != PartOfSpeech::Verb
            || !tags::SUPPORT_LEMMAS.contains(&tokens[i].lemma.as_str())
        {
            continue;
        }
        let supports = tokens[i + 1..]
            .iter()
            .find(|t| !matches!(t.pos, PartOfSpeech::Adverb | PartOfSpeech::Pronoun))
            .is_some_and(|t| t.pos == PartOfSpeech::Verb);
        if supports {
            tokens[i].pos = PartOfSpeech::Auxiliary;
        }
    }
}

/// One pipeline per test binary; loading the tokenizer binary is slow.
#[cfg(test)]
pub(crate) fn english() -> std::sync::Arc<EnglishPipeline> {
    use std::sync::{Arc, LazyLock};

    static PIPELINE: LazyLock<Arc<EnglishPipeline>> = LazyLock::new(|| {
        Arc::new(EnglishPipeline::load().expect("bundled tokenizer binary loads"))
    });
    Arc::clone(&PIPELINE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, lemma: &str, pos: PartOfSpeech) -> Token {
        Token {
            text: text.to_string(),
            lemma: lemma.to_string(),
            pos,
            is_stop: false,
            is_alpha: true,
            offset: 0,
        }
    }

    #[test]
    fn test_process_splits_and_tags() {
        let sentences = english().process("Developed a payment service. Education");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].has_verb());
        assert!(!sentences[1].has_verb());
    }

    #[test]
    fn test_blocks_become_sentences() {
        let sentences = english().process("Skills\n• Python\n• Kubernetes\n\nProjects");
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[1].tokens[0].text, "•");
    }

    #[test]
    fn test_offsets_index_into_input() {
        let text = "Skills:\n• Rust, Python\n\nLed the team at Zürich’s office.";
        for sentence in english().process(text) {
            for token in sentence.tokens {
                assert!(text[token.offset..].starts_with(token.text.as_str()));
            }
        }
    }

    #[test]
    fn test_process_is_deterministic() {
        let text = "Managed the data platform team. Improved reliability by 30%.";
        assert_eq!(english().process(text), english().process(text));
    }

    #[test]
    fn test_lemmas_and_stop_flags() {
        let sentences = english().process("The engineers built services.");
        let tokens = &sentences[0].tokens;
        let engineers = tokens.iter().find(|t| t.text == "engineers").unwrap();
        assert_eq!(engineers.lemma, "engineer");
        assert!(engineers.pos.is_nominal());
        assert!(tokens.iter().find(|t| t.text == "The").unwrap().is_stop);
    }

    #[test]
    fn test_be_is_never_a_verb() {
        let sentences = english().process("I am an engineer.");
        assert!(!sentences[0].has_verb());
    }

    #[test]
    fn test_mixed_script_tokens_are_tagged() {
        let sentences = english().process("Worked at 丸ing Labs. Skills include कतed tools.");
        assert!(!sentences.is_empty());
        assert!(sentences
            .iter()
            .flat_map(|s| &s.tokens)
            .any(|t| t.text.contains('丸')));
    }

    #[test]
    fn test_supporting_have_is_auxiliary() {
        let mut tokens = vec![
            token("have", "have", PartOfSpeech::Verb),
            token("not", "not", PartOfSpeech::Adverb),
            token("led", "lead", PartOfSpeech::Verb),
        ];
        mark_supporting_verbs(&mut tokens);
        assert_eq!(tokens[0].pos, PartOfSpeech::Auxiliary);
        assert_eq!(tokens[2].pos, PartOfSpeech::Verb);

        let mut owned = vec![
            token("have", "have", PartOfSpeech::Verb),
            token("experience", "experience", PartOfSpeech::Noun),
        ];
        mark_supporting_verbs(&mut owned);
        assert_eq!(owned[0].pos, PartOfSpeech::Verb);
    }

    #[test]
    fn test_pipeline_name() {
        assert_eq!(english().name(), "en_nlprule");
    }

    #[test]
    fn test_nominal_tags() {
        assert!(PartOfSpeech::ProperNoun.is_nominal());
        assert!(PartOfSpeech::Noun.is_nominal());
        assert!(!PartOfSpeech::Verb.is_nominal());
    }
}
