//! Penn Treebank tags from nlprule's English tagger, folded into `PartOfSpeech`.

use crate::nlp::PartOfSpeech;

/// Pseudo-tags nlprule attaches to sentence boundaries.
const SENTENCE_MARKERS: &[&str] = &["SENT_START", "SENT_END"];

/// `IN` words that open a clause rather than a phrase.
const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "since", "whether",
    "until", "once",
];

/// Lemmas that are auxiliaries when another verb follows.
pub const SUPPORT_LEMMAS: &[&str] = &["have", "do"];

pub fn is_word_tag(tag: &str) -> bool {
    !tag.is_empty() && !SENTENCE_MARKERS.contains(&tag)
}

/// `lower` and `lemma` are lowercased. Any form of "be" is an auxiliary.
pub fn from_penn(tag: &str, lower: &str, lemma: &str) -> PartOfSpeech {
    match tag {
        t if t.starts_with("NNP") => PartOfSpeech::ProperNoun,
        t if t.starts_with("NN") => PartOfSpeech::Noun,
        "MD" => PartOfSpeech::Auxiliary,
        t if t.starts_with("VB") && lemma == "be" => PartOfSpeech::Auxiliary,
        t if t.starts_with("VB") => PartOfSpeech::Verb,
        t if t.starts_with("JJ") => PartOfSpeech::Adjective,
        t if t.starts_with("RB") || t == "WRB" => PartOfSpeech::Adverb,
        "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PartOfSpeech::Pronoun,
        "DT" | "PDT" | "WDT" => PartOfSpeech::Determiner,
        "IN" if SUBORDINATORS.contains(&lower) => PartOfSpeech::SubordinatingConjunction,
        "IN" => PartOfSpeech::Adposition,
        "CC" => PartOfSpeech::CoordinatingConjunction,
        "TO" | "RP" | "POS" => PartOfSpeech::Particle,
        "CD" => PartOfSpeech::Numeral,
        "SYM" | "$" | "#" => PartOfSpeech::Symbol,
        "PCT" | "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "HYPH" | "NFP" => {
            PartOfSpeech::Punctuation
        }
        _ => PartOfSpeech::Other,
    }
}

/// Tag for tokens the dictionary does not know: product names, other scripts, glyphs.
pub fn from_shape(text: &str) -> PartOfSpeech {
    if !text.is_empty() && text.chars().all(char::is_alphabetic) {
        if text.chars().next().is_some_and(char::is_uppercase) {
            PartOfSpeech::ProperNoun
        } else {
            PartOfSpeech::Noun
        }
    } else if text.chars().any(char::is_numeric) && !text.chars().any(char::is_alphabetic) {
        PartOfSpeech::Numeral
    } else if text.chars().all(|c| !c.is_alphanumeric()) {
        PartOfSpeech::Punctuation
    } else {
        PartOfSpeech::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penn_tags() {
        let cases = [
            ("NNP", "acme", "acme", PartOfSpeech::ProperNoun),
            ("NNPS", "alps", "alps", PartOfSpeech::ProperNoun),
            ("NNS", "services", "service", PartOfSpeech::Noun),
            ("NN:UN", "software", "software", PartOfSpeech::Noun),
            ("VBD", "led", "lead", PartOfSpeech::Verb),
            ("VBZ", "is", "be", PartOfSpeech::Auxiliary),
            ("MD", "can", "can", PartOfSpeech::Auxiliary),
            ("JJR", "faster", "fast", PartOfSpeech::Adjective),
            ("IN", "because", "because", PartOfSpeech::SubordinatingConjunction),
            ("IN", "at", "at", PartOfSpeech::Adposition),
            ("CD", "2021", "2021", PartOfSpeech::Numeral),
            ("PCT", ".", ".", PartOfSpeech::Punctuation),
            ("UH", "wow", "wow", PartOfSpeech::Other),
        ];
        for (tag, lower, lemma, expected) in cases {
            assert_eq!(from_penn(tag, lower, lemma), expected, "{tag} {lower}");
        }
    }

    #[test]
    fn test_sentence_markers_are_not_word_tags() {
        assert!(!is_word_tag("SENT_START"));
        assert!(!is_word_tag("SENT_END"));
        assert!(!is_word_tag(""));
        assert!(is_word_tag("NN"));
    }

    #[test]
    fn test_shape_fallback() {
        assert_eq!(from_shape("Kubernetes"), PartOfSpeech::ProperNoun);
        assert_eq!(from_shape("丸ing"), PartOfSpeech::Noun);
        assert_eq!(from_shape("3.8"), PartOfSpeech::Numeral);
        assert_eq!(from_shape("•"), PartOfSpeech::Punctuation);
        assert_eq!(from_shape("S3"), PartOfSpeech::Other);
    }
}
