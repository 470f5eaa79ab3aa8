//! Lexicon - vocabularies driving the raw feature extractor.
//!
//! Every word list the extractor matches against lives here as plain data so it
//! can be exported, inspected, and replaced from a JSON file without touching
//! the matching code. The default lexicon targets Indonesian news text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use validator::Validate;

use crate::error::AppError;

/// A list of terms matched case-insensitively against the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Vocabulary {
    /// Terms in match priority order (alternation order)
    #[validate(length(min = 1))]
    pub terms: Vec<String>,
    /// Only match terms bounded by word boundaries
    #[serde(default)]
    pub whole_word: bool,
}

impl Vocabulary {
    /// Vocabulary matched anywhere, including inside longer words
    pub fn substring(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            whole_word: false,
        }
    }

    /// Vocabulary matched only as whole words
    pub fn whole_words(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            whole_word: true,
        }
    }

    /// Build the case-insensitive alternation pattern for this vocabulary
    pub fn pattern(&self) -> String {
        let alternation = self
            .terms
            .iter()
            .map(|t| regex::escape(t.trim()))
            .collect::<Vec<_>>()
            .join("|");

        if self.whole_word {
            format!(r"(?i)\b(?:{})\b", alternation)
        } else {
            format!(r"(?i)(?:{})", alternation)
        }
    }

    /// Compile the vocabulary into a regex
    pub fn compile(&self) -> Result<Regex, AppError> {
        Ok(Regex::new(&self.pattern())?)
    }

    fn blank_term(&self) -> Option<usize> {
        self.terms.iter().position(|t| t.trim().is_empty())
    }
}

/// Complete set of vocabularies used by the feature extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Lexicon {
    /// First-person pronouns ("saya", "kami", ...)
    #[validate(nested)]
    pub first_person: Vocabulary,
    /// Attribution cues ("menurut", "dilansir", ...)
    #[validate(nested)]
    pub source_cues: Vocabulary,
    /// Share / spread requests
    #[validate(nested)]
    pub call_to_action: Vocabulary,
    /// Emotionally charged words
    #[validate(nested)]
    pub emotional: Vocabulary,
    /// Stock clickbait phrases
    #[validate(nested)]
    pub clickbait: Vocabulary,
    /// Official institutions and titles
    #[validate(nested)]
    pub entities: Vocabulary,
    /// Month names for "day month year" dates
    #[validate(length(min = 1))]
    pub month_names: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::indonesian()
    }
}

impl Lexicon {
    /// Default Indonesian news lexicon
    pub fn indonesian() -> Self {
        Self {
            first_person: Vocabulary::whole_words(&["saya", "kami", "penulis"]),
            source_cues: Vocabulary::substring(&[
                "dilansir", "menurut", "sumber", "dikutip", "melansir",
            ]),
            call_to_action: Vocabulary::whole_words(&[
                "bagikan", "sebarkan", "viralkan", "share",
            ]),
            emotional: Vocabulary::substring(&[
                "waspada",
                "sebarkan",
                "penting",
                "bahaya",
                "terungkap",
                "fakta",
                "bukti",
                "viral",
                "heboh",
                "menggemparkan",
                "skandal",
            ]),
            clickbait: Vocabulary::substring(&[
                "mengejutkan",
                "terbongkar",
                "jangan kaget",
                "wajib tahu",
                "ternyata",
                "begini",
                "tak disangka",
            ]),
            entities: Vocabulary::whole_words(&[
                "presiden", "menteri", "gubernur", "polri", "kpk", "dpr", "pemprov", "pemkab",
                "kemenkeu", "bi", "istana",
            ]),
            month_names: [
                "januari",
                "februari",
                "maret",
                "april",
                "mei",
                "juni",
                "juli",
                "agustus",
                "september",
                "oktober",
                "november",
                "desember",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }

    /// Load a lexicon from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::ResourceLoad(format!("cannot read lexicon {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parse a lexicon from JSON and validate it
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let lexicon: Lexicon = serde_json::from_str(raw)?;
        lexicon.check()?;
        Ok(lexicon)
    }

    /// Export the lexicon for inspection or editing
    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate structure plus rules the derive cannot express (no blank terms)
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        for (name, vocabulary) in self.vocabularies() {
            if let Some(index) = vocabulary.blank_term() {
                return Err(AppError::Validation(format!(
                    "lexicon vocabulary '{}' has a blank term at position {}",
                    name, index
                )));
            }
        }

        if self.month_names.iter().any(|m| m.trim().is_empty()) {
            return Err(AppError::Validation(
                "lexicon month_names contains a blank entry".to_string(),
            ));
        }

        Ok(())
    }

    /// Named vocabularies in declaration order
    pub fn vocabularies(&self) -> [(&'static str, &Vocabulary); 6] {
        [
            ("first_person", &self.first_person),
            ("source_cues", &self.source_cues),
            ("call_to_action", &self.call_to_action),
            ("emotional", &self.emotional),
            ("clickbait", &self.clickbait),
            ("entities", &self.entities),
        ]
    }

    /// Pattern matching either "day month-name year" or a bare four digit year
    pub fn date_pattern(&self) -> String {
        let months = self
            .month_names
            .iter()
            .map(|m| regex::escape(m.trim()))
            .collect::<Vec<_>>()
            .join("|");

        format!(r"(?i)\b(?:\d{{1,2}}\s(?:{})\s\d{{4}})\b|\b\d{{4}}\b", months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_is_valid() {
        assert!(Lexicon::indonesian().check().is_ok());
    }

    #[test]
    fn test_whole_word_pattern() {
        let vocab = Vocabulary::whole_words(&["saya", "kami"]);
        let re = vocab.compile().unwrap();

        assert_eq!(re.find_iter("Saya dan KAMI, bukan sayap").count(), 2);
    }

    #[test]
    fn test_substring_pattern() {
        let vocab = Vocabulary::substring(&["fakta"]);
        let re = vocab.compile().unwrap();

        assert_eq!(re.find_iter("Faktanya bukan fakta").count(), 2);
    }

    #[test]
    fn test_terms_are_escaped() {
        let vocab = Vocabulary::substring(&["a.b"]);
        let re = vocab.compile().unwrap();

        assert!(re.is_match("a.b"));
        assert!(!re.is_match("axb"));
    }

    #[test]
    fn test_json_roundtrip_preserves_lexicon() {
        let lexicon = Lexicon::indonesian();
        let json = lexicon.to_json_pretty().unwrap();
        let parsed = Lexicon::from_json(&json).unwrap();

        assert_eq!(parsed, lexicon);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let mut lexicon = Lexicon::indonesian();
        lexicon.emotional.terms.clear();

        assert!(matches!(lexicon.check(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_term_rejected() {
        let mut lexicon = Lexicon::indonesian();
        lexicon.clickbait.terms.push("   ".to_string());

        let err = lexicon.check().unwrap_err();
        assert!(err.to_string().contains("clickbait"));
    }

    #[test]
    fn test_date_pattern() {
        let re = Regex::new(&Lexicon::indonesian().date_pattern()).unwrap();

        assert_eq!(re.find_iter("Pada 17 Agustus 1945 merdeka").count(), 1);
        assert_eq!(re.find_iter("APBN 2024 dan 2025").count(), 2);
        assert_eq!(re.find_iter("angka 12345").count(), 0);
    }
}
