//! Raw Feature Extraction.
//!
//! Computes surface-level linguistic signals from the ORIGINAL text. Casing,
//! punctuation and digits are signal here, so this never sees normalized text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::lexicon::Lexicon;
use crate::error::AppError;

/// Segments with at most this many words are ignored for sentence length
pub const DEFAULT_MIN_SENTENCE_WORDS: usize = 3;

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence terminators"));

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("Invalid regex: digit"));

static UPPERCASE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid regex: uppercase word"));

/// Fixed-schema record of extracted signals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Whitespace-delimited tokens
    pub word_count: usize,
    /// Mean words per qualifying sentence (0 when none qualify)
    pub avg_sentence_length: f64,
    /// Individual digit characters
    pub num_count: usize,
    /// Whole words of two or more capitals
    pub upper_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    /// Double plus single quote characters
    pub quote_count: usize,
    pub first_person_count: usize,
    pub has_source: bool,
    pub call_to_action: usize,
    pub emotional_words: usize,
    pub clickbait_phrases: usize,
    pub entity_mentions: usize,
    pub date_mentions: usize,
}

/// Extractor holding the lexicon compiled into regexes
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    first_person: Regex,
    source_cues: Regex,
    call_to_action: Regex,
    emotional: Regex,
    clickbait: Regex,
    entities: Regex,
    dates: Regex,
    min_sentence_words: usize,
}

impl FeatureExtractor {
    /// Compile an extractor from a lexicon
    pub fn new(lexicon: &Lexicon) -> Result<Self, AppError> {
        lexicon.check()?;

        Ok(Self {
            first_person: lexicon.first_person.compile()?,
            source_cues: lexicon.source_cues.compile()?,
            call_to_action: lexicon.call_to_action.compile()?,
            emotional: lexicon.emotional.compile()?,
            clickbait: lexicon.clickbait.compile()?,
            entities: lexicon.entities.compile()?,
            dates: Regex::new(&lexicon.date_pattern())?,
            min_sentence_words: DEFAULT_MIN_SENTENCE_WORDS,
        })
    }

    /// Extractor over the default Indonesian lexicon
    pub fn indonesian() -> Result<Self, AppError> {
        Self::new(&Lexicon::indonesian())
    }

    /// Override the sentence-length cutoff (segments must exceed it)
    pub fn with_min_sentence_words(mut self, min_sentence_words: usize) -> Self {
        self.min_sentence_words = min_sentence_words;
        self
    }

    /// Mean word count over sentence segments longer than the cutoff
    fn average_sentence_length(&self, text: &str) -> f64 {
        let lengths: Vec<usize> = SENTENCE_SPLIT
            .split(text)
            .map(|s| s.split_whitespace().count())
            .filter(|&words| words > self.min_sentence_words)
            .collect();

        if lengths.is_empty() {
            return 0.0;
        }

        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    }

    /// Extract every signal from the original text. Never fails; empty text
    /// yields the zeroed feature set.
    pub fn extract(&self, text: &str) -> FeatureSet {
        FeatureSet {
            word_count: text.split_whitespace().count(),
            avg_sentence_length: self.average_sentence_length(text),
            num_count: DIGIT.find_iter(text).count(),
            upper_count: UPPERCASE_WORD.find_iter(text).count(),
            exclamation_count: text.matches('!').count(),
            question_count: text.matches('?').count(),
            quote_count: text.matches('"').count() + text.matches('\'').count(),
            first_person_count: self.first_person.find_iter(text).count(),
            has_source: self.source_cues.is_match(text),
            call_to_action: self.call_to_action.find_iter(text).count(),
            emotional_words: self.emotional.find_iter(text).count(),
            clickbait_phrases: self.clickbait.find_iter(text).count(),
            entity_mentions: self.entities.find_iter(text).count(),
            date_mentions: self.dates.find_iter(text).count(),
        }
    }
}
