//! Text Normalizer.
//!
//! Produces the cleaned token stream fed to the vectorizer:
//! lowercase -> strip URLs -> strip digits and punctuation -> drop stopwords
//! and single characters -> stem -> rejoin with single spaces.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::stemmer::{IdentityStemmer, IndonesianStemmer, Stemmer};
use super::stopwords::StopwordSet;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+").expect("Invalid regex: url"));

static DIGITS_AND_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+|[^\w\s]").expect("Invalid regex: digits and punctuation"));

/// Normalized text: stemmed content tokens joined by single spaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedText {
    text: String,
    token_count: usize,
}

impl CleanedText {
    fn from_tokens(tokens: Vec<String>) -> Self {
        Self {
            token_count: tokens.len(),
            text: tokens.join(" "),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.token_count == 0
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalizer owning the stopword set and stemmer, shared read-only across requests
#[derive(Clone)]
pub struct TextNormalizer {
    stopwords: StopwordSet,
    stemmer: Arc<dyn Stemmer>,
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::indonesian()
    }
}

impl TextNormalizer {
    pub fn new(stopwords: StopwordSet, stemmer: Arc<dyn Stemmer>) -> Self {
        Self { stopwords, stemmer }
    }

    /// Indonesian stopwords with the rule-based Indonesian stemmer
    pub fn indonesian() -> Self {
        Self::new(StopwordSet::indonesian(), Arc::new(IndonesianStemmer::new()))
    }

    /// Normalizer that only lowercases and strips noise
    pub fn passthrough() -> Self {
        Self::new(StopwordSet::empty(), Arc::new(IdentityStemmer))
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Lowercase, drop URLs, then replace digit runs and punctuation with spaces
    fn strip_noise(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_urls = URL.replace_all(&lowered, "");
        DIGITS_AND_PUNCTUATION
            .replace_all(&without_urls, " ")
            .into_owned()
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() > 1 && !self.stopwords.contains(token)
    }

    /// Normalize raw text for the classifier
    pub fn normalize(&self, text: &str) -> CleanedText {
        let stripped = self.strip_noise(text);

        let tokens = stripped
            .split_whitespace()
            .filter(|token| self.keep(token))
            .map(|token| self.stemmer.stem(token))
            .filter(|stem| !stem.is_empty())
            .collect();

        CleanedText::from_tokens(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_removed() {
        let normalizer = TextNormalizer::passthrough();
        let cleaned = normalizer.normalize("Cek https://contoh.id/berita?id=1 dan www.hoaks.com sekarang");

        assert_eq!(cleaned.as_str(), "cek dan sekarang");
    }

    #[test]
    fn test_digits_and_punctuation_become_separators() {
        let normalizer = TextNormalizer::passthrough();
        let cleaned = normalizer.normalize("COVID-19 menyebar!!! (cepat),sekali");

        assert_eq!(cleaned.as_str(), "covid menyebar cepat sekali");
        assert_eq!(cleaned.token_count(), 4);
    }

    #[test]
    fn test_single_characters_dropped() {
        let normalizer = TextNormalizer::passthrough();
        let cleaned = normalizer.normalize("a b cd e fg");

        assert_eq!(cleaned.as_str(), "cd fg");
    }

    #[test]
    fn test_stopwords_removed_before_stemming() {
        let normalizer = TextNormalizer::indonesian();
        let cleaned = normalizer.normalize("Menurut dia, kabar itu ditulis dengan sengaja");

        let tokens: Vec<&str> = cleaned.tokens().collect();
        assert!(!tokens.contains(&"menurut"));
        assert!(!tokens.contains(&"itu"));
        assert!(tokens.contains(&"tulis"));
    }

    #[test]
    fn test_empty_input() {
        let cleaned = TextNormalizer::indonesian().normalize("");

        assert!(cleaned.is_empty());
        assert_eq!(cleaned.as_str(), "");
    }

    #[test]
    fn test_normalization_is_idempotent_on_clean_text() {
        let normalizer = TextNormalizer::passthrough();
        let once = normalizer.normalize("Harga BBM naik 10% hari ini!");
        let twice = normalizer.normalize(once.as_str());

        assert_eq!(once, twice);
    }
}
