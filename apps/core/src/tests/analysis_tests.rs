//! Analysis Pipeline Tests
//!
//! Normalization and feature extraction on realistic news text.

use super::CREDIBLE_TEXT;
use crate::analysis::{
    FeatureExtractor, IdentityStemmer, IndonesianStemmer, StopwordSet, Stemmer, TextNormalizer,
};
use crate::samples::{HOAX_SAMPLE, VALID_SAMPLE};
use std::sync::Arc;

#[cfg(test)]
mod feature_tests {
    use super::*;

    #[test]
    fn test_hoax_sample_features() {
        let extractor = FeatureExtractor::indonesian().unwrap();
        let features = extractor.extract(HOAX_SAMPLE);

        assert_eq!(features.word_count, 50);
        assert!((features.avg_sentence_length - 49.0 / 3.0).abs() < 1e-9);
        assert_eq!(features.num_count, 2);
        assert_eq!(features.upper_count, 2);
        assert_eq!(features.exclamation_count, 2);
        assert_eq!(features.call_to_action, 1);
        assert_eq!(features.emotional_words, 2);
        assert!(!features.has_source);
        assert_eq!(features.entity_mentions, 0);
        assert_eq!(features.date_mentions, 0);
    }

    #[test]
    fn test_credible_text_features() {
        let extractor = FeatureExtractor::indonesian().unwrap();
        let features = extractor.extract(CREDIBLE_TEXT);

        assert!(features.has_source);
        assert_eq!(features.entity_mentions, 1);
        assert_eq!(features.num_count, 12);
        assert_eq!(features.date_mentions, 1);
        assert_eq!(features.call_to_action, 0);
    }

    #[test]
    fn test_valid_sample_has_no_source_cue() {
        let extractor = FeatureExtractor::indonesian().unwrap();
        let features = extractor.extract(VALID_SAMPLE);

        assert!(!features.has_source);
        assert_eq!(features.word_count, 42);
        assert_eq!(features.num_count, 20);
        assert_eq!(features.entity_mentions, 1);
    }

    #[test]
    fn test_no_qualifying_sentence_gives_zero_average() {
        let extractor = FeatureExtractor::indonesian().unwrap();

        for text in ["Awas! Hoaks. Cek dulu?", "", "satu dua tiga"] {
            let features = extractor.extract(text);
            assert_eq!(features.avg_sentence_length, 0.0, "text: {:?}", text);
        }
    }

    /// Token pass with no stopwords and no stemming, case and punctuation kept
    fn untouched(text: &str) -> String {
        let stopwords = StopwordSet::empty();
        let stemmer = IdentityStemmer;
        text.split(' ')
            .filter(|t| !stopwords.contains(t))
            .map(|t| stemmer.stem(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_features_unchanged_by_identity_normalization() {
        let extractor = FeatureExtractor::indonesian().unwrap();

        for text in [HOAX_SAMPLE, VALID_SAMPLE, CREDIBLE_TEXT] {
            let passed = untouched(text);
            assert_eq!(passed, text);
            assert_eq!(extractor.extract(&passed), extractor.extract(text));
        }
    }

    #[test]
    fn test_features_change_under_real_normalization() {
        let extractor = FeatureExtractor::indonesian().unwrap();
        let normalized = TextNormalizer::indonesian().normalize(HOAX_SAMPLE);

        let raw = extractor.extract(HOAX_SAMPLE);
        let cleaned = extractor.extract(normalized.as_str());
        assert_eq!(raw.exclamation_count, 2);
        assert_eq!(cleaned.exclamation_count, 0);
        assert_eq!(cleaned.upper_count, 0);
    }
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_hoax_sample_normalizes_to_enough_tokens() {
        let cleaned = TextNormalizer::indonesian().normalize(HOAX_SAMPLE);
        let tokens: Vec<&str> = cleaned.tokens().collect();

        assert!(cleaned.token_count() >= 5);
        assert!(tokens.iter().all(|t| t.chars().count() > 1));
        assert!(tokens.iter().all(|t| *t == t.to_lowercase()));
        assert!(tokens.contains(&"sebar"));
        assert!(!tokens.contains(&"bahwa"));
    }

    #[test]
    fn test_four_words_fall_short() {
        let cleaned = TextNormalizer::indonesian().normalize("berita ini sangat penting");
        assert!(cleaned.token_count() < 5);
    }

    #[test]
    fn test_custom_resources() {
        let stopwords = StopwordSet::new(["kabar"]);
        let stemmer = Arc::new(IndonesianStemmer::with_dictionary(["sebar", "edar"]));
        let normalizer = TextNormalizer::new(stopwords, stemmer);

        let cleaned = normalizer.normalize("Sebarkan kabar yang beredar");
        assert_eq!(cleaned.as_str(), "sebar yang edar");
    }

    #[test]
    fn test_normalizer_is_deterministic() {
        let normalizer = TextNormalizer::indonesian();
        assert_eq!(
            normalizer.normalize(VALID_SAMPLE),
            normalizer.normalize(VALID_SAMPLE)
        );
    }
}
