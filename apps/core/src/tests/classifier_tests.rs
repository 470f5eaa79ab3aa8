//! Classifier Tests
//!
//! Artifacts written to a temporary model directory, loaded the way the
//! application loads them at startup.

use crate::analysis::classifier::{MODEL_FILE, VECTORIZER_FILE};
use crate::analysis::{Classifier, Label, SvmClassifier, TextNormalizer};
use crate::error::AppError;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// ============================================================================
// Test Fixtures
// ============================================================================

fn write_artifacts(dir: &Path) {
    let vectorizer = json!({
        "vocabulary": { "sebarkan": 0, "viral": 1, "menteri": 2, "laporan": 3 },
        "idf": [1.0, 1.0, 1.0, 1.0],
        "norm": "l2"
    });
    let model = json!({
        "coef": [2.0, 1.5, -2.0, -1.5],
        "intercept": 0.0,
        "prob_a": -2.0,
        "prob_b": 0.0,
        "card": { "method": "SVM", "accuracy": 0.982 }
    });

    fs::write(dir.join(VECTORIZER_FILE), vectorizer.to_string()).unwrap();
    fs::write(dir.join(MODEL_FILE), model.to_string()).unwrap();
}

fn load_fixture() -> SvmClassifier {
    let dir = tempdir().expect("Failed to create temp dir");
    write_artifacts(dir.path());
    SvmClassifier::load(dir.path()).expect("Failed to load artifacts")
}

#[cfg(test)]
mod prediction_tests {
    use super::*;

    #[test]
    fn test_hoax_vocabulary_predicts_hoax() {
        let classifier = load_fixture();
        let cleaned = TextNormalizer::passthrough().normalize("sebarkan viral sekarang");

        let result = classifier.classify(&cleaned).unwrap();
        assert_eq!(result.label, Label::Hoax);
        assert!(result.hoax_probability > 0.5);
        assert!(result.confidence > 0.9 && result.confidence <= 1.0);
    }

    #[test]
    fn test_official_vocabulary_predicts_valid() {
        let classifier = load_fixture();
        let cleaned = TextNormalizer::passthrough().normalize("menteri laporan resmi");

        let result = classifier.classify(&cleaned).unwrap();
        assert_eq!(result.label, Label::Valid);
        assert!(result.hoax_probability < 0.5);
        assert!((result.confidence - (1.0 - result.hoax_probability)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_vocabulary_falls_back_to_intercept() {
        let classifier = load_fixture();
        let cleaned = TextNormalizer::passthrough().normalize("kucing tidur siang");

        let result = classifier.classify(&cleaned).unwrap();
        assert_eq!(result.label, Label::Valid);
        assert!((result.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let classifier = load_fixture();
        let cleaned = TextNormalizer::passthrough().normalize("viral laporan menteri sebarkan");

        assert_eq!(
            classifier.classify(&cleaned).unwrap(),
            classifier.classify(&cleaned).unwrap()
        );
    }

    #[test]
    fn test_model_card_loaded() {
        let classifier = load_fixture();

        assert_eq!(classifier.name(), "SVM");
        assert_eq!(classifier.card().accuracy, Some(0.982));
        assert_eq!(classifier.vectorizer().dimension(), 4);
    }
}

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let err = SvmClassifier::load(&dir.path().join("absent")).unwrap_err();

        assert!(matches!(err, AppError::ResourceLoad(_)));
        assert!(!err.is_user_recoverable());
    }

    #[test]
    fn test_missing_model_file() {
        let dir = tempdir().unwrap();
        write_artifacts(dir.path());
        fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

        let err = SvmClassifier::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(MODEL_FILE));
    }

    #[test]
    fn test_malformed_artifact() {
        let dir = tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join(VECTORIZER_FILE), "{ not json").unwrap();

        assert!(matches!(
            SvmClassifier::load(dir.path()),
            Err(AppError::ResourceLoad(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch_between_artifacts() {
        let dir = tempdir().unwrap();
        write_artifacts(dir.path());
        let model = json!({ "coef": [1.0, -1.0], "intercept": 0.0 });
        fs::write(dir.path().join(MODEL_FILE), model.to_string()).unwrap();

        assert!(matches!(
            SvmClassifier::load(dir.path()),
            Err(AppError::ResourceLoad(_))
        ));
    }
}
