//! Test Module
//!
//! Cross-module test suite for HoaxScan core.
//!
//! ## Test Categories
//! - `analysis_tests`: Normalizer, stemmer and feature extractor working together
//! - `classifier_tests`: SVM artifacts on disk, loading and prediction
//! - `insight_tests`: Rule engine over realistic feature sets
//! - `integration_tests`: Full pipeline, session boundary and resource loading

pub mod analysis_tests;
pub mod classifier_tests;

use crate::analysis::{ClassificationResult, Classifier, CleanedText, Label};
use crate::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Shared Fixtures
// ============================================================================

/// Text with a named official, a source cue and figures
pub const CREDIBLE_TEXT: &str = "Menurut Menteri Keuangan Sri Mulyani, pendapatan negara mencapai Rp1.123,5 triliun atau 40,1 persen dari target APBN 2024 hingga akhir Mei.";

/// Classifier returning a fixed verdict and recording what it was given
pub struct StubClassifier {
    label: Label,
    hoax_probability: f64,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl StubClassifier {
    pub fn hoax() -> Self {
        Self::new(Label::Hoax, 0.97)
    }

    pub fn valid() -> Self {
        Self::new(Label::Valid, 0.12)
    }

    pub fn new(label: Label, hoax_probability: f64) -> Self {
        Self {
            label,
            hoax_probability,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Cleaned texts received so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, text: &CleanedText) -> Result<ClassificationResult, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.as_str().to_string());
        ClassificationResult::new(self.label, self.hoax_probability)
    }

    fn name(&self) -> &str {
        "stub"
    }
}
