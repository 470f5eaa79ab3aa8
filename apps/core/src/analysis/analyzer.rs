//! Hoax Analyzer - Main orchestrator for the analysis pipeline.
//!
//! Raw features are always computed on the unmodified text (casing,
//! punctuation and numbers carry signal) while the classifier only ever sees
//! the normalized text. Mixing the two up silently degrades both.
//!
//! The analyzer holds nothing but shared read-only resources, so a single
//! instance can serve concurrent requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use validator::Validate;

use super::classifier::{ClassificationResult, Classifier, Label};
use super::features::{FeatureExtractor, FeatureSet};
use super::insights::{InsightEngine, InsightReport};
use super::normalizer::TextNormalizer;
use crate::error::AppError;

/// Minimum number of cleaned tokens required before classifying
pub const DEFAULT_MIN_CLEAN_TOKENS: usize = 5;

/// Tunables of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    #[validate(range(min = 1))]
    pub min_clean_tokens: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_clean_tokens: DEFAULT_MIN_CLEAN_TOKENS,
        }
    }
}

/// How much weight a verdict deserves, derived from its confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    /// Above 95%
    VeryConfident,
    /// Above 80%
    FairlyConfident,
    NeedsVerification,
}

impl ConfidenceBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 95.0 {
            ConfidenceBand::VeryConfident
        } else if percent > 80.0 {
            ConfidenceBand::FairlyConfident
        } else {
            ConfidenceBand::NeedsVerification
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::VeryConfident => "Very Confident",
            ConfidenceBand::FairlyConfident => "Fairly Confident",
            ConfidenceBand::NeedsVerification => "Needs Verification",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete outcome of one successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: ClassificationResult,
    /// Signals extracted from the original text
    pub features: FeatureSet,
    /// Seconds from just before normalization to just after classification
    pub processing_time: f64,
    /// Tokens left after normalization
    pub cleaned_token_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn label(&self) -> Label {
        self.classification.label
    }

    pub fn is_hoax(&self) -> bool {
        self.classification.label.is_hoax()
    }

    /// Confidence on the 0-100 scale used for presentation
    pub fn confidence_percent(&self) -> f64 {
        self.classification.confidence * 100.0
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_percent(self.confidence_percent())
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Label: {} ({:.1}%, {}), Words: {}, Tokens: {}, Time: {:.3}s",
            self.classification.label,
            self.confidence_percent(),
            self.confidence_band(),
            self.features.word_count,
            self.cleaned_token_count,
            self.processing_time
        )
    }
}

/// Orchestrates feature extraction, normalization and classification
#[derive(Clone)]
pub struct HoaxAnalyzer {
    classifier: Arc<dyn Classifier>,
    normalizer: Arc<TextNormalizer>,
    extractor: Arc<FeatureExtractor>,
    insights: Arc<InsightEngine>,
    config: AnalyzerConfig,
}

impl fmt::Debug for HoaxAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoaxAnalyzer")
            .field("classifier", &self.classifier.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HoaxAnalyzer {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        normalizer: Arc<TextNormalizer>,
        extractor: Arc<FeatureExtractor>,
        insights: Arc<InsightEngine>,
        config: AnalyzerConfig,
    ) -> Result<Self, AppError> {
        config.validate()?;

        Ok(Self {
            classifier,
            normalizer,
            extractor,
            insights,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a raw news text.
    ///
    /// Fails with `EmptyInput` for blank text and `InsufficientContent` when
    /// normalization leaves fewer than `min_clean_tokens` tokens; in both cases
    /// the classifier is never invoked.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AppError> {
        if text.trim().is_empty() {
            warn!("Rejected blank submission");
            return Err(AppError::EmptyInput);
        }

        // 1. Raw features on the original text
        let features = self.extractor.extract(text);

        // 2. Timed section: normalization through classification
        let start = Instant::now();
        let cleaned = self.normalizer.normalize(text);

        // 3. Input sufficiency
        let tokens = cleaned.token_count();
        if tokens < self.config.min_clean_tokens {
            warn!(
                "Rejected text with {} cleaned tokens (minimum {})",
                tokens, self.config.min_clean_tokens
            );
            return Err(AppError::InsufficientContent {
                tokens,
                required: self.config.min_clean_tokens,
            });
        }

        // 4. Classification
        let classification = self.classifier.classify(&cleaned)?;
        let processing_time = start.elapsed().as_secs_f64();

        let result = AnalysisResult {
            classification,
            features,
            processing_time,
            cleaned_token_count: tokens,
            analyzed_at: Utc::now(),
        };

        debug!("Analysis via {}: {}", self.classifier.name(), result.summary());

        Ok(result)
    }

    /// Analyze and explain in one call
    pub fn analyze_with_insights(
        &self,
        text: &str,
    ) -> Result<(AnalysisResult, InsightReport), AppError> {
        let result = self.analyze(text)?;
        let report = self.insights.generate(&result);
        Ok((result, report))
    }

    pub fn insights(&self) -> &InsightEngine {
        &self.insights
    }
}
