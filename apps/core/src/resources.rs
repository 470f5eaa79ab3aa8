//! Startup resource loading.
//!
//! Everything the pipeline needs is loaded exactly once here and then shared
//! read-only. Any failure is fatal: the process must not start serving with a
//! half-loaded model.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::analysis::{
    AnalyzerConfig, Classifier, FeatureExtractor, HoaxAnalyzer, IndonesianStemmer, InsightEngine,
    InsightThresholds, Lexicon, ModelCard, Stemmer, StopwordSet, SvmClassifier, TextNormalizer,
};
use crate::config::AppConfig;
use crate::error::AppError;

/// Loaded, immutable analysis resources
#[derive(Debug, Clone)]
pub struct Resources {
    analyzer: HoaxAnalyzer,
    card: ModelCard,
}

fn load_optional<T>(
    what: &str,
    path: Option<&Path>,
    load: impl FnOnce(&Path) -> Result<T, AppError>,
    builtin: impl FnOnce() -> T,
) -> Result<T, AppError> {
    match path {
        Some(path) => {
            let value = load(path).inspect_err(|e| error!("  ❌ {}: {}", what, e))?;
            info!("  ✅ {}: loaded from {:?}", what, path);
            Ok(value)
        }
        None => {
            info!("  ✅ {}: built-in", what);
            Ok(builtin())
        }
    }
}

impl Resources {
    /// Load the SVM artifacts and every text resource named by `config`
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        let start = Instant::now();
        info!("Loading analysis resources");

        let classifier = SvmClassifier::load(&config.model_dir)
            .inspect_err(|e| error!("  ❌ classifier: {}", e))?;
        let card = classifier.card().clone();
        info!("  ✅ classifier: {}", classifier.name());

        let resources = Self::build(config, Arc::new(classifier), card)?;
        info!("Resources ready in {:.2?}", start.elapsed());
        Ok(resources)
    }

    /// Load the text resources around an already constructed classifier
    pub fn with_classifier(
        config: &AppConfig,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, AppError> {
        let card = ModelCard {
            method: classifier.name().to_string(),
            ..ModelCard::default()
        };
        Self::build(config, classifier, card)
    }

    fn build(
        config: &AppConfig,
        classifier: Arc<dyn Classifier>,
        card: ModelCard,
    ) -> Result<Self, AppError> {
        let lexicon = load_optional(
            "lexicon",
            config.lexicon_path.as_deref(),
            Lexicon::from_file,
            Lexicon::indonesian,
        )?;
        let stopwords = load_optional(
            "stopwords",
            config.stopwords_path.as_deref(),
            StopwordSet::from_file,
            StopwordSet::indonesian,
        )?;
        let stemmer: Arc<dyn Stemmer> = Arc::new(load_optional(
            "root words",
            config.root_words_path.as_deref(),
            IndonesianStemmer::from_dictionary_file,
            IndonesianStemmer::new,
        )?);
        let thresholds = load_optional(
            "insight thresholds",
            config.thresholds_path.as_deref(),
            InsightThresholds::from_file,
            InsightThresholds::default,
        )?;

        let analyzer = HoaxAnalyzer::new(
            classifier,
            Arc::new(TextNormalizer::new(stopwords, stemmer)),
            Arc::new(FeatureExtractor::new(&lexicon)?),
            Arc::new(InsightEngine::new(thresholds)?),
            AnalyzerConfig {
                min_clean_tokens: config.min_clean_tokens,
            },
        )?;

        Ok(Self { analyzer, card })
    }

    pub fn analyzer(&self) -> &HoaxAnalyzer {
        &self.analyzer
    }

    pub fn card(&self) -> &ModelCard {
        &self.card
    }
}
