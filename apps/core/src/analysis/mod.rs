//! # Analysis Module
//!
//! Hoax detection pipeline for Indonesian news text.
//!
//! ## Components
//! - `lexicon`: Keyword vocabularies used by the feature extractor
//! - `stopwords`: Stopword set for normalization
//! - `stemmer`: Rule-based Indonesian stemming
//! - `normalizer`: Text cleaning for the classifier
//! - `features`: Raw linguistic signals from the original text
//! - `classifier`: TF-IDF + linear SVM adapter behind the `Classifier` trait
//! - `analyzer`: Main orchestrator
//! - `insights`: Rule engine explaining a verdict

pub mod analyzer;
pub mod classifier;
pub mod features;
pub mod insights;
pub mod lexicon;
pub mod normalizer;
pub mod stemmer;
pub mod stopwords;

pub use analyzer::{AnalysisResult, AnalyzerConfig, ConfidenceBand, HoaxAnalyzer};
pub use classifier::{ClassificationResult, Classifier, Label, ModelCard, SvmClassifier};
pub use features::{FeatureExtractor, FeatureSet};
pub use insights::{Insight, InsightCategory, InsightEngine, InsightReport, InsightThresholds};
pub use lexicon::Lexicon;
pub use normalizer::{CleanedText, TextNormalizer};
pub use stemmer::{IdentityStemmer, IndonesianStemmer, Stemmer};
pub use stopwords::StopwordSet;
