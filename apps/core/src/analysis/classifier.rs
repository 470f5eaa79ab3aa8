//! Classifier Adapter.
//!
//! The verdict comes from a pretrained TF-IDF vectorizer plus a linear SVM with
//! Platt-calibrated probabilities. Both artifacts are exported to JSON at
//! training time and loaded once at startup; any missing or inconsistent
//! artifact is a startup failure, never a per-request one.
//!
//! The rest of the pipeline only sees the `Classifier` trait.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use super::normalizer::CleanedText;
use crate::error::AppError;

/// File name of the exported vectorizer inside the model directory
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
/// File name of the exported SVM inside the model directory
pub const MODEL_FILE: &str = "svm_model.json";

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Binary verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Valid,
    Hoax,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Label {
    /// Numeric class as used at training time (VALID=0, HOAX=1)
    pub fn as_u8(&self) -> u8 {
        match self {
            Label::Valid => 0,
            Label::Hoax => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Valid),
            1 => Some(Label::Hoax),
            _ => None,
        }
    }

    pub fn is_hoax(&self) -> bool {
        matches!(self, Label::Hoax)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Label::Valid => "VALID",
            Label::Hoax => "HOAX",
        }
    }
}

/// Classifier output for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    /// Probability of `label`, in [0, 1]
    pub confidence: f64,
    /// Calibrated probability of the HOAX class
    pub hoax_probability: f64,
}

impl ClassificationResult {
    /// Build a result from a given label and the HOAX probability; the
    /// confidence is the probability of that label
    pub fn new(label: Label, hoax_probability: f64) -> Result<Self, AppError> {
        if !hoax_probability.is_finite() || !(0.0..=1.0).contains(&hoax_probability) {
            return Err(AppError::Classification(format!(
                "probability out of range: {}",
                hoax_probability
            )));
        }

        let confidence = if label.is_hoax() {
            hoax_probability
        } else {
            1.0 - hoax_probability
        };

        Ok(Self {
            label,
            confidence,
            hoax_probability,
        })
    }

    /// Pick the more probable label (VALID on a tie)
    pub fn from_hoax_probability(hoax_probability: f64) -> Result<Self, AppError> {
        let label = if hoax_probability > 0.5 {
            Label::Hoax
        } else {
            Label::Valid
        };
        Self::new(label, hoax_probability)
    }
}

/// Anything able to turn cleaned text into a verdict
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &CleanedText) -> Result<ClassificationResult, AppError>;

    /// Short identifier for logs
    fn name(&self) -> &str;
}

/// Sparse term-weight vector, sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(column, value)| dense.get(column).copied().unwrap_or(0.0) * value)
            .sum()
    }
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_true() -> bool {
    true
}

/// On-disk form of the vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

/// Bag-of-weighted-terms vectorizer over a vocabulary fixed at training time
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    token_pattern: Regex,
    lowercase: bool,
}

impl TfidfVectorizer {
    /// Validate an artifact and compile its token pattern
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, AppError> {
        let dimension = artifact.idf.len();

        if artifact.vocabulary.is_empty() {
            return Err(AppError::ResourceLoad("vectorizer vocabulary is empty".into()));
        }
        if artifact.vocabulary.len() != dimension {
            return Err(AppError::ResourceLoad(format!(
                "vectorizer has {} terms but {} idf weights",
                artifact.vocabulary.len(),
                dimension
            )));
        }
        if let Some((term, column)) = artifact.vocabulary.iter().find(|(_, &c)| c >= dimension) {
            return Err(AppError::ResourceLoad(format!(
                "vectorizer term '{}' maps to column {} outside 0..{}",
                term, column, dimension
            )));
        }
        if artifact.idf.iter().any(|w| !w.is_finite()) {
            return Err(AppError::ResourceLoad("vectorizer idf contains non-finite weights".into()));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(AppError::ResourceLoad(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&artifact.token_pattern)
            .map_err(|e| AppError::ResourceLoad(format!("invalid token_pattern: {}", e)))?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            token_pattern,
            lowercase: artifact.lowercase,
        })
    }

    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Word n-grams in the configured range, joined with single spaces
    fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let words: Vec<&str> = self.token_pattern.find_iter(&text).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            grams.extend(words.windows(n).map(|window| window.join(" ")));
        }
        grams
    }

    /// Vectorize one document
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&gram) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();

        if self.norm == Norm::L2 {
            let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                entries.iter_mut().for_each(|(_, v)| *v /= norm);
            }
        }

        SparseVector { entries }
    }
}

/// Published model statistics shown alongside verdicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    pub method: String,
    /// Held-out accuracy in [0, 1]
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub trained_on: Option<String>,
}

impl Default for ModelCard {
    fn default() -> Self {
        Self {
            method: "SVM".to_string(),
            accuracy: None,
            trained_on: None,
        }
    }
}

fn default_prob_a() -> f64 {
    -1.0
}

/// On-disk form of the linear SVM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmArtifact {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_prob_a")]
    pub prob_a: f64,
    #[serde(default)]
    pub prob_b: f64,
    #[serde(default)]
    pub card: ModelCard,
}

/// Linear decision function with Platt scaling
#[derive(Debug, Clone)]
pub struct LinearSvm {
    coef: Vec<f64>,
    intercept: f64,
    prob_a: f64,
    prob_b: f64,
    card: ModelCard,
}

impl LinearSvm {
    pub fn from_artifact(artifact: SvmArtifact) -> Result<Self, AppError> {
        if artifact.coef.is_empty() {
            return Err(AppError::ResourceLoad("svm has no coefficients".into()));
        }
        let finite = artifact.coef.iter().all(|w| w.is_finite())
            && artifact.intercept.is_finite()
            && artifact.prob_a.is_finite()
            && artifact.prob_b.is_finite();
        if !finite {
            return Err(AppError::ResourceLoad("svm contains non-finite parameters".into()));
        }

        Ok(Self {
            coef: artifact.coef,
            intercept: artifact.intercept,
            prob_a: artifact.prob_a,
            prob_b: artifact.prob_b,
            card: artifact.card,
        })
    }

    pub fn dimension(&self) -> usize {
        self.coef.len()
    }

    pub fn card(&self) -> &ModelCard {
        &self.card
    }

    /// Signed distance to the separating hyperplane
    pub fn decision(&self, x: &SparseVector) -> f64 {
        x.dot(&self.coef) + self.intercept
    }

    /// Platt sigmoid, evaluated without overflow for large |f|
    pub fn hoax_probability(&self, decision: f64) -> f64 {
        let f = self.prob_a * decision + self.prob_b;
        if f >= 0.0 {
            let e = (-f).exp();
            e / (1.0 + e)
        } else {
            1.0 / (1.0 + f.exp())
        }
    }

    pub fn predict(&self, x: &SparseVector) -> Result<ClassificationResult, AppError> {
        let decision = self.decision(x);
        if !decision.is_finite() {
            return Err(AppError::Classification(format!(
                "decision score is not finite: {}",
                decision
            )));
        }

        ClassificationResult::from_hoax_probability(self.hoax_probability(decision))
    }
}

/// Vectorizer + SVM loaded from the model directory
#[derive(Debug, Clone)]
pub struct SvmClassifier {
    vectorizer: TfidfVectorizer,
    svm: LinearSvm,
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::ResourceLoad(format!("cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::ResourceLoad(format!("malformed {}: {}", path.display(), e)))
}

impl SvmClassifier {
    pub fn new(vectorizer: TfidfVectorizer, svm: LinearSvm) -> Result<Self, AppError> {
        if vectorizer.dimension() != svm.dimension() {
            return Err(AppError::ResourceLoad(format!(
                "vectorizer produces {} features but svm expects {}",
                vectorizer.dimension(),
                svm.dimension()
            )));
        }
        Ok(Self { vectorizer, svm })
    }

    /// Load both artifacts from `dir`
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let model_path = dir.join(MODEL_FILE);

        let vectorizer = TfidfVectorizer::from_artifact(read_artifact(&vectorizer_path)?)?;
        let svm = LinearSvm::from_artifact(read_artifact(&model_path)?)?;
        let classifier = Self::new(vectorizer, svm)?;

        info!(
            "Loaded {} classifier from {:?} ({} features)",
            classifier.svm.card().method,
            dir,
            classifier.vectorizer.dimension()
        );

        Ok(classifier)
    }

    pub fn card(&self) -> &ModelCard {
        self.svm.card()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}

impl Classifier for SvmClassifier {
    fn classify(&self, text: &CleanedText) -> Result<ClassificationResult, AppError> {
        let features = self.vectorizer.transform(text.as_str());
        self.svm.predict(&features)
    }

    fn name(&self) -> &str {
        &self.svm.card().method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(terms: &[&str]) -> TfidfVectorizer {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary,
            idf: vec![1.0; terms.len()],
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Norm::L2,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
        })
        .unwrap()
    }

    #[test]
    fn test_label_codes() {
        assert_eq!(Label::Valid.as_u8(), 0);
        assert_eq!(Label::Hoax.as_u8(), 1);
        assert_eq!(Label::from_u8(1), Some(Label::Hoax));
        assert_eq!(Label::from_u8(2), None);
        assert_eq!(Label::Hoax.to_string(), "HOAX");
    }

    #[test]
    fn test_confidence_is_max_probability() {
        let result = ClassificationResult::new(Label::Valid, 0.2).unwrap();
        assert!((result.confidence - 0.8).abs() < 1e-12);

        assert!(ClassificationResult::new(Label::Hoax, f64::NAN).is_err());
        assert!(ClassificationResult::new(Label::Hoax, 1.5).is_err());
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let v = vectorizer(&["virus", "soda", "minum"]);
        let x = v.transform("virus soda soda unknown");

        assert_eq!(x.entries().len(), 2);
        assert!((x.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_ignores_single_letter_tokens() {
        let v = vectorizer(&["virus"]);
        assert!(v.transform("a b c").is_empty());
    }

    #[test]
    fn test_bigrams() {
        let vocabulary = HashMap::from([
            ("media sosial".to_string(), 0),
            ("media".to_string(), 1),
        ]);
        let v = TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary,
            idf: vec![2.0, 1.0],
            ngram_range: (1, 2),
            sublinear_tf: false,
            norm: Norm::None,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
        })
        .unwrap();

        let x = v.transform("media sosial");
        assert_eq!(x.entries(), &[(0, 2.0), (1, 1.0)]);
    }

    #[test]
    fn test_inconsistent_vectorizer_rejected() {
        let err = TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary: HashMap::from([("virus".to_string(), 3)]),
            idf: vec![1.0],
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Norm::L2,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
        })
        .unwrap_err();

        assert!(matches!(err, AppError::ResourceLoad(_)));
    }

    #[test]
    fn test_platt_probability_is_stable() {
        let svm = LinearSvm::from_artifact(SvmArtifact {
            coef: vec![1.0],
            intercept: 0.0,
            prob_a: -1.0,
            prob_b: 0.0,
            card: ModelCard::default(),
        })
        .unwrap();

        assert!((svm.hoax_probability(0.0) - 0.5).abs() < 1e-12);
        assert!(svm.hoax_probability(1_000.0) > 0.999);
        assert!(svm.hoax_probability(-1_000.0) < 0.001);
        assert!(svm.hoax_probability(1_000.0).is_finite());
    }

    #[test]
    fn test_label_follows_calibrated_probability() {
        // Platt offset pushes a slightly positive margin below 0.5
        let svm = LinearSvm::from_artifact(SvmArtifact {
            coef: vec![1.0],
            intercept: 0.0,
            prob_a: -3.0,
            prob_b: 0.1,
            card: ModelCard::default(),
        })
        .unwrap();
        let x = SparseVector {
            entries: vec![(0, 0.01)],
        };

        assert!(svm.decision(&x) > 0.0);
        let result = svm.predict(&x).unwrap();
        assert_eq!(result.label, Label::Valid);
        assert!(result.hoax_probability < 0.5);
        assert!((result.confidence - (1.0 - result.hoax_probability)).abs() < 1e-12);
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_confidence_belongs_to_given_label() {
        let hoax = ClassificationResult::new(Label::Hoax, 0.3).unwrap();
        assert!((hoax.confidence - 0.3).abs() < 1e-12);

        let tie = ClassificationResult::from_hoax_probability(0.5).unwrap();
        assert_eq!(tie.label, Label::Valid);
        assert!((tie.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let svm = LinearSvm::from_artifact(SvmArtifact {
            coef: vec![1.0, 2.0],
            intercept: 0.0,
            prob_a: -1.0,
            prob_b: 0.0,
            card: ModelCard::default(),
        })
        .unwrap();

        let err = SvmClassifier::new(vectorizer(&["virus"]), svm).unwrap_err();
        assert!(matches!(err, AppError::ResourceLoad(_)));
    }
}
