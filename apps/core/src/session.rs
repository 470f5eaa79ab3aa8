//! Interactive session state and the serialized report.
//!
//! The "last result" slot belongs here, at the boundary. The analyzer itself
//! never remembers anything between calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::{
    AnalysisResult, ConfidenceBand, FeatureSet, HoaxAnalyzer, InsightReport, Label,
};
use crate::error::AppError;
use crate::samples::Sample;

pub const DISCLAIMER: &str = "Predictions are an indication, not absolute truth. Always cross-check with trusted sources.";

/// Presentation-ready outcome of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub label: Label,
    pub verdict: String,
    pub confidence_percent: f64,
    pub confidence_band: ConfidenceBand,
    pub interpretation: &'static str,
    pub hoax_probability: f64,
    pub processing_time: f64,
    pub cleaned_token_count: usize,
    pub features: FeatureSet,
    pub insights: InsightReport,
    pub analyzed_at: DateTime<Utc>,
    pub disclaimer: &'static str,
}

impl AnalysisReport {
    pub fn new(result: &AnalysisResult, insights: InsightReport) -> Self {
        let band = result.confidence_band();
        Self {
            label: result.label(),
            verdict: format!("Indicated {}", result.label()),
            confidence_percent: result.confidence_percent(),
            confidence_band: band,
            interpretation: band.label(),
            hoax_probability: result.classification.hoax_probability,
            processing_time: result.processing_time,
            cleaned_token_count: result.cleaned_token_count,
            features: result.features.clone(),
            insights,
            analyzed_at: result.analyzed_at,
            disclaimer: DISCLAIMER,
        }
    }
}

/// One user's working state
#[derive(Debug)]
pub struct AnalysisSession {
    analyzer: HoaxAnalyzer,
    last: Option<AnalysisResult>,
    last_error: Option<AppError>,
}

impl AnalysisSession {
    pub fn new(analyzer: HoaxAnalyzer) -> Self {
        Self {
            analyzer,
            last: None,
            last_error: None,
        }
    }

    /// Analyze `text`. Success replaces the last result; any failure clears
    /// it and is remembered as the last error.
    pub fn submit(&mut self, text: &str) -> Result<&AnalysisResult, AppError> {
        match self.analyzer.analyze(text) {
            Ok(result) => {
                self.last_error = None;
                Ok(&*self.last.insert(result))
            }
            Err(e) => {
                self.last = None;
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn last(&self) -> Option<&AnalysisResult> {
        self.last.as_ref()
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Report for the last result, insights included
    pub fn report(&self) -> Option<AnalysisReport> {
        self.last.as_ref().map(|result| {
            AnalysisReport::new(result, self.analyzer.insights().generate(result))
        })
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.last_error = None;
    }

    /// Reset the session and hand back a built-in text to analyze
    pub fn load_sample(&mut self, sample: Sample) -> &'static str {
        info!("Loaded {:?} sample", sample);
        self.clear();
        sample.text()
    }
}
