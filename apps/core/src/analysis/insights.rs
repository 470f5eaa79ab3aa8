//! Insight Rule Engine.
//!
//! Explains a verdict with categorized, human-readable insights. Rules live in
//! a fixed, ordered table; each entry owns its category and a pure evaluation
//! function over the feature set and predicted label. Output order inside a
//! category is table order. Thresholds are named values in
//! `InsightThresholds` so they can be recalibrated without touching the rules.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use validator::Validate;

use super::analyzer::AnalysisResult;
use super::classifier::Label;
use super::features::FeatureSet;
use crate::error::AppError;

/// Insight grouping, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    WritingStyle,
    StructureCredibility,
    ManipulationPotential,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 3] = [
        InsightCategory::WritingStyle,
        InsightCategory::StructureCredibility,
        InsightCategory::ManipulationPotential,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InsightCategory::WritingStyle => "Writing Style",
            InsightCategory::StructureCredibility => "Structure & Credibility",
            InsightCategory::ManipulationPotential => "Manipulation Potential",
        }
    }

    fn index(&self) -> usize {
        match self {
            InsightCategory::WritingStyle => 0,
            InsightCategory::StructureCredibility => 1,
            InsightCategory::ManipulationPotential => 2,
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single (title, explanation) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub text: String,
}

impl Insight {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Recalibration points for every rule. Counts must be strictly above an
/// `*_above` value (or strictly below a `*_below` value) to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InsightThresholds {
    pub data_numbers_above: usize,
    #[validate(range(min = 0.0))]
    pub long_sentence_above: f64,
    #[validate(range(min = 0.0))]
    pub short_sentence_below: f64,
    pub questions_above: usize,
    pub quotes_above: usize,
    pub entities_above: usize,
    pub dates_above: usize,
    pub brief_words_below: usize,
    pub emotional_above: usize,
    pub clickbait_above: usize,
    pub exclamations_above: usize,
    pub uppercase_above: usize,
    pub first_person_above: usize,
    pub call_to_action_above: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            data_numbers_above: 2,
            long_sentence_above: 25.0,
            short_sentence_below: 10.0,
            questions_above: 1,
            quotes_above: 1,
            entities_above: 0,
            dates_above: 0,
            brief_words_below: 100,
            emotional_above: 1,
            clickbait_above: 0,
            exclamations_above: 2,
            uppercase_above: 2,
            first_person_above: 0,
            call_to_action_above: 0,
        }
    }
}

impl InsightThresholds {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.short_sentence_below > self.long_sentence_above {
            return Err(AppError::Validation(format!(
                "short_sentence_below ({}) exceeds long_sentence_above ({})",
                self.short_sentence_below, self.long_sentence_above
            )));
        }
        Ok(())
    }

    /// Load thresholds from JSON; omitted fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::ResourceLoad(format!("cannot read thresholds {}: {}", path.display(), e))
        })?;
        let thresholds: InsightThresholds = serde_json::from_str(&raw)?;
        thresholds.check()?;
        Ok(thresholds)
    }
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub features: &'a FeatureSet,
    pub label: Label,
    pub thresholds: &'a InsightThresholds,
}

/// One row of the rule table
#[derive(Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub category: InsightCategory,
    pub evaluate: fn(&RuleContext<'_>) -> Option<Insight>,
}

impl fmt::Debug for InsightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightRule")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish()
    }
}

// --- Writing Style ---

fn language_style(ctx: &RuleContext<'_>) -> Option<Insight> {
    let text = if ctx.label.is_hoax() {
        "Tends to be emotive and urgent, a tone often found in disinformation."
    } else {
        "Tends to be factual and objective, typical of credible news."
    };
    Some(Insight::new("Language Style", text))
}

fn text_orientation(ctx: &RuleContext<'_>) -> Option<Insight> {
    let text = if ctx.features.num_count > ctx.thresholds.data_numbers_above {
        "Data-driven, contains figures that can be verified."
    } else {
        "Narrative-driven, focuses on a story that may be subjective."
    };
    Some(Insight::new("Text Orientation", text))
}

fn sentence_complexity(ctx: &RuleContext<'_>) -> Option<Insight> {
    let avg = ctx.features.avg_sentence_length;
    let text = if avg > ctx.thresholds.long_sentence_above {
        "Sentences tend to be long and complex, possibly hard for a general audience to follow."
    } else if avg < ctx.thresholds.short_sentence_below && avg > 0.0 {
        "Sentences are very short, which may oversimplify the issue."
    } else {
        "Sentence structure has a reasonable complexity for a news article."
    };
    Some(Insight::new("Sentence Complexity", text))
}

fn rhetorical_questions(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.question_count;
    (n > ctx.thresholds.questions_above).then(|| {
        Insight::new(
            "Use of Questions",
            format!(
                "The text uses {} question marks. This can be a rhetorical technique to draw readers in.",
                n
            ),
        )
    })
}

// --- Structure & Credibility ---

fn source_attribution(ctx: &RuleContext<'_>) -> Option<Insight> {
    let text = if ctx.features.has_source {
        "Positive. The text mentions source keywords, raising its potential credibility."
    } else {
        "Negative. No explicit source is mentioned; the claim should be questioned."
    };
    Some(Insight::new("Source Attribution", text))
}

fn direct_quotation(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.quote_count;
    (n > ctx.thresholds.quotes_above).then(|| {
        Insight::new(
            "Direct Quotation",
            format!(
                "Positive. Found {} quotation marks, indicating quotes from sources.",
                n
            ),
        )
    })
}

fn entity_mentions(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.entity_mentions;
    let text = if n > ctx.thresholds.entities_above {
        format!(
            "Positive. Detected {} mentions of official institutions or titles.",
            n
        )
    } else {
        "No official entities are mentioned. Information that does not say who, what and where tends to be less credible."
            .to_string()
    };
    Some(Insight::new("Entity Mentions", text))
}

fn temporal_context(ctx: &RuleContext<'_>) -> Option<Insight> {
    (ctx.features.date_mentions > ctx.thresholds.dates_above).then(|| {
        Insight::new(
            "Temporal Context",
            "Positive. Mentions of dates or years place the information within a clear time frame.",
        )
    })
}

fn content_depth(ctx: &RuleContext<'_>) -> Option<Insight> {
    let words = ctx.features.word_count;
    let text = if words < ctx.thresholds.brief_words_below {
        format!(
            "Rather brief ({} words), likely lacking in-depth context.",
            words
        )
    } else {
        format!(
            "Reasonable article length ({} words), leaving room for adequate discussion.",
            words
        )
    };
    Some(Insight::new("Content Depth", text))
}

// --- Manipulation Potential ---

fn emotive_words(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.emotional_words;
    (n > ctx.thresholds.emotional_above).then(|| {
        Insight::new(
            "Emotive Words",
            format!(
                "Found {} emotionally provocative keywords (e.g. 'sebarkan', 'bahaya'). This is a red flag.",
                n
            ),
        )
    })
}

fn clickbait_phrases(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.clickbait_phrases;
    (n > ctx.thresholds.clickbait_above).then(|| {
        Insight::new(
            "Clickbait Phrases",
            format!("Detected {} phrases commonly used as clickbait.", n),
        )
    })
}

fn sensationalism(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.exclamation_count;
    (n > ctx.thresholds.exclamations_above).then(|| {
        Insight::new(
            "Sensationalism",
            format!(
                "Using {} exclamation marks suggests a potentially sensational writing style.",
                n
            ),
        )
    })
}

fn excessive_emphasis(ctx: &RuleContext<'_>) -> Option<Insight> {
    let n = ctx.features.upper_count;
    (n > ctx.thresholds.uppercase_above).then(|| {
        Insight::new(
            "Excessive Emphasis",
            format!(
                "Found {} words in all capitals. This is often used to create a sense of urgency.",
                n
            ),
        )
    })
}

fn subjectivity(ctx: &RuleContext<'_>) -> Option<Insight> {
    (ctx.features.first_person_count > ctx.thresholds.first_person_above).then(|| {
        Insight::new(
            "Subjectivity",
            "First-person pronouns ('saya', 'kami') detected, indicating an opinion piece rather than objective news.",
        )
    })
}

fn call_to_action(ctx: &RuleContext<'_>) -> Option<Insight> {
    (ctx.features.call_to_action > ctx.thresholds.call_to_action_above).then(|| {
        Insight::new(
            "Call to Action",
            "Red flag. The text explicitly asks to be shared. This is a hallmark of disinformation.",
        )
    })
}

// --- Combinations ---

fn classic_disinformation(ctx: &RuleContext<'_>) -> Option<Insight> {
    let f = ctx.features;
    (ctx.label.is_hoax() && f.emotional_words > ctx.thresholds.emotional_above && !f.has_source)
        .then(|| {
            Insight::new(
                "Classic Disinformation Pattern",
                "The combination of emotive language and no source is the most common pattern of hoax news.",
            )
        })
}

fn credible_news(ctx: &RuleContext<'_>) -> Option<Insight> {
    let f = ctx.features;
    (!ctx.label.is_hoax() && f.has_source && f.entity_mentions > ctx.thresholds.entities_above)
        .then(|| {
            Insight::new(
                "Credible News Pattern",
                "The combination of source attribution, official entities and neutral language is a strong indicator of trustworthy news.",
            )
        })
}

const RULES: &[InsightRule] = &[
    InsightRule { id: "language_style", category: InsightCategory::WritingStyle, evaluate: language_style },
    InsightRule { id: "text_orientation", category: InsightCategory::WritingStyle, evaluate: text_orientation },
    InsightRule { id: "sentence_complexity", category: InsightCategory::WritingStyle, evaluate: sentence_complexity },
    InsightRule { id: "rhetorical_questions", category: InsightCategory::WritingStyle, evaluate: rhetorical_questions },
    InsightRule { id: "source_attribution", category: InsightCategory::StructureCredibility, evaluate: source_attribution },
    InsightRule { id: "direct_quotation", category: InsightCategory::StructureCredibility, evaluate: direct_quotation },
    InsightRule { id: "entity_mentions", category: InsightCategory::StructureCredibility, evaluate: entity_mentions },
    InsightRule { id: "temporal_context", category: InsightCategory::StructureCredibility, evaluate: temporal_context },
    InsightRule { id: "content_depth", category: InsightCategory::StructureCredibility, evaluate: content_depth },
    InsightRule { id: "emotive_words", category: InsightCategory::ManipulationPotential, evaluate: emotive_words },
    InsightRule { id: "clickbait_phrases", category: InsightCategory::ManipulationPotential, evaluate: clickbait_phrases },
    InsightRule { id: "sensationalism", category: InsightCategory::ManipulationPotential, evaluate: sensationalism },
    InsightRule { id: "excessive_emphasis", category: InsightCategory::ManipulationPotential, evaluate: excessive_emphasis },
    InsightRule { id: "subjectivity", category: InsightCategory::ManipulationPotential, evaluate: subjectivity },
    InsightRule { id: "call_to_action", category: InsightCategory::ManipulationPotential, evaluate: call_to_action },
];

/// Evaluated after `RULES`; only the first firing entry is kept
const COMBINATION_RULES: &[InsightRule] = &[
    InsightRule { id: "classic_disinformation", category: InsightCategory::ManipulationPotential, evaluate: classic_disinformation },
    InsightRule { id: "credible_news", category: InsightCategory::StructureCredibility, evaluate: credible_news },
];

/// Insights grouped by category, in category presentation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightReport {
    sections: [Vec<Insight>; 3],
}

impl InsightReport {
    fn push(&mut self, category: InsightCategory, insight: Insight) {
        self.sections[category.index()].push(insight);
    }

    pub fn get(&self, category: InsightCategory) -> &[Insight] {
        &self.sections[category.index()]
    }

    /// Categories that received at least one insight, in presentation order
    pub fn non_empty(&self) -> impl Iterator<Item = (InsightCategory, &[Insight])> {
        InsightCategory::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, insights)| !insights.is_empty())
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn contains_title(&self, category: InsightCategory, title: &str) -> bool {
        self.get(category).iter().any(|i| i.title == title)
    }
}

impl Serialize for InsightReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections: Vec<_> = self.non_empty().collect();
        let mut map = serializer.serialize_map(Some(sections.len()))?;
        for (category, insights) in sections {
            map.serialize_entry(category.label(), insights)?;
        }
        map.end()
    }
}

/// Pure rule engine over a fixed table
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    thresholds: InsightThresholds,
}

impl InsightEngine {
    pub fn new(thresholds: InsightThresholds) -> Result<Self, AppError> {
        thresholds.check()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Independent rules in evaluation order
    pub fn rules() -> &'static [InsightRule] {
        RULES
    }

    /// Mutually exclusive combination rules in evaluation order
    pub fn combination_rules() -> &'static [InsightRule] {
        COMBINATION_RULES
    }

    /// Evaluate a single rule by id, bypassing the rest of the table
    pub fn evaluate_rule(&self, id: &str, features: &FeatureSet, label: Label) -> Option<Insight> {
        let ctx = RuleContext {
            features,
            label,
            thresholds: &self.thresholds,
        };
        RULES
            .iter()
            .chain(COMBINATION_RULES)
            .find(|rule| rule.id == id)
            .and_then(|rule| (rule.evaluate)(&ctx))
    }

    /// Explain an analysis result
    pub fn generate(&self, result: &AnalysisResult) -> InsightReport {
        self.generate_for(&result.features, result.label())
    }

    pub fn generate_for(&self, features: &FeatureSet, label: Label) -> InsightReport {
        let ctx = RuleContext {
            features,
            label,
            thresholds: &self.thresholds,
        };
        let mut report = InsightReport::default();

        for rule in RULES {
            if let Some(insight) = (rule.evaluate)(&ctx) {
                report.push(rule.category, insight);
            }
        }

        if let Some((rule, insight)) = COMBINATION_RULES
            .iter()
            .find_map(|rule| (rule.evaluate)(&ctx).map(|insight| (rule, insight)))
        {
            report.push(rule.category, insight);
        }

        report
    }
}
