//! Match-strength scoring.
//!
//! Scorers only see rules that already matched. Any scorer plugged into the
//! evaluator must be monotone: for two matched rules where one's condition
//! is a superset of the other's, the larger condition must not score lower.
//! A rule's recorded confidence therefore never enters the score; ranking
//! uses it only to order equal scores.

use serde::{Deserialize, Serialize};

use crate::rule::{Condition, Rule};

/// Assigns a score in `0.0..=1.0` to a matched rule.
pub trait MatchScorer: Send + Sync {
    fn score(&self, rule: &Rule, condition: &Condition) -> f64;
}

/// Base score of a matched rule with no constraints.
pub const SPECIFICITY_BASE: f64 = 0.5;
/// Added per constraint element.
pub const SPECIFICITY_STEP: f64 = 0.1;
/// Legacy constant score.
pub const LEGACY_FIXED_SCORE: f64 = 0.8;

/// Rewards narrower conditions: 0.5 + 0.1 per constraint, capped at 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpecificityScorer;

impl MatchScorer for SpecificityScorer {
    fn score(&self, _rule: &Rule, condition: &Condition) -> f64 {
        specificity(condition)
    }
}

fn specificity(condition: &Condition) -> f64 {
    (SPECIFICITY_BASE + SPECIFICITY_STEP * condition.constraint_count() as f64).min(1.0)
}

/// Every match scores the same constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScorer(pub f64);

impl Default for FixedScorer {
    fn default() -> Self {
        Self(LEGACY_FIXED_SCORE)
    }
}

impl MatchScorer for FixedScorer {
    fn score(&self, _rule: &Rule, _condition: &Condition) -> f64 {
        self.0.clamp(0.0, 1.0)
    }
}

/// Built-in scorer selection, usable wherever a [`MatchScorer`] is expected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    #[default]
    Specificity,
    Fixed(f64),
}

impl MatchScorer for ScoringPolicy {
    fn score(&self, rule: &Rule, condition: &Condition) -> f64 {
        match *self {
            Self::Specificity => SpecificityScorer.score(rule, condition),
            Self::Fixed(v) => FixedScorer(v).score(rule, condition),
        }
    }
}
