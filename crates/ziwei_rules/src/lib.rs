//! Interpretive rule matching for assembled Ziwei charts.
//!
//! This crate provides:
//! - [`load_rules`]: JSON knowledge base → validated [`RuleSet`]
//! - [`evaluate`]: one [`RuleMatchResult`] per rule, in rule order
//! - Pluggable [`MatchScorer`]s, consensus/dimension filters and ranking
//!   (score first, recorded confidence as tie-break)
//! - [`summarize`]: dominant patterns, key stars and palaces, overall tone

pub mod error;
pub mod evaluator;
pub mod filter;
pub mod load;
pub mod rule;
pub mod scoring;
pub mod summary;

pub use error::RuleLoadError;
pub use evaluator::{
    EvaluatorConfig, RuleMatchResult, evaluate, evaluate_rule, evaluate_with,
    evaluate_with_scorer,
};
pub use filter::{ConsensusLevel, filter_by_consensus, filter_by_dimension, rank_matches};
pub use load::{RejectedRule, RuleSet, load_rules, load_rules_from_value};
pub use rule::{
    Condition, ConsensusLabel, DEFAULT_RULE_CONFIDENCE, Interpretation, Rule, RuleStatistics,
    StarRelation, TransformationRequirement,
};
pub use scoring::{FixedScorer, MatchScorer, ScoringPolicy, SpecificityScorer};
pub use summary::{EvaluationSummary, OverallTone, summarize};
