//! Post-evaluation filtering and ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::evaluator::RuleMatchResult;
use crate::rule::ConsensusLabel;

/// How much disagreement a caller is willing to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusLevel {
    /// Only `consensus` rules.
    #[default]
    High,
    /// `consensus` and `disputed` rules.
    Consensus,
    /// Everything.
    All,
}

impl ConsensusLevel {
    pub const fn code(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Consensus => "consensus",
            Self::All => "all",
        }
    }

    /// Whether a rule with `label` passes at this level.
    pub const fn admits(self, label: ConsensusLabel) -> bool {
        match self {
            Self::High => matches!(label, ConsensusLabel::Consensus),
            Self::Consensus => !matches!(label, ConsensusLabel::MinorityView),
            Self::All => true,
        }
    }

    /// Like [`FromStr`], but unknown levels fall back to `High`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(level = s, "unknown consensus level, using high");
            Self::High
        })
    }
}

impl fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConsensusLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "consensus" => Ok(Self::Consensus),
            "all" | "minority_view" | "minority" => Ok(Self::All),
            other => Err(format!("unknown consensus level: {other}")),
        }
    }
}

/// Keep results whose consensus label is admitted at `level`.
pub fn filter_by_consensus(
    results: Vec<RuleMatchResult>,
    level: ConsensusLevel,
) -> Vec<RuleMatchResult> {
    results
        .into_iter()
        .filter(|r| level.admits(r.consensus_label))
        .collect()
}

/// Keep results tagged with at least one of `dimensions`.
///
/// Results without tags are not dimension-specific and always pass. An
/// empty `dimensions` list passes everything.
pub fn filter_by_dimension(
    results: Vec<RuleMatchResult>,
    dimensions: &[String],
) -> Vec<RuleMatchResult> {
    if dimensions.is_empty() {
        return results;
    }
    results
        .into_iter()
        .filter(|r| {
            r.dimension_tags.is_empty() || r.dimension_tags.iter().any(|t| dimensions.contains(t))
        })
        .collect()
}

/// Matched results only, highest score first. Equal scores are ordered by
/// the rule's confidence, then keep evaluation order.
pub fn rank_matches(results: Vec<RuleMatchResult>) -> Vec<RuleMatchResult> {
    let mut matched: Vec<_> = results.into_iter().filter(|r| r.matched).collect();
    matched.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Interpretation;

    fn result(id: &str, label: ConsensusLabel, tags: &[&str], score: f64) -> RuleMatchResult {
        RuleMatchResult {
            rule_id: id.into(),
            rule_name: id.into(),
            matched: score > 0.0,
            score,
            confidence: 0.7,
            consensus_label: label,
            dimension_tags: tags.iter().map(|t| t.to_string()).collect(),
            relevant_stars: Vec::new(),
            relevant_palaces: Vec::new(),
            interpretation: Interpretation::default(),
        }
    }

    fn ids(results: &[RuleMatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    fn sample() -> Vec<RuleMatchResult> {
        vec![
            result("c", ConsensusLabel::Consensus, &["career"], 0.6),
            result("d", ConsensusLabel::Disputed, &["wealth"], 0.9),
            result("m", ConsensusLabel::MinorityView, &[], 0.6),
            result("x", ConsensusLabel::Consensus, &[], 0.0),
        ]
    }

    #[test]
    fn consensus_levels() {
        assert_eq!(ids(&filter_by_consensus(sample(), ConsensusLevel::High)), ["c", "x"]);
        assert_eq!(
            ids(&filter_by_consensus(sample(), ConsensusLevel::Consensus)),
            ["c", "d", "x"]
        );
        assert_eq!(filter_by_consensus(sample(), ConsensusLevel::All).len(), 4);
    }

    #[test]
    fn lenient_parse() {
        assert_eq!(ConsensusLevel::parse_lenient("ALL"), ConsensusLevel::All);
        assert_eq!(ConsensusLevel::parse_lenient("minority_view"), ConsensusLevel::All);
        assert_eq!(ConsensusLevel::parse_lenient("whatever"), ConsensusLevel::High);
        assert!("whatever".parse::<ConsensusLevel>().is_err());
    }

    #[test]
    fn label_names_are_not_levels() {
        // a consensus label is not a level; fall back to the strictest
        assert!("disputed".parse::<ConsensusLevel>().is_err());
        assert_eq!(ConsensusLevel::parse_lenient("disputed"), ConsensusLevel::High);
        assert_eq!(
            ids(&filter_by_consensus(sample(), ConsensusLevel::parse_lenient("disputed"))),
            ["c", "x"]
        );
    }

    #[test]
    fn dimension_filter_keeps_untagged() {
        let dims = vec!["career".to_string()];
        assert_eq!(ids(&filter_by_dimension(sample(), &dims)), ["c", "m", "x"]);
        assert_eq!(filter_by_dimension(sample(), &[]).len(), 4);
    }

    #[test]
    fn ranking_is_stable_descending() {
        assert_eq!(ids(&rank_matches(sample())), ["d", "c", "m"]);
    }

    #[test]
    fn confidence_breaks_score_ties_only() {
        let mut results = sample();
        results[2].confidence = 0.95;
        results[1].confidence = 0.1;
        assert_eq!(ids(&rank_matches(results)), ["d", "m", "c"]);
    }
}
