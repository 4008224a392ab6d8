//! Roll-up of an evaluation run.

use serde::Serialize;

use ziwei_base::{PalaceRole, StarId};

use crate::evaluator::RuleMatchResult;
use crate::filter::rank_matches;

/// Number of pattern names listed in [`EvaluationSummary::dominant_patterns`].
pub const DOMINANT_PATTERN_COUNT: usize = 3;

/// Characters that mark a rule name as describing a challenging pattern.
pub const CHALLENGING_MARKERS: [char; 3] = ['凶', '煞', '訟'];

/// One side must outnumber the other by this factor to set the tone.
pub const TONE_RATIO: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallTone {
    Auspicious,
    #[default]
    Neutral,
    Challenging,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub total_rules: usize,
    pub matched_rules: usize,
    /// Names of the highest-scoring matches.
    pub dominant_patterns: Vec<String>,
    /// Stars cited by any match, first-seen order.
    pub key_stars: Vec<StarId>,
    /// Palaces cited by any match, in layout order.
    pub key_palaces: Vec<PalaceRole>,
    pub overall_tone: OverallTone,
}

fn is_challenging(name: &str) -> bool {
    name.contains(CHALLENGING_MARKERS)
}

/// Summarize evaluation results. Only matched results contribute.
pub fn summarize(results: &[RuleMatchResult]) -> EvaluationSummary {
    let total_rules = results.len();
    let ranked = rank_matches(results.to_vec());

    let mut key_stars = Vec::new();
    let mut key_palaces = Vec::new();
    for r in &ranked {
        for &star in &r.relevant_stars {
            if !key_stars.contains(&star) {
                key_stars.push(star);
            }
        }
        for &role in &r.relevant_palaces {
            if !key_palaces.contains(&role) {
                key_palaces.push(role);
            }
        }
    }
    key_palaces.sort();

    let challenging = ranked.iter().filter(|r| is_challenging(&r.rule_name)).count() as f64;
    let auspicious = ranked.len() as f64 - challenging;
    let overall_tone = if auspicious > challenging * TONE_RATIO {
        OverallTone::Auspicious
    } else if challenging > auspicious * TONE_RATIO {
        OverallTone::Challenging
    } else {
        OverallTone::Neutral
    };

    EvaluationSummary {
        total_rules,
        matched_rules: ranked.len(),
        dominant_patterns: ranked
            .iter()
            .take(DOMINANT_PATTERN_COUNT)
            .map(|r| r.rule_name.clone())
            .collect(),
        key_stars,
        key_palaces,
        overall_tone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{ConsensusLabel, Interpretation};

    fn matched(name: &str, score: f64, stars: &[StarId], palaces: &[PalaceRole]) -> RuleMatchResult {
        RuleMatchResult {
            rule_id: name.into(),
            rule_name: name.into(),
            matched: score > 0.0,
            score,
            confidence: 0.7,
            consensus_label: ConsensusLabel::Consensus,
            dimension_tags: Vec::new(),
            relevant_stars: stars.to_vec(),
            relevant_palaces: palaces.to_vec(),
            interpretation: Interpretation::default(),
        }
    }

    #[test]
    fn empty_is_neutral() {
        let s = summarize(&[]);
        assert_eq!(s.total_rules, 0);
        assert_eq!(s.overall_tone, OverallTone::Neutral);
    }

    #[test]
    fn collects_from_matches_only() {
        let results = [
            matched("紫府同宮", 0.7, &[StarId::Ziwei, StarId::Tianfu], &[PalaceRole::Career]),
            matched("羊陀夾命", 0.0, &[StarId::Qingyang], &[PalaceRole::Life]),
            matched("祿馬交馳", 0.9, &[StarId::Lucun, StarId::Tianma], &[PalaceRole::Life]),
        ];
        let s = summarize(&results);
        assert_eq!(s.total_rules, 3);
        assert_eq!(s.matched_rules, 2);
        assert_eq!(s.dominant_patterns, ["祿馬交馳", "紫府同宮"]);
        assert_eq!(
            s.key_stars,
            [StarId::Lucun, StarId::Tianma, StarId::Ziwei, StarId::Tianfu]
        );
        assert_eq!(s.key_palaces, [PalaceRole::Life, PalaceRole::Career]);
        assert_eq!(s.overall_tone, OverallTone::Auspicious);
    }

    #[test]
    fn challenging_tone() {
        let results = [
            matched("火鈴夾命凶", 0.6, &[], &[]),
            matched("七殺煞星", 0.6, &[], &[]),
            matched("紫微坐命", 0.6, &[], &[]),
        ];
        assert_eq!(summarize(&results).overall_tone, OverallTone::Challenging);
    }
}
