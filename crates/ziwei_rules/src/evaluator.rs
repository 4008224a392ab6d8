//! Rule evaluation against an assembled chart.
//!
//! A rule matches when every required star is present, every required
//! transformation is carried by a star, and no excluded star appears
//! anywhere in the chart. Required stars and transformations are looked up
//! across the whole chart unless the condition selects a palace by role
//! and/or branch; when both selectors are given they must name the same
//! palace. A [`StarRelation`] further requires the required stars to share
//! one palace group.

use serde::Serialize;

use ziwei_base::{PalaceRole, StarId};
use ziwei_chart::{ChartLayer, PalaceState};

use crate::rule::{Condition, ConsensusLabel, Interpretation, Rule, StarRelation};
use crate::scoring::{MatchScorer, ScoringPolicy};

/// Evaluator options.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EvaluatorConfig {
    pub scoring: ScoringPolicy,
}

/// Outcome of one rule against one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatchResult {
    pub rule_id: String,
    pub rule_name: String,
    pub matched: bool,
    /// 0 for unmatched rules.
    pub score: f64,
    /// The rule's recorded confidence; breaks score ties when ranking.
    pub confidence: f64,
    pub consensus_label: ConsensusLabel,
    pub dimension_tags: Vec<String>,
    /// Stars that satisfied required-star and transformation constraints.
    pub relevant_stars: Vec<StarId>,
    /// Palaces holding those stars, or the scoped palace.
    pub relevant_palaces: Vec<PalaceRole>,
    pub interpretation: Interpretation,
}

/// Evaluate every rule with the default configuration.
pub fn evaluate<'r>(
    chart: &ChartLayer,
    rules: impl IntoIterator<Item = &'r Rule>,
) -> Vec<RuleMatchResult> {
    evaluate_with(chart, rules, &EvaluatorConfig::default())
}

/// Evaluate every rule. Results follow rule order, one per rule.
pub fn evaluate_with<'r>(
    chart: &ChartLayer,
    rules: impl IntoIterator<Item = &'r Rule>,
    config: &EvaluatorConfig,
) -> Vec<RuleMatchResult> {
    evaluate_with_scorer(chart, rules, &config.scoring)
}

/// Evaluate every rule with a caller-supplied scorer.
pub fn evaluate_with_scorer<'r>(
    chart: &ChartLayer,
    rules: impl IntoIterator<Item = &'r Rule>,
    scorer: &dyn MatchScorer,
) -> Vec<RuleMatchResult> {
    let results: Vec<_> = rules
        .into_iter()
        .map(|rule| evaluate_rule(chart, rule, scorer))
        .collect();
    tracing::debug!(
        rules = results.len(),
        matched = results.iter().filter(|r| r.matched).count(),
        "evaluated rules"
    );
    results
}

/// Evaluate a single rule.
pub fn evaluate_rule(
    chart: &ChartLayer,
    rule: &Rule,
    scorer: &dyn MatchScorer,
) -> RuleMatchResult {
    let found = rule
        .condition
        .as_ref()
        .and_then(|condition| match_condition(chart, condition).map(|m| (condition, m)));
    let (matched, score, relevant_stars, relevant_palaces) = match found {
        Some((condition, m)) => (
            true,
            scorer.score(rule, condition).clamp(0.0, 1.0),
            m.stars,
            m.palaces,
        ),
        None => (false, 0.0, Vec::new(), Vec::new()),
    };
    RuleMatchResult {
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        matched,
        score,
        confidence: rule.confidence(),
        consensus_label: rule.consensus_label,
        dimension_tags: rule.dimension_tags().to_vec(),
        relevant_stars,
        relevant_palaces,
        interpretation: rule.interpretation.clone(),
    }
}

struct ConditionMatch {
    stars: Vec<StarId>,
    palaces: Vec<PalaceRole>,
}

fn scope<'c>(chart: &'c ChartLayer, condition: &Condition) -> Vec<&'c PalaceState> {
    match (condition.palace, condition.palace_branch) {
        (None, None) => chart.palaces().iter().collect(),
        (Some(role), None) => vec![chart.palace(role)],
        (None, Some(branch)) => vec![chart.palace_at(branch)],
        (Some(role), Some(branch)) => {
            let palace = chart.palace(role);
            if palace.branch == branch {
                vec![palace]
            } else {
                Vec::new()
            }
        }
    }
}

/// Where each required star sits. With a relation, the stars must all fall
/// in the group of one anchor palace taken from `scope`.
fn required_star_holders<'c>(
    chart: &'c ChartLayer,
    condition: &Condition,
    scope: &[&'c PalaceState],
) -> Option<Vec<(StarId, &'c PalaceState)>> {
    let within = |region: &[&'c PalaceState]| {
        condition
            .required_stars()
            .iter()
            .map(|&star| {
                region
                    .iter()
                    .copied()
                    .find(|p| p.has_star(star))
                    .map(|p| (star, p))
            })
            .collect::<Option<Vec<_>>>()
    };
    match condition.relation {
        None => within(scope),
        Some(relation) => scope
            .iter()
            .find_map(|anchor| within(&relation_group(chart, anchor, relation))),
    }
}

fn relation_group<'c>(
    chart: &'c ChartLayer,
    anchor: &PalaceState,
    relation: StarRelation,
) -> Vec<&'c PalaceState> {
    relation
        .offsets()
        .iter()
        .map(|&steps| chart.palace_at(anchor.branch.offset(steps)))
        .collect()
}

fn match_condition(chart: &ChartLayer, condition: &Condition) -> Option<ConditionMatch> {
    if condition
        .excluded_stars()
        .iter()
        .any(|&star| chart.palaces().iter().any(|p| p.has_star(star)))
    {
        return None;
    }
    let palaces = scope(chart, condition);
    if palaces.is_empty() {
        return None;
    }

    let mut stars = Vec::new();
    let mut roles = Vec::new();
    let mut note = |star: StarId, palace: &PalaceState| {
        if !stars.contains(&star) {
            stars.push(star);
        }
        if !roles.contains(&palace.role) {
            roles.push(palace.role);
        }
    };

    for (star, palace) in required_star_holders(chart, condition, &palaces)? {
        note(star, palace);
    }
    for req in condition.required_transformations() {
        let (palace, instance) = palaces.iter().copied().find_map(|p| {
            p.stars
                .iter()
                .find(|s| {
                    req.star.is_none_or(|star| s.star == star)
                        && s.has_transformation(req.transformation)
                })
                .map(|s| (p, s))
        })?;
        note(instance.star, palace);
    }

    if condition.is_scoped() {
        for p in &palaces {
            if !roles.contains(&p.role) {
                roles.push(p.role);
            }
        }
    }
    roles.sort();
    Some(ConditionMatch {
        stars,
        palaces: roles,
    })
}
