//! Rule model.
//!
//! Rules arrive as loosely-typed JSON and are converted once, at load time,
//! into the typed [`Rule`] / [`Condition`] shapes below. Every star, palace,
//! branch and transformation name is resolved against the closed
//! vocabularies of `ziwei_base` during that conversion, so matching never
//! compares strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use ziwei_base::{ALL_STARS, Branch, PalaceRole, StarId, Transformation};

use crate::error::RuleLoadError;

/// How widely a rule's interpretation is accepted among sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusLabel {
    Consensus,
    Disputed,
    MinorityView,
}

impl ConsensusLabel {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Consensus => "consensus",
            Self::Disputed => "disputed",
            Self::MinorityView => "minority_view",
        }
    }
}

impl fmt::Display for ConsensusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ConsensusLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "consensus" => Ok(Self::Consensus),
            "disputed" => Ok(Self::Disputed),
            "minority_view" | "minorityView" | "minority" => Ok(Self::MinorityView),
            other => Err(format!("unknown consensus label: {other}")),
        }
    }
}

/// Bilingual interpretation text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(default)]
    pub zh: String,
    #[serde(default)]
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
}

/// A transformation a rule requires, optionally pinned to one star.
///
/// Written as `化祿` / `祿` (any star) or `廉貞化祿` / `lianzhen-lu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformationRequirement {
    pub star: Option<StarId>,
    pub transformation: Transformation,
}

impl fmt::Display for TransformationRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(star) = self.star {
            f.write_str(star.name())?;
        }
        write!(f, "化{}", self.transformation.name())
    }
}

impl FromStr for TransformationRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(transformation) = s.parse::<Transformation>() {
            return Ok(Self {
                star: None,
                transformation,
            });
        }
        for star in ALL_STARS {
            for prefix in [star.name(), star.simplified_name(), star.code()] {
                let Some(rest) = strip_prefix_ignore_ascii_case(s, prefix) else {
                    continue;
                };
                let rest = rest.trim_start_matches(['-', '_', ' ', ':']);
                if let Ok(transformation) = rest.parse::<Transformation>() {
                    return Ok(Self {
                        star: Some(star),
                        transformation,
                    });
                }
            }
        }
        Err(format!("unknown transformation requirement: {s}"))
    }
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

impl Serialize for TransformationRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How the required stars of a condition must sit relative to each other.
///
/// Each relation names a group of palaces around an anchor palace; the
/// condition holds when every required star falls inside the group of a
/// single anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarRelation {
    /// 同宮: all in the anchor palace.
    SamePalace,
    /// 三方四正: the anchor, its two trine palaces and the opposite palace.
    TriPositional,
    /// 對宮: the anchor and the palace facing it.
    MutualWatch,
}

impl StarRelation {
    pub const fn code(self) -> &'static str {
        match self {
            Self::SamePalace => "same_palace",
            Self::TriPositional => "tri_positional",
            Self::MutualWatch => "mutual_watch",
        }
    }

    /// Branch offsets of the group, anchor first.
    pub const fn offsets(self) -> &'static [i32] {
        match self {
            Self::SamePalace => &[0],
            Self::TriPositional => &[0, 4, 8, 6],
            Self::MutualWatch => &[0, 6],
        }
    }
}

impl fmt::Display for StarRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StarRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "same_palace" | "samePalace" | "同宮" => Ok(Self::SamePalace),
            "tri_positional" | "triPositional" | "三方四正" => Ok(Self::TriPositional),
            "mutual_watch" | "mutualWatch" | "opposite" | "對宮" | "對照" => {
                Ok(Self::MutualWatch)
            }
            other => Err(format!("unknown star relation: {other}")),
        }
    }
}

/// Match constraints of a rule.
///
/// `None` means the constraint is absent, which matches vacuously. When
/// `palace` or `palace_branch` is set, required stars and transformations
/// are looked up inside that palace only (or, with a `relation`, inside the
/// relation's group around it). Excluded stars are always checked across
/// the whole chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_stars: Option<Vec<StarId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_stars: Option<Vec<StarId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palace: Option<PalaceRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palace_branch: Option<Branch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_transformations: Option<Vec<TransformationRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<StarRelation>,
}

impl Condition {
    pub fn required_stars(&self) -> &[StarId] {
        self.required_stars.as_deref().unwrap_or_default()
    }

    pub fn excluded_stars(&self) -> &[StarId] {
        self.excluded_stars.as_deref().unwrap_or_default()
    }

    pub fn required_transformations(&self) -> &[TransformationRequirement] {
        self.required_transformations.as_deref().unwrap_or_default()
    }

    /// Whether the condition is restricted to a single palace.
    pub fn is_scoped(&self) -> bool {
        self.palace.is_some() || self.palace_branch.is_some()
    }

    /// Number of individual constraints: one per listed star or
    /// transformation, plus one for each palace selector and the relation.
    pub fn constraint_count(&self) -> usize {
        self.required_stars().len()
            + self.excluded_stars().len()
            + self.required_transformations().len()
            + usize::from(self.palace.is_some())
            + usize::from(self.palace_branch.is_some())
            + usize::from(self.relation.is_some())
    }
}

/// Empirical backing for a rule, when the knowledge base records it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleStatistics {
    #[serde(default, alias = "sampleSize", skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<u32>,
    #[serde(default, alias = "matchRate", skip_serializing_if = "Option::is_none")]
    pub match_rate: Option<f64>,
    #[serde(
        default,
        alias = "confidence_level",
        alias = "confidenceLevel",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

/// Confidence assumed for rules that record none.
pub const DEFAULT_RULE_CONFIDENCE: f64 = 0.7;

/// A validated interpretive rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    /// `None` when the record had no condition; such a rule never matches.
    pub condition: Option<Condition>,
    pub interpretation: Interpretation,
    pub consensus_label: ConsensusLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<RuleStatistics>,
}

impl Rule {
    /// Dimension tags, empty when the rule carries none.
    pub fn dimension_tags(&self) -> &[String] {
        self.dimension_tags.as_deref().unwrap_or_default()
    }

    /// Recorded `statistics.confidence`, clamped to `0.0..=1.0`, or
    /// [`DEFAULT_RULE_CONFIDENCE`].
    pub fn confidence(&self) -> f64 {
        self.statistics
            .as_ref()
            .and_then(|s| s.confidence)
            .unwrap_or(DEFAULT_RULE_CONFIDENCE)
            .clamp(0.0, 1.0)
    }
}

/// Rule record as it appears in the knowledge base. Both snake_case and
/// camelCase spellings are accepted; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRule {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    condition: Option<RawCondition>,
    #[serde(default)]
    interpretation: Interpretation,
    #[serde(alias = "consensusLabel")]
    consensus_label: String,
    #[serde(default, alias = "dimensionTags")]
    dimension_tags: Option<Vec<String>>,
    #[serde(default)]
    statistics: Option<RuleStatistics>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(default, alias = "requiredStars")]
    required_stars: Option<Vec<String>>,
    #[serde(default, alias = "excludedStars")]
    excluded_stars: Option<Vec<String>>,
    /// Single-star shorthand, folded into `required_stars`.
    #[serde(default)]
    star: Option<String>,
    #[serde(default)]
    palace: Option<String>,
    #[serde(default, alias = "palaceBranch")]
    palace_branch: Option<String>,
    #[serde(default, alias = "requiredTransformations")]
    required_transformations: Option<Vec<String>>,
    #[serde(default)]
    relation: Option<String>,
}

impl RawRule {
    pub(crate) fn validate(self, index: usize) -> Result<Rule, RuleLoadError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(RuleLoadError::EmptyId { index });
        }
        let consensus_label: ConsensusLabel = self.consensus_label.parse().map_err(|_| {
            RuleLoadError::UnknownConsensusLabel {
                rule: id.clone(),
                name: self.consensus_label.clone(),
            }
        })?;
        let condition = self.condition.map(|c| c.validate(&id)).transpose()?;
        Ok(Rule {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            condition,
            interpretation: self.interpretation,
            consensus_label,
            dimension_tags: self.dimension_tags,
            statistics: self.statistics,
        })
    }
}

impl RawCondition {
    fn validate(self, rule: &str) -> Result<Condition, RuleLoadError> {
        let mut required_stars = self
            .required_stars
            .map(|names| parse_stars(rule, &names))
            .transpose()?;
        if let Some(name) = self.star {
            let star = parse_star(rule, &name)?;
            let list = required_stars.get_or_insert_with(Vec::new);
            if !list.contains(&star) {
                list.push(star);
            }
        }
        let excluded_stars = self
            .excluded_stars
            .map(|names| parse_stars(rule, &names))
            .transpose()?;
        let palace = self
            .palace
            .map(|name| {
                name.parse::<PalaceRole>()
                    .map_err(|_| RuleLoadError::UnknownPalace {
                        rule: rule.to_string(),
                        name,
                    })
            })
            .transpose()?;
        let palace_branch = self
            .palace_branch
            .map(|name| {
                name.parse::<Branch>()
                    .map_err(|_| RuleLoadError::UnknownBranch {
                        rule: rule.to_string(),
                        name,
                    })
            })
            .transpose()?;
        let required_transformations = self
            .required_transformations
            .map(|names| {
                names
                    .into_iter()
                    .map(|name| {
                        name.parse::<TransformationRequirement>().map_err(|_| {
                            RuleLoadError::UnknownTransformation {
                                rule: rule.to_string(),
                                name,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let relation = self
            .relation
            .map(|name| {
                name.parse::<StarRelation>()
                    .map_err(|_| RuleLoadError::UnknownRelation {
                        rule: rule.to_string(),
                        name,
                    })
            })
            .transpose()?;
        Ok(Condition {
            required_stars,
            excluded_stars,
            palace,
            palace_branch,
            required_transformations,
            relation,
        })
    }
}

fn parse_star(rule: &str, name: &str) -> Result<StarId, RuleLoadError> {
    StarId::from_name(name.trim()).ok_or_else(|| RuleLoadError::UnknownStar {
        rule: rule.to_string(),
        name: name.to_string(),
    })
}

/// Resolve star names, dropping repeats but keeping first-seen order.
fn parse_stars(rule: &str, names: &[String]) -> Result<Vec<StarId>, RuleLoadError> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let star = parse_star(rule, name)?;
        if !out.contains(&star) {
            out.push(star);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawRule {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn camel_and_snake_case_accepted() {
        let a = raw(
            r#"{"id":"a","name":"A","condition":{"requiredStars":["紫微"]},
                "interpretation":{"zh":"甲","en":"a"},"consensusLabel":"consensus",
                "dimensionTags":["career"]}"#,
        )
        .validate(0)
        .unwrap();
        let b = raw(
            r#"{"id":"a","name":"A","condition":{"required_stars":["紫微"]},
                "interpretation":{"zh":"甲","en":"a"},"consensus_label":"consensus",
                "dimension_tags":["career"]}"#,
        )
        .validate(0)
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.condition.unwrap().required_stars(), [StarId::Ziwei]);
    }

    #[test]
    fn star_shorthand_folds_into_required() {
        let rule = raw(
            r#"{"id":"s","condition":{"star":"紫微","palace":"命宮"},
                "consensus_label":"consensus"}"#,
        )
        .validate(0)
        .unwrap();
        let c = rule.condition.unwrap();
        assert_eq!(c.required_stars(), [StarId::Ziwei]);
        assert_eq!(c.palace, Some(PalaceRole::Life));
        assert_eq!(rule.name, "s");
    }

    #[test]
    fn unknown_star_rejected() {
        let err = raw(
            r#"{"id":"x","condition":{"requiredStars":["紫薇星"]},"consensus_label":"consensus"}"#,
        )
        .validate(3)
        .unwrap_err();
        assert!(matches!(err, RuleLoadError::UnknownStar { ref name, .. } if name == "紫薇星"));
    }

    #[test]
    fn simplified_and_pinyin_names_resolve() {
        let rule = raw(
            r#"{"id":"x","condition":{"requiredStars":["贪狼","qisha"],"excludedStars":["禄存"]},
                "consensus_label":"disputed"}"#,
        )
        .validate(0)
        .unwrap();
        let c = rule.condition.unwrap();
        assert_eq!(c.required_stars(), [StarId::Tanlang, StarId::Qisha]);
        assert_eq!(c.excluded_stars(), [StarId::Lucun]);
        assert_eq!(rule.consensus_label, ConsensusLabel::Disputed);
    }

    #[test]
    fn missing_condition_kept_as_none() {
        let rule = raw(r#"{"id":"n","consensus_label":"consensus"}"#)
            .validate(0)
            .unwrap();
        assert!(rule.condition.is_none());
        assert!(rule.dimension_tags().is_empty());
    }

    #[test]
    fn bad_consensus_label_rejected() {
        let err = raw(r#"{"id":"n","consensus_label":"maybe"}"#)
            .validate(0)
            .unwrap_err();
        assert!(matches!(err, RuleLoadError::UnknownConsensusLabel { .. }));
    }

    #[test]
    fn transformation_requirements_parse() {
        let any: TransformationRequirement = "化忌".parse().unwrap();
        assert_eq!(any.star, None);
        assert_eq!(any.transformation, Transformation::Ji);
        let pinned: TransformationRequirement = "廉貞化祿".parse().unwrap();
        assert_eq!(pinned.star, Some(StarId::Lianzhen));
        assert_eq!(pinned.transformation, Transformation::Lu);
        let ascii: TransformationRequirement = "lianzhen-lu".parse().unwrap();
        assert_eq!(ascii, pinned);
        assert_eq!(pinned.to_string(), "廉貞化祿");
        assert!("紫微化X".parse::<TransformationRequirement>().is_err());
    }

    #[test]
    fn constraint_count_sums_parts() {
        let c = Condition {
            required_stars: Some(vec![StarId::Ziwei, StarId::Tianfu]),
            excluded_stars: Some(vec![StarId::Qingyang]),
            palace: Some(PalaceRole::Life),
            palace_branch: None,
            required_transformations: None,
            relation: Some(StarRelation::TriPositional),
        };
        assert_eq!(c.constraint_count(), 5);
        assert!(c.is_scoped());
        assert_eq!(Condition::default().constraint_count(), 0);
    }

    #[test]
    fn relation_names_resolve() {
        for (name, relation) in [
            ("same_palace", StarRelation::SamePalace),
            ("同宮", StarRelation::SamePalace),
            ("triPositional", StarRelation::TriPositional),
            ("三方四正", StarRelation::TriPositional),
            ("mutual_watch", StarRelation::MutualWatch),
            ("對宮", StarRelation::MutualWatch),
        ] {
            assert_eq!(name.parse::<StarRelation>(), Ok(relation));
        }
        let rule = raw(
            r#"{"id":"r","condition":{"requiredStars":["紫微","天府"],"relation":"mutual_watch"},
                "consensus_label":"consensus"}"#,
        )
        .validate(0)
        .unwrap();
        assert_eq!(
            rule.condition.unwrap().relation,
            Some(StarRelation::MutualWatch)
        );
    }

    #[test]
    fn unknown_relation_rejected_at_load() {
        let err = raw(
            r#"{"id":"r","condition":{"requiredStars":["紫微"],"relation":"nearby"},
                "consensus_label":"consensus"}"#,
        )
        .validate(0)
        .unwrap_err();
        assert!(matches!(err, RuleLoadError::UnknownRelation { ref name, .. } if name == "nearby"));
    }
}
