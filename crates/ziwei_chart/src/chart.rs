//! Twelve-palace chart assembly.
//!
//! The assembler runs every placement stage in dependency order:
//! year → effective month → life/body palace → life palace stem-branch →
//! bureau → anchors → major stars → auxiliary stars → transformations →
//! palace layout (with the 長生 and 博士 rings) → decade and annual limits.
//! Each stage only reads what earlier stages produced, and the assembled
//! [`ChartLayer`] is never mutated afterwards.

use serde::Serialize;

use ziwei_base::{
    ALL_PALACE_ROLES, AnchorPlacement, AnnualLimit, AuxiliaryInputs, BirthInput, Branch, Bureau,
    DecadeLimit, LifeStage, LimitDirection, PalaceRole, ScholarDeity, StarId, StarInstance,
    StemBranch, TABLE_VERSION, Transformation, ZiweiError, annual_limit_for_age, annual_limits,
    apply_transformations, decade_limits, derive_body_palace_branch, derive_bureau,
    derive_life_palace_branch, find_star, life_stages_by_branch, merge_star_maps,
    palace_stem_branch, place_auxiliary_stars_with, place_major_stars, place_ziwei_and_tianfu,
    resolve_transformations, resolve_year_stem_branch, scholar_deities_by_branch,
};

use crate::config::ChartConfig;

/// One palace of an assembled chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalaceState {
    pub role: PalaceRole,
    pub branch: Branch,
    pub stem_branch: StemBranch,
    pub is_life_palace: bool,
    pub is_body_palace: bool,
    /// Major stars first, then auxiliary and minor stars, each in table order.
    pub stars: Vec<StarInstance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<LifeStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholar_deity: Option<ScholarDeity>,
}

impl PalaceState {
    pub fn has_star(&self, star: StarId) -> bool {
        self.stars.iter().any(|s| s.star == star)
    }

    /// Whether any star in this palace carries `t`.
    pub fn has_transformation(&self, t: Transformation) -> bool {
        self.stars.iter().any(|s| s.has_transformation(t))
    }

    pub fn major_stars(&self) -> impl Iterator<Item = &StarInstance> {
        self.stars.iter().filter(|s| s.star.is_major())
    }

    /// A palace with no major star borrows from the opposite palace (借星).
    pub fn is_empty_of_major_stars(&self) -> bool {
        self.major_stars().next().is_none()
    }
}

/// One resolved transformation and where it landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TransformedStar {
    pub star: StarId,
    pub transformation: Transformation,
    pub branch: Branch,
}

/// An assembled natal chart.
///
/// Only [`assemble_chart`] and [`assemble_chart_with`] construct this type,
/// so every instance satisfies the layout invariants: twelve palaces in
/// role order, one life palace, one body palace, and each placed star in
/// exactly one palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayer {
    birth: BirthInput,
    year: StemBranch,
    effective_lunar_month: u8,
    life_palace_branch: Branch,
    body_palace_branch: Branch,
    life_palace_stem_branch: StemBranch,
    bureau: Bureau,
    anchors: AnchorPlacement,
    transformations: Vec<TransformedStar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decade_direction: Option<LimitDirection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decade_limits: Vec<DecadeLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annual_direction: Option<LimitDirection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annual_limits: Vec<AnnualLimit>,
    palaces: Vec<PalaceState>,
    table_version: &'static str,
}

impl ChartLayer {
    pub fn birth(&self) -> &BirthInput {
        &self.birth
    }

    pub fn year_stem_branch(&self) -> StemBranch {
        self.year
    }

    /// Month number actually used for placement.
    pub fn effective_lunar_month(&self) -> u8 {
        self.effective_lunar_month
    }

    pub fn life_palace_branch(&self) -> Branch {
        self.life_palace_branch
    }

    pub fn body_palace_branch(&self) -> Branch {
        self.body_palace_branch
    }

    pub fn life_palace_stem_branch(&self) -> StemBranch {
        self.life_palace_stem_branch
    }

    pub fn bureau(&self) -> Bureau {
        self.bureau
    }

    pub fn anchors(&self) -> AnchorPlacement {
        self.anchors
    }

    /// The four transformations in 祿, 權, 科, 忌 order.
    pub fn transformations(&self) -> &[TransformedStar] {
        &self.transformations
    }

    pub fn decade_direction(&self) -> Option<LimitDirection> {
        self.decade_direction
    }

    /// Empty when decade limits were disabled in the config.
    pub fn decade_limits(&self) -> &[DecadeLimit] {
        &self.decade_limits
    }

    pub fn annual_direction(&self) -> Option<LimitDirection> {
        self.annual_direction
    }

    /// Ages 1..=120, empty when annual limits were disabled in the config.
    pub fn annual_limits(&self) -> &[AnnualLimit] {
        &self.annual_limits
    }

    /// Palace the annual limit for `age` falls in.
    pub fn annual_palace(&self, age: u16) -> Option<&PalaceState> {
        annual_limit_for_age(&self.annual_limits, age).map(|l| self.palace_at(l.branch))
    }

    /// The twelve palaces, indexed by [`PalaceRole::index`].
    pub fn palaces(&self) -> &[PalaceState] {
        &self.palaces
    }

    pub fn palace(&self, role: PalaceRole) -> &PalaceState {
        &self.palaces[role.index() as usize]
    }

    pub fn palace_at(&self, branch: Branch) -> &PalaceState {
        self.palace(PalaceRole::at_branch(branch, self.life_palace_branch))
    }

    pub fn life_palace(&self) -> &PalaceState {
        self.palace(PalaceRole::Life)
    }

    pub fn body_palace(&self) -> &PalaceState {
        self.palace_at(self.body_palace_branch)
    }

    /// Palace holding `star`, if it was placed.
    pub fn palace_of_star(&self, star: StarId) -> Option<&PalaceState> {
        self.palaces.iter().find(|p| p.has_star(star))
    }

    /// Every placed star, palace by palace.
    pub fn stars(&self) -> impl Iterator<Item = (&PalaceState, &StarInstance)> {
        self.palaces
            .iter()
            .flat_map(|p| p.stars.iter().map(move |s| (p, s)))
    }

    pub fn table_version(&self) -> &'static str {
        self.table_version
    }
}

/// Assemble a chart with the default [`ChartConfig`].
pub fn assemble_chart(birth: &BirthInput) -> Result<ChartLayer, ZiweiError> {
    assemble_chart_with(birth, &ChartConfig::default())
}

/// Assemble a chart.
pub fn assemble_chart_with(
    birth: &BirthInput,
    config: &ChartConfig,
) -> Result<ChartLayer, ZiweiError> {
    let year = resolve_year_stem_branch(birth.year())?;
    let month = config.leap_month.effective_month(
        birth.lunar_month(),
        birth.is_leap_month(),
        birth.lunar_day(),
    );
    let hour = birth.hour_branch();

    let life = derive_life_palace_branch(month, hour)?;
    let body = derive_body_palace_branch(month, hour)?;
    let life_sb = palace_stem_branch(year.stem(), life)?;
    let bureau = derive_bureau(life_sb)?;
    let anchors = place_ziwei_and_tianfu(bureau, birth.lunar_day())?;

    let mut stars = place_major_stars(anchors.ziwei, anchors.tianfu);
    let aux = place_auxiliary_stars_with(
        &AuxiliaryInputs {
            year_stem: year.stem(),
            year_branch: year.branch(),
            lunar_month: month,
            lunar_day: birth.lunar_day(),
            hour_branch: hour,
        },
        config.include_minor_stars,
    )?;
    merge_star_maps(&mut stars, aux);
    apply_transformations(&mut stars, year.stem())?;

    let transformations = resolve_transformations(year.stem())
        .into_iter()
        .map(|(star, transformation)| {
            let branch = find_star(&stars, star).ok_or_else(|| {
                ZiweiError::configuration(format!("{star} lost after transformation"))
            })?;
            Ok(TransformedStar {
                star,
                transformation,
                branch,
            })
        })
        .collect::<Result<Vec<_>, ZiweiError>>()?;

    if !config.include_brightness {
        for instance in stars.values_mut().flatten() {
            instance.brightness = None;
        }
    }

    let direction = LimitDirection::for_native(year.stem(), birth.gender());
    let life_stages = config
        .include_life_stages
        .then(|| life_stages_by_branch(bureau, direction));
    let scholar_deities = config
        .include_scholar_deities
        .then(|| scholar_deities_by_branch(year.stem(), direction));

    let palaces = ALL_PALACE_ROLES
        .iter()
        .map(|&role| {
            let branch = role.branch_from_life(life);
            let ring = branch.index() as usize;
            Ok(PalaceState {
                role,
                branch,
                stem_branch: palace_stem_branch(year.stem(), branch)?,
                is_life_palace: role == PalaceRole::Life,
                is_body_palace: branch == body,
                stars: stars.remove(&branch).unwrap_or_default(),
                life_stage: life_stages.map(|stages| stages[ring]),
                scholar_deity: scholar_deities.map(|deities| deities[ring]),
            })
        })
        .collect::<Result<Vec<_>, ZiweiError>>()?;

    let (decade_direction, decade_limits) = if config.include_decade_limits {
        let (dir, limits) = decade_limits(life, bureau, year.stem(), birth.gender());
        (Some(dir), limits.to_vec())
    } else {
        (None, Vec::new())
    };
    let (annual_direction, annual_limits) = if config.include_annual_limits {
        let (dir, limits) = annual_limits(year.branch(), birth.gender());
        (Some(dir), limits)
    } else {
        (None, Vec::new())
    };

    tracing::debug!(
        year = %year,
        life = %life,
        body = %body,
        bureau = %bureau,
        "assembled chart"
    );

    Ok(ChartLayer {
        birth: birth.clone(),
        year,
        effective_lunar_month: month,
        life_palace_branch: life,
        body_palace_branch: body,
        life_palace_stem_branch: life_sb,
        bureau,
        anchors,
        transformations,
        decade_direction,
        decade_limits,
        annual_direction,
        annual_limits,
        palaces,
        table_version: TABLE_VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeapMonthPolicy;
    use std::collections::HashSet;
    use ziwei_base::{ALL_STARS, Gender};

    fn demo() -> ChartLayer {
        let birth = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        assemble_chart(&birth).unwrap()
    }

    #[test]
    fn twelve_palaces_in_role_order() {
        let chart = demo();
        assert_eq!(chart.palaces().len(), 12);
        for (i, p) in chart.palaces().iter().enumerate() {
            assert_eq!(p.role.index() as usize, i);
        }
    }

    #[test]
    fn exactly_one_life_and_body_palace() {
        let chart = demo();
        assert_eq!(chart.palaces().iter().filter(|p| p.is_life_palace).count(), 1);
        assert_eq!(chart.palaces().iter().filter(|p| p.is_body_palace).count(), 1);
        assert_eq!(chart.life_palace().branch, Branch::Yin);
        assert_eq!(chart.body_palace().branch, Branch::Zi);
        assert_eq!(chart.body_palace().role, PalaceRole::Spouse);
    }

    #[test]
    fn every_star_once() {
        let chart = demo();
        let mut seen = HashSet::new();
        for (_, s) in chart.stars() {
            assert!(seen.insert(s.star), "{} placed twice", s.star);
        }
        assert_eq!(seen.len(), ALL_STARS.len());
    }

    #[test]
    fn without_minor_stars() {
        let birth = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        let config = ChartConfig {
            include_minor_stars: false,
            include_decade_limits: false,
            ..ChartConfig::default()
        };
        let chart = assemble_chart_with(&birth, &config).unwrap();
        assert_eq!(chart.stars().count(), 28);
        assert!(chart.decade_limits().is_empty());
        assert_eq!(chart.decade_direction(), None);
    }

    #[test]
    fn twelve_rings_and_annual_limits() {
        let chart = demo();
        let palaces = chart.palaces();
        let stages: HashSet<_> = palaces.iter().filter_map(|p| p.life_stage).collect();
        let deities: HashSet<_> = palaces.iter().filter_map(|p| p.scholar_deity).collect();
        assert_eq!(stages.len(), 12);
        assert_eq!(deities.len(), 12);
        assert_eq!(chart.annual_limits().len(), 120);
        assert_eq!(chart.annual_direction(), Some(LimitDirection::Forward));
    }

    #[test]
    fn optional_sections_can_be_disabled() {
        let birth = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        let config = ChartConfig {
            include_annual_limits: false,
            include_brightness: false,
            include_life_stages: false,
            include_scholar_deities: false,
            ..ChartConfig::default()
        };
        let chart = assemble_chart_with(&birth, &config).unwrap();
        assert!(chart.annual_limits().is_empty());
        assert_eq!(chart.annual_palace(1), None);
        assert!(chart.stars().all(|(_, s)| s.brightness.is_none()));
        assert!(
            chart
                .palaces()
                .iter()
                .all(|p| p.life_stage.is_none() && p.scholar_deity.is_none())
        );
        // placement itself is unaffected
        assert_eq!(chart.palaces().len(), 12);
        assert_eq!(chart.stars().count(), demo().stars().count());
    }

    #[test]
    fn only_major_stars_are_rated() {
        let chart = demo();
        for (_, s) in chart.stars() {
            assert_eq!(s.brightness.is_some(), s.star.is_major(), "{}", s.star);
        }
    }

    #[test]
    fn palace_at_matches_roles() {
        let chart = demo();
        for p in chart.palaces() {
            assert_eq!(chart.palace_at(p.branch).role, p.role);
        }
    }

    #[test]
    fn transformations_resolved_with_branches() {
        let chart = demo();
        let t = chart.transformations();
        assert_eq!(t.len(), 4);
        assert_eq!(t[0].star, StarId::Lianzhen);
        assert_eq!(t[0].branch, Branch::Mao);
        assert_eq!(t[3].transformation, Transformation::Ji);
        assert_eq!(t[3].branch, Branch::Shen);
    }

    #[test]
    fn leap_split_shifts_life_palace() {
        let birth = BirthInput::new(1984, 4, 20, Branch::Zi, Gender::Female)
            .unwrap()
            .with_leap_month(true);
        let same = assemble_chart(&birth).unwrap();
        let split = assemble_chart_with(
            &birth,
            &ChartConfig {
                leap_month: LeapMonthPolicy::SplitAtMidMonth,
                ..ChartConfig::default()
            },
        )
        .unwrap();
        assert_eq!(same.effective_lunar_month(), 4);
        assert_eq!(split.effective_lunar_month(), 5);
        assert_eq!(
            split.life_palace_branch(),
            same.life_palace_branch().offset(1)
        );
    }

    #[test]
    fn assembly_is_pure() {
        assert_eq!(demo(), demo());
    }

    #[test]
    fn life_palace_empty_of_majors_in_demo() {
        let chart = demo();
        assert!(chart.life_palace().is_empty_of_major_stars());
        assert!(!chart.palace_at(Branch::Hai).is_empty_of_major_stars());
    }
}
