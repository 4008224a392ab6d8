//! Calendar and placement primitives for Zhongzhou (中州派) Ziwei charts.
//!
//! This crate provides:
//! - Sexagenary year and double-hour resolution
//! - Life / Body palace and Five-Element Bureau derivation
//! - Major, auxiliary, malefic and minor star placement
//! - Major-star brightness (廟旺平陷)
//! - The four transformations, decade limits (大限) and annual limits (小限)
//! - The 長生 and 博士 twelve-star rings
//!
//! Every function is a pure lookup over the versioned tables in [`tables`].

pub mod auxiliary;
pub mod birth;
pub mod brightness;
pub mod bureau;
pub mod calendar;
pub mod error;
pub mod life_stage;
pub mod limits;
pub mod palace;
pub mod placement;
pub mod scholar;
pub mod star;
pub mod stem_branch;
pub mod tables;
pub mod transformation;

pub use auxiliary::{AuxiliaryInputs, place_auxiliary_stars, place_auxiliary_stars_with};
pub use birth::{BirthInput, Gender, MAX_YEAR, MIN_YEAR};
pub use brightness::{Brightness, star_brightness};
pub use bureau::{ALL_BUREAUS, Bureau, Element, derive_bureau};
pub use calendar::{
    SEXAGENARY_EPOCH_YEAR, hour_window_start, palace_stem, palace_stem_branch,
    resolve_hour_branch, resolve_year_stem_branch,
};
pub use error::{ErrorKind, ZiweiError};
pub use life_stage::{ALL_LIFE_STAGES, LifeStage, life_stages_by_branch};
pub use limits::{
    ANNUAL_LIMIT_COUNT, AnnualLimit, DECADE_COUNT, DECADE_SPAN_YEARS, DecadeLimit,
    LimitDirection, annual_limit_for_age, annual_limits, decade_limit_for_age, decade_limits,
};
pub use palace::{
    ALL_PALACE_ROLES, MONTH_ONE_BRANCH, PalaceRole, derive_body_palace_branch,
    derive_life_palace_branch,
};
pub use placement::{
    AnchorPlacement, StarMap, find_star, merge_star_maps, place_major_stars,
    place_ziwei_and_tianfu, tianfu_from_ziwei,
};
pub use scholar::{ALL_SCHOLAR_DEITIES, ScholarDeity, scholar_deities_by_branch};
pub use star::{
    ALL_STARS, ALL_TRANSFORMATIONS, MAJOR_STARS, MALEFIC_STARS, STAR_COUNT, StarClass, StarId,
    StarInstance, Transformation,
};
pub use stem_branch::{ALL_BRANCHES, ALL_STEMS, Branch, Stem, StemBranch};
pub use tables::TABLE_VERSION;
pub use transformation::{apply_transformations, resolve_transformations};
