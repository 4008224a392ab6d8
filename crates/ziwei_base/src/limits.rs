//! Decade limits (大限) and annual limits (小限).
//!
//! Twelve ten-year periods. The first starts at an age equal to the bureau
//! value and sits in the Life Palace; later periods step forward around the
//! ring for yang-year males and yin-year females, backward otherwise.
//!
//! Annual limits move one palace per year of nominal age. Age 1 sits at the
//! branch fixed by the birth-year triad; males advance, females retreat.

use serde::Serialize;

use crate::birth::Gender;
use crate::bureau::Bureau;
use crate::stem_branch::{Branch, Stem};
use crate::tables::ANNUAL_LIMIT_START_BY_TRIAD;

/// Years covered by one decade limit.
pub const DECADE_SPAN_YEARS: u16 = 10;

/// Number of decade limits in a chart.
pub const DECADE_COUNT: usize = 12;

/// Number of annual limits in a chart (nominal ages 1..=120).
pub const ANNUAL_LIMIT_COUNT: usize = 120;

/// Direction the decade limits travel around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitDirection {
    Forward,
    Backward,
}

impl LimitDirection {
    /// Forward for 陽男 / 陰女, backward for 陰男 / 陽女.
    pub const fn for_native(year_stem: Stem, gender: Gender) -> Self {
        match (year_stem.is_yang(), gender) {
            (true, Gender::Male) | (false, Gender::Female) => Self::Forward,
            _ => Self::Backward,
        }
    }

    /// Forward for males, backward for females, whatever the year stem.
    pub const fn for_annual(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Forward,
            Gender::Female => Self::Backward,
        }
    }

    const fn step(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    /// Steps needed to get from `start` to `to` moving in this direction.
    pub const fn steps_between(self, start: Branch, to: Branch) -> u8 {
        match self {
            Self::Forward => start.steps_to(to),
            Self::Backward => to.steps_to(start),
        }
    }
}

/// One ten-year period, ages inclusive (nominal 虛歲).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecadeLimit {
    /// 0-based order (0 = first period, in the Life Palace).
    pub order: u8,
    pub branch: Branch,
    pub start_age: u16,
    pub end_age: u16,
}

impl DecadeLimit {
    pub const fn contains_age(&self, age: u16) -> bool {
        age >= self.start_age && age <= self.end_age
    }
}

/// All twelve decade limits.
pub fn decade_limits(
    life_palace: Branch,
    bureau: Bureau,
    year_stem: Stem,
    gender: Gender,
) -> (LimitDirection, [DecadeLimit; DECADE_COUNT]) {
    let direction = LimitDirection::for_native(year_stem, gender);
    let first_age = bureau.value() as u16;
    let limits = std::array::from_fn(|i| {
        let start_age = first_age + i as u16 * DECADE_SPAN_YEARS;
        DecadeLimit {
            order: i as u8,
            branch: life_palace.offset(direction.step() * i as i32),
            start_age,
            end_age: start_age + DECADE_SPAN_YEARS - 1,
        }
    });
    (direction, limits)
}

/// Decade limit covering `age`, if the age falls within the twelve periods.
pub fn decade_limit_for_age(limits: &[DecadeLimit], age: u16) -> Option<&DecadeLimit> {
    limits.iter().find(|l| l.contains_age(age))
}

/// The palace a single year of nominal age falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnnualLimit {
    pub age: u16,
    pub branch: Branch,
}

/// All annual limits, age 1 first.
pub fn annual_limits(year_branch: Branch, gender: Gender) -> (LimitDirection, Vec<AnnualLimit>) {
    let direction = LimitDirection::for_annual(gender);
    let start = ANNUAL_LIMIT_START_BY_TRIAD[year_branch.triad() as usize];
    let limits = (0..ANNUAL_LIMIT_COUNT)
        .map(|i| AnnualLimit {
            age: i as u16 + 1,
            branch: start.offset(direction.step() * i as i32),
        })
        .collect();
    (direction, limits)
}

/// Annual limit for `age`, if it is within 1..=120.
pub fn annual_limit_for_age(limits: &[AnnualLimit], age: u16) -> Option<&AnnualLimit> {
    limits.iter().find(|l| l.age == age)
}
