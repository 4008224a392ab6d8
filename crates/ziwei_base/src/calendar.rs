//! Sexagenary year and double-hour resolution.
//!
//! The 60-cycle is anchored at CE 1984 = 甲子 (cycle index 0). Hours map
//! onto 12 two-hour windows; each window opens one hour before an even
//! clock hour, so 子 covers 23:00–00:59 and 丑 covers 01:00–02:59.

use crate::error::ZiweiError;
use crate::stem_branch::{Branch, Stem, StemBranch};

/// Reference epoch: CE 1984 = 甲子 (cycle index 0).
pub const SEXAGENARY_EPOCH_YEAR: i32 = 1984;

/// Stem-branch of a year, taken as the sexagenary label of `year`.
///
/// `rem_euclid` keeps the cycle index in 0..60 for every `i32`, so the
/// `OutOfRange` arm is unreachable for well-formed tables.
pub fn resolve_year_stem_branch(year: i32) -> Result<StemBranch, ZiweiError> {
    let cycle_index = (year as i64 - SEXAGENARY_EPOCH_YEAR as i64).rem_euclid(60) as u8;
    StemBranch::from_cycle_index(cycle_index)
}

/// Double-hour branch for a clock hour in 0..=23.
pub fn resolve_hour_branch(hour: u8) -> Result<Branch, ZiweiError> {
    if hour > 23 {
        return Err(ZiweiError::InvalidHour(hour));
    }
    Ok(Branch::from_index((hour + 1) / 2 % 12))
}

/// First clock hour of a double-hour window (子 → 23).
pub const fn hour_window_start(branch: Branch) -> u8 {
    (branch.index() * 2 + 23) % 24
}

/// Stem of the palace at `branch` for a given birth-year stem (五虎遁).
///
/// The 寅 palace takes 丙/戊/庚/壬/甲 for year stems 甲己/乙庚/丙辛/丁壬/戊癸,
/// and stems then advance with the ring 寅 → 卯 → … → 丑.
pub const fn palace_stem(year_stem: Stem, branch: Branch) -> Stem {
    let yin_stem = Stem::from_index((year_stem.index() % 5) * 2 + 2);
    yin_stem.offset(Branch::Yin.steps_to(branch) as i32)
}

/// Stem-branch of the palace at `branch`.
pub fn palace_stem_branch(year_stem: Stem, branch: Branch) -> Result<StemBranch, ZiweiError> {
    StemBranch::new(palace_stem(year_stem, branch), branch)
}
