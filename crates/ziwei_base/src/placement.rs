//! Placement of the fourteen major stars.
//!
//! 紫微 is looked up from the bureau and lunar day; 天府 mirrors it across
//! the 寅–申 axis. The Ziwei series then runs backward around the ring
//! from 紫微 and the Tianfu series runs forward from 天府.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::birth::validate_day;
use crate::bureau::Bureau;
use crate::error::ZiweiError;
use crate::star::{StarId, StarInstance};
use crate::stem_branch::Branch;
use crate::tables::{TIANFU_SERIES, ZIWEI_SERIES, ZIWEI_TABLE, ZIWEI_TIANFU_AXIS_SUM};

/// Star instances grouped by the branch they occupy.
pub type StarMap = BTreeMap<Branch, Vec<StarInstance>>;

/// Branches of the two anchor stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnchorPlacement {
    pub ziwei: Branch,
    pub tianfu: Branch,
}

/// Branch of 天府 for a given 紫微 branch.
pub const fn tianfu_from_ziwei(ziwei: Branch) -> Branch {
    Branch::from_index((ZIWEI_TIANFU_AXIS_SUM + 12 - ziwei.index()) % 12)
}

/// Place 紫微 and 天府.
pub fn place_ziwei_and_tianfu(bureau: Bureau, lunar_day: u8) -> Result<AnchorPlacement, ZiweiError> {
    let day = validate_day(lunar_day)?;
    let ziwei = ZIWEI_TABLE
        .get((bureau.value() - 2) as usize)
        .and_then(|row| row.get((day - 1) as usize))
        .copied()
        .ok_or_else(|| {
            ZiweiError::configuration(format!("no ziwei entry for {bureau} day {day}"))
        })?;
    let tianfu = tianfu_from_ziwei(ziwei);
    tracing::debug!(%bureau, day, %ziwei, %tianfu, "placed anchor stars");
    Ok(AnchorPlacement { ziwei, tianfu })
}

/// Place all fourteen major stars from the anchor branches.
pub fn place_major_stars(ziwei: Branch, tianfu: Branch) -> StarMap {
    let mut map = StarMap::new();
    for (star, steps) in ZIWEI_SERIES {
        insert_star(&mut map, ziwei.offset(-(steps as i32)), star);
    }
    for (star, steps) in TIANFU_SERIES {
        insert_star(&mut map, tianfu.offset(steps as i32), star);
    }
    map
}

/// Append `star` at `branch`, rated for that branch.
pub fn insert_star(map: &mut StarMap, branch: Branch, star: StarId) {
    map.entry(branch).or_default().push(StarInstance::at(star, branch));
}

/// Merge `other` into `into`, keeping each branch's existing stars first.
pub fn merge_star_maps(into: &mut StarMap, other: StarMap) {
    for (branch, stars) in other {
        into.entry(branch).or_default().extend(stars);
    }
}

/// Branch holding `star`, if placed.
pub fn find_star(map: &StarMap, star: StarId) -> Option<Branch> {
    map.iter()
        .find(|(_, stars)| stars.iter().any(|s| s.star == star))
        .map(|(b, _)| *b)
}
