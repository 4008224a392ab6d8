//! Twelve life-stage stars (長生十二星).
//!
//! 長生 sits at the branch fixed by the bureau element and the other eleven
//! stages follow it around the ring in the decade-limit direction.

use std::fmt;

use serde::Serialize;

use crate::bureau::Bureau;
use crate::limits::LimitDirection;
use crate::stem_branch::Branch;
use crate::tables::LIFE_STAGE_START_BY_BUREAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum LifeStage {
    #[serde(rename = "長生")]
    Changsheng,
    #[serde(rename = "沐浴")]
    Muyu,
    #[serde(rename = "冠帶")]
    Guandai,
    #[serde(rename = "臨官")]
    Linguan,
    #[serde(rename = "帝旺")]
    Diwang,
    #[serde(rename = "衰")]
    Shuai,
    #[serde(rename = "病")]
    Bing,
    #[serde(rename = "死")]
    Si,
    #[serde(rename = "墓")]
    Mu,
    #[serde(rename = "絕")]
    Jue,
    #[serde(rename = "胎")]
    Tai,
    #[serde(rename = "養")]
    Yang,
}

/// Stages in cycle order, 長生 first.
pub const ALL_LIFE_STAGES: [LifeStage; 12] = [
    LifeStage::Changsheng,
    LifeStage::Muyu,
    LifeStage::Guandai,
    LifeStage::Linguan,
    LifeStage::Diwang,
    LifeStage::Shuai,
    LifeStage::Bing,
    LifeStage::Si,
    LifeStage::Mu,
    LifeStage::Jue,
    LifeStage::Tai,
    LifeStage::Yang,
];

const LIFE_STAGE_NAMES: [&str; 12] = [
    "長生", "沐浴", "冠帶", "臨官", "帝旺", "衰", "病", "死", "墓", "絕", "胎", "養",
];

impl LifeStage {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        LIFE_STAGE_NAMES[self as usize]
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Life stage of every branch, indexed by [`Branch::index`].
pub fn life_stages_by_branch(bureau: Bureau, direction: LimitDirection) -> [LifeStage; 12] {
    let start = LIFE_STAGE_START_BY_BUREAU[(bureau.value() - 2) as usize];
    std::array::from_fn(|i| {
        ALL_LIFE_STAGES[direction.steps_between(start, Branch::from_index(i as u8)) as usize]
    })
}
