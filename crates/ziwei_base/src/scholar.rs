//! Twelve scholar deities (博士十二神).
//!
//! 博士 sits with 祿存; the rest follow in the decade-limit direction.

use std::fmt;

use serde::Serialize;

use crate::limits::LimitDirection;
use crate::stem_branch::{Branch, Stem};
use crate::tables::LUCUN_BY_STEM;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ScholarDeity {
    #[serde(rename = "博士")]
    Boshi,
    #[serde(rename = "力士")]
    Lishi,
    #[serde(rename = "青龍")]
    Qinglong,
    #[serde(rename = "小耗")]
    Xiaohao,
    #[serde(rename = "將軍")]
    Jiangjun,
    #[serde(rename = "奏書")]
    Zoushu,
    #[serde(rename = "飛廉")]
    Feilian,
    #[serde(rename = "喜神")]
    Xishen,
    #[serde(rename = "病符")]
    Bingfu,
    #[serde(rename = "大耗")]
    Dahao,
    #[serde(rename = "伏兵")]
    Fubing,
    #[serde(rename = "官府")]
    Guanfu,
}

pub const ALL_SCHOLAR_DEITIES: [ScholarDeity; 12] = [
    ScholarDeity::Boshi,
    ScholarDeity::Lishi,
    ScholarDeity::Qinglong,
    ScholarDeity::Xiaohao,
    ScholarDeity::Jiangjun,
    ScholarDeity::Zoushu,
    ScholarDeity::Feilian,
    ScholarDeity::Xishen,
    ScholarDeity::Bingfu,
    ScholarDeity::Dahao,
    ScholarDeity::Fubing,
    ScholarDeity::Guanfu,
];

const SCHOLAR_NAMES: [&str; 12] = [
    "博士", "力士", "青龍", "小耗", "將軍", "奏書", "飛廉", "喜神", "病符", "大耗", "伏兵", "官府",
];

impl ScholarDeity {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        SCHOLAR_NAMES[self as usize]
    }
}

impl fmt::Display for ScholarDeity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scholar deity of every branch, indexed by [`Branch::index`].
pub fn scholar_deities_by_branch(year_stem: Stem, direction: LimitDirection) -> [ScholarDeity; 12] {
    let lucun = LUCUN_BY_STEM[year_stem.index() as usize];
    std::array::from_fn(|i| {
        ALL_SCHOLAR_DEITIES[direction.steps_between(lucun, Branch::from_index(i as u8)) as usize]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_starts_at_lucun() {
        // 甲 year: 祿存 at 寅
        let deities = scholar_deities_by_branch(Stem::Jia, LimitDirection::Forward);
        assert_eq!(deities[Branch::Yin.index() as usize], ScholarDeity::Boshi);
        assert_eq!(deities[Branch::Mao.index() as usize], ScholarDeity::Lishi);
        assert_eq!(deities[Branch::Chou.index() as usize], ScholarDeity::Guanfu);
    }

    #[test]
    fn backward_for_yin_male() {
        // 乙 year: 祿存 at 卯
        let deities = scholar_deities_by_branch(Stem::Yi, LimitDirection::Backward);
        assert_eq!(deities[Branch::Mao.index() as usize], ScholarDeity::Boshi);
        assert_eq!(deities[Branch::Yin.index() as usize], ScholarDeity::Lishi);
        assert_eq!(deities[Branch::Chen.index() as usize], ScholarDeity::Guanfu);
    }

    #[test]
    fn each_deity_once() {
        let mut deities = scholar_deities_by_branch(Stem::Ren, LimitDirection::Forward).to_vec();
        deities.sort();
        assert_eq!(deities, ALL_SCHOLAR_DEITIES);
    }
}
