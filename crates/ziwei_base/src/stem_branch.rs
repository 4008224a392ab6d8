//! Heavenly stems, earthly branches and their sexagenary pairing.
//!
//! Branches form a ring of 12 positions starting at 子 (index 0). All
//! palace and star arithmetic in the engine happens on this ring, so
//! offsets wrap in both directions via `rem_euclid`.
//!
//! A [`StemBranch`] is never assembled from an independently chosen stem
//! and branch: it is either taken from a 60-cycle index or checked for the
//! parity constraint that makes such an index exist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZiweiError;

/// The 10 heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲", alias = "jia")]
    Jia,
    #[serde(rename = "乙", alias = "yi")]
    Yi,
    #[serde(rename = "丙", alias = "bing")]
    Bing,
    #[serde(rename = "丁", alias = "ding")]
    Ding,
    #[serde(rename = "戊", alias = "wu")]
    Wu,
    #[serde(rename = "己", alias = "ji")]
    Ji,
    #[serde(rename = "庚", alias = "geng")]
    Geng,
    #[serde(rename = "辛", alias = "xin")]
    Xin,
    #[serde(rename = "壬", alias = "ren")]
    Ren,
    #[serde(rename = "癸", alias = "gui")]
    Gui,
}

/// All 10 stems in cycle order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const STEM_PINYIN: [&str; 10] = [
    "jia", "yi", "bing", "ding", "wu", "ji", "geng", "xin", "ren", "gui",
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at `index mod 10`.
    pub const fn from_index(index: u8) -> Self {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Chinese character of the stem.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self as usize]
    }

    /// Toneless pinyin of the stem.
    pub const fn pinyin(self) -> &'static str {
        STEM_PINYIN[self as usize]
    }

    /// Yang stems sit at even indices (甲丙戊庚壬).
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Stem `steps` positions further along the cycle (negative = backward).
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(10) as u8)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = ZiweiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        STEM_NAMES
            .iter()
            .zip(STEM_PINYIN.iter())
            .position(|(zh, py)| *zh == s || py.eq_ignore_ascii_case(s))
            .map(|i| ALL_STEMS[i])
            .ok_or_else(|| ZiweiError::InvalidStem(s.to_string()))
    }
}

/// The 12 earthly branches (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子", alias = "zi")]
    Zi,
    #[serde(rename = "丑", alias = "chou")]
    Chou,
    #[serde(rename = "寅", alias = "yin")]
    Yin,
    #[serde(rename = "卯", alias = "mao")]
    Mao,
    #[serde(rename = "辰", alias = "chen")]
    Chen,
    #[serde(rename = "巳", alias = "si")]
    Si,
    #[serde(rename = "午", alias = "wu")]
    Wu,
    #[serde(rename = "未", alias = "wei")]
    Wei,
    #[serde(rename = "申", alias = "shen")]
    Shen,
    #[serde(rename = "酉", alias = "you")]
    You,
    #[serde(rename = "戌", alias = "xu")]
    Xu,
    #[serde(rename = "亥", alias = "hai")]
    Hai,
}

/// All 12 branches in ring order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const BRANCH_PINYIN: [&str; 12] = [
    "zi", "chou", "yin", "mao", "chen", "si", "wu", "wei", "shen", "you", "xu", "hai",
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at `index mod 12`.
    pub const fn from_index(index: u8) -> Self {
        ALL_BRANCHES[(index % 12) as usize]
    }

    /// Chinese character of the branch.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self as usize]
    }

    /// Toneless pinyin of the branch.
    pub const fn pinyin(self) -> &'static str {
        BRANCH_PINYIN[self as usize]
    }

    /// Branch `steps` positions around the ring (negative = reverse).
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }

    /// Forward distance from `self` to `other`, in 0..12.
    pub const fn steps_to(self, other: Branch) -> u8 {
        (other.index() + 12 - self.index()) % 12
    }

    /// The branch directly across the ring.
    pub const fn opposite(self) -> Self {
        self.offset(6)
    }

    /// Triad group used by 天馬 / 火星 / 鈴星 (申子辰=0, 巳酉丑=1, 寅午戌=2, 亥卯未=3).
    pub const fn triad(self) -> u8 {
        self.index() % 4
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = ZiweiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BRANCH_NAMES
            .iter()
            .zip(BRANCH_PINYIN.iter())
            .position(|(zh, py)| *zh == s || py.eq_ignore_ascii_case(s))
            .map(|i| ALL_BRANCHES[i])
            .ok_or_else(|| ZiweiError::InvalidBranch(s.to_string()))
    }
}

/// A stem-branch pair occupying one position of the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StemBranch {
    stem: Stem,
    branch: Branch,
}

impl StemBranch {
    /// Pair at position `cycle_index` (0 = 甲子 .. 59 = 癸亥).
    pub fn from_cycle_index(cycle_index: u8) -> Result<Self, ZiweiError> {
        if cycle_index >= 60 {
            return Err(ZiweiError::OutOfRange("sexagenary cycle index must be < 60"));
        }
        Ok(Self {
            stem: Stem::from_index(cycle_index % 10),
            branch: Branch::from_index(cycle_index % 12),
        })
    }

    /// Pair a stem with a branch, rejecting combinations absent from the cycle.
    ///
    /// Only stems and branches of equal parity share a cycle position.
    pub fn new(stem: Stem, branch: Branch) -> Result<Self, ZiweiError> {
        if stem.index() % 2 != branch.index() % 2 {
            return Err(ZiweiError::OutOfRange(
                "stem and branch parity differ; pair is not in the 60-cycle",
            ));
        }
        Ok(Self { stem, branch })
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Position in the 60-cycle (甲子 = 0).
    ///
    /// Solves `i ≡ stem (mod 10)`, `i ≡ branch (mod 12)`.
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index() as i32;
        let b = self.branch.index() as i32;
        // 6·s − 5·b satisfies both congruences for matching parity.
        ((6 * s - 5 * b).rem_euclid(60)) as u8
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}
