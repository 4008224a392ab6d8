//! Star vocabulary, magnitude classes and transformation tags.
//!
//! [`StarId`] is the closed set of every star the engine can place. Rule
//! data is validated against it when loaded, so a misspelled star name is
//! rejected up front instead of silently never matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::brightness::{Brightness, star_brightness};
use crate::stem_branch::Branch;

/// Magnitude class of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarClass {
    /// The 14 primary stars (十四主星).
    Major,
    /// Auxiliary and malefic stars (六吉, 六煞, 祿存, 天馬).
    Medium,
    /// Miscellaneous minor stars (雜曜).
    Minor,
}

/// Every star placed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StarId {
    // Ziwei series
    #[serde(rename = "紫微")]
    Ziwei,
    #[serde(rename = "天機")]
    Tianji,
    #[serde(rename = "太陽")]
    Taiyang,
    #[serde(rename = "武曲")]
    Wuqu,
    #[serde(rename = "天同")]
    Tiantong,
    #[serde(rename = "廉貞")]
    Lianzhen,
    // Tianfu series
    #[serde(rename = "天府")]
    Tianfu,
    #[serde(rename = "太陰")]
    Taiyin,
    #[serde(rename = "貪狼")]
    Tanlang,
    #[serde(rename = "巨門")]
    Jumen,
    #[serde(rename = "天相")]
    Tianxiang,
    #[serde(rename = "天梁")]
    Tianliang,
    #[serde(rename = "七殺")]
    Qisha,
    #[serde(rename = "破軍")]
    Pojun,
    // Auxiliary
    #[serde(rename = "左輔")]
    Zuofu,
    #[serde(rename = "右弼")]
    Youbi,
    #[serde(rename = "文昌")]
    Wenchang,
    #[serde(rename = "文曲")]
    Wenqu,
    #[serde(rename = "天魁")]
    Tiankui,
    #[serde(rename = "天鉞")]
    Tianyue,
    #[serde(rename = "祿存")]
    Lucun,
    #[serde(rename = "天馬")]
    Tianma,
    // Malefic
    #[serde(rename = "擎羊")]
    Qingyang,
    #[serde(rename = "陀羅")]
    Tuoluo,
    #[serde(rename = "火星")]
    Huoxing,
    #[serde(rename = "鈴星")]
    Lingxing,
    #[serde(rename = "地空")]
    Dikong,
    #[serde(rename = "地劫")]
    Dijie,
    // Minor
    #[serde(rename = "天刑")]
    Tianxing,
    #[serde(rename = "天姚")]
    Tianyao,
    #[serde(rename = "三台")]
    Santai,
    #[serde(rename = "八座")]
    Bazuo,
    #[serde(rename = "紅鸞")]
    Hongluan,
    #[serde(rename = "天喜")]
    Tianxi,
}

/// Number of stars in the vocabulary.
pub const STAR_COUNT: usize = 34;

/// All stars in declaration order.
pub const ALL_STARS: [StarId; STAR_COUNT] = [
    StarId::Ziwei,
    StarId::Tianji,
    StarId::Taiyang,
    StarId::Wuqu,
    StarId::Tiantong,
    StarId::Lianzhen,
    StarId::Tianfu,
    StarId::Taiyin,
    StarId::Tanlang,
    StarId::Jumen,
    StarId::Tianxiang,
    StarId::Tianliang,
    StarId::Qisha,
    StarId::Pojun,
    StarId::Zuofu,
    StarId::Youbi,
    StarId::Wenchang,
    StarId::Wenqu,
    StarId::Tiankui,
    StarId::Tianyue,
    StarId::Lucun,
    StarId::Tianma,
    StarId::Qingyang,
    StarId::Tuoluo,
    StarId::Huoxing,
    StarId::Lingxing,
    StarId::Dikong,
    StarId::Dijie,
    StarId::Tianxing,
    StarId::Tianyao,
    StarId::Santai,
    StarId::Bazuo,
    StarId::Hongluan,
    StarId::Tianxi,
];

/// The 14 major stars.
pub const MAJOR_STARS: [StarId; 14] = [
    StarId::Ziwei,
    StarId::Tianji,
    StarId::Taiyang,
    StarId::Wuqu,
    StarId::Tiantong,
    StarId::Lianzhen,
    StarId::Tianfu,
    StarId::Taiyin,
    StarId::Tanlang,
    StarId::Jumen,
    StarId::Tianxiang,
    StarId::Tianliang,
    StarId::Qisha,
    StarId::Pojun,
];

/// The six malefic stars (六煞).
pub const MALEFIC_STARS: [StarId; 6] = [
    StarId::Qingyang,
    StarId::Tuoluo,
    StarId::Huoxing,
    StarId::Lingxing,
    StarId::Dikong,
    StarId::Dijie,
];

// (traditional, simplified, pinyin code)
const STAR_NAMES: [(&str, &str, &str); STAR_COUNT] = [
    ("紫微", "紫微", "ziwei"),
    ("天機", "天机", "tianji"),
    ("太陽", "太阳", "taiyang"),
    ("武曲", "武曲", "wuqu"),
    ("天同", "天同", "tiantong"),
    ("廉貞", "廉贞", "lianzhen"),
    ("天府", "天府", "tianfu"),
    ("太陰", "太阴", "taiyin"),
    ("貪狼", "贪狼", "tanlang"),
    ("巨門", "巨门", "jumen"),
    ("天相", "天相", "tianxiang"),
    ("天梁", "天梁", "tianliang"),
    ("七殺", "七杀", "qisha"),
    ("破軍", "破军", "pojun"),
    ("左輔", "左辅", "zuofu"),
    ("右弼", "右弼", "youbi"),
    ("文昌", "文昌", "wenchang"),
    ("文曲", "文曲", "wenqu"),
    ("天魁", "天魁", "tiankui"),
    ("天鉞", "天钺", "tianyue"),
    ("祿存", "禄存", "lucun"),
    ("天馬", "天马", "tianma"),
    ("擎羊", "擎羊", "qingyang"),
    ("陀羅", "陀罗", "tuoluo"),
    ("火星", "火星", "huoxing"),
    ("鈴星", "铃星", "lingxing"),
    ("地空", "地空", "dikong"),
    ("地劫", "地劫", "dijie"),
    ("天刑", "天刑", "tianxing"),
    ("天姚", "天姚", "tianyao"),
    ("三台", "三台", "santai"),
    ("八座", "八座", "bazuo"),
    ("紅鸞", "红鸾", "hongluan"),
    ("天喜", "天喜", "tianxi"),
];

impl StarId {
    /// 0-based index into [`ALL_STARS`].
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Traditional Chinese name.
    pub const fn name(self) -> &'static str {
        STAR_NAMES[self as usize].0
    }

    /// Simplified Chinese name.
    pub const fn simplified_name(self) -> &'static str {
        STAR_NAMES[self as usize].1
    }

    /// Lowercase pinyin code.
    pub const fn code(self) -> &'static str {
        STAR_NAMES[self as usize].2
    }

    pub const fn class(self) -> StarClass {
        match self.index() {
            0..=13 => StarClass::Major,
            14..=27 => StarClass::Medium,
            _ => StarClass::Minor,
        }
    }

    pub const fn is_major(self) -> bool {
        matches!(self.class(), StarClass::Major)
    }

    pub const fn is_malefic(self) -> bool {
        matches!(
            self,
            Self::Qingyang
                | Self::Tuoluo
                | Self::Huoxing
                | Self::Lingxing
                | Self::Dikong
                | Self::Dijie
        )
    }

    /// Look up a star by traditional, simplified or pinyin name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        STAR_NAMES
            .iter()
            .position(|(zh, zhs, code)| {
                *zh == name || *zhs == name || code.eq_ignore_ascii_case(name)
            })
            .map(|i| ALL_STARS[i])
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StarId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown star: {}", s.trim()))
    }
}

/// The four transformations (四化).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transformation {
    #[serde(rename = "祿", alias = "lu", alias = "禄")]
    Lu,
    #[serde(rename = "權", alias = "quan", alias = "权")]
    Quan,
    #[serde(rename = "科", alias = "ke")]
    Ke,
    #[serde(rename = "忌", alias = "ji")]
    Ji,
}

/// The four transformations in table order.
pub const ALL_TRANSFORMATIONS: [Transformation; 4] = [
    Transformation::Lu,
    Transformation::Quan,
    Transformation::Ke,
    Transformation::Ji,
];

impl Transformation {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Chinese name (祿, 權, 科, 忌).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lu => "祿",
            Self::Quan => "權",
            Self::Ke => "科",
            Self::Ji => "忌",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Lu => "lu",
            Self::Quan => "quan",
            Self::Ke => "ke",
            Self::Ji => "ji",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transformation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('化');
        ALL_TRANSFORMATIONS
            .iter()
            .copied()
            .find(|t| t.name() == s || t.code().eq_ignore_ascii_case(s))
            .or(match s {
                "禄" => Some(Self::Lu),
                "权" => Some(Self::Quan),
                _ => None,
            })
            .ok_or_else(|| format!("unknown transformation: {s}"))
    }
}

/// A star placed in a chart, with its brightness and any transformations
/// it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StarInstance {
    pub star: StarId,
    pub class: StarClass,
    /// Set for major stars only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transformations: Vec<Transformation>,
}

impl StarInstance {
    /// An unrated instance.
    pub fn new(star: StarId) -> Self {
        Self {
            star,
            class: star.class(),
            brightness: None,
            transformations: Vec::new(),
        }
    }

    /// An instance rated for the branch it sits in.
    pub fn at(star: StarId, branch: Branch) -> Self {
        Self {
            brightness: star_brightness(star, branch),
            ..Self::new(star)
        }
    }

    /// Add a transformation tag, ignoring duplicates.
    pub fn tag(&mut self, t: Transformation) {
        if !self.transformations.contains(&t) {
            self.transformations.push(t);
            self.transformations.sort();
        }
    }

    pub fn has_transformation(&self, t: Transformation) -> bool {
        self.transformations.contains(&t)
    }
}
