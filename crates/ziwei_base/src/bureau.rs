//! Five-Element Bureau (五行局) derivation.

use std::fmt;

use serde::Serialize;

use crate::error::ZiweiError;
use crate::stem_branch::StemBranch;
use crate::tables::BUREAU_TABLE;

/// The five elements as they name a bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Water,
    Wood,
    Metal,
    Earth,
    Fire,
}

impl Element {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water => "水",
            Self::Wood => "木",
            Self::Metal => "金",
            Self::Earth => "土",
            Self::Fire => "火",
        }
    }
}

/// Five-Element Bureau. The numeric value (2..=6) drives 紫微 placement
/// and the starting age of the first decade limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bureau {
    Water2,
    Wood3,
    Metal4,
    Earth5,
    Fire6,
}

/// All bureaus in ascending value order.
pub const ALL_BUREAUS: [Bureau; 5] = [
    Bureau::Water2,
    Bureau::Wood3,
    Bureau::Metal4,
    Bureau::Earth5,
    Bureau::Fire6,
];

impl Bureau {
    /// Bureau number in 2..=6.
    pub const fn value(self) -> u8 {
        self as u8 + 2
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            2 => Some(Self::Water2),
            3 => Some(Self::Wood3),
            4 => Some(Self::Metal4),
            5 => Some(Self::Earth5),
            6 => Some(Self::Fire6),
            _ => None,
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Water2 => Element::Water,
            Self::Wood3 => Element::Wood,
            Self::Metal4 => Element::Metal,
            Self::Earth5 => Element::Earth,
            Self::Fire6 => Element::Fire,
        }
    }

    /// Traditional name (水二局 …).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Water2 => "水二局",
            Self::Wood3 => "木三局",
            Self::Metal4 => "金四局",
            Self::Earth5 => "土五局",
            Self::Fire6 => "火六局",
        }
    }
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize)]
struct BureauRepr {
    element: Element,
    value: u8,
    name: &'static str,
}

impl Serialize for Bureau {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BureauRepr {
            element: self.element(),
            value: self.value(),
            name: self.name(),
        }
        .serialize(serializer)
    }
}

/// Bureau of the Life Palace stem-branch.
///
/// Stems pair as (甲乙)(丙丁)(戊己)(庚辛)(壬癸); branches pair as (子丑)(寅卯)
/// (辰巳) and repeat from 午. A table value outside 2..=6 is reported as a
/// configuration error.
pub fn derive_bureau(life_palace: StemBranch) -> Result<Bureau, ZiweiError> {
    let stem_pair = (life_palace.stem().index() / 2) as usize;
    let branch_group = (life_palace.branch().index() / 2 % 3) as usize;
    let value = BUREAU_TABLE
        .get(stem_pair)
        .and_then(|row| row.get(branch_group))
        .copied()
        .ok_or(ZiweiError::OutOfRange("bureau table index"))?;
    let bureau = Bureau::from_value(value).ok_or_else(|| {
        ZiweiError::configuration(format!(
            "bureau table yields {value} for {life_palace}, expected 2..=6"
        ))
    })?;
    tracing::debug!(%life_palace, bureau = %bureau, "derived bureau");
    Ok(bureau)
}
