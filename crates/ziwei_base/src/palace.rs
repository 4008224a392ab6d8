//! The twelve palace roles and the Life / Body palace positions.
//!
//! Lunar month 1 is anchored at 寅. The Life Palace steps forward one
//! branch per month and back one branch per double-hour; the Body Palace
//! steps forward for both. Roles occupy consecutive branches running in
//! reverse from the Life Palace (命 → 兄弟 → 夫妻 …).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::birth::validate_month;
use crate::error::ZiweiError;
use crate::stem_branch::Branch;

/// Branch holding lunar month 1.
pub const MONTH_ONE_BRANCH: Branch = Branch::Yin;

/// The twelve palace roles. Serialized codes are part of the rendering contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalaceRole {
    Life,
    Siblings,
    Spouse,
    Children,
    Wealth,
    Health,
    Travel,
    Friendship,
    Career,
    Residence,
    Virtue,
    Parents,
}

/// All 12 roles in layout order (index 0 = Life).
pub const ALL_PALACE_ROLES: [PalaceRole; 12] = [
    PalaceRole::Life,
    PalaceRole::Siblings,
    PalaceRole::Spouse,
    PalaceRole::Children,
    PalaceRole::Wealth,
    PalaceRole::Health,
    PalaceRole::Travel,
    PalaceRole::Friendship,
    PalaceRole::Career,
    PalaceRole::Residence,
    PalaceRole::Virtue,
    PalaceRole::Parents,
];

const ROLE_CODES: [&str; 12] = [
    "life",
    "siblings",
    "spouse",
    "children",
    "wealth",
    "health",
    "travel",
    "friendship",
    "career",
    "residence",
    "virtue",
    "parents",
];

const ROLE_NAMES: [&str; 12] = [
    "命宮", "兄弟宮", "夫妻宮", "子女宮", "財帛宮", "疾厄宮", "遷移宮", "僕役宮", "官祿宮",
    "田宅宮", "福德宮", "父母宮",
];

impl PalaceRole {
    /// 0-based layout index (Life = 0 .. Parents = 11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Wire code (`life`, `siblings`, …).
    pub const fn code(self) -> &'static str {
        ROLE_CODES[self as usize]
    }

    /// Traditional Chinese name (命宮, 兄弟宮, …).
    pub const fn name(self) -> &'static str {
        ROLE_NAMES[self as usize]
    }

    /// Branch occupied by this role given the Life Palace branch.
    pub const fn branch_from_life(self, life: Branch) -> Branch {
        life.offset(-(self.index() as i32))
    }

    /// Role occupying `branch` given the Life Palace branch.
    pub const fn at_branch(branch: Branch, life: Branch) -> Self {
        ALL_PALACE_ROLES[branch.steps_to(life) as usize]
    }
}

impl fmt::Display for PalaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PalaceRole {
    type Err = String;

    /// Accepts wire codes and Chinese names, with or without the trailing 宮.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_PALACE_ROLES
            .iter()
            .copied()
            .find(|r| {
                r.code().eq_ignore_ascii_case(s)
                    || r.name() == s
                    || r.name().trim_end_matches('宮') == s
            })
            .ok_or_else(|| format!("unknown palace: {s}"))
    }
}

/// Branch of the Life Palace (命宮).
pub fn derive_life_palace_branch(lunar_month: u8, hour_branch: Branch) -> Result<Branch, ZiweiError> {
    let month = validate_month(lunar_month)?;
    Ok(MONTH_ONE_BRANCH.offset(month as i32 - 1 - hour_branch.index() as i32))
}

/// Branch of the Body Palace (身宮).
pub fn derive_body_palace_branch(lunar_month: u8, hour_branch: Branch) -> Result<Branch, ZiweiError> {
    let month = validate_month(lunar_month)?;
    Ok(MONTH_ONE_BRANCH.offset(month as i32 - 1 + hour_branch.index() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem_branch::ALL_BRANCHES;

    #[test]
    fn month_one_zi_hour_is_yin() {
        assert_eq!(derive_life_palace_branch(1, Branch::Zi).unwrap(), Branch::Yin);
        assert_eq!(derive_body_palace_branch(1, Branch::Zi).unwrap(), Branch::Yin);
    }

    #[test]
    fn month_twelve_late_hour_wraps() {
        // 寅 + 11 − 11 = 寅
        assert_eq!(derive_life_palace_branch(12, Branch::Hai).unwrap(), Branch::Yin);
        // 寅 + 11 + 11 = 子
        assert_eq!(derive_body_palace_branch(12, Branch::Hai).unwrap(), Branch::Zi);
    }

    #[test]
    fn month_one_hai_hour_wraps_backward() {
        // 寅 − 11 = 卯
        assert_eq!(derive_life_palace_branch(1, Branch::Hai).unwrap(), Branch::Mao);
    }

    #[test]
    fn life_and_body_coincide_at_zi_and_wu_hours() {
        for m in 1..=12 {
            for h in [Branch::Zi, Branch::Wu] {
                assert_eq!(
                    derive_life_palace_branch(m, h).unwrap(),
                    derive_body_palace_branch(m, h).unwrap()
                );
            }
        }
    }

    #[test]
    fn invalid_month_rejected() {
        assert_eq!(
            derive_life_palace_branch(13, Branch::Zi),
            Err(ZiweiError::InvalidMonth(13))
        );
    }

    #[test]
    fn roles_run_in_reverse() {
        let life = Branch::Yin;
        assert_eq!(PalaceRole::Siblings.branch_from_life(life), Branch::Chou);
        assert_eq!(PalaceRole::Spouse.branch_from_life(life), Branch::Zi);
        assert_eq!(PalaceRole::Parents.branch_from_life(life), Branch::Mao);
        assert_eq!(PalaceRole::Career.branch_from_life(life), Branch::Wu);
    }

    #[test]
    fn at_branch_inverts_branch_from_life() {
        for life in ALL_BRANCHES {
            for role in ALL_PALACE_ROLES {
                assert_eq!(PalaceRole::at_branch(role.branch_from_life(life), life), role);
            }
        }
    }

    #[test]
    fn codes_are_stable() {
        let codes: Vec<_> = ALL_PALACE_ROLES.iter().map(|r| r.code()).collect();
        assert_eq!(
            codes,
            [
                "life",
                "siblings",
                "spouse",
                "children",
                "wealth",
                "health",
                "travel",
                "friendship",
                "career",
                "residence",
                "virtue",
                "parents"
            ]
        );
        assert_eq!(
            serde_json::to_string(&PalaceRole::Friendship).unwrap(),
            "\"friendship\""
        );
    }

    #[test]
    fn parse_role() {
        assert_eq!("career".parse::<PalaceRole>().unwrap(), PalaceRole::Career);
        assert_eq!("官祿宮".parse::<PalaceRole>().unwrap(), PalaceRole::Career);
        assert_eq!("財帛".parse::<PalaceRole>().unwrap(), PalaceRole::Wealth);
        assert!("kitchen".parse::<PalaceRole>().is_err());
    }
}
