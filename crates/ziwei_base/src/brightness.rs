//! Star brightness (廟旺平陷).
//!
//! Only the fourteen major stars are rated; every other star has no
//! brightness. Ratings come from [`BRIGHTNESS_TABLE`].

use std::fmt;

use serde::Serialize;

use crate::stem_branch::Branch;
use crate::star::StarId;
use crate::tables::BRIGHTNESS_TABLE;

/// How strongly a star expresses itself in a branch, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Brightness {
    #[serde(rename = "廟")]
    Miao,
    #[serde(rename = "旺")]
    Wang,
    #[serde(rename = "平")]
    Ping,
    #[serde(rename = "陷")]
    Xian,
}

impl Brightness {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Miao => "廟",
            Self::Wang => "旺",
            Self::Ping => "平",
            Self::Xian => "陷",
        }
    }

    /// 廟 or 旺.
    pub const fn is_bright(self) -> bool {
        matches!(self, Self::Miao | Self::Wang)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Brightness of `star` at `branch`, or `None` for a non-major star.
pub fn star_brightness(star: StarId, branch: Branch) -> Option<Brightness> {
    star.is_major()
        .then(|| BRIGHTNESS_TABLE[star.index() as usize][branch.index() as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::{ALL_STARS, MAJOR_STARS};

    #[test]
    fn demo_chart_ratings() {
        let cases = [
            (StarId::Ziwei, Branch::Hai, Brightness::Xian),
            (StarId::Tianji, Branch::Xu, Brightness::Wang),
            (StarId::Tiantong, Branch::Wu, Brightness::Miao),
            (StarId::Lianzhen, Branch::Mao, Brightness::Ping),
            (StarId::Jumen, Branch::Shen, Brightness::Wang),
            (StarId::Taiyang, Branch::Shen, Brightness::Xian),
        ];
        for (star, branch, expected) in cases {
            assert_eq!(star_brightness(star, branch), Some(expected), "{star} {branch}");
        }
    }

    #[test]
    fn only_majors_are_rated() {
        for star in ALL_STARS {
            assert_eq!(star_brightness(star, Branch::Zi).is_some(), star.is_major(), "{star}");
        }
    }

    #[test]
    fn every_major_has_a_temple_and_a_fall() {
        for star in MAJOR_STARS {
            let row = &BRIGHTNESS_TABLE[star.index() as usize];
            assert!(row.contains(&Brightness::Miao), "{star}");
            assert!(row.contains(&Brightness::Xian), "{star}");
        }
    }

    #[test]
    fn ordering_and_names() {
        assert!(Brightness::Miao < Brightness::Xian);
        assert!(Brightness::Wang.is_bright());
        assert!(!Brightness::Ping.is_bright());
        assert_eq!(serde_json::to_string(&Brightness::Xian).unwrap(), "\"陷\"");
    }
}
