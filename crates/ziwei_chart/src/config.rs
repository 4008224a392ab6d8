//! Chart assembly options.

use serde::{Deserialize, Serialize};

/// How a birth in an intercalary (閏) month is assigned to a month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapMonthPolicy {
    /// The leap month counts as the month it repeats.
    #[default]
    SameMonth,
    /// Days 1..=15 count as the repeated month, days 16..=30 as the next.
    SplitAtMidMonth,
}

impl LeapMonthPolicy {
    /// Month number used for palace and star placement.
    pub const fn effective_month(self, lunar_month: u8, is_leap: bool, lunar_day: u8) -> u8 {
        match self {
            Self::SplitAtMidMonth if is_leap && lunar_day > 15 => lunar_month % 12 + 1,
            _ => lunar_month,
        }
    }
}

/// Configuration for one chart assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Leap-month assignment.
    pub leap_month: LeapMonthPolicy,
    /// Place 天刑, 天姚, 三台, 八座, 紅鸞 and 天喜.
    pub include_minor_stars: bool,
    /// Compute the twelve decade limits.
    pub include_decade_limits: bool,
    /// Compute the 120 annual limits.
    pub include_annual_limits: bool,
    /// Rate major stars 廟, 旺, 平 or 陷.
    pub include_brightness: bool,
    /// Lay out the 長生 ring on the palaces.
    pub include_life_stages: bool,
    /// Lay out the 博士 ring on the palaces.
    pub include_scholar_deities: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            leap_month: LeapMonthPolicy::default(),
            include_minor_stars: true,
            include_decade_limits: true,
            include_annual_limits: true,
            include_brightness: true,
            include_life_stages: true,
            include_scholar_deities: true,
        }
    }
}
