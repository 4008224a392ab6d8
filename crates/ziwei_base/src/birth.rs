//! Validated birth data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::resolve_hour_branch;
use crate::error::ZiweiError;
use crate::stem_branch::Branch;

/// Earliest accepted birth year.
pub const MIN_YEAR: i32 = 1900;
/// Latest accepted birth year.
pub const MAX_YEAR: i32 = 2100;

/// Gender of the native. Drives yin/yang direction of the decade limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "male", alias = "M", alias = "m", alias = "男")]
    Male,
    #[serde(rename = "female", alias = "F", alias = "f", alias = "女")]
    Female,
}

impl Gender {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gender {
    type Err = ZiweiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" | "male" | "Male" | "男" => Ok(Self::Male),
            "F" | "f" | "female" | "Female" | "女" => Ok(Self::Female),
            other => Err(ZiweiError::InvalidGender(other.to_string())),
        }
    }
}

/// Birth data for one chart request.
///
/// Constructed once through [`BirthInput::new`], which validates every
/// range; there are no setters, only consuming builders for the optional
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BirthInput {
    year: i32,
    lunar_month: u8,
    is_leap_month: bool,
    lunar_day: u8,
    hour_branch: Branch,
    gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    place_of_birth: Option<String>,
}

impl BirthInput {
    /// Validate and build a birth input.
    ///
    /// `year` is the Gregorian year labelling the lunar year of birth.
    pub fn new(
        year: i32,
        lunar_month: u8,
        lunar_day: u8,
        hour_branch: Branch,
        gender: Gender,
    ) -> Result<Self, ZiweiError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ZiweiError::InvalidYear(year));
        }
        validate_month(lunar_month)?;
        validate_day(lunar_day)?;
        Ok(Self {
            year,
            lunar_month,
            is_leap_month: false,
            lunar_day,
            hour_branch,
            gender,
            name: None,
            place_of_birth: None,
        })
    }

    /// Same as [`BirthInput::new`] but from a clock hour in 0..=23.
    pub fn from_clock_hour(
        year: i32,
        lunar_month: u8,
        lunar_day: u8,
        hour: u8,
        gender: Gender,
    ) -> Result<Self, ZiweiError> {
        Self::new(year, lunar_month, lunar_day, resolve_hour_branch(hour)?, gender)
    }

    /// Mark the month as an intercalary (閏) month.
    pub fn with_leap_month(mut self, is_leap: bool) -> Self {
        self.is_leap_month = is_leap;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_place_of_birth(mut self, place: impl Into<String>) -> Self {
        self.place_of_birth = Some(place.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn lunar_month(&self) -> u8 {
        self.lunar_month
    }

    pub fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }

    pub fn lunar_day(&self) -> u8 {
        self.lunar_day
    }

    pub fn hour_branch(&self) -> Branch {
        self.hour_branch
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn place_of_birth(&self) -> Option<&str> {
        self.place_of_birth.as_deref()
    }
}

/// Reject lunar months outside 1..=12.
pub fn validate_month(month: u8) -> Result<u8, ZiweiError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ZiweiError::InvalidMonth(month))
    }
}

/// Reject lunar days outside 1..=30.
pub fn validate_day(day: u8) -> Result<u8, ZiweiError> {
    if (1..=30).contains(&day) {
        Ok(day)
    } else {
        Err(ZiweiError::InvalidDay(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_input() {
        let b = BirthInput::new(1984, 12, 3, Branch::Hai, Gender::Male).unwrap();
        assert_eq!(b.year(), 1984);
        assert_eq!(b.lunar_month(), 12);
        assert_eq!(b.lunar_day(), 3);
        assert_eq!(b.hour_branch(), Branch::Hai);
        assert!(!b.is_leap_month());
        assert_eq!(b.name(), None);
    }

    #[test]
    fn builders_set_optional_fields() {
        let b = BirthInput::new(1990, 6, 10, Branch::Wu, Gender::Female)
            .unwrap()
            .with_leap_month(true)
            .with_name("Demo")
            .with_place_of_birth("Hong Kong");
        assert!(b.is_leap_month());
        assert_eq!(b.name(), Some("Demo"));
        assert_eq!(b.place_of_birth(), Some("Hong Kong"));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(
            BirthInput::new(1984, 0, 1, Branch::Zi, Gender::Male),
            Err(ZiweiError::InvalidMonth(0))
        );
        assert_eq!(
            BirthInput::new(1984, 13, 1, Branch::Zi, Gender::Male),
            Err(ZiweiError::InvalidMonth(13))
        );
    }

    #[test]
    fn day_bounds() {
        assert_eq!(
            BirthInput::new(1984, 1, 0, Branch::Zi, Gender::Male),
            Err(ZiweiError::InvalidDay(0))
        );
        assert_eq!(
            BirthInput::new(1984, 1, 31, Branch::Zi, Gender::Male),
            Err(ZiweiError::InvalidDay(31))
        );
        assert!(BirthInput::new(1984, 1, 30, Branch::Zi, Gender::Male).is_ok());
    }

    #[test]
    fn year_bounds() {
        for year in [0, 1899, 2101] {
            assert_eq!(
                BirthInput::new(year, 1, 1, Branch::Zi, Gender::Male),
                Err(ZiweiError::InvalidYear(year))
            );
        }
        assert!(BirthInput::new(1900, 1, 1, Branch::Zi, Gender::Male).is_ok());
        assert!(BirthInput::new(2100, 12, 30, Branch::Hai, Gender::Female).is_ok());
    }

    #[test]
    fn clock_hour_constructor() {
        let b = BirthInput::from_clock_hour(1984, 1, 1, 23, Gender::Male).unwrap();
        assert_eq!(b.hour_branch(), Branch::Zi);
        assert_eq!(
            BirthInput::from_clock_hour(1984, 1, 1, 24, Gender::Male),
            Err(ZiweiError::InvalidHour(24))
        );
    }

    #[test]
    fn gender_parsing() {
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("女".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());
        let g: Gender = serde_json::from_str("\"男\"").unwrap();
        assert_eq!(g, Gender::Male);
    }
}
