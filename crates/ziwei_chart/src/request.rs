//! JSON request/response contract for chart calculation.
//!
//! `lunarYear` is the only source of truth for the year stem-branch. A
//! caller may send `yearStem` / `yearBranch` alongside it; those are
//! compared against the recomputed values and, when they disagree or do not
//! parse, reported as warnings and otherwise ignored.

use serde::{Deserialize, Serialize};

use ziwei_base::{BirthInput, Branch, Gender, Stem, StemBranch, ZiweiError, resolve_year_stem_branch};

use crate::chart::{ChartLayer, assemble_chart_with};
use crate::config::ChartConfig;

/// Longest accepted `name` / `placeOfBirth`, in characters.
pub const MAX_TEXT_CHARS: usize = 100;

/// Incoming chart calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub lunar_year: i32,
    pub lunar_month: u8,
    pub lunar_day: u8,
    #[serde(default)]
    pub is_leap_month: bool,
    /// Branch name (子 … 亥, or pinyin).
    pub hour_branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_stem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_branch: Option<String>,
    /// 男/女, male/female or M/F.
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
}

/// Outcome of a chart calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ChartResponse {
    fn ok(chart: ChartLayer, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            chart: Some(chart),
            error: None,
            warnings,
        }
    }

    fn failed(err: &ZiweiError, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            chart: None,
            error: Some(err.to_string()),
            warnings,
        }
    }
}

impl ChartRequest {
    /// Validate the request into a [`BirthInput`].
    pub fn to_birth_input(&self) -> Result<BirthInput, ZiweiError> {
        let hour: Branch = self.hour_branch.parse()?;
        let gender: Gender = self.gender.parse()?;
        let mut birth = BirthInput::new(
            self.lunar_year,
            self.lunar_month,
            self.lunar_day,
            hour,
            gender,
        )?
        .with_leap_month(self.is_leap_month);
        if let Some(name) = trimmed(self.name.as_deref()) {
            check_length("name", name)?;
            birth = birth.with_name(name);
        }
        if let Some(place) = trimmed(self.place_of_birth.as_deref()) {
            check_length("placeOfBirth", place)?;
            birth = birth.with_place_of_birth(place);
        }
        Ok(birth)
    }

    /// Compare caller-supplied year stem/branch with the computed pair.
    ///
    /// Returns one [`ZiweiError::Mismatch`] per disagreeing field.
    pub fn year_mismatches(&self, computed: StemBranch) -> Vec<ZiweiError> {
        let mut out = Vec::new();
        if let Some(supplied) = trimmed(self.year_stem.as_deref()) {
            if supplied.parse::<Stem>().ok() != Some(computed.stem()) {
                out.push(ZiweiError::Mismatch {
                    field: "yearStem",
                    supplied: supplied.to_string(),
                    computed: computed.stem().to_string(),
                });
            }
        }
        if let Some(supplied) = trimmed(self.year_branch.as_deref()) {
            if supplied.parse::<Branch>().ok() != Some(computed.branch()) {
                out.push(ZiweiError::Mismatch {
                    field: "yearBranch",
                    supplied: supplied.to_string(),
                    computed: computed.branch().to_string(),
                });
            }
        }
        out
    }
}

fn trimmed(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn check_length(field: &'static str, value: &str) -> Result<(), ZiweiError> {
    if value.chars().count() > MAX_TEXT_CHARS {
        return Err(ZiweiError::TextTooLong {
            field,
            max: MAX_TEXT_CHARS,
        });
    }
    Ok(())
}

/// Calculate a chart with the default configuration.
pub fn calculate_chart(request: &ChartRequest) -> ChartResponse {
    calculate_chart_with(request, &ChartConfig::default())
}

/// Calculate a chart. Never panics; every failure becomes `success: false`.
pub fn calculate_chart_with(request: &ChartRequest, config: &ChartConfig) -> ChartResponse {
    let birth = match request.to_birth_input() {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!(error = %e, "rejected chart request");
            return ChartResponse::failed(&e, Vec::new());
        }
    };

    let mut warnings = Vec::new();
    if let Ok(computed) = resolve_year_stem_branch(birth.year()) {
        for mismatch in request.year_mismatches(computed) {
            tracing::warn!(%mismatch, "ignoring caller-supplied year value");
            warnings.push(mismatch.to_string());
        }
    }

    match assemble_chart_with(&birth, config) {
        Ok(chart) => ChartResponse::ok(chart, warnings),
        Err(e) => {
            tracing::warn!(error = %e, "chart assembly failed");
            ChartResponse::failed(&e, warnings)
        }
    }
}

/// Parse a JSON request and calculate its chart.
///
/// A body that is not valid JSON for [`ChartRequest`] yields a failed
/// response rather than an error.
pub fn calculate_chart_json(body: &str, config: &ChartConfig) -> ChartResponse {
    match serde_json::from_str::<ChartRequest>(body) {
        Ok(request) => calculate_chart_with(&request, config),
        Err(e) => ChartResponse {
            success: false,
            chart: None,
            error: Some(format!("malformed request: {e}")),
            warnings: Vec::new(),
        },
    }
}
