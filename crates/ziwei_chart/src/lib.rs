//! Ziwei chart assembly on top of `ziwei_base` placement primitives.
//!
//! This crate provides:
//! - [`assemble_chart`]: birth input → immutable twelve-palace [`ChartLayer`]
//! - [`ChartConfig`]: leap-month policy and optional chart sections
//! - [`calculate_chart`]: the JSON request/response contract

pub mod chart;
pub mod config;
pub mod request;

pub use chart::{ChartLayer, PalaceState, TransformedStar, assemble_chart, assemble_chart_with};
pub use config::{ChartConfig, LeapMonthPolicy};
pub use request::{
    ChartRequest, ChartResponse, MAX_TEXT_CHARS, calculate_chart, calculate_chart_json,
    calculate_chart_with,
};
