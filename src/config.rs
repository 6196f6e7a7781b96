use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel-per-unit constants for each ruler granularity plus the thresholds
/// of the auto-selection ladder. These are design choices balancing label
/// readability against scroll distance, not derived values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub day_px_per_hour: f32,
    pub week_px_per_day: f32,
    pub two_week_px_per_day: f32,
    pub month_px_per_day: f32,
    pub quarter_px_per_quarter: f32,
    pub year_px_per_month: f32,
    pub five_year_px_per_year: f32,
    pub day_max_hours: i64,
    pub week_max_days: i64,
    pub two_week_max_days: i64,
    pub month_max_days: i64,
    pub quarter_max_days: i64,
    pub year_max_days: i64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            day_px_per_hour: 64.0,
            week_px_per_day: 200.0,
            two_week_px_per_day: 100.0,
            month_px_per_day: 60.0,
            quarter_px_per_quarter: 480.0,
            year_px_per_month: 120.0,
            five_year_px_per_year: 360.0,
            day_max_hours: 24,
            week_max_days: 7,
            two_week_max_days: 14,
            month_max_days: 30,
            quarter_max_days: 90,
            year_max_days: 365,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// How far an open-ended interval is widened for the overlap test,
    /// in years on each side.
    pub unbounded_pad_years: i32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            unbounded_pad_years: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Extra ticks materialized past the visible edge of the viewport.
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { overscan: 1 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub scale: ScaleConfig,
    pub lane: LaneConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
}

/// Loads a config file, falling back to defaults when no path is given.
/// Strict JSON is tried first, then JSON5.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(json_err) => json5::from_str(&contents)
            .map_err(|_| anyhow::anyhow!("failed to parse config: {json_err}"))?,
    };
    Ok(config)
}
