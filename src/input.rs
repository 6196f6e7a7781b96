use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::ir::{Dataset, ElementDate, TimelineElement, TimelineRow};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read dataset: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Parse(String),
}

// Year-month-day with optional time, any of -, / or . as the date separator.
static YMD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[T ](\d{1,2}):(\d{2})(?::(\d{2}))?)?$")
        .unwrap()
});
// Day-first form (05.01.2024).
static DMY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap());

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    rows: Vec<RawRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
}

/// Parses a dataset document. Strict JSON is tried first, then JSON5 so
/// hand-written fixtures can carry comments and trailing commas.
pub fn parse_dataset(input: &str) -> Result<Dataset, InputError> {
    let raw: RawDataset = match serde_json::from_str(input) {
        Ok(value) => value,
        Err(json_err) => {
            json5::from_str(input).map_err(|_| InputError::Parse(json_err.to_string()))?
        }
    };
    Ok(convert_dataset(raw))
}

pub fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let contents = std::fs::read_to_string(path).map_err(InputError::Read)?;
    Ok(parse_dataset(&contents)?)
}

fn convert_dataset(raw: RawDataset) -> Dataset {
    let rows = raw
        .rows
        .into_iter()
        .map(|row| TimelineRow {
            id: row.id,
            label: row.label,
            elements: row.elements.into_iter().map(convert_element).collect(),
        })
        .collect();
    Dataset { rows }
}

fn convert_element(raw: RawElement) -> TimelineElement {
    TimelineElement {
        id: raw.id,
        label: raw.label,
        start: convert_date(raw.start.as_deref()),
        end: convert_date(raw.end.as_deref()),
    }
}

fn convert_date(value: Option<&str>) -> ElementDate {
    match value {
        None => ElementDate::Open,
        Some(text) => match parse_date_token(text) {
            Some(parsed) => ElementDate::At(parsed),
            None => ElementDate::Invalid,
        },
    }
}

/// Lenient date parsing: ISO dates and datetimes plus the slash/dot forms
/// seen in exported row data. Returns `None` for anything unrecognized.
pub fn parse_date_token(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(caps) = YMD_RE.captures(value) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let hour: u32 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let minute: u32 = caps.get(5).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        let second: u32 = caps.get(6).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
        return date.and_hms_opt(hour, minute, second);
    }
    if let Some(caps) = DMY_RE.captures(value) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0);
    }
    None
}
