mod bounds;
mod lanes;
mod scale;
pub(crate) mod types;
mod window;

pub use types::*;

pub use bounds::{BoundsOptions, DateExtractFn, compute_calendar_bounds};
pub use lanes::pack_lanes;
pub use scale::{configure_scale, resolve_scale, select_optimal_scale, select_scale_for_span};
pub use window::{slice_row, visible_range_for_row, visible_ticks};

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};

use crate::config::{LaneConfig, LayoutConfig, ScaleConfig, WindowConfig};
use crate::ir::{Dataset, ElementDate, TimeScale, TimelineElement, TimelineRow};

#[derive(Default)]
pub struct LayoutOptions<'a> {
    /// Requested ruler granularity; `None` means auto-select.
    pub requested_scale: Option<TimeScale>,
    /// Granularities the consumer can render. Empty means all of them.
    pub supported_scales: Vec<TimeScale>,
    pub viewport_px: f32,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    /// User-typed sub-range; when present the scale is best-fit to it and
    /// the request/supported machinery is bypassed.
    pub custom_range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub extract: Option<&'a DateExtractFn>,
    /// Anchor for the empty-dataset fallback. `None` reads the local clock.
    pub today: Option<NaiveDate>,
}

/// Computes the full timeline layout: calendar bounds, ruler, and one set
/// of swim lanes per row.
///
/// Pure apart from the clock fallback; callers that pass `today` get a
/// fully deterministic result and can memoize on their inputs.
pub fn compute_timeline_layout(
    dataset: &Dataset,
    opts: &LayoutOptions<'_>,
    config: &LayoutConfig,
) -> TimelineLayout {
    let today = opts.today.unwrap_or_else(|| Local::now().date_naive());
    let bounds_opts = BoundsOptions {
        min_date: opts.min_date,
        max_date: opts.max_date,
        extract: opts.extract,
    };
    let bounds = compute_calendar_bounds(&dataset.rows, &bounds_opts, today);

    let scale = match opts.custom_range {
        Some((start, end)) => {
            select_scale_for_span(start, end, opts.viewport_px, &config.scale)
        }
        None => resolve_scale(
            opts.requested_scale,
            &opts.supported_scales,
            &bounds,
            opts.viewport_px,
            &config.scale,
        ),
    };
    let scale_layout = configure_scale(scale, &bounds, &config.scale);

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let packing = pack_lanes(&row.elements, &bounds, &config.lane);
            RowLayout {
                id: row.id.clone(),
                label: row.label.clone(),
                lanes: packing.lanes,
                skipped: packing.skipped,
            }
        })
        .collect();

    TimelineLayout {
        bounds,
        scale: scale_layout,
        rows,
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn year_start(year: i32) -> NaiveDateTime {
    ymd(year, 1, 1).and_hms_opt(0, 0, 0).expect("valid time")
}

fn year_end(year: i32) -> NaiveDateTime {
    ymd(year, 12, 31).and_hms_opt(23, 59, 0).expect("valid time")
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
