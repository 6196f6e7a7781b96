use chrono::NaiveDateTime;

use crate::ir::TimeScale;

/// Year-aligned span used to size the whole timeline canvas.
///
/// The calendar bounds deliberately distort the true data extents: they
/// always run from Jan 1 of the earliest year to Dec 31 of the latest one,
/// which keeps tick generation whole-year regular. The true extents are
/// still reported (`actual_min`/`actual_max` and the difference fields).
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarBounds {
    pub min_calendar_date: NaiveDateTime,
    pub max_calendar_date: NaiveDateTime,
    pub timeline_years: Vec<i32>,
    pub total_days: i64,
    pub total_hours: i64,
    pub actual_min: NaiveDateTime,
    pub actual_max: NaiveDateTime,
    pub difference_in_days: i64,
    pub difference_in_hours: i64,
    /// Midpoint of the actual data span, used for the initial scroll position.
    pub center_of_gravity: NaiveDateTime,
    pub single_date: bool,
}

/// One cell of a ruler row.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub label: String,
    pub width: f32,
}

/// A three-row ruler for one granularity, covering the full calendar bounds.
///
/// Rows are ordered outer, mid, inner. Inner-row ticks all share
/// `unit_width`; outer and mid rows may carry partial-width ticks at span
/// boundaries (weeks cut by Jan 1, short 5-year groups).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLayout {
    pub scale: TimeScale,
    pub tick_rows: [Vec<Tick>; 3],
    pub unit_width: f32,
    pub total_width: f32,
}

/// A laid-out element with its resolved interval and horizontal placement,
/// both percentages against the calendar bounds' total hours.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneElement {
    pub id: String,
    pub label: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub offset_percentage: f64,
    pub percentage: f64,
}

/// A horizontal track of pairwise non-overlapping elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwimLane {
    pub elements: Vec<LaneElement>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanePacking {
    pub lanes: Vec<SwimLane>,
    /// Ids of elements excluded from layout (invalid or inverted dates).
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub id: String,
    pub label: Option<String>,
    pub lanes: Vec<SwimLane>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub bounds: CalendarBounds,
    pub scale: ScaleLayout,
    pub rows: Vec<RowLayout>,
}

/// Index window into a uniform tick row, plus the pixel offset of its
/// first tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickWindow {
    pub first: usize,
    pub last: usize,
    pub lead_x: f32,
}

impl TickWindow {
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first)
    }

    pub fn is_empty(&self) -> bool {
        self.last <= self.first
    }
}
