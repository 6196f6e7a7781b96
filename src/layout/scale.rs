use super::*;

/// Greedy best-fit ladder: prefer the finest granularity whose rendered
/// width still fits the viewport, then fall back by day-count thresholds
/// once pixel-fit fails.
pub fn select_optimal_scale(
    difference_in_days: i64,
    difference_in_hours: i64,
    viewport_px: f32,
    config: &ScaleConfig,
) -> TimeScale {
    let days = difference_in_days.max(0);
    let hours = difference_in_hours.max(0);
    if hours <= config.day_max_hours && hours as f32 * config.day_px_per_hour <= viewport_px {
        TimeScale::Day
    } else if days <= config.week_max_days && days as f32 * config.week_px_per_day <= viewport_px
    {
        TimeScale::Week
    } else if days <= config.two_week_max_days
        && days as f32 * config.two_week_px_per_day <= viewport_px
    {
        TimeScale::TwoWeek
    } else if days <= config.month_max_days
        && days as f32 * config.month_px_per_day <= viewport_px
    {
        TimeScale::Month
    } else if days <= config.quarter_max_days {
        TimeScale::Quarter
    } else if days <= config.year_max_days {
        TimeScale::Year
    } else {
        TimeScale::FiveYear
    }
}

/// Picks the scale to actually configure: an explicit request, else the
/// best fit for the data span. A single distinct date in the data forces
/// `Year` regardless. The result is then adjusted to the supported list
/// (nearest coarser supported scale, else the finest supported one).
pub fn resolve_scale(
    requested: Option<TimeScale>,
    supported: &[TimeScale],
    bounds: &CalendarBounds,
    viewport_px: f32,
    config: &ScaleConfig,
) -> TimeScale {
    let ideal = if bounds.single_date {
        TimeScale::Year
    } else if let Some(scale) = requested {
        scale
    } else {
        select_optimal_scale(
            bounds.difference_in_days,
            bounds.difference_in_hours,
            viewport_px,
            config,
        )
    };
    nearest_supported(ideal, supported)
}

/// Best fit for a custom date-range selection; bypasses the request and
/// supported-list machinery entirely.
pub fn select_scale_for_span(
    start: NaiveDateTime,
    end: NaiveDateTime,
    viewport_px: f32,
    config: &ScaleConfig,
) -> TimeScale {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let span = end - start;
    select_optimal_scale(span.num_days(), span.num_hours(), viewport_px, config)
}

fn nearest_supported(ideal: TimeScale, supported: &[TimeScale]) -> TimeScale {
    if supported.is_empty() || supported.contains(&ideal) {
        return ideal;
    }
    supported
        .iter()
        .copied()
        .filter(|scale| *scale > ideal)
        .min()
        .or_else(|| supported.iter().copied().min())
        .unwrap_or(ideal)
}

/// Builds the three ruler rows and pixel widths for a granularity over the
/// full calendar bounds.
pub fn configure_scale(
    scale: TimeScale,
    bounds: &CalendarBounds,
    config: &ScaleConfig,
) -> ScaleLayout {
    match scale {
        TimeScale::Day => configure_hourly(scale, bounds, config.day_px_per_hour),
        TimeScale::Week => configure_daily(scale, bounds, config.week_px_per_day),
        TimeScale::TwoWeek => configure_daily(scale, bounds, config.two_week_px_per_day),
        TimeScale::Month => configure_daily(scale, bounds, config.month_px_per_day),
        TimeScale::Quarter => {
            configure_monthly(scale, bounds, config.quarter_px_per_quarter / 3.0)
        }
        TimeScale::Year => configure_monthly(scale, bounds, config.year_px_per_month),
        TimeScale::FiveYear => configure_five_year(scale, bounds, config.five_year_px_per_year),
    }
}

// Day scale: days over 6-hour blocks over hours.
fn configure_hourly(scale: TimeScale, bounds: &CalendarBounds, px_per_hour: f32) -> ScaleLayout {
    let mut outer = Vec::new();
    let mut mid = Vec::new();
    let mut inner = Vec::new();
    for day in days_of(bounds) {
        outer.push(Tick {
            label: day.format("%Y-%m-%d").to_string(),
            width: 24.0 * px_per_hour,
        });
        for block in 0..4u32 {
            mid.push(Tick {
                label: format!("{:02}-{:02}", block * 6, (block + 1) * 6),
                width: 6.0 * px_per_hour,
            });
        }
        for hour in 0..24u32 {
            inner.push(Tick {
                label: format!("{hour:02}:00"),
                width: px_per_hour,
            });
        }
    }
    ScaleLayout {
        scale,
        tick_rows: [outer, mid, inner],
        unit_width: px_per_hour,
        total_width: bounds.total_hours as f32 * px_per_hour,
    }
}

// Week, two-week and month scales: months over ISO weeks over days.
fn configure_daily(scale: TimeScale, bounds: &CalendarBounds, px_per_day: f32) -> ScaleLayout {
    let mut outer = Vec::new();
    let mut inner = Vec::new();
    for &year in &bounds.timeline_years {
        for month in 1..=12u32 {
            let first = ymd(year, month, 1);
            outer.push(Tick {
                label: first.format("%b %Y").to_string(),
                width: days_in_month(year, month) as f32 * px_per_day,
            });
        }
    }

    let mut mid = Vec::new();
    let mut week_days = 0u32;
    let mut week_label = String::new();
    for day in days_of(bounds) {
        if day.weekday() == Weekday::Mon && week_days > 0 {
            mid.push(Tick {
                label: week_label.clone(),
                width: week_days as f32 * px_per_day,
            });
            week_days = 0;
        }
        if week_days == 0 {
            week_label = format!("W{:02}", day.iso_week().week());
        }
        week_days += 1;
        inner.push(Tick {
            label: format!("{:02}", day.day()),
            width: px_per_day,
        });
    }
    if week_days > 0 {
        mid.push(Tick {
            label: week_label,
            width: week_days as f32 * px_per_day,
        });
    }

    ScaleLayout {
        scale,
        tick_rows: [outer, mid, inner],
        unit_width: px_per_day,
        total_width: bounds.total_days as f32 * px_per_day,
    }
}

// Quarter and year scales: years over quarters over months. Month ticks
// are fixed-width regardless of calendar length; only at per-day scales
// does a month's true length show up in the ruler.
fn configure_monthly(scale: TimeScale, bounds: &CalendarBounds, px_per_month: f32) -> ScaleLayout {
    let mut outer = Vec::new();
    let mut mid = Vec::new();
    let mut inner = Vec::new();
    for &year in &bounds.timeline_years {
        outer.push(Tick {
            label: year.to_string(),
            width: 12.0 * px_per_month,
        });
        for quarter in 1..=4u32 {
            mid.push(Tick {
                label: format!("Q{quarter}"),
                width: 3.0 * px_per_month,
            });
        }
        for month in 1..=12u32 {
            inner.push(Tick {
                label: ymd(year, month, 1).format("%b").to_string(),
                width: px_per_month,
            });
        }
    }
    let months = bounds.timeline_years.len() as f32 * 12.0;
    ScaleLayout {
        scale,
        tick_rows: [outer, mid, inner],
        unit_width: px_per_month,
        total_width: months * px_per_month,
    }
}

// Five-year scale: 5-year groups over years over quarters.
fn configure_five_year(
    scale: TimeScale,
    bounds: &CalendarBounds,
    px_per_year: f32,
) -> ScaleLayout {
    let px_per_quarter = px_per_year / 4.0;
    let mut outer = Vec::new();
    let mut mid = Vec::new();
    let mut inner = Vec::new();
    for group in bounds.timeline_years.chunks(5) {
        let label = match group {
            [only] => only.to_string(),
            [first, .., last] => format!("{first}-{last}"),
            [] => continue,
        };
        outer.push(Tick {
            label,
            width: group.len() as f32 * px_per_year,
        });
    }
    for &year in &bounds.timeline_years {
        mid.push(Tick {
            label: year.to_string(),
            width: px_per_year,
        });
        for quarter in 1..=4u32 {
            inner.push(Tick {
                label: format!("Q{quarter}"),
                width: px_per_quarter,
            });
        }
    }
    let quarters = bounds.timeline_years.len() as f32 * 4.0;
    ScaleLayout {
        scale,
        tick_rows: [outer, mid, inner],
        unit_width: px_per_quarter,
        total_width: quarters * px_per_quarter,
    }
}

fn days_of(bounds: &CalendarBounds) -> impl Iterator<Item = NaiveDate> + '_ {
    let last = bounds.max_calendar_date.date();
    bounds
        .min_calendar_date
        .date()
        .iter_days()
        .take_while(move |day| *day <= last)
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let first = ymd(year, month, 1);
    let next = if month == 12 {
        ymd(year + 1, 1, 1)
    } else {
        ymd(year, month + 1, 1)
    };
    (next - first).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::bounds::{BoundsOptions, compute_calendar_bounds};

    fn config() -> ScaleConfig {
        ScaleConfig::default()
    }

    fn bounds_for(start: &str, end: &str) -> CalendarBounds {
        let mut row = TimelineRow::new("r");
        let mut element = TimelineElement::new("e");
        element.start = crate::ir::ElementDate::At(crate::input::parse_date_token(start).unwrap());
        element.end = crate::ir::ElementDate::At(crate::input::parse_date_token(end).unwrap());
        row.elements.push(element);
        compute_calendar_bounds(&[row], &BoundsOptions::default(), ymd(2026, 8, 5))
    }

    #[test]
    fn ladder_picks_year_for_a_161_day_span_at_1000px() {
        // 161 days overflows the quarter threshold, so the ladder lands on
        // the year scale even though the viewport is generous.
        assert_eq!(
            select_optimal_scale(161, 161 * 24, 1000.0, &config()),
            TimeScale::Year
        );
    }

    #[test]
    fn ladder_walks_from_day_to_five_year() {
        let config = config();
        assert_eq!(select_optimal_scale(0, 10, 1000.0, &config), TimeScale::Day);
        // 24 hours no longer fit at 64px each in 1000px, but 1 day does at 200px.
        assert_eq!(select_optimal_scale(1, 24, 1000.0, &config), TimeScale::Week);
        assert_eq!(select_optimal_scale(12, 288, 1300.0, &config), TimeScale::TwoWeek);
        assert_eq!(select_optimal_scale(20, 480, 1300.0, &config), TimeScale::Month);
        assert_eq!(select_optimal_scale(60, 1440, 1300.0, &config), TimeScale::Quarter);
        assert_eq!(select_optimal_scale(200, 4800, 1300.0, &config), TimeScale::Year);
        assert_eq!(select_optimal_scale(900, 21600, 1300.0, &config), TimeScale::FiveYear);
    }

    #[test]
    fn wider_viewports_never_pick_a_coarser_scale() {
        let config = config();
        for (days, hours) in [(1i64, 20i64), (6, 144), (13, 312), (28, 672), (80, 1920)] {
            let mut previous: Option<TimeScale> = None;
            let mut width = 100.0f32;
            while width <= 6000.0 {
                let scale = select_optimal_scale(days, hours, width, &config);
                if let Some(previous) = previous {
                    assert!(
                        scale <= previous,
                        "span {days}d: widening to {width}px coarsened {previous:?} -> {scale:?}"
                    );
                }
                previous = Some(scale);
                width += 50.0;
            }
        }
    }

    #[test]
    fn unsupported_ideal_falls_back_to_nearest_coarser() {
        let supported = [TimeScale::Week, TimeScale::Year];
        assert_eq!(
            nearest_supported(TimeScale::Month, &supported),
            TimeScale::Year
        );
        assert_eq!(
            nearest_supported(TimeScale::Week, &supported),
            TimeScale::Week
        );
    }

    #[test]
    fn ideal_coarser_than_all_supported_falls_back_to_finest() {
        let supported = [TimeScale::Day, TimeScale::Week];
        assert_eq!(
            nearest_supported(TimeScale::FiveYear, &supported),
            TimeScale::Day
        );
    }

    #[test]
    fn empty_supported_list_means_everything_is_supported() {
        assert_eq!(nearest_supported(TimeScale::Quarter, &[]), TimeScale::Quarter);
    }

    #[test]
    fn single_date_forces_year() {
        let bounds = bounds_for("2024-05-05", "2024-05-05");
        assert!(bounds.single_date);
        let scale = resolve_scale(Some(TimeScale::Day), &[], &bounds, 4000.0, &config());
        assert_eq!(scale, TimeScale::Year);
    }

    #[test]
    fn custom_span_uses_the_same_ladder_and_accepts_reversed_input() {
        let start = ymd(2023, 1, 10).and_hms_opt(0, 0, 0).unwrap();
        let end = ymd(2023, 6, 20).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            select_scale_for_span(start, end, 1000.0, &config()),
            TimeScale::Year
        );
        assert_eq!(
            select_scale_for_span(end, start, 1000.0, &config()),
            TimeScale::Year
        );
    }

    #[test]
    fn year_scale_rows_for_a_single_year() {
        let bounds = bounds_for("2024-02-01", "2024-10-01");
        let layout = configure_scale(TimeScale::Year, &bounds, &config());
        let [outer, mid, inner] = &layout.tick_rows;
        assert_eq!(outer.len(), 1);
        assert_eq!(mid.len(), 4);
        assert_eq!(inner.len(), 12);
        assert_eq!(outer[0].label, "2024");
        assert_eq!(mid[1].label, "Q2");
        assert_eq!(inner[0].label, "Jan");
        assert_eq!(layout.unit_width, 120.0);
        assert_eq!(layout.total_width, 1440.0);
        let inner_sum: f32 = inner.iter().map(|tick| tick.width).sum();
        assert_eq!(inner_sum, layout.total_width);
    }

    #[test]
    fn month_scale_week_row_tiles_the_span_exactly() {
        let bounds = bounds_for("2024-02-01", "2024-10-01");
        let layout = configure_scale(TimeScale::Month, &bounds, &config());
        let [outer, mid, inner] = &layout.tick_rows;
        // 2024 is a leap year.
        assert_eq!(inner.len(), 366);
        assert_eq!(outer.len(), 12);
        assert_eq!(outer[1].label, "Feb 2024");
        assert_eq!(outer[1].width, 29.0 * 60.0);
        let mid_sum: f32 = mid.iter().map(|tick| tick.width).sum();
        assert_eq!(mid_sum, layout.total_width);
        // Jan 1 2024 is a Monday, so the first week is full width.
        assert_eq!(mid[0].label, "W01");
        assert_eq!(mid[0].width, 7.0 * 60.0);
    }

    #[test]
    fn day_scale_rows_for_one_day_of_data() {
        let bounds = bounds_for("2024-03-05", "2024-03-05T18:00");
        let layout = configure_scale(TimeScale::Day, &bounds, &config());
        let [outer, mid, inner] = &layout.tick_rows;
        assert_eq!(inner.len(), 366 * 24);
        assert_eq!(mid.len(), 366 * 4);
        assert_eq!(outer.len(), 366);
        assert_eq!(inner[0].label, "00:00");
        assert_eq!(mid[0].label, "00-06");
        assert_eq!(outer[0].label, "2024-01-01");
        assert_eq!(layout.unit_width, 64.0);
        assert_eq!(layout.total_width, 366.0 * 24.0 * 64.0);
    }

    #[test]
    fn five_year_scale_groups_partial_spans() {
        let bounds = bounds_for("2020-01-01", "2026-06-01");
        let layout = configure_scale(TimeScale::FiveYear, &bounds, &config());
        let [outer, mid, inner] = &layout.tick_rows;
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].label, "2020-2024");
        assert_eq!(outer[0].width, 5.0 * 360.0);
        assert_eq!(outer[1].label, "2025-2026");
        assert_eq!(outer[1].width, 2.0 * 360.0);
        assert_eq!(mid.len(), 7);
        assert_eq!(inner.len(), 28);
        assert_eq!(layout.unit_width, 90.0);
        assert_eq!(layout.total_width, 7.0 * 360.0);
    }

    #[test]
    fn quarter_scale_unit_is_a_third_of_the_quarter_constant() {
        let bounds = bounds_for("2024-02-01", "2024-03-01");
        let layout = configure_scale(TimeScale::Quarter, &bounds, &config());
        assert_eq!(layout.unit_width, 160.0);
        assert_eq!(layout.total_width, 12.0 * 160.0);
    }
}
