use super::*;

/// Override hook for pulling dates out of an element; takes precedence over
/// the element's own `start`/`end` fields.
pub type DateExtractFn = dyn Fn(&TimelineElement) -> (Option<NaiveDateTime>, Option<NaiveDateTime>);

#[derive(Default)]
pub struct BoundsOptions<'a> {
    /// Overrides the observed minimum. A reversed min/max pair is
    /// normalized by swapping before use.
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    pub extract: Option<&'a DateExtractFn>,
}

/// Derives the year-aligned calendar bounds for a row set.
///
/// Pure: identical inputs always produce identical bounds. `today` anchors
/// the empty-dataset fallback so callers control the clock.
pub fn compute_calendar_bounds(
    rows: &[TimelineRow],
    opts: &BoundsOptions<'_>,
    today: NaiveDate,
) -> CalendarBounds {
    let mut dates: Vec<NaiveDateTime> = Vec::new();
    for row in rows {
        for element in &row.elements {
            let (start, end) = match opts.extract {
                Some(extract) => extract(element),
                None => (element.start.as_datetime(), element.end.as_datetime()),
            };
            if let Some(start) = start {
                dates.push(start);
            }
            if let Some(end) = end {
                dates.push(end);
            }
        }
    }
    dates.sort();

    let mut distinct = dates.clone();
    distinct.dedup();

    let (override_min, override_max) = match (opts.min_date, opts.max_date) {
        (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
        other => other,
    };

    let fallback_min = year_start(today.year());
    let fallback_max = year_end(today.year());
    let actual_min = override_min
        .or_else(|| dates.first().copied())
        .unwrap_or(fallback_min);
    let actual_max = override_max
        .or_else(|| dates.last().copied())
        .unwrap_or(fallback_max);
    // A single-sided override can still land past the other extreme.
    let (actual_min, actual_max) = if actual_min > actual_max {
        (actual_max, actual_min)
    } else {
        (actual_min, actual_max)
    };

    let min_calendar_date = year_start(actual_min.year());
    let max_calendar_date = year_end(actual_max.year());
    let timeline_years: Vec<i32> = (actual_min.year()..=actual_max.year()).collect();
    let total_days =
        (max_calendar_date.date() - min_calendar_date.date()).num_days() + 1;
    let total_hours = total_days * 24;

    let span = actual_max - actual_min;
    let difference_in_days = span.num_days();
    let difference_in_hours = span.num_hours();
    let center_of_gravity = actual_min + Duration::days(difference_in_days / 2);
    let single_date = distinct.len() == 1 && difference_in_hours == 0;

    CalendarBounds {
        min_calendar_date,
        max_calendar_date,
        timeline_years,
        total_days,
        total_hours,
        actual_min,
        actual_max,
        difference_in_days,
        difference_in_hours,
        center_of_gravity,
        single_date,
    }
}
