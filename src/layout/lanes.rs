use super::*;

struct ResolvedInterval {
    // Wide interval used for the overlap test; open endpoints are pushed
    // far past the calendar bounds so they collide with everything.
    test_start: NaiveDateTime,
    test_end: NaiveDateTime,
    // Render interval, clamped into the calendar bounds.
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Packs a row's elements into swim lanes by first-fit over the input
/// order: each element lands in the first existing lane with no temporal
/// overlap, or opens a new one.
///
/// This is deliberately not a minimal interval coloring. The packing is
/// order-dependent, and consumers rely on that: an element keeps its lane
/// across re-renders as long as the elements before it keep theirs.
/// Elements with unparseable or inverted dates are skipped, never rendered
/// and never an error.
pub fn pack_lanes(
    elements: &[TimelineElement],
    bounds: &CalendarBounds,
    config: &LaneConfig,
) -> LanePacking {
    let pad = Duration::days(i64::from(config.unbounded_pad_years) * 365);
    let mut lanes: Vec<SwimLane> = Vec::new();
    let mut occupancy: Vec<Vec<(NaiveDateTime, NaiveDateTime)>> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for element in elements {
        let Some(interval) = resolve_interval(element, bounds, pad) else {
            skipped.push(element.id.clone());
            continue;
        };
        let free_lane = occupancy.iter().position(|intervals| {
            intervals.iter().all(|&(start, end)| {
                !overlaps(interval.test_start, interval.test_end, start, end)
            })
        });
        let lane_index = match free_lane {
            Some(index) => index,
            None => {
                lanes.push(SwimLane::default());
                occupancy.push(Vec::new());
                lanes.len() - 1
            }
        };

        occupancy[lane_index].push((interval.test_start, interval.test_end));
        lanes[lane_index]
            .elements
            .push(place_element(element, &interval, bounds));
    }

    LanePacking { lanes, skipped }
}

fn resolve_interval(
    element: &TimelineElement,
    bounds: &CalendarBounds,
    pad: Duration,
) -> Option<ResolvedInterval> {
    if element.start.is_invalid() || element.end.is_invalid() {
        return None;
    }
    if let (Some(start), Some(end)) = (element.start.as_datetime(), element.end.as_datetime()) {
        if end <= start {
            return None;
        }
    }

    let test_start = match element.start {
        ElementDate::At(value) => value,
        _ => bounds.min_calendar_date - pad,
    };
    let test_end = match element.end {
        ElementDate::At(value) => value,
        _ => bounds.max_calendar_date + pad,
    };

    let start = element
        .start
        .as_datetime()
        .unwrap_or(bounds.min_calendar_date)
        .clamp(bounds.min_calendar_date, bounds.max_calendar_date);
    let end = element
        .end
        .as_datetime()
        .unwrap_or(bounds.max_calendar_date)
        .clamp(start, bounds.max_calendar_date);

    Some(ResolvedInterval {
        test_start,
        test_end,
        start,
        end,
    })
}

fn place_element(
    element: &TimelineElement,
    interval: &ResolvedInterval,
    bounds: &CalendarBounds,
) -> LaneElement {
    let total_hours = bounds.total_hours as f64;
    LaneElement {
        id: element.id.clone(),
        label: element.label.clone(),
        start: interval.start,
        end: interval.end,
        offset_percentage: hours_between(bounds.min_calendar_date, interval.start) / total_hours,
        percentage: hours_between(interval.start, interval.end) / total_hours,
    }
}

fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}
