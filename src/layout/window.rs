use super::*;

/// Computes the visible window into a uniform tick row: the first tick at
/// or before the scroll offset through one past the viewport edge, widened
/// by `overscan` trailing ticks.
pub fn visible_ticks(
    scroll_offset: f32,
    viewport_px: f32,
    unit_width: f32,
    tick_count: usize,
    overscan: usize,
) -> TickWindow {
    if unit_width <= 0.0 || tick_count == 0 {
        return TickWindow {
            first: 0,
            last: tick_count,
            lead_x: 0.0,
        };
    }
    let first = ((scroll_offset.max(0.0) / unit_width).floor() as usize).min(tick_count);
    let visible = (viewport_px.max(0.0) / unit_width).ceil() as usize + overscan;
    let last = first.saturating_add(visible).min(tick_count);
    TickWindow {
        first,
        last,
        lead_x: first as f32 * unit_width,
    }
}

/// Window computation for rows whose ticks vary in width (outer and mid
/// ruler rows): a linear walk over cumulative widths.
pub fn visible_range_for_row(
    row: &[Tick],
    scroll_offset: f32,
    viewport_px: f32,
    overscan: usize,
) -> TickWindow {
    let left = scroll_offset.max(0.0);
    let right = left + viewport_px.max(0.0);
    let mut x = 0.0f32;
    let mut first = row.len();
    let mut last = row.len();
    let mut lead_x = x;
    for (index, tick) in row.iter().enumerate() {
        let next = x + tick.width;
        if first == row.len() && next > left {
            first = index;
            lead_x = x;
        }
        if x >= right {
            last = index;
            break;
        }
        x = next;
    }
    if first == row.len() {
        lead_x = x;
    }
    let last = last.saturating_add(overscan).min(row.len());
    TickWindow {
        first,
        last: last.max(first),
        lead_x,
    }
}

impl ScaleLayout {
    /// Visible window into the inner tick row for the current scroll state.
    pub fn visible_window(
        &self,
        scroll_offset: f32,
        viewport_px: f32,
        config: &WindowConfig,
    ) -> TickWindow {
        visible_ticks(
            scroll_offset,
            viewport_px,
            self.unit_width,
            self.tick_rows[2].len(),
            config.overscan,
        )
    }
}

/// Slices a tick row to a window, clamping out-of-range indices.
pub fn slice_row<'a>(row: &'a [Tick], window: &TickWindow) -> &'a [Tick] {
    let first = window.first.min(row.len());
    let last = window.last.clamp(first, row.len());
    &row[first..last]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_row(count: usize, width: f32) -> Vec<Tick> {
        (0..count)
            .map(|index| Tick {
                label: index.to_string(),
                width,
            })
            .collect()
    }

    #[test]
    fn window_starts_at_the_tick_under_the_scroll_offset() {
        let window = visible_ticks(130.0, 1000.0, 64.0, 500, 1);
        assert_eq!(window.first, 2);
        // ceil(1000 / 64) = 16 visible ticks plus one overscan tick.
        assert_eq!(window.last, 2 + 16 + 1);
        assert_eq!(window.lead_x, 128.0);
    }

    #[test]
    fn window_clamps_at_the_end_of_the_row() {
        let window = visible_ticks(31_600.0, 1000.0, 64.0, 500, 1);
        assert_eq!(window.first, 493);
        assert_eq!(window.last, 500);

        let beyond = visible_ticks(64_000.0, 1000.0, 64.0, 500, 1);
        assert_eq!(beyond.first, 500);
        assert!(beyond.is_empty());
    }

    #[test]
    fn degenerate_unit_width_returns_the_whole_row() {
        let window = visible_ticks(100.0, 1000.0, 0.0, 12, 1);
        assert_eq!((window.first, window.last), (0, 12));
    }

    #[test]
    fn negative_scroll_is_treated_as_zero() {
        let window = visible_ticks(-50.0, 320.0, 64.0, 100, 0);
        assert_eq!(window.first, 0);
        assert_eq!(window.last, 5);
    }

    #[test]
    fn slice_row_clamps_to_row_length() {
        let row = uniform_row(10, 64.0);
        let window = TickWindow {
            first: 8,
            last: 20,
            lead_x: 0.0,
        };
        assert_eq!(slice_row(&row, &window).len(), 2);

        let past_end = TickWindow {
            first: 15,
            last: 20,
            lead_x: 0.0,
        };
        assert!(slice_row(&row, &past_end).is_empty());
    }

    #[test]
    fn variable_width_row_walks_cumulative_widths() {
        let row = vec![
            Tick { label: "a".into(), width: 100.0 },
            Tick { label: "b".into(), width: 50.0 },
            Tick { label: "c".into(), width: 200.0 },
            Tick { label: "d".into(), width: 25.0 },
        ];
        let window = visible_range_for_row(&row, 120.0, 100.0, 0);
        assert_eq!((window.first, window.last), (1, 3));
        assert_eq!(window.lead_x, 100.0);

        let all = visible_range_for_row(&row, 0.0, 1000.0, 0);
        assert_eq!((all.first, all.last), (0, 4));

        let tail = visible_range_for_row(&row, 5000.0, 100.0, 1);
        assert!(tail.is_empty());
    }

    #[test]
    fn scale_layout_window_uses_the_inner_row_and_config_overscan() {
        let layout = ScaleLayout {
            scale: crate::ir::TimeScale::Year,
            tick_rows: [uniform_row(3, 1440.0), uniform_row(12, 360.0), uniform_row(36, 120.0)],
            unit_width: 120.0,
            total_width: 4320.0,
        };
        let window = layout.visible_window(250.0, 480.0, &WindowConfig { overscan: 2 });
        assert_eq!(window.first, 2);
        // ceil(480 / 120) = 4 visible ticks plus two overscan ticks.
        assert_eq!(window.last, 8);
    }

    #[test]
    fn uniform_and_variable_windows_agree_on_uniform_rows() {
        let row = uniform_row(40, 60.0);
        for scroll in [0.0f32, 59.0, 60.0, 601.0, 1800.0] {
            let uniform = visible_ticks(scroll, 480.0, 60.0, row.len(), 1);
            let walked = visible_range_for_row(&row, scroll, 480.0, 1);
            assert_eq!(uniform.first, walked.first, "scroll {scroll}");
            assert_eq!(uniform.lead_x, walked.lead_x, "scroll {scroll}");
        }
    }
}
