//! Zoomable, brushable view over the time series.
//!
//! This is the only stateful interactive logic in the dashboard: a small
//! state machine over three phases. `Idle` shows the full series, a left
//! mouse drag across the chart enters `Selecting`, and releasing the button
//! over a non-trivial range enters `Zoomed` with an inclusive index window
//! into the sorted series. Zoom commands (`zoom_in`/`zoom_out`/`reset`) and
//! the brush bar mutate the window directly.
//!
//! Cursor positions outside the chart rect are ignored rather than clamped,
//! so a drag that wanders off the edge simply stops updating.

/// Interaction phase of the zoom controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    /// No selection, no zoom: the full series is displayed.
    Idle,
    /// Mouse button down, dragging a range.
    Selecting,
    /// An active range is applied, mouse up.
    Zoomed,
}

/// Inclusive index window into the sorted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub start: usize,
    pub end: usize,
}

impl ZoomRange {
    /// Number of points in the window (inclusive of both ends).
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Width as used by the zoom arithmetic (`end - start`).
    fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Mouse-driven zoom/pan controller.
#[derive(Debug, Default)]
pub struct ZoomController {
    range: Option<ZoomRange>,
    left_index: Option<usize>,
    right_index: Option<usize>,
    selecting: bool,
    /// Brush input is only accepted once the first render pass has recorded
    /// real layout, never against stale measurements.
    brush_ready: bool,
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ZoomPhase {
        if self.selecting {
            ZoomPhase::Selecting
        } else if self.range.is_some() {
            ZoomPhase::Zoomed
        } else {
            ZoomPhase::Idle
        }
    }

    /// The active zoom window, if any.
    pub fn range(&self) -> Option<ZoomRange> {
        self.range
    }

    /// In-progress drag selection endpoints, for rendering feedback.
    pub fn selection(&self) -> Option<(usize, usize)> {
        match (self.left_index, self.right_index) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }

    /// The window actually displayed: the active range clamped to the series
    /// bounds, or the full series when no range is active.
    pub fn display_range(&self, len: usize) -> Option<ZoomRange> {
        if len == 0 {
            return None;
        }
        match self.range {
            Some(r) => Some(ZoomRange {
                start: r.start.min(len - 1),
                end: r.end.min(len - 1),
            }),
            None => Some(ZoomRange { start: 0, end: len - 1 }),
        }
    }

    /// Slice the series down to the displayed window (inclusive).
    pub fn displayed<'a, T>(&self, points: &'a [T]) -> &'a [T] {
        match self.display_range(points.len()) {
            Some(r) => &points[r.start..=r.end],
            None => points,
        }
    }

    /// Map a terminal column inside the chart rect to an absolute series
    /// index, proportional to the number of currently displayed points.
    ///
    /// Returns `None` when the cursor is outside the chart bounds or the
    /// series is empty; callers ignore the event in that case.
    pub fn index_at(
        &self,
        column: u16,
        chart_left: u16,
        chart_width: u16,
        len: usize,
    ) -> Option<usize> {
        if chart_width == 0 || len == 0 {
            return None;
        }
        if column < chart_left || column >= chart_left + chart_width {
            return None;
        }
        let display = self.display_range(len)?;
        let relative = (column - chart_left) as usize;
        let offset = relative * display.len() / chart_width as usize;
        if offset >= display.len() {
            return None;
        }
        Some(display.start + offset)
    }

    /// Begin a drag selection at the given column.
    pub fn mouse_down(&mut self, column: u16, chart_left: u16, chart_width: u16, len: usize) {
        if let Some(index) = self.index_at(column, chart_left, chart_width, len) {
            self.left_index = Some(index);
            self.right_index = None;
            self.selecting = true;
        }
    }

    /// Update the drag selection; no-op unless a drag is in progress.
    pub fn mouse_move(&mut self, column: u16, chart_left: u16, chart_width: u16, len: usize) {
        if !self.selecting {
            return;
        }
        if let Some(index) = self.index_at(column, chart_left, chart_width, len) {
            self.right_index = Some(index);
        }
    }

    /// Finish a drag selection (also invoked when the pointer leaves the
    /// chart). A same-index release, or one with no movement at all, is a
    /// click: selection and zoom are both cleared.
    pub fn mouse_up(&mut self) {
        if !self.selecting {
            return;
        }
        self.selecting = false;

        match (self.left_index.take(), self.right_index.take()) {
            (Some(left), Some(right)) if left != right => {
                self.range = Some(ZoomRange {
                    start: left.min(right),
                    end: left.max(right),
                });
            }
            _ => {
                self.range = None;
            }
        }
    }

    /// Step in: from `Idle`, jump to the middle 50% of the series; from
    /// `Zoomed`, shrink the window by 25% around its midpoint with a floor
    /// of 2 points of width.
    pub fn zoom_in(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        match self.range {
            None => {
                let middle = len / 2;
                let quarter = len / 4;
                self.range = Some(ZoomRange {
                    start: middle - quarter,
                    end: (middle + quarter).min(len - 1),
                });
            }
            Some(r) => {
                let new_width = (r.width() * 3 / 4).max(2);
                let middle = (r.start + r.end) / 2;
                let half = new_width / 2;
                self.range = Some(ZoomRange {
                    start: middle.saturating_sub(half),
                    end: (middle + half).min(len - 1),
                });
            }
        }
    }

    /// Step out: grow the window by 25% around its midpoint, clamped to the
    /// series bounds; once the window covers more than 90% of the series,
    /// reset to `Idle`. Only valid while `Zoomed`.
    pub fn zoom_out(&mut self, len: usize) {
        let Some(r) = self.range else {
            return;
        };
        if len == 0 {
            self.reset();
            return;
        }

        // Integer 1.25x never grows a width-2 window, so grow by at least
        // one index per step to guarantee zoom-out terminates. The growth
        // must be applied asymmetrically: centering via `new_width / 2`
        // truncates an odd width back down, which would pin the window.
        let new_width = (r.width() * 5 / 4).max(r.width() + 1).min(len);
        let middle = (r.start + r.end) / 2;
        let end = (middle.saturating_sub(new_width / 2) + new_width).min(len - 1);
        let start = end.saturating_sub(new_width);

        // A full-series window also resets: on short series it can never
        // exceed the 90% threshold.
        if (start == 0 && end == len - 1) || (end - start) as f64 > len as f64 * 0.9 {
            self.reset();
        } else {
            self.range = Some(ZoomRange { start, end });
        }
    }

    /// Clear the zoom window and any in-progress selection.
    pub fn reset(&mut self) {
        self.range = None;
        self.left_index = None;
        self.right_index = None;
        self.selecting = false;
    }

    /// Mark the first render pass complete, enabling brush input.
    pub fn mark_ready(&mut self) {
        self.brush_ready = true;
    }

    /// Apply a brush drag reporting start/end indices directly. Ignored
    /// before the first render pass and when the endpoints coincide.
    pub fn brush_to(&mut self, start: usize, end: usize, len: usize) {
        if !self.brush_ready || start == end || len == 0 {
            return;
        }
        let (low, high) = if start < end { (start, end) } else { (end, start) };
        self.range = Some(ZoomRange {
            start: low.min(len - 1),
            end: high.min(len - 1),
        });
    }
}

/// X-axis tick label stride as a function of the displayed length: every
/// point for ≤24 points, every 2nd for ≤48, every 6th for ≤168, else every
/// 12th.
pub fn tick_interval(display_len: usize) -> usize {
    if display_len <= 24 {
        1
    } else if display_len <= 48 {
        2
    } else if display_len <= 168 {
        6
    } else {
        12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_LEFT: u16 = 0;
    const CHART_WIDTH: u16 = 100;

    fn drag(controller: &mut ZoomController, from: u16, to: u16, len: usize) {
        controller.mouse_down(from, CHART_LEFT, CHART_WIDTH, len);
        controller.mouse_move(to, CHART_LEFT, CHART_WIDTH, len);
        controller.mouse_up();
    }

    #[test]
    fn starts_idle_showing_full_range() {
        let controller = ZoomController::new();
        assert_eq!(controller.phase(), ZoomPhase::Idle);
        assert_eq!(
            controller.display_range(50),
            Some(ZoomRange { start: 0, end: 49 })
        );
    }

    #[test]
    fn click_without_movement_stays_idle() {
        let mut controller = ZoomController::new();
        controller.mouse_down(10, CHART_LEFT, CHART_WIDTH, 100);
        assert_eq!(controller.phase(), ZoomPhase::Selecting);
        controller.mouse_up();

        assert_eq!(controller.phase(), ZoomPhase::Idle);
        assert!(controller.range().is_none());
    }

    #[test]
    fn click_on_same_index_resets_an_active_zoom() {
        let mut controller = ZoomController::new();
        drag(&mut controller, 10, 60, 100);
        assert_eq!(controller.phase(), ZoomPhase::Zoomed);

        controller.mouse_down(30, CHART_LEFT, CHART_WIDTH, 100);
        controller.mouse_move(30, CHART_LEFT, CHART_WIDTH, 100);
        controller.mouse_up();

        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn drag_sets_range_with_ordered_endpoints() {
        let mut controller = ZoomController::new();
        // Right-to-left drag still produces start <= end.
        drag(&mut controller, 60, 10, 100);

        let range = controller.range().unwrap();
        assert_eq!(range, ZoomRange { start: 10, end: 60 });
        assert_eq!(controller.phase(), ZoomPhase::Zoomed);
        assert!(controller.selection().is_none());
    }

    #[test]
    fn index_mapping_is_proportional_to_displayed_points() {
        let controller = ZoomController::new();
        assert_eq!(controller.index_at(0, CHART_LEFT, CHART_WIDTH, 50), Some(0));
        assert_eq!(controller.index_at(50, CHART_LEFT, CHART_WIDTH, 50), Some(25));
        assert_eq!(controller.index_at(99, CHART_LEFT, CHART_WIDTH, 50), Some(49));
    }

    #[test]
    fn index_mapping_offsets_by_the_zoom_window() {
        let mut controller = ZoomController::new();
        controller.mark_ready();
        controller.brush_to(10, 19, 50);

        // 10 displayed points across 100 columns: column 50 is the 5th.
        assert_eq!(controller.index_at(50, CHART_LEFT, CHART_WIDTH, 50), Some(15));
    }

    #[test]
    fn out_of_bounds_cursor_is_ignored() {
        let mut controller = ZoomController::new();
        assert_eq!(controller.index_at(120, 10, 100, 50), None);
        assert_eq!(controller.index_at(5, 10, 100, 50), None);

        controller.mouse_down(120, 10, 100, 50);
        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn displayed_slice_is_contiguous_and_inclusive() {
        let points: Vec<usize> = (0..100).collect();
        let mut controller = ZoomController::new();
        controller.mark_ready();

        for (start, end) in [(0, 0), (0, 99), (25, 75), (99, 99)] {
            controller.brush_to(start, end, points.len());
            if start == end {
                continue; // brush ignores trivial ranges
            }
            let slice = controller.displayed(&points);
            assert_eq!(slice.len(), end - start + 1);
            assert_eq!(slice.first(), Some(&start));
            assert_eq!(slice.last(), Some(&end));
        }
    }

    #[test]
    fn zoom_in_from_idle_shows_middle_half() {
        let mut controller = ZoomController::new();
        controller.zoom_in(100);
        assert_eq!(controller.range(), Some(ZoomRange { start: 25, end: 75 }));
    }

    #[test]
    fn repeated_zoom_in_never_narrower_than_two_points() {
        let mut controller = ZoomController::new();
        for _ in 0..64 {
            controller.zoom_in(100);
            let range = controller.range().unwrap();
            assert!(range.end - range.start >= 2);
        }
    }

    #[test]
    fn zoom_out_past_ninety_percent_resets_to_idle() {
        let mut controller = ZoomController::new();
        controller.zoom_in(100);
        controller.zoom_in(100);

        let mut steps = 0;
        while controller.range().is_some() {
            controller.zoom_out(100);
            steps += 1;
            assert!(steps < 1000, "zoom_out must terminate");
        }
        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn zoom_out_grows_a_width_two_window() {
        // Width 2 is the zoom-in floor; centering math must not truncate
        // the growth away and pin the window there.
        let mut controller = ZoomController::new();
        controller.mark_ready();
        controller.brush_to(40, 42, 100);

        controller.zoom_out(100);
        let range = controller.range().unwrap();
        assert!(range.width() > 2, "window did not grow: {:?}", range);
    }

    #[test]
    fn zoom_out_from_the_zoom_in_floor_reaches_idle() {
        let mut controller = ZoomController::new();
        for _ in 0..32 {
            controller.zoom_in(100);
        }
        assert_eq!(controller.range().unwrap().width(), 2);

        let mut steps = 0;
        while controller.range().is_some() {
            controller.zoom_out(100);
            steps += 1;
            assert!(steps < 500, "zoom_out must terminate");
        }
        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn zoom_out_resets_once_the_window_spans_a_short_series() {
        // 90% of a 3-point series is unreachable; the full-range window
        // resets instead.
        let mut controller = ZoomController::new();
        controller.mark_ready();
        controller.brush_to(0, 1, 3);

        let mut steps = 0;
        while controller.range().is_some() {
            controller.zoom_out(3);
            steps += 1;
            assert!(steps < 500, "zoom_out must terminate");
        }
        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn zoom_out_in_idle_is_a_no_op() {
        let mut controller = ZoomController::new();
        controller.zoom_out(100);
        assert_eq!(controller.phase(), ZoomPhase::Idle);
    }

    #[test]
    fn brush_is_gated_on_first_render() {
        let mut controller = ZoomController::new();
        controller.brush_to(5, 20, 100);
        assert!(controller.range().is_none());

        controller.mark_ready();
        controller.brush_to(5, 20, 100);
        assert_eq!(controller.range(), Some(ZoomRange { start: 5, end: 20 }));
    }

    #[test]
    fn brush_ignores_equal_endpoints() {
        let mut controller = ZoomController::new();
        controller.mark_ready();
        controller.brush_to(7, 7, 100);
        assert!(controller.range().is_none());
    }

    #[test]
    fn reset_clears_range_and_selection() {
        let mut controller = ZoomController::new();
        controller.mouse_down(10, CHART_LEFT, CHART_WIDTH, 100);
        controller.mouse_move(40, CHART_LEFT, CHART_WIDTH, 100);
        controller.reset();

        assert_eq!(controller.phase(), ZoomPhase::Idle);
        assert!(controller.selection().is_none());
    }

    #[test]
    fn tick_interval_adapts_to_display_length() {
        assert_eq!(tick_interval(1), 1);
        assert_eq!(tick_interval(24), 1);
        assert_eq!(tick_interval(25), 2);
        assert_eq!(tick_interval(48), 2);
        assert_eq!(tick_interval(49), 6);
        assert_eq!(tick_interval(168), 6);
        assert_eq!(tick_interval(169), 12);
        assert_eq!(tick_interval(720), 12);
    }
}
