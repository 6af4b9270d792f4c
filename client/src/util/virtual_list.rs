//! Windowing math for the virtualized article list.
//!
//! DESIGN
//! ======
//! Only rows that intersect the viewport are materialized, plus a fixed
//! overscan in the direction the user is scrolling. Row count never enters
//! the cost of a render; only the viewport height does.

#[cfg(test)]
#[path = "virtual_list_test.rs"]
mod virtual_list_test;

use std::ops::Range;

/// Extra rows rendered ahead of the viewport in the scroll direction.
pub const OVERSCAN_ROWS: usize = 3;

/// Direction of the most recent scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scrolling down (towards higher row indices).
    #[default]
    Forward,
    /// Scrolling up.
    Backward,
}

impl ScrollDirection {
    /// Direction implied by moving from `previous_top` to `next_top`.
    /// An unchanged offset keeps `current`.
    #[must_use]
    pub fn between(previous_top: f64, next_top: f64, current: Self) -> Self {
        if next_top > previous_top {
            Self::Forward
        } else if next_top < previous_top {
            Self::Backward
        } else {
            current
        }
    }
}

/// Scroll position and viewport size for one list render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
    pub direction: ScrollDirection,
}

/// Half-open range of row indices to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Full scrollable height of `row_count` rows.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_height(row_count: usize, row_height: f64) -> f64 {
    row_count as f64 * row_height
}

/// Clamp a raw scroll offset into the scrollable range.
#[must_use]
pub fn clamp_scroll_top(scroll_top: f64, row_count: usize, row_height: f64, viewport_height: f64) -> f64 {
    let max = (total_height(row_count, row_height) - viewport_height).max(0.0);
    if scroll_top.is_nan() { 0.0 } else { scroll_top.clamp(0.0, max) }
}

/// Inclusive `(first, last)` indices of rows intersecting the viewport, or
/// `None` when nothing is visible.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn visible_rows(row_count: usize, row_height: f64, viewport: &Viewport) -> Option<(usize, usize)> {
    if row_count == 0 || row_height <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let top = clamp_scroll_top(viewport.scroll_top, row_count, row_height, viewport.height);
    let bottom = top + viewport.height;
    let last_index = row_count - 1;

    let first = ((top / row_height).floor() as usize).min(last_index);
    // A row whose top edge sits exactly at the viewport bottom is not visible.
    let last = (((bottom / row_height).ceil() as usize).saturating_sub(1)).min(last_index);
    Some((first, last.max(first)))
}

/// Widen the visible rows by `overscan` in the scroll direction, clamped to
/// `[0, row_count)`.
#[must_use]
pub fn overscan(row_count: usize, visible: (usize, usize), direction: ScrollDirection, overscan: usize) -> RowWindow {
    if row_count == 0 {
        return RowWindow::default();
    }
    let (first, last) = visible;
    let (start, stop) = match direction {
        ScrollDirection::Forward => (first, last.saturating_add(overscan)),
        ScrollDirection::Backward => (first.saturating_sub(overscan), last),
    };
    RowWindow { start: start.min(row_count - 1), end: stop.min(row_count - 1) + 1 }
}

/// Rows to materialize for `viewport` using the standard overscan.
#[must_use]
pub fn render_window(row_count: usize, row_height: f64, viewport: &Viewport) -> RowWindow {
    visible_rows(row_count, row_height, viewport)
        .map(|visible| overscan(row_count, visible, viewport.direction, OVERSCAN_ROWS))
        .unwrap_or_default()
}
