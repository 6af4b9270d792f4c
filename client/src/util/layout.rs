//! Fixed geometry for list rows, the content frame, and the two panes.
//!
//! DESIGN
//! ======
//! Geometry is a pure function of row index and container size. The only
//! per-row state a component keeps is whether the row is selected.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

/// Height of every article row, in pixels.
pub const ROW_HEIGHT: f64 = 80.0;
/// Horizontal space reserved beside rows for the scrollbar.
pub const ROW_GUTTER: f64 = 20.0;
/// Thumbnail box edge length.
pub const THUMB_SIZE: f64 = 60.0;
/// Border allowance subtracted from the content pane before sizing the frame.
pub const FRAME_BORDER_ALLOWANCE: f64 = 16.0;
/// Grid columns taken by the list pane out of twelve.
pub const LIST_PANE_COLUMNS: u8 = 3;

pub const TITLE_WEIGHT_SELECTED: u16 = 800;
pub const TITLE_WEIGHT_NORMAL: u16 = 400;

/// Absolute placement of one list row inside the scroll container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowGeometry {
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical margin that centers the thumbnail inside the row.
    pub thumb_margin: f64,
}

impl RowGeometry {
    /// Inline style placing the row.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "top: {}px; width: {}px; height: {}px;",
            self.top, self.width, self.height
        )
    }

    /// Inline style for the row's thumbnail.
    #[must_use]
    pub fn thumb_style(&self) -> String {
        format!(
            "margin: {}px 4px; height: {THUMB_SIZE}px; max-width: {THUMB_SIZE}px;",
            self.thumb_margin
        )
    }
}

/// Geometry of row `index` inside a list of width `container_width`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row_layout(index: usize, container_width: f64) -> RowGeometry {
    RowGeometry {
        top: index as f64 * ROW_HEIGHT,
        width: (container_width - ROW_GUTTER).max(0.0),
        height: ROW_HEIGHT,
        thumb_margin: (ROW_HEIGHT - THUMB_SIZE) / 2.0,
    }
}

/// Font weight for a row title.
#[must_use]
pub fn title_weight(selected: bool) -> u16 {
    if selected { TITLE_WEIGHT_SELECTED } else { TITLE_WEIGHT_NORMAL }
}

/// Size of the embedded content frame for a pane of `width` x `height`.
#[must_use]
pub fn frame_size(width: f64, height: f64) -> (f64, f64) {
    ((width - FRAME_BORDER_ALLOWANCE).max(0.0), height.max(0.0))
}

/// Split a measured row width into `(list, content)` pane widths.
///
/// Used before the panes have been measured in the browser (SSR and first
/// paint), so the first render already has sensible sizes.
#[must_use]
pub fn split_panes(total_width: f64) -> (f64, f64) {
    let total = total_width.max(0.0);
    let list = total * f64::from(LIST_PANE_COLUMNS) / 12.0;
    (list, total - list)
}
