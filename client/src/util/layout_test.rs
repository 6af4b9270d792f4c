use super::*;

// =============================================================
// row_layout
// =============================================================

#[test]
fn first_row_sits_at_top() {
    let row = row_layout(0, 320.0);
    assert!((row.top).abs() < f64::EPSILON);
    assert!((row.width - 300.0).abs() < f64::EPSILON);
    assert!((row.height - ROW_HEIGHT).abs() < f64::EPSILON);
}

#[test]
fn rows_stack_at_fixed_height() {
    let row = row_layout(9_999, 320.0);
    assert!((row.top - 799_920.0).abs() < f64::EPSILON);
}

#[test]
fn narrow_container_never_yields_negative_width() {
    assert!((row_layout(0, 10.0).width).abs() < f64::EPSILON);
}

#[test]
fn thumbnail_is_vertically_centered() {
    assert!((row_layout(3, 320.0).thumb_margin - 10.0).abs() < f64::EPSILON);
}

#[test]
fn row_style_contains_geometry() {
    assert_eq!(row_layout(2, 220.0).style(), "top: 160px; width: 200px; height: 80px;");
}

#[test]
fn thumb_style_contains_margin_and_box() {
    assert_eq!(row_layout(0, 220.0).thumb_style(), "margin: 10px 4px; height: 60px; max-width: 60px;");
}

#[test]
fn selected_title_is_heavier() {
    assert_eq!(title_weight(true), 800);
    assert_eq!(title_weight(false), 400);
}

// =============================================================
// frame_size / split_panes
// =============================================================

#[test]
fn frame_subtracts_border_allowance() {
    assert_eq!(frame_size(900.0, 700.0), (884.0, 700.0));
}

#[test]
fn frame_size_clamps_at_zero() {
    assert_eq!(frame_size(8.0, -1.0), (0.0, 0.0));
}

#[test]
fn panes_split_three_to_nine() {
    assert_eq!(split_panes(1200.0), (300.0, 900.0));
}
