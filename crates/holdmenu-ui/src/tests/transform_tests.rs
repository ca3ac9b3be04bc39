use super::*;

fn input(content: Rect, overlay_height: f32, origin: TransformOrigin) -> TransformInput {
    TransformInput::new(
        content,
        overlay_height,
        origin,
        &ScreenMetrics::new(390.0, 844.0),
        EdgeInsets::ZERO,
    )
}

#[test]
fn top_anchor_moves_overflowing_content_up() {
    let content = Rect::new(0.0, 700.0, 300.0, 100.0);
    let offset = solve_translation(&input(content, 220.0, TransformOrigin::TopRight));
    assert_eq!(offset, -192.0);
}

#[test]
fn top_anchor_leaves_fitting_content_in_place() {
    let content = Rect::new(0.0, 100.0, 300.0, 100.0);
    assert_eq!(
        solve_translation(&input(content, 220.0, TransformOrigin::TopLeft)),
        0.0
    );
}

#[test]
fn bottom_anchor_with_room_above_stays_put() {
    let content = Rect::new(0.0, 700.0, 300.0, 100.0);
    assert_eq!(
        solve_translation(&input(content, 220.0, TransformOrigin::BottomRight)),
        0.0
    );
}

#[test]
fn bottom_anchor_near_top_moves_down_with_double_margin() {
    let content = Rect::new(0.0, 60.0, 300.0, 80.0);
    let mut solved = input(content, 220.0, TransformOrigin::BottomLeft);
    solved.safe_area_insets = EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0);
    // 60 - 220 - 47 = -207
    assert_eq!(solve_translation(&solved), 207.0 + 32.0);
}

#[test]
fn bottom_inset_counts_against_top_anchor() {
    let content = Rect::new(0.0, 500.0, 300.0, 100.0);
    let mut solved = input(content, 200.0, TransformOrigin::TopRight);
    assert_eq!(solve_translation(&solved), 0.0);
    solved.safe_area_insets = EdgeInsets::from_components(0.0, 0.0, 0.0, 34.0);
    // 500 + 100 + 200 + 16 + 34 = 850
    assert_eq!(solve_translation(&solved), -6.0);
}

#[test]
fn top_anchor_offset_keeps_menu_bottom_above_inset() {
    let insets = EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0);
    let screen = ScreenMetrics::new(390.0, 844.0);
    for y in [0.0, 200.0, 450.0, 600.0, 760.0] {
        let content = Rect::new(10.0, y, 200.0, 80.0);
        let offset = solve_translation(&TransformInput::new(
            content,
            180.0,
            TransformOrigin::TopRight,
            &screen,
            insets,
        ));
        assert!(offset <= 0.0);
        let menu_bottom = content.bottom() + offset + SPACING + 180.0;
        assert!(menu_bottom <= screen.vertical_extent() - insets.bottom + 0.001);
    }
}

#[test]
fn landscape_uses_width_as_vertical_extent() {
    let screen = ScreenMetrics::new(390.0, 844.0).with_orientation(Orientation::Landscape);
    assert_eq!(screen.vertical_extent(), 390.0);
    assert_eq!(screen.horizontal_extent(), 844.0);
    let content = Rect::new(0.0, 200.0, 100.0, 60.0);
    let offset = solve_translation(&TransformInput::new(
        content,
        150.0,
        TransformOrigin::TopRight,
        &screen,
        EdgeInsets::ZERO,
    ));
    // 200 + 60 + 150 + 16 = 426
    assert_eq!(offset, -36.0);
}

#[test]
fn non_finite_input_degrades_to_zero() {
    let content = Rect::new(0.0, f32::NAN, 100.0, 100.0);
    assert_eq!(
        solve_translation(&input(content, 220.0, TransformOrigin::TopRight)),
        0.0
    );
}

#[test]
fn origin_follows_horizontal_position() {
    let left = Rect::new(20.0, 0.0, 100.0, 40.0);
    let right = Rect::new(250.0, 0.0, 100.0, 40.0);
    assert_eq!(TransformOrigin::derive(&left, 390.0), TransformOrigin::TopRight);
    assert_eq!(TransformOrigin::derive(&right, 390.0), TransformOrigin::TopLeft);
    assert!(TransformOrigin::derive(&right, 390.0).is_top());
}

#[test]
fn menu_bounds_follow_anchor_corner() {
    let content = Rect::new(40.0, 300.0, 200.0, 100.0);

    let below_right = menu_bounds(&content, TransformOrigin::TopRight, 234.0, 120.0, 16.0);
    assert_eq!(below_right, Rect::new(40.0, 416.0, 234.0, 120.0));

    let above_left = menu_bounds(&content, TransformOrigin::BottomLeft, 234.0, 120.0, 16.0);
    assert_eq!(above_left, Rect::new(6.0, 164.0, 234.0, 120.0));

    let above_right = menu_bounds(&content, TransformOrigin::BottomRight, 100.0, 50.0, 16.0);
    assert_eq!(above_right, Rect::new(40.0, 234.0, 100.0, 50.0));
}
