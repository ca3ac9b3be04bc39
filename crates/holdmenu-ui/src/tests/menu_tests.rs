use super::*;

fn rows(count: usize) -> MenuSpec {
    (0..count)
        .map(|index| MenuItem::new(format!("Row {index}"), || {}))
        .collect()
}

#[test]
fn empty_menu_has_no_height() {
    assert_eq!(DefaultMenuHeightEstimator::default().estimate(&MenuSpec::new()), 0.0);
}

#[test]
fn rows_hairlines_and_separators_add_up() {
    let estimator = DefaultMenuHeightEstimator::default();
    assert_eq!(estimator.estimate(&rows(3)), 122.0);

    let menu = MenuSpec::new()
        .with_item(MenuItem::title("Message"))
        .with_item(MenuItem::new("Copy", || {}).with_separator())
        .with_item(MenuItem::new("Delete", || {}).destructive());
    assert_eq!(menu.separator_count(), 1);
    assert_eq!(estimator.estimate(&menu), 128.0);
}

#[test]
fn font_scale_grows_rows_only() {
    let estimator = DefaultMenuHeightEstimator::default().with_font_scale(1.5);
    assert_eq!(estimator.estimate(&rows(2)), 121.0);
}

#[test]
fn titles_are_not_selectable() {
    let menu = MenuSpec::new()
        .with_item(MenuItem::title("Message"))
        .with_item(MenuItem::new("Reply", || {}));
    assert!(!menu.get(0).is_some_and(MenuItem::is_selectable));
    assert!(menu.get(1).is_some_and(MenuItem::is_selectable));
    assert_eq!(FixedMenuHeight(88.0).estimate(&menu), 88.0);
}
