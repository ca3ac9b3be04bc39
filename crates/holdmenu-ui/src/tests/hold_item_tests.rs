use super::*;
use crate::context::HoldMenuProvider;
use crate::menu::{FixedMenuHeight, MenuItem};
use crate::layout_probe::MeasureError;
use holdmenu_core::{app_channel, AppTaskQueue, DefaultScheduler, Runtime};
use holdmenu_foundation::Point;
use std::sync::Arc;

const FRAME_NANOS: u64 = 16_000_000;

struct Harness {
    runtime: Runtime,
    _queue: AppTaskQueue,
    now: u64,
}

impl Harness {
    fn new() -> Self {
        let (dispatcher, queue) = app_channel();
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler), dispatcher),
            _queue: queue,
            now: 0,
        }
    }

    fn advance(&mut self, millis: u64) {
        let end = self.now + millis * 1_000_000;
        while self.now < end {
            self.now += FRAME_NANOS;
            self.runtime.handle().drain_frame_callbacks(self.now);
        }
    }

    fn context(&self) -> HoldMenuContext {
        HoldMenuProvider::new().build(self.runtime.handle())
    }
}

fn content() -> impl MeasurableContent {
    || -> Result<Rect, MeasureError> { Ok(Rect::new(0.0, 700.0, 300.0, 100.0)) }
}

fn menu() -> MenuSpec {
    MenuSpec::new()
        .with_item(MenuItem::new("Reply", || {}))
        .with_item(MenuItem::new("Delete", || {}).destructive())
}

fn press(item: &HoldItem, harness: &Harness) {
    item.on_pointer_event(&PointerEvent::down(Point::new(50.0, 750.0), harness.now));
}

#[test]
fn default_config_matches_platform_hold() {
    let config = HoldItemConfig::default();
    assert_eq!(config.long_press_min_duration_millis, 500);
    assert_eq!(config.haptic_style, HapticStyle::Heavy);
    assert!(config.menu_anchor_position.is_none());
    assert!(!config.disable_move);
    assert!(!config.close_on_tap);
}

#[test]
fn release_before_threshold_never_measures() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default());

    press(&item, &harness);
    harness.advance(200);
    item.on_pointer_event(&PointerEvent::up(Point::new(50.0, 750.0), harness.now));
    harness.advance(500);

    assert_eq!(item.state(), HoldItemState::Idle);
    assert_eq!(item.content_rect(), None);
    assert_eq!(context.phase(), InteractionPhase::Idle);
    assert_eq!(item.visual_state().scale, 1.0);
}

#[test]
fn hold_scales_down_then_activates() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default())
        .with_menu_height_estimator(FixedMenuHeight(220.0));

    press(&item, &harness);
    harness.advance(600);
    assert_eq!(item.state(), HoldItemState::ScalingDown);
    assert_eq!(item.content_rect(), Some(Rect::new(0.0, 700.0, 300.0, 100.0)));
    assert_eq!(item.origin(), Some(TransformOrigin::TopRight));
    assert_eq!(item.translation(), -192.0);
    assert!(item.visual_state().scale < 1.0);
    assert_eq!(context.phase(), InteractionPhase::Idle);

    harness.advance(400);
    assert_eq!(item.state(), HoldItemState::Active);
    assert_eq!(context.phase(), InteractionPhase::Active);
    assert_eq!(context.active_overlay(), Some(item.id()));
    let visual = item.visual_state();
    assert!(visual.pointer_events_enabled);
    assert_eq!(visual.opacity, 1.0);

    harness.advance(2000);
    let visual = item.visual_state();
    assert!((visual.translate_y + 192.0).abs() < 0.5);
    assert!((visual.scale - 1.0).abs() < 1e-4);
    let props = context.menu_props();
    assert_eq!(props.item_count, 2);
    assert_eq!(props.transform_value, -192.0);
    assert_eq!(props.owner, Some(item.id()));
}

#[test]
fn lifting_during_scale_down_still_activates() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default());

    press(&item, &harness);
    harness.advance(560);
    assert_eq!(item.state(), HoldItemState::ScalingDown);
    item.on_pointer_event(&PointerEvent::up(Point::new(50.0, 750.0), harness.now));
    harness.advance(400);
    assert_eq!(item.state(), HoldItemState::Active);
}

#[test]
fn moving_past_slop_cancels_the_hold() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default());

    press(&item, &harness);
    harness.advance(100);
    item.on_pointer_event(&PointerEvent::moved(Point::new(50.0, 800.0), harness.now));
    harness.advance(1000);
    assert_eq!(item.state(), HoldItemState::Idle);
    assert_eq!(context.phase(), InteractionPhase::Idle);
}

#[test]
fn cancel_during_scale_down_scales_back_without_opening() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default());

    press(&item, &harness);
    harness.advance(560);
    assert_eq!(item.state(), HoldItemState::ScalingDown);
    item.on_pointer_event(&PointerEvent::cancel(Point::new(50.0, 750.0), harness.now));
    assert_eq!(item.state(), HoldItemState::Idle);
    assert_eq!(item.content_rect(), None);

    harness.advance(1000);
    assert_eq!(context.phase(), InteractionPhase::Idle);
    assert_eq!(context.active_overlay(), None);
    assert_eq!(item.visual_state().scale, 1.0);
    assert!(!item.is_active());
}

#[test]
fn disable_move_keeps_overlay_in_place() {
    let mut harness = Harness::new();
    let context = harness.context();
    let config = HoldItemConfig::default().with_disable_move(true);
    let item = HoldItem::new(&context, content(), menu(), config)
        .with_menu_height_estimator(FixedMenuHeight(220.0));

    press(&item, &harness);
    harness.advance(1000);
    assert_eq!(item.state(), HoldItemState::Active);
    assert_eq!(item.translation(), 0.0);
    harness.advance(500);
    assert_eq!(item.visual_state().translate_y, 0.0);
}

#[test]
fn overlay_layout_tracks_translation() {
    let mut harness = Harness::new();
    let context = harness.context();
    let item = HoldItem::new(&context, content(), menu(), HoldItemConfig::default())
        .with_menu_height_estimator(FixedMenuHeight(220.0));
    assert!(item.overlay_layout().is_none());

    press(&item, &harness);
    harness.advance(3000);
    let layout = item.overlay_layout().expect("open overlay has a layout");
    assert!((layout.content.y - 508.0).abs() < 0.5);
    assert!((layout.menu.y - (508.0 + 100.0 + SPACING)).abs() < 0.5);
    assert_eq!(layout.menu.width, 390.0 * 0.6);
}
