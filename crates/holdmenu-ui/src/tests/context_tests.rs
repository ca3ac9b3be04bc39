use super::*;
use holdmenu_core::{app_channel, AppTaskQueue, DefaultScheduler, Runtime};
use std::sync::atomic::{AtomicUsize, Ordering};

fn runtime() -> (Runtime, AppTaskQueue) {
    let (dispatcher, queue) = app_channel();
    (Runtime::new(Arc::new(DefaultScheduler), dispatcher), queue)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    (count, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn open_and_close_fire_once_per_change() {
    let (runtime, queue) = runtime();
    let (opened, on_open) = counter();
    let (closed, on_close) = counter();
    let context = HoldMenuProvider::new()
        .on_open(on_open)
        .on_close(on_close)
        .build(runtime.handle());

    assert!(context.set_phase(InteractionPhase::Active));
    assert!(!context.set_phase(InteractionPhase::Active));
    assert_eq!(opened.load(Ordering::SeqCst), 0, "callbacks wait for the app thread");
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(opened.load(Ordering::SeqCst), 1);

    assert!(context.close());
    assert!(!context.close());
    queue.run_pending();
    assert_eq!(closed.load(Ordering::SeqCst), 1);
    assert_eq!(opened.load(Ordering::SeqCst), 1);
}

#[test]
fn idle_phase_fires_nothing() {
    let (runtime, queue) = runtime();
    let (opened, on_open) = counter();
    let context = HoldMenuProvider::new().on_open(on_open).build(runtime.handle());

    assert!(!context.set_phase(InteractionPhase::Idle));
    context.set_phase(InteractionPhase::Ended);
    context.set_phase(InteractionPhase::Idle);
    queue.run_pending();
    assert_eq!(opened.load(Ordering::SeqCst), 0);
}

#[test]
fn detached_callbacks_stop_firing() {
    let (runtime, queue) = runtime();
    let (opened, on_open) = counter();
    let context = HoldMenuProvider::new().on_open(on_open).build(runtime.handle());
    context.detach_callbacks();
    context.set_phase(InteractionPhase::Active);
    assert_eq!(queue.run_pending(), 0);
    assert_eq!(opened.load(Ordering::SeqCst), 0);
}

#[test]
fn slot_is_released_only_by_its_owner() {
    let (runtime, _queue) = runtime();
    let context = HoldMenuProvider::new().build(runtime.handle());
    let first = context.allocate_overlay_id();
    let second = context.allocate_overlay_id();
    assert_ne!(first, second);

    context.claim(first);
    context.set_menu_props(MenuProps {
        owner: Some(first),
        item_count: 3,
        ..MenuProps::default()
    });
    context.claim(second);
    context.release(first);
    assert_eq!(context.active_overlay(), Some(second));
    assert_eq!(context.menu_props().item_count, 3);

    context.release(second);
    assert_eq!(context.active_overlay(), None);
    assert_eq!(context.menu_props(), MenuProps::default());
}

#[test]
fn provider_settings_are_exposed() {
    let (runtime, _queue) = runtime();
    let insets = EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0);
    let context = HoldMenuProvider::new()
        .with_theme(Theme::Dark)
        .with_safe_area_insets(insets)
        .with_blur_supported(false)
        .with_concurrent_activation(ConcurrentActivationPolicy::Replace)
        .build(runtime.handle());

    assert_eq!(context.theme(), Theme::Dark);
    assert_eq!(context.safe_area_insets(), insets);
    assert!(!context.blur_supported());
    assert_eq!(
        context.concurrent_activation(),
        ConcurrentActivationPolicy::Replace
    );
    context.set_theme(Theme::Light);
    assert_eq!(context.theme_state().get(), Theme::Light);
}
