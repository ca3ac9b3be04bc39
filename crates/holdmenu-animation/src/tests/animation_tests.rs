use super::*;

use holdmenu_core::{app_channel, AppTaskQueue, DefaultScheduler, Runtime};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

const FRAME_NANOS: u64 = 16_666_667;

fn runtime() -> (Runtime, AppTaskQueue) {
    let (dispatcher, queue) = app_channel();
    (Runtime::new(Arc::new(DefaultScheduler), dispatcher), queue)
}

/// Drains frames until nothing is scheduled; returns the last frame time.
fn pump(runtime: &Runtime, mut frame_time: u64, max_frames: usize) -> u64 {
    let handle = runtime.handle();
    for _ in 0..max_frames {
        if !handle.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
    }
    frame_time
}

#[test]
fn tween_interpolates_over_time_and_reports_finish() {
    let (runtime, _queue) = runtime();
    let animatable = Animatable::new(1.0f32, runtime.handle());
    let samples = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let samples = samples.clone();
        animatable
            .state()
            .subscribe(move |value| samples.borrow_mut().push(*value))
    };
    let ended = Rc::new(Cell::new(None));

    {
        let ended = ended.clone();
        animatable.animate_to_then(
            0.95,
            AnimationType::Tween(AnimationSpec::linear(210)),
            move |end| ended.set(Some(end)),
        );
    }
    assert!(animatable.is_running());
    pump(&runtime, 0, 64);

    let samples = samples.borrow();
    assert!(samples.iter().any(|v| *v < 1.0 && *v > 0.95));
    assert_eq!(*samples.last().expect("samples recorded"), 0.95);
    assert_eq!(ended.get(), Some(AnimationEnd::Finished));
    assert!(!animatable.is_running());
}

#[test]
fn delayed_zero_duration_tween_drops_after_delay() {
    let (runtime, _queue) = runtime();
    let handle = runtime.handle();
    let opacity = Animatable::new(1.0f32, handle.clone());
    opacity.animate_to(0.0, AnimationType::Tween(AnimationSpec::linear(0).with_delay(150)));

    // First frame anchors the start time.
    handle.drain_frame_callbacks(FRAME_NANOS);
    handle.drain_frame_callbacks(FRAME_NANOS + 100_000_000);
    assert_eq!(opacity.value(), 1.0);

    handle.drain_frame_callbacks(FRAME_NANOS + 151_000_000);
    assert_eq!(opacity.value(), 0.0);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn new_animation_interrupts_running_one() {
    let (runtime, _queue) = runtime();
    let handle = runtime.handle();
    let scale = Animatable::new(1.0f32, handle.clone());
    let first_end = Rc::new(Cell::new(None));

    {
        let first_end = first_end.clone();
        scale.animate_to_then(
            0.95,
            AnimationType::Tween(AnimationSpec::linear(210)),
            move |end| first_end.set(Some(end)),
        );
    }
    handle.drain_frame_callbacks(FRAME_NANOS);
    handle.drain_frame_callbacks(2 * FRAME_NANOS);
    let midway = scale.value();
    assert!(midway < 1.0);

    scale.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(100)));
    assert_eq!(first_end.get(), Some(AnimationEnd::Interrupted));

    pump(&runtime, 2 * FRAME_NANOS, 64);
    assert_eq!(scale.value(), 1.0);
    assert_eq!(first_end.get(), Some(AnimationEnd::Interrupted));
}

#[test]
fn snap_to_interrupts_and_publishes_value() {
    let (runtime, _queue) = runtime();
    let value = Animatable::new(0.0f32, runtime.handle());
    let ended = Rc::new(Cell::new(None));
    {
        let ended = ended.clone();
        value.animate_to_then(
            100.0,
            AnimationType::Tween(AnimationSpec::default()),
            move |end| ended.set(Some(end)),
        );
    }

    value.snap_to(5.0);

    assert_eq!(ended.get(), Some(AnimationEnd::Interrupted));
    assert_eq!(value.value(), 5.0);
    assert_eq!(value.state().get(), 5.0);
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn underdamped_spring_overshoots_then_settles() {
    let (runtime, _queue) = runtime();
    let translate = Animatable::new(0.0f32, runtime.handle());
    let minimum = Rc::new(Cell::new(0.0f32));
    let _subscription = {
        let minimum = minimum.clone();
        translate
            .state()
            .subscribe(move |value| minimum.set(minimum.get().min(*value)))
    };
    let spec = SpringSpec::from_physics(33.0, 1.03, 500.0).with_thresholds(0.001, 0.001);

    translate.animate_to(-192.0, AnimationType::Spring(spec));
    pump(&runtime, 0, 600);

    assert!(minimum.get() < -192.0, "spring should overshoot the target");
    assert_eq!(translate.value(), -192.0);
    assert!(!translate.is_running());
}

#[test]
fn spring_retarget_keeps_velocity() {
    let (runtime, _queue) = runtime();
    let handle = runtime.handle();
    let translate = Animatable::new(0.0f32, handle.clone());
    let spec = SpringSpec::from_physics(33.0, 1.03, 500.0);

    translate.animate_to(-100.0, AnimationType::Spring(spec));
    handle.drain_frame_callbacks(FRAME_NANOS);
    handle.drain_frame_callbacks(2 * FRAME_NANOS);
    handle.drain_frame_callbacks(3 * FRAME_NANOS);
    let velocity = translate.velocity();
    assert!(velocity < 0.0);

    translate.animate_to(-50.0, AnimationType::Spring(spec));
    assert_eq!(translate.velocity(), velocity);
}

#[test]
fn physics_spring_conversion() {
    let spec = SpringSpec::from_physics(33.0, 1.03, 500.0);
    assert!((spec.damping_ratio - 33.0 / (2.0 * (515.0f32).sqrt())).abs() < 1e-4);
    assert!((spec.stiffness - 500.0 / 1.03).abs() < 1e-2);
    assert!(spec.damping_ratio < 1.0);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn ease_in_out_is_symmetric_and_monotonic() {
    let easing = Easing::EaseInOut;
    assert_eq!(easing.transform(0.0), 0.0);
    assert_eq!(easing.transform(1.0), 1.0);
    assert!((easing.transform(0.5) - 0.5).abs() < 1e-3);
    assert!(easing.transform(0.2) < 0.2, "starts slower than linear");

    let mut previous = 0.0;
    for step in 1..=20 {
        let fraction = step as f32 / 20.0;
        let value = easing.transform(fraction);
        assert!(value >= previous, "not monotonic at {fraction}");
        assert!((value + easing.transform(1.0 - fraction) - 1.0).abs() < 1e-3);
        previous = value;
    }
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::EaseInOut);
    assert_eq!(spec.delay_millis, 0);
}
