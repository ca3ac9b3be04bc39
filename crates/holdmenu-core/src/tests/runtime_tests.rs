use super::*;
use crate::dispatch::app_channel;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn test_runtime() -> (Runtime, crate::AppTaskQueue) {
    let (dispatcher, queue) = app_channel();
    (Runtime::new(Arc::new(DefaultScheduler), dispatcher), queue)
}

#[test]
fn frame_callbacks_run_once_with_frame_time() {
    let (runtime, _queue) = test_runtime();
    let handle = runtime.handle();
    let seen = Rc::new(Cell::new(0u64));

    let registration = {
        let seen = seen.clone();
        runtime
            .frame_clock()
            .with_frame_nanos(move |time| seen.set(time))
    };
    assert!(registration.is_active());
    assert!(runtime.needs_frame());

    handle.drain_frame_callbacks(16_000_000);
    handle.drain_frame_callbacks(32_000_000);

    assert_eq!(seen.get(), 16_000_000);
    assert_eq!(handle.last_frame_nanos(), 32_000_000);
    assert!(!runtime.needs_frame());
}

#[test]
fn dropped_registration_never_fires() {
    let (runtime, _queue) = test_runtime();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = fired.clone();
        runtime.frame_clock().with_frame_nanos(move |_| fired.set(true))
    };
    drop(registration);
    runtime.handle().drain_frame_callbacks(1_000_000);

    assert!(!fired.get());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let (runtime, _queue) = test_runtime();
    let handle = runtime.handle();
    let count = Rc::new(Cell::new(0));
    let nested = Rc::new(RefCell::new(None));

    {
        let count = count.clone();
        let nested = nested.clone();
        let clock = runtime.frame_clock();
        handle.register_frame_callback(move |_| {
            count.set(count.get() + 1);
            let count = count.clone();
            *nested.borrow_mut() = Some(clock.with_frame_nanos(move |_| {
                count.set(count.get() + 1);
            }));
        });
    }

    handle.drain_frame_callbacks(1);
    assert_eq!(count.get(), 1);
    assert!(handle.has_frame_callbacks());
    handle.drain_frame_callbacks(2);
    assert_eq!(count.get(), 2);
}

#[test]
fn app_tasks_wait_for_the_application_thread() {
    let (runtime, queue) = test_runtime();
    let hits = Arc::new(AtomicUsize::new(0));

    {
        let hits = hits.clone();
        runtime
            .handle()
            .post_app(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
    }

    assert!(queue.has_pending());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(!queue.has_pending());
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let (runtime, _queue) = test_runtime();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert!(!handle.has_frame_callbacks());
}
