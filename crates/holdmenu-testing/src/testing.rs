use holdmenu_core::{app_channel, AppTaskQueue, DefaultScheduler, Runtime, RuntimeHandle};
use holdmenu_foundation::{Point, PointerEvent};
use holdmenu_ui::{HoldItem, HoldMenuBackdrop, HoldMenuContext, HoldMenuProvider};
use std::sync::Arc;

/// One 60 Hz frame.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

const MAX_IDLE_FRAMES: usize = 10_000;

/// Headless harness for driving hold menus in tests.
///
/// `HoldMenuTestRule` owns the runtime and the application task queue. Time
/// only moves when the test advances it: each frame drains the runtime's
/// frame callbacks at the new frame time and then runs whatever was posted
/// to the application thread, so callbacks and haptics are observable right
/// after the frame that produced them.
pub struct HoldMenuTestRule {
    runtime: Runtime,
    app_tasks: AppTaskQueue,
    frame_time_nanos: u64,
    app_tasks_run: usize,
}

impl Default for HoldMenuTestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldMenuTestRule {
    pub fn new() -> Self {
        let (dispatcher, app_tasks) = app_channel();
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler), dispatcher),
            app_tasks,
            frame_time_nanos: 0,
            app_tasks_run: 0,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Builds `provider` against this rule's runtime.
    pub fn build(&self, provider: HoldMenuProvider) -> HoldMenuContext {
        provider.build(self.runtime.handle())
    }

    pub fn now_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn now_millis(&self) -> u64 {
        self.frame_time_nanos / 1_000_000
    }

    /// Produces one frame and drains the application queue.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
        self.run_app_tasks();
    }

    /// Produces frames until at least `millis` have passed.
    pub fn advance_time_by(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < target {
            self.advance_frame();
        }
    }

    /// Produces frames until no frame callback is pending and returns how
    /// many were needed.
    pub fn advance_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.needs_frame() {
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("advance_until_idle: still animating after {MAX_IDLE_FRAMES} frames");
            }
            self.advance_frame();
        }
        self.run_app_tasks();
        frames
    }

    /// Runs tasks posted to the application thread.
    pub fn run_app_tasks(&mut self) -> usize {
        let ran = self.app_tasks.run_pending();
        self.app_tasks_run += ran;
        ran
    }

    /// Total number of application tasks run so far.
    pub fn app_tasks_run(&self) -> usize {
        self.app_tasks_run
    }

    pub fn press(&self, item: &HoldItem, at: Point) {
        item.on_pointer_event(&PointerEvent::down(at, self.frame_time_nanos));
    }

    pub fn move_to(&self, item: &HoldItem, at: Point) {
        item.on_pointer_event(&PointerEvent::moved(at, self.frame_time_nanos));
    }

    pub fn release(&self, item: &HoldItem, at: Point) {
        item.on_pointer_event(&PointerEvent::up(at, self.frame_time_nanos));
    }

    pub fn cancel(&self, item: &HoldItem, at: Point) {
        item.on_pointer_event(&PointerEvent::cancel(at, self.frame_time_nanos));
    }

    /// Presses `item`, holds for `hold_millis` and lifts the finger.
    pub fn hold(&mut self, item: &HoldItem, at: Point, hold_millis: u64) {
        self.press(item, at);
        self.advance_time_by(hold_millis);
        self.release(item, at);
    }

    /// Holds `item` long enough to open it and lets every animation settle.
    pub fn open(&mut self, item: &HoldItem, at: Point) {
        let hold = item.config().long_press_min_duration_millis + 300;
        self.hold(item, at, hold);
        self.advance_until_idle();
    }

    /// Sends a down/up pair to the backdrop.
    pub fn tap_backdrop(&mut self, backdrop: &HoldMenuBackdrop, start: Point, end: Point) -> bool {
        backdrop.on_pointer_event(&PointerEvent::down(start, self.frame_time_nanos));
        self.advance_frame();
        backdrop.on_pointer_event(&PointerEvent::up(end, self.frame_time_nanos))
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
