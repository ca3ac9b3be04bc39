use holdmenu_ui::{HapticFeedback, HapticStyle, MeasurableContent, MeasureError};
use holdmenu_ui_graphics::{Point, Rect};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Content whose bounds the test controls. Clones share bounds and the
/// measurement counter.
#[derive(Clone, Debug)]
pub struct FakeContent {
    bounds: Rc<Cell<Result<Rect, MeasureError>>>,
    measurements: Rc<Cell<usize>>,
}

impl FakeContent {
    pub fn new(rect: Rect) -> Self {
        Self {
            bounds: Rc::new(Cell::new(Ok(rect))),
            measurements: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing(error: MeasureError) -> Self {
        Self {
            bounds: Rc::new(Cell::new(Err(error))),
            measurements: Rc::new(Cell::new(0)),
        }
    }

    /// Moves the content, e.g. after a scroll.
    pub fn set_rect(&self, rect: Rect) {
        self.bounds.set(Ok(rect));
    }

    pub fn set_error(&self, error: MeasureError) {
        self.bounds.set(Err(error));
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.get()
    }

    pub fn center(&self) -> Point {
        let rect = self.bounds.get().unwrap_or(Rect::ZERO);
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }
}

impl MeasurableContent for FakeContent {
    fn measure_in_window(&self) -> Result<Rect, MeasureError> {
        self.measurements.set(self.measurements.get() + 1);
        self.bounds.get()
    }
}

/// Haptics sink that records every impact.
#[derive(Clone, Debug, Default)]
pub struct RecordingHaptics {
    impacts: Arc<Mutex<Vec<HapticStyle>>>,
}

impl RecordingHaptics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn impacts(&self) -> Vec<HapticStyle> {
        match self.impacts.lock() {
            Ok(impacts) => impacts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl HapticFeedback for RecordingHaptics {
    fn impact(&self, style: HapticStyle) {
        log::trace!("haptic impact {style:?}");
        match self.impacts.lock() {
            Ok(mut impacts) => impacts.push(style),
            Err(poisoned) => poisoned.into_inner().push(style),
        }
    }
}

/// Counts invocations of the callbacks it hands out.
#[derive(Clone, Debug, Default)]
pub struct CallbackCounter {
    count: Arc<AtomicUsize>,
}

impl CallbackCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> impl Fn() + Send + Sync + 'static {
        let count = self.count.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
