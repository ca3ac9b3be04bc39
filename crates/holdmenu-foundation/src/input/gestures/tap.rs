//! Tap recogniser: remembers where a press started and reports both ends
//! of the sequence on release.

use crate::input::types::{PointerEvent, PointerEventKind};
use holdmenu_ui_graphics::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRelease {
    pub start: Point,
    pub end: Point,
}

impl TapRelease {
    pub fn distance(&self) -> f32 {
        self.start.distance_to(self.end)
    }

    /// True when press and release are strictly closer than `slop`.
    pub fn is_within(&self, slop: f32) -> bool {
        self.distance() < slop
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct TapGesture {
    start: Option<Point>,
}

impl TapGesture {
    pub fn new() -> Self {
        Self { start: None }
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<TapRelease> {
        match event.kind {
            PointerEventKind::Down => {
                self.start = Some(event.position);
                None
            }
            PointerEventKind::Up => self.start.take().map(|start| TapRelease {
                start,
                end: event.position,
            }),
            PointerEventKind::Cancel => {
                self.start = None;
                None
            }
            PointerEventKind::Move => None,
        }
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
#[path = "../../tests/tap_tests.rs"]
mod tests;
