//! Long press recogniser.
//!
//! Pure state machine: pointer events move it between idle, pending and
//! active, and [`LongPressGesture::on_tick`] recognises the hold once the
//! pointer has stayed down, within the slop, for the minimum duration. The
//! caller decides how ticks are produced (usually one per frame while
//! [`LongPressGesture::is_pending`] is true).

use crate::gesture_constants::{LONG_PRESS_SLOP, LONG_PRESS_TIMEOUT_MILLIS};
use crate::input::types::{PointerEvent, PointerEventKind};
use holdmenu_ui_graphics::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LongPressEvent {
    /// The hold was recognised at `position`.
    Started { position: Point },
    /// The pointer sequence is over. `success` is true only when the hold
    /// had been recognised and the pointer was lifted normally.
    Finalized { success: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LongPressState {
    Idle,
    Pending { down_at_nanos: u64, origin: Point },
    Active,
}

#[derive(Debug, Clone)]
pub struct LongPressGesture {
    min_duration_nanos: u64,
    slop: f32,
    state: LongPressState,
}

impl Default for LongPressGesture {
    fn default() -> Self {
        Self::new(LONG_PRESS_TIMEOUT_MILLIS)
    }
}

impl LongPressGesture {
    pub fn new(min_duration_millis: u64) -> Self {
        Self {
            min_duration_nanos: min_duration_millis * 1_000_000,
            slop: LONG_PRESS_SLOP,
            state: LongPressState::Idle,
        }
    }

    pub fn with_slop(mut self, slop: f32) -> Self {
        self.slop = slop;
        self
    }

    pub fn min_duration_millis(&self) -> u64 {
        self.min_duration_nanos / 1_000_000
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LongPressState::Pending { .. })
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LongPressState::Active)
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<LongPressEvent> {
        match (event.kind, self.state) {
            (PointerEventKind::Down, LongPressState::Idle)
            | (PointerEventKind::Down, LongPressState::Active) => {
                // A press while still active means the previous release was
                // delivered elsewhere; start over from this press.
                self.state = LongPressState::Pending {
                    down_at_nanos: event.uptime_nanos,
                    origin: event.position,
                };
                None
            }
            (PointerEventKind::Move, LongPressState::Pending { origin, .. }) => {
                if origin.distance_to(event.position) > self.slop {
                    log::trace!("long press failed: pointer left slop");
                    self.state = LongPressState::Idle;
                    Some(LongPressEvent::Finalized { success: false })
                } else {
                    None
                }
            }
            (PointerEventKind::Up, LongPressState::Pending { .. })
            | (PointerEventKind::Cancel, LongPressState::Pending { .. })
            | (PointerEventKind::Cancel, LongPressState::Active) => {
                self.state = LongPressState::Idle;
                Some(LongPressEvent::Finalized { success: false })
            }
            (PointerEventKind::Up, LongPressState::Active) => {
                self.state = LongPressState::Idle;
                Some(LongPressEvent::Finalized { success: true })
            }
            _ => None,
        }
    }

    /// Recognises the hold once `now_nanos` is at least the minimum duration
    /// past the press.
    pub fn on_tick(&mut self, now_nanos: u64) -> Option<LongPressEvent> {
        match self.state {
            LongPressState::Pending {
                down_at_nanos,
                origin,
            } if now_nanos.saturating_sub(down_at_nanos) >= self.min_duration_nanos => {
                self.state = LongPressState::Active;
                Some(LongPressEvent::Started { position: origin })
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = LongPressState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/long_press_tests.rs"]
mod tests;
