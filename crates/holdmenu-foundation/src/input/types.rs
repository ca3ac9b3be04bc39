use holdmenu_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking for gesture disambiguation.
///
/// `uptime_nanos` is measured on the same clock as frame times so
/// recognisers can compare it against frame callback timestamps. A handler
/// that acts on an event consumes it so handlers underneath (the backdrop
/// under an overlay) skip it.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_nanos: u64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_nanos: u64) -> Self {
        Self {
            kind,
            position,
            uptime_nanos,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(position: Point, uptime_nanos: u64) -> Self {
        Self::new(PointerEventKind::Down, position, uptime_nanos)
    }

    pub fn moved(position: Point, uptime_nanos: u64) -> Self {
        Self::new(PointerEventKind::Move, position, uptime_nanos)
    }

    pub fn up(position: Point, uptime_nanos: u64) -> Self {
        Self::new(PointerEventKind::Up, position, uptime_nanos)
    }

    pub fn cancel(position: Point, uptime_nanos: u64) -> Self {
        Self::new(PointerEventKind::Cancel, position, uptime_nanos)
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    /// Check if this event has been consumed by another handler.
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}
