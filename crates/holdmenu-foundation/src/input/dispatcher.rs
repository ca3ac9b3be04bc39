//! Pointer input queue.
//!
//! Platform integrations push events as they arrive and drain them on the
//! UI thread at the start of a frame, in arrival order.

use super::types::PointerEvent;

#[derive(Default)]
pub struct PointerDispatcher {
    queue: Vec<PointerEvent>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self, mut handler: impl FnMut(PointerEvent)) {
        for event in self.queue.drain(..) {
            handler(event);
        }
    }
}

#[cfg(test)]
#[path = "../tests/dispatcher_tests.rs"]
mod tests;
