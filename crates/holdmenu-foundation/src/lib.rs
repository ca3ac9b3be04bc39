//! Pointer input and gesture recognition for holdmenu.
//!
//! Platform integrations translate their raw touch/mouse events into
//! [`PointerEvent`]s; the recognisers here turn those streams into long
//! presses and taps without knowing anything about the menu itself.

pub mod gesture_constants;
pub mod input;

pub use gesture_constants::*;
pub use input::gestures::{LongPressEvent, LongPressGesture, TapGesture, TapRelease};
pub use input::{PointerDispatcher, PointerEvent, PointerEventKind};
pub use holdmenu_ui_graphics::Point;

pub mod prelude {
    pub use crate::input::prelude::*;
    pub use crate::input::gestures::{LongPressEvent, LongPressGesture, TapGesture, TapRelease};
}
