pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use dispatcher::PointerDispatcher;
pub use types::{PointerEvent, PointerEventKind};

pub mod prelude {
    pub use super::types::{PointerEvent, PointerEventKind};
}
