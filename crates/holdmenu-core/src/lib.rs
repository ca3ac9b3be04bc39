//! Core runtime for holdmenu.
//!
//! The runtime is UI-thread affine: shared values, frame callbacks and
//! observers all live on the thread that created the [`Runtime`]. Work that
//! has to reach the host application (open/close callbacks, haptics) goes
//! through the [`AppDispatcher`] instead of running inline.

mod dispatch;
mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use dispatch::{app_channel, AppDispatcher, AppTaskQueue};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use state::{MutableState, MutationPolicy, State, StructuralEqualityPolicy, Subscription};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::{FrameClock, MutableState, Runtime, RuntimeHandle, State, Subscription};
}
