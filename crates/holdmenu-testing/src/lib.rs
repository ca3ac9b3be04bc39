//! Test support for holdmenu: a headless frame driver plus fakes for the
//! collaborators the core calls out to.

mod fakes;
mod testing;

pub use fakes::{CallbackCounter, FakeContent, RecordingHaptics};
pub use testing::{HoldMenuTestRule, FRAME_INTERVAL_NANOS};
