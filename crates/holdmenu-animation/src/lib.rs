//! Animation system for holdmenu
//!
//! Provides time-based animations with easing curves and spring physics,
//! evaluated per frame off the runtime's frame clock.

mod animation;
mod easing;

pub use animation::*;
pub use easing::Easing;
