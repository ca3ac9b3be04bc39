pub mod long_press;
pub mod tap;

pub use long_press::{LongPressEvent, LongPressGesture};
pub use tap::{TapGesture, TapRelease};
