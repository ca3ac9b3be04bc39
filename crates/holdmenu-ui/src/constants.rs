//! Timings, sizes and colors of the hold-to-reveal interaction.

use holdmenu_animation::SpringSpec;
use holdmenu_ui_graphics::Color;

/// Duration of the overlay transform (scale back, translate out, blur).
pub const HOLD_ITEM_TRANSFORM_DURATION: u64 = 150;

/// Scale the content shrinks to while confirming a hold.
pub const HOLD_ITEM_SCALE_DOWN_VALUE: f32 = 0.95;

/// Duration of the confirmation scale-down and of the backdrop fade.
pub const HOLD_ITEM_SCALE_DOWN_DURATION: u64 = 210;

/// Gap between content and menu, and the unit of the bottom-anchor margin.
pub const SPACING: f32 = 16.0;

/// Blur intensity of the backdrop while a menu is open.
pub const BACKDROP_BLUR_INTENSITY: f32 = 100.0;

/// Menu width as a fraction of the horizontal screen extent.
pub const MENU_WIDTH_FRACTION: f32 = 0.6;

pub const BACKDROP_LIGHT_BLUR_COLOR: Color = Color::from_rgb_u8_alpha(0, 0, 0, 0.2);
pub const BACKDROP_DARK_BLUR_COLOR: Color = Color::from_rgb_u8_alpha(0, 0, 0, 0.75);
pub const BACKDROP_LIGHT_OPAQUE_COLOR: Color = Color::from_rgb_u8_alpha(19, 19, 19, 0.95);
pub const BACKDROP_DARK_OPAQUE_COLOR: Color = Color::from_rgb_u8_alpha(0, 0, 0, 0.95);

/// Spring moving the overlay to its solved offset.
pub fn overlay_spring() -> SpringSpec {
    SpringSpec::from_physics(33.0, 1.03, 500.0).with_thresholds(0.001, 0.001)
}

/// Slightly softer spring used when an open overlay is re-positioned.
pub fn menu_spring() -> SpringSpec {
    SpringSpec::from_physics(39.0, 1.09, 500.0).with_thresholds(0.001, 0.001)
}
