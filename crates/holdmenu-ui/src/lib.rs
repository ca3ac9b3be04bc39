//! Press-and-hold reveal menus.
//!
//! A [`HoldMenuProvider`] builds the [`HoldMenuContext`] shared by every
//! [`HoldItem`] and the [`HoldMenuBackdrop`]. Holding an item measures it,
//! scales it down as confirmation, then lifts a floating copy on top of the
//! backdrop and moves it just far enough for the menu to fit on screen.
//! Rendering is left to the host: items and the backdrop expose their
//! animated values and accept [`PointerEvent`](holdmenu_foundation::PointerEvent)s.

pub mod backdrop;
pub mod constants;
pub mod context;
pub mod hold_item;
pub mod layout_probe;
pub mod menu;
pub mod services;
pub mod transform;

pub use backdrop::{backdrop_color, BackdropVisualState, HoldMenuBackdrop};
pub use context::{
    ConcurrentActivationPolicy, HoldMenuContext, HoldMenuProvider, InteractionPhase, MenuProps,
    OverlayId, Theme,
};
pub use hold_item::{HoldItem, HoldItemConfig, HoldItemState, OverlayLayout, OverlayVisualState};
pub use layout_probe::{measure_or_zero, LayoutProbe, MeasurableContent, MeasureError, ProbeResult};
pub use menu::{
    DefaultMenuHeightEstimator, FixedMenuHeight, MenuAction, MenuHeightEstimator, MenuItem,
    MenuItemFlags, MenuSpec,
};
pub use services::{HapticFeedback, HapticStyle, NoopHaptics};
pub use transform::{
    menu_bounds, solve_translation, HorizontalAnchor, Orientation, ScreenMetrics,
    TransformInput, TransformOrigin, VerticalAnchor,
};

pub mod prelude {
    pub use crate::{
        HoldItem, HoldItemConfig, HoldMenuBackdrop, HoldMenuContext, HoldMenuProvider,
        InteractionPhase, MenuItem, MenuSpec, ScreenMetrics, Theme, TransformOrigin,
    };
}
