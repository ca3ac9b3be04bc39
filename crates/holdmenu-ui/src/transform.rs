//! Transform origin and vertical translation of the overlay.
//!
//! Everything here is pure: the solver is evaluated once per activation and
//! again whenever the screen metrics or overlay height change while a menu
//! is open.

use crate::constants::{MENU_WIDTH_FRACTION, SPACING};
use holdmenu_ui_graphics::{EdgeInsets, Rect};

/// Vertical side of the content the menu attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

/// Horizontal direction the menu grows in from its attachment corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Right,
}

/// Corner of the content that the menu is anchored to and expands from.
///
/// `Top*` origins place the menu under the content, `Bottom*` origins above
/// it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformOrigin {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl TransformOrigin {
    /// Origin for content without a configured anchor: content starting in
    /// the left half of the screen grows rightwards, the rest leftwards.
    /// The vertical side is always `Top`.
    pub fn derive(content: &Rect, horizontal_extent: f32) -> Self {
        if content.x < horizontal_extent / 2.0 {
            TransformOrigin::TopRight
        } else {
            TransformOrigin::TopLeft
        }
    }

    pub fn vertical(self) -> VerticalAnchor {
        match self {
            TransformOrigin::TopRight | TransformOrigin::TopLeft => VerticalAnchor::Top,
            TransformOrigin::BottomRight | TransformOrigin::BottomLeft => VerticalAnchor::Bottom,
        }
    }

    pub fn horizontal(self) -> HorizontalAnchor {
        match self {
            TransformOrigin::TopRight | TransformOrigin::BottomRight => HorizontalAnchor::Right,
            TransformOrigin::TopLeft | TransformOrigin::BottomLeft => HorizontalAnchor::Left,
        }
    }

    pub fn is_top(self) -> bool {
        self.vertical() == VerticalAnchor::Top
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Device screen in its natural (portrait) dimensions plus the current
/// orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    pub orientation: Orientation,
}

impl ScreenMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Portrait,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Usable vertical extent: the height in portrait, the width in
    /// landscape.
    pub fn vertical_extent(&self) -> f32 {
        match self.orientation {
            Orientation::Portrait => self.height,
            Orientation::Landscape => self.width,
        }
    }

    pub fn horizontal_extent(&self) -> f32 {
        match self.orientation {
            Orientation::Portrait => self.width,
            Orientation::Landscape => self.height,
        }
    }

    pub fn menu_width(&self) -> f32 {
        self.horizontal_extent() * MENU_WIDTH_FRACTION
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// Inputs of [`solve_translation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformInput {
    pub content: Rect,
    pub overlay_height: f32,
    pub origin: TransformOrigin,
    pub screen_extent: f32,
    pub safe_area_insets: EdgeInsets,
    pub spacing: f32,
}

impl TransformInput {
    pub fn new(
        content: Rect,
        overlay_height: f32,
        origin: TransformOrigin,
        screen: &ScreenMetrics,
        safe_area_insets: EdgeInsets,
    ) -> Self {
        Self {
            content,
            overlay_height,
            origin,
            screen_extent: screen.vertical_extent(),
            safe_area_insets,
            spacing: SPACING,
        }
    }
}

/// Vertical offset that brings content plus menu back on screen.
///
/// With a `Top` origin the menu hangs below the content, so the offset is
/// zero or negative; with a `Bottom` origin it sits above, so the offset is
/// zero or positive and keeps a margin of twice the spacing under the top
/// inset.
pub fn solve_translation(input: &TransformInput) -> f32 {
    let content = input.content;
    let offset = match input.origin.vertical() {
        VerticalAnchor::Top => {
            let bottom_edge = content.y
                + content.height
                + input.overlay_height
                + input.spacing
                + input.safe_area_insets.bottom;
            if bottom_edge > input.screen_extent {
                input.screen_extent - bottom_edge
            } else {
                0.0
            }
        }
        VerticalAnchor::Bottom => {
            let top_edge = content.y - input.overlay_height - input.safe_area_insets.top;
            if top_edge < 0.0 {
                -top_edge + input.spacing * 2.0
            } else {
                0.0
            }
        }
    };

    if offset.is_finite() {
        offset
    } else {
        log::warn!("translation for {input:?} is not finite; keeping content in place");
        0.0
    }
}

/// Untranslated menu bounds for `content` anchored at `origin`.
///
/// `Right` starts the menu at the content's left edge and grows it to the
/// right; `Left` ends it at the content's right edge.
pub fn menu_bounds(
    content: &Rect,
    origin: TransformOrigin,
    menu_width: f32,
    menu_height: f32,
    spacing: f32,
) -> Rect {
    let x = match origin.horizontal() {
        HorizontalAnchor::Right => content.x,
        HorizontalAnchor::Left => content.right() - menu_width,
    };
    let y = match origin.vertical() {
        VerticalAnchor::Top => content.bottom() + spacing,
        VerticalAnchor::Bottom => content.y - spacing - menu_height,
    };
    Rect::new(x, y, menu_width, menu_height)
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
