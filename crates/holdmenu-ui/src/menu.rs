//! Menu model handed in by the caller.
//!
//! Rendering rows is someone else's job; the core only needs the item
//! count (and separators) to size the overlay, and the actions to run when
//! the host reports a selection.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuItemFlags {
    pub is_title: bool,
    pub is_destructive: bool,
    pub with_separator: bool,
}

#[derive(Clone)]
pub struct MenuItem {
    pub label: String,
    pub action: Option<MenuAction>,
    pub flags: MenuItemFlags,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            action: Some(Arc::new(action)),
            flags: MenuItemFlags::default(),
        }
    }

    /// Non-selectable heading row.
    pub fn title(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            flags: MenuItemFlags {
                is_title: true,
                ..MenuItemFlags::default()
            },
        }
    }

    pub fn destructive(mut self) -> Self {
        self.flags.is_destructive = true;
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.flags.with_separator = true;
        self
    }

    pub fn is_selectable(&self) -> bool {
        !self.flags.is_title && self.action.is_some()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("has_action", &self.action.is_some())
            .field("flags", &self.flags)
            .finish()
    }
}

/// Ordered menu rows.
#[derive(Clone, Debug, Default)]
pub struct MenuSpec {
    items: SmallVec<[MenuItem; 8]>,
}

impl MenuSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    pub fn separator_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.flags.with_separator)
            .count()
    }
}

impl FromIterator<MenuItem> for MenuSpec {
    fn from_iter<I: IntoIterator<Item = MenuItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Supplies the overlay height for a menu. Implemented by whatever renders
/// the rows.
pub trait MenuHeightEstimator {
    fn estimate(&self, menu: &MenuSpec) -> f32;
}

/// Fixed row height times count, one-pixel hairlines between rows and a
/// taller gap after rows flagged `with_separator`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultMenuHeightEstimator {
    pub row_height: f32,
    pub separator_height: f32,
    pub font_scale: f32,
}

impl Default for DefaultMenuHeightEstimator {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            separator_height: 6.0,
            font_scale: 1.0,
        }
    }
}

impl DefaultMenuHeightEstimator {
    pub fn with_font_scale(mut self, font_scale: f32) -> Self {
        self.font_scale = font_scale;
        self
    }
}

impl MenuHeightEstimator for DefaultMenuHeightEstimator {
    fn estimate(&self, menu: &MenuSpec) -> f32 {
        let count = menu.len();
        if count == 0 {
            return 0.0;
        }
        self.row_height * self.font_scale * count as f32
            + (count - 1) as f32
            + menu.separator_count() as f32 * self.separator_height
    }
}

/// Height known up front, bypassing estimation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMenuHeight(pub f32);

impl MenuHeightEstimator for FixedMenuHeight {
    fn estimate(&self, _menu: &MenuSpec) -> f32 {
        self.0
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
