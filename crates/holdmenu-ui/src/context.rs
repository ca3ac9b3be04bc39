//! Shared interaction state for every hold item under one provider.
//!
//! The context holds the interaction phase, the presentation settings the
//! caller supplies, the metadata of the open menu, and the single-owner
//! activation slot. Everything is UI-thread state; the open/close callbacks
//! are posted to the application thread when the phase changes.

use crate::services::{HapticFeedback, NoopHaptics};
use crate::transform::{ScreenMetrics, TransformOrigin};
use holdmenu_core::{MutableState, RuntimeHandle, State, Subscription};
use holdmenu_ui_graphics::{EdgeInsets, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

/// Coarse lifecycle of the menu as seen by every participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionPhase {
    #[default]
    Idle,
    Active,
    Ended,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// What happens when a second item completes a hold while a menu is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConcurrentActivationPolicy {
    /// The second hold is dropped and its content scales back.
    #[default]
    Ignore,
    /// The open menu is closed and the second item takes over.
    Replace,
}

/// Identifies one hold item for the activation slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

impl OverlayId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Metadata of the open menu, published for menu renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuProps {
    pub owner: Option<OverlayId>,
    pub item_rect: Rect,
    pub menu_rect: Rect,
    pub anchor: TransformOrigin,
    pub menu_height: f32,
    pub transform_value: f32,
    pub item_count: usize,
}

pub type PhaseCallback = Arc<dyn Fn() + Send + Sync>;

/// Builder for a [`HoldMenuContext`].
pub struct HoldMenuProvider {
    theme: Theme,
    safe_area_insets: EdgeInsets,
    screen: ScreenMetrics,
    blur_supported: bool,
    on_open: Option<PhaseCallback>,
    on_close: Option<PhaseCallback>,
    haptics: Arc<dyn HapticFeedback>,
    concurrent_activation: ConcurrentActivationPolicy,
}

impl Default for HoldMenuProvider {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            safe_area_insets: EdgeInsets::ZERO,
            screen: ScreenMetrics::default(),
            blur_supported: true,
            on_open: None,
            on_close: None,
            haptics: Arc::new(NoopHaptics),
            concurrent_activation: ConcurrentActivationPolicy::Ignore,
        }
    }
}

impl HoldMenuProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_safe_area_insets(mut self, insets: EdgeInsets) -> Self {
        self.safe_area_insets = insets;
        self
    }

    pub fn with_screen(mut self, screen: ScreenMetrics) -> Self {
        self.screen = screen;
        self
    }

    /// Whether the platform can blur the backdrop. Without blur the
    /// backdrop falls back to a near-opaque tint.
    pub fn with_blur_supported(mut self, supported: bool) -> Self {
        self.blur_supported = supported;
        self
    }

    pub fn on_open(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_open = Some(Arc::new(callback));
        self
    }

    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn with_haptics(mut self, haptics: Arc<dyn HapticFeedback>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn with_concurrent_activation(mut self, policy: ConcurrentActivationPolicy) -> Self {
        self.concurrent_activation = policy;
        self
    }

    pub fn build(self, runtime: RuntimeHandle) -> HoldMenuContext {
        let phase = MutableState::with_runtime(InteractionPhase::Idle, runtime.clone());

        let on_open = self.on_open;
        let on_close = self.on_close;
        let app = runtime.clone();
        let phase_subscription = phase.subscribe(move |phase: &InteractionPhase| {
            let callback = match phase {
                InteractionPhase::Active => on_open.clone(),
                InteractionPhase::Ended => on_close.clone(),
                InteractionPhase::Idle => None,
            };
            log::debug!("hold menu phase -> {phase:?}");
            if let Some(callback) = callback {
                app.post_app(move || callback());
            }
        });

        HoldMenuContext {
            inner: Rc::new(ContextInner {
                phase,
                theme: MutableState::with_runtime(self.theme, runtime.clone()),
                safe_area_insets: MutableState::with_runtime(self.safe_area_insets, runtime.clone()),
                screen: MutableState::with_runtime(self.screen, runtime.clone()),
                menu_props: MutableState::with_runtime(MenuProps::default(), runtime.clone()),
                active_overlay: MutableState::with_runtime(None, runtime.clone()),
                next_overlay_id: Cell::new(0),
                blur_supported: self.blur_supported,
                haptics: self.haptics,
                concurrent_activation: self.concurrent_activation,
                runtime,
                phase_subscription: RefCell::new(Some(phase_subscription)),
            }),
        }
    }
}

struct ContextInner {
    runtime: RuntimeHandle,
    phase: MutableState<InteractionPhase>,
    theme: MutableState<Theme>,
    safe_area_insets: MutableState<EdgeInsets>,
    screen: MutableState<ScreenMetrics>,
    menu_props: MutableState<MenuProps>,
    active_overlay: MutableState<Option<OverlayId>>,
    next_overlay_id: Cell<u32>,
    blur_supported: bool,
    haptics: Arc<dyn HapticFeedback>,
    concurrent_activation: ConcurrentActivationPolicy,
    phase_subscription: RefCell<Option<Subscription>>,
}

/// Handle to the shared hold-menu state. Cheap to clone.
#[derive(Clone)]
pub struct HoldMenuContext {
    inner: Rc<ContextInner>,
}

impl HoldMenuContext {
    pub fn runtime(&self) -> RuntimeHandle {
        self.inner.runtime.clone()
    }

    pub fn phase(&self) -> InteractionPhase {
        self.inner.phase.get()
    }

    pub fn phase_state(&self) -> State<InteractionPhase> {
        self.inner.phase.as_state()
    }

    /// Writes the phase. Returns false, and notifies nobody, when the phase
    /// is unchanged.
    pub fn set_phase(&self, phase: InteractionPhase) -> bool {
        self.inner.phase.set(phase)
    }

    pub fn is_active(&self) -> bool {
        self.phase() == InteractionPhase::Active
    }

    /// Dismisses the open menu, if any.
    pub fn close(&self) -> bool {
        if self.is_active() {
            self.set_phase(InteractionPhase::Ended)
        } else {
            false
        }
    }

    pub fn theme(&self) -> Theme {
        self.inner.theme.get()
    }

    pub fn theme_state(&self) -> State<Theme> {
        self.inner.theme.as_state()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.inner.theme.set(theme);
    }

    pub fn safe_area_insets(&self) -> EdgeInsets {
        self.inner.safe_area_insets.get()
    }

    pub fn screen(&self) -> ScreenMetrics {
        self.inner.screen.get()
    }

    pub fn screen_state(&self) -> State<ScreenMetrics> {
        self.inner.screen.as_state()
    }

    /// Updates the screen metrics, e.g. after a rotation. Open overlays
    /// re-solve their translation.
    pub fn set_screen(&self, screen: ScreenMetrics) {
        self.inner.screen.set(screen);
    }

    pub fn blur_supported(&self) -> bool {
        self.inner.blur_supported
    }

    pub fn haptics(&self) -> Arc<dyn HapticFeedback> {
        self.inner.haptics.clone()
    }

    pub fn concurrent_activation(&self) -> ConcurrentActivationPolicy {
        self.inner.concurrent_activation
    }

    pub fn menu_props(&self) -> MenuProps {
        self.inner.menu_props.get()
    }

    pub fn menu_props_state(&self) -> State<MenuProps> {
        self.inner.menu_props.as_state()
    }

    pub(crate) fn set_menu_props(&self, props: MenuProps) {
        self.inner.menu_props.set(props);
    }

    pub(crate) fn allocate_overlay_id(&self) -> OverlayId {
        let id = self.inner.next_overlay_id.get();
        self.inner.next_overlay_id.set(id.wrapping_add(1));
        OverlayId(id)
    }

    /// Item currently holding the activation slot.
    pub fn active_overlay(&self) -> Option<OverlayId> {
        self.inner.active_overlay.get()
    }

    pub(crate) fn claim(&self, id: OverlayId) {
        if let Some(previous) = self.active_overlay().filter(|previous| *previous != id) {
            log::debug!("overlay {id:?} takes the activation slot from {previous:?}");
        }
        self.inner.active_overlay.set(Some(id));
    }

    /// Frees the slot and clears the menu metadata, but only for the item
    /// that still owns them.
    pub(crate) fn release(&self, id: OverlayId) {
        if self.active_overlay() == Some(id) {
            self.inner.active_overlay.set(None);
            self.inner.menu_props.set(MenuProps::default());
        }
    }

    /// Stops delivering open/close callbacks.
    pub fn detach_callbacks(&self) {
        self.inner.phase_subscription.borrow_mut().take();
    }
}

impl std::fmt::Debug for HoldMenuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldMenuContext")
            .field("phase", &self.phase())
            .field("theme", &self.theme())
            .field("active_overlay", &self.active_overlay())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
