//! Per-item press/hold state machine and floating overlay.
//!
//! A [`HoldItem`] wraps one piece of held content. It recognises the long
//! press, measures the content, solves where the overlay has to move, runs
//! the confirmation scale and the reveal/dismiss animations, and takes the
//! shared activation slot while its menu is open.
//!
//! ```text
//! Idle -> PressHeld -> ScalingDown -> Active -> Dismissing -> Idle
//! ```
//!
//! Every callback path releases the item's own borrow before touching an
//! animatable or the shared context, since both notify observers (this item
//! included) synchronously.

use crate::constants::{
    menu_spring, overlay_spring, HOLD_ITEM_SCALE_DOWN_DURATION, HOLD_ITEM_SCALE_DOWN_VALUE,
    HOLD_ITEM_TRANSFORM_DURATION, SPACING,
};
use crate::context::{
    ConcurrentActivationPolicy, HoldMenuContext, InteractionPhase, MenuProps, OverlayId,
};
use crate::layout_probe::{LayoutProbe, MeasurableContent, ProbeResult};
use crate::menu::{DefaultMenuHeightEstimator, MenuHeightEstimator, MenuSpec};
use crate::services::HapticStyle;
use crate::transform::{menu_bounds, solve_translation, ScreenMetrics, TransformInput, TransformOrigin};
use holdmenu_animation::{Animatable, AnimationEnd, AnimationSpec, AnimationType, Easing};
use holdmenu_core::{FrameCallbackRegistration, MutableState, State, Subscription};
use holdmenu_foundation::{
    LongPressEvent, LongPressGesture, PointerEvent, PointerEventKind, TapGesture,
    LONG_PRESS_TIMEOUT_MILLIS, TAP_SLOP,
};
use holdmenu_ui_graphics::{EdgeInsets, Rect};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoldItemState {
    #[default]
    Idle,
    PressHeld,
    ScalingDown,
    Active,
    Dismissing,
}

/// Per-item settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldItemConfig {
    /// Explicit anchor corner. Derived from the content position when
    /// `None`.
    pub menu_anchor_position: Option<TransformOrigin>,
    pub long_press_min_duration_millis: u64,
    /// Keep the overlay where the content is instead of solving an offset.
    pub disable_move: bool,
    /// A tap on the floating overlay closes the menu.
    pub close_on_tap: bool,
    pub haptic_style: HapticStyle,
}

impl Default for HoldItemConfig {
    fn default() -> Self {
        Self {
            menu_anchor_position: None,
            long_press_min_duration_millis: LONG_PRESS_TIMEOUT_MILLIS,
            disable_move: false,
            close_on_tap: false,
            haptic_style: HapticStyle::Heavy,
        }
    }
}

impl HoldItemConfig {
    pub fn with_anchor(mut self, origin: TransformOrigin) -> Self {
        self.menu_anchor_position = Some(origin);
        self
    }

    pub fn with_min_duration(mut self, millis: u64) -> Self {
        self.long_press_min_duration_millis = millis;
        self
    }

    pub fn with_disable_move(mut self, disable_move: bool) -> Self {
        self.disable_move = disable_move;
        self
    }

    pub fn with_close_on_tap(mut self, close_on_tap: bool) -> Self {
        self.close_on_tap = close_on_tap;
        self
    }

    pub fn with_haptic_style(mut self, style: HapticStyle) -> Self {
        self.haptic_style = style;
        self
    }
}

/// Snapshot of what the host should draw for the overlay copy of the
/// content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayVisualState {
    pub scale: f32,
    pub opacity: f32,
    pub translate_y: f32,
    pub pointer_events_enabled: bool,
}

/// Geometry of an open (or closing) overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    pub origin: TransformOrigin,
    /// Content bounds including the current translation.
    pub content: Rect,
    /// Menu bounds including the current translation.
    pub menu: Rect,
}

struct ItemCore {
    config: HoldItemConfig,
    menu: MenuSpec,
    estimator: Rc<dyn MenuHeightEstimator>,
    state: HoldItemState,
    long_press: LongPressGesture,
    overlay_tap: TapGesture,
    probe: LayoutProbe,
    /// Measurement of the current activation; outlives the probe's flag,
    /// which is reset on every gesture finalize.
    activation: Option<ProbeResult>,
    menu_height: f32,
    translation: f32,
    tick: Option<FrameCallbackRegistration>,
}

struct Shared {
    id: OverlayId,
    context: HoldMenuContext,
    content: Rc<dyn MeasurableContent>,
    scale: Animatable<f32>,
    translate_y: Animatable<f32>,
    opacity: Animatable<f32>,
    is_active: MutableState<bool>,
    core: RefCell<ItemCore>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if self.context.active_overlay() == Some(self.id) {
            log::debug!("overlay {:?} dropped while open; closing", self.id);
            self.context.release(self.id);
            self.context.close();
        }
    }
}

/// Handle to one hold-to-reveal item. Clones share the same item.
#[derive(Clone)]
pub struct HoldItem {
    shared: Rc<Shared>,
}

impl HoldItem {
    pub fn new(
        context: &HoldMenuContext,
        content: impl MeasurableContent + 'static,
        menu: MenuSpec,
        config: HoldItemConfig,
    ) -> Self {
        let runtime = context.runtime();
        let core = ItemCore {
            config,
            menu,
            estimator: Rc::new(DefaultMenuHeightEstimator::default()),
            state: HoldItemState::Idle,
            long_press: LongPressGesture::new(config.long_press_min_duration_millis),
            overlay_tap: TapGesture::new(),
            probe: LayoutProbe::new(),
            activation: None,
            menu_height: 0.0,
            translation: 0.0,
            tick: None,
        };
        let shared = Rc::new(Shared {
            id: context.allocate_overlay_id(),
            context: context.clone(),
            content: Rc::new(content),
            scale: Animatable::new(1.0, runtime.clone()),
            translate_y: Animatable::new(0.0, runtime.clone()),
            opacity: Animatable::new(0.0, runtime.clone()),
            is_active: MutableState::with_runtime(false, runtime),
            core: RefCell::new(core),
            subscriptions: RefCell::new(Vec::new()),
        });

        let item = Self { shared };
        item.observe_context();
        item
    }

    /// Replaces the menu height estimator.
    pub fn with_menu_height_estimator(self, estimator: impl MenuHeightEstimator + 'static) -> Self {
        self.core_mut().estimator = Rc::new(estimator);
        self
    }

    fn observe_context(&self) {
        let context = &self.shared.context;

        let weak = self.downgrade();
        let phase = context.phase_state().subscribe(move |phase: &InteractionPhase| {
            if *phase == InteractionPhase::Ended {
                if let Some(item) = Self::upgrade(&weak) {
                    item.on_menu_closed();
                }
            }
        });

        let weak = self.downgrade();
        let screen = context.screen_state().subscribe(move |_: &ScreenMetrics| {
            if let Some(item) = Self::upgrade(&weak) {
                item.resolve_open_overlay();
            }
        });

        self.shared
            .subscriptions
            .borrow_mut()
            .extend([phase, screen]);
    }

    pub fn id(&self) -> OverlayId {
        self.shared.id
    }

    pub fn state(&self) -> HoldItemState {
        self.core().state
    }

    pub fn config(&self) -> HoldItemConfig {
        self.core().config
    }

    pub fn menu(&self) -> MenuSpec {
        self.core().menu.clone()
    }

    /// Whether the overlay is shown and interactive.
    pub fn is_active(&self) -> bool {
        self.shared.is_active.get()
    }

    pub fn is_active_state(&self) -> State<bool> {
        self.shared.is_active.as_state()
    }

    /// Translation solved for the current activation.
    pub fn translation(&self) -> f32 {
        self.core().translation
    }

    /// Measurement of the current activation, if one is in progress.
    pub fn content_rect(&self) -> Option<Rect> {
        self.core().activation.map(|probe| probe.rect)
    }

    pub fn origin(&self) -> Option<TransformOrigin> {
        self.core().activation.map(|probe| probe.origin)
    }

    pub fn visual_state(&self) -> OverlayVisualState {
        OverlayVisualState {
            scale: self.shared.scale.value(),
            opacity: self.shared.opacity.value(),
            translate_y: self.shared.translate_y.value(),
            pointer_events_enabled: self.shared.is_active.get(),
        }
    }

    pub fn overlay_layout(&self) -> Option<OverlayLayout> {
        let (probe, menu_height) = {
            let core = self.core();
            (core.activation?, core.menu_height)
        };
        let screen = self.shared.context.screen();
        let translate_y = self.shared.translate_y.value();
        let menu = menu_bounds(
            &probe.rect,
            probe.origin,
            screen.menu_width(),
            menu_height,
            SPACING,
        );
        Some(OverlayLayout {
            origin: probe.origin,
            content: probe.rect.translate(0.0, translate_y),
            menu: menu.translate(0.0, translate_y),
        })
    }

    /// Feeds a pointer event that hit the content itself.
    pub fn on_pointer_event(&self, event: &PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let (transition, pending) = {
            let mut core = self.core_mut();
            let transition = core.long_press.on_pointer_event(event);
            (transition, core.long_press.is_pending())
        };
        if pending && event.kind == PointerEventKind::Down {
            self.schedule_tick();
        }
        if let Some(LongPressEvent::Finalized { success }) = transition {
            self.on_gesture_finalized(success);
        }
    }

    /// Feeds a pointer event that hit the floating overlay. Events inside
    /// the overlay are consumed while it accepts pointer events, so the
    /// backdrop underneath never sees them.
    pub fn on_overlay_pointer_event(&self, event: &PointerEvent) {
        if event.is_consumed() || !self.shared.is_active.get() {
            return;
        }
        let inside = self
            .overlay_layout()
            .map(|layout| layout.content.contains(event.position.x, event.position.y))
            .unwrap_or(false);
        let (release, close_on_tap) = {
            let mut core = self.core_mut();
            let owns_pointer = match event.kind {
                PointerEventKind::Down => inside,
                _ => core.overlay_tap.is_pressed(),
            };
            if !owns_pointer {
                return;
            }
            (core.overlay_tap.on_pointer_event(event), core.config.close_on_tap)
        };
        event.consume();
        if let Some(release) = release {
            if close_on_tap && release.is_within(TAP_SLOP) {
                log::debug!("overlay {:?} tapped; closing", self.shared.id);
                self.shared.context.close();
            }
        }
    }

    /// Runs the action of the menu row at `index` on the application thread
    /// and closes the menu. Titles and out-of-range rows are ignored.
    pub fn select_item(&self, index: usize) -> bool {
        let action = {
            let core = self.core();
            if core.state != HoldItemState::Active {
                return false;
            }
            match core.menu.get(index) {
                Some(item) if item.is_selectable() => item.action.clone(),
                _ => None,
            }
        };
        let Some(action) = action else {
            log::debug!("menu row {index} is not selectable");
            return false;
        };
        self.shared.context.runtime().post_app(move || action());
        self.shared.context.close();
        true
    }

    /// Closes this item's menu if it is the open one.
    pub fn close(&self) -> bool {
        if self.state() == HoldItemState::Active {
            self.shared.context.close()
        } else {
            false
        }
    }

    /// Replaces the menu rows. An open overlay re-solves its translation for
    /// the new height.
    pub fn set_menu(&self, menu: MenuSpec) {
        self.core_mut().menu = menu;
        self.resolve_open_overlay();
    }

    fn schedule_tick(&self) {
        let weak = self.downgrade();
        let registration = self
            .shared
            .context
            .runtime()
            .frame_clock()
            .with_frame_nanos(move |now| {
                if let Some(item) = Self::upgrade(&weak) {
                    item.on_tick(now);
                }
            });
        self.core_mut().tick = Some(registration);
    }

    fn on_tick(&self, now_nanos: u64) {
        let (event, pending) = {
            let mut core = self.core_mut();
            core.tick = None;
            let event = core.long_press.on_tick(now_nanos);
            (event, core.long_press.is_pending())
        };
        match event {
            Some(LongPressEvent::Started { position }) => {
                log::trace!("long press recognised at {position:?}");
                self.on_long_press_started();
            }
            _ if pending => self.schedule_tick(),
            _ => {}
        }
    }

    fn on_long_press_started(&self) {
        if self.state() != HoldItemState::Idle {
            log::debug!("overlay {:?} is busy; ignoring hold", self.shared.id);
            return;
        }
        if !self.admit() {
            return;
        }

        let context = &self.shared.context;
        let screen = context.screen();
        let insets = context.safe_area_insets();
        {
            let mut guard = self.core_mut();
            let core = &mut *guard;
            core.state = HoldItemState::PressHeld;
            let probe = core.probe.probe(
                &*self.shared.content,
                core.config.menu_anchor_position,
                screen.horizontal_extent(),
            );
            core.activation = Some(probe);
            core.menu_height = core.estimator.estimate(&core.menu);
            core.translation = solve_for(core, &probe, &screen, insets);
            core.state = HoldItemState::ScalingDown;
            log::debug!(
                "overlay {:?} measured {:?}, origin {:?}, translation {}",
                self.shared.id,
                probe.rect,
                probe.origin,
                core.translation
            );
        }

        let weak = self.downgrade();
        self.shared.scale.animate_to_then(
            HOLD_ITEM_SCALE_DOWN_VALUE,
            AnimationType::Tween(AnimationSpec::tween(
                HOLD_ITEM_SCALE_DOWN_DURATION,
                Easing::EaseInOut,
            )),
            move |end| match end {
                AnimationEnd::Finished => {
                    if let Some(item) = Self::upgrade(&weak) {
                        item.on_scale_down_finished();
                    }
                }
                AnimationEnd::Interrupted => log::trace!("scale-down interrupted"),
            },
        );
    }

    /// Whether this item may open its menu now. Under `Replace`, closes a
    /// menu owned by another item.
    fn admit(&self) -> bool {
        let context = &self.shared.context;
        let id = self.shared.id;
        match context.active_overlay() {
            Some(owner) if owner != id && context.is_active() => {
                match context.concurrent_activation() {
                    ConcurrentActivationPolicy::Ignore => {
                        log::warn!("hold on overlay {id:?} ignored: {owner:?} is open");
                        false
                    }
                    ConcurrentActivationPolicy::Replace => {
                        log::debug!("overlay {id:?} replaces {owner:?}");
                        context.close();
                        true
                    }
                }
            }
            _ => true,
        }
    }

    fn on_scale_down_finished(&self) {
        let empty = {
            let core = self.core();
            if core.state != HoldItemState::ScalingDown {
                return;
            }
            core.menu.is_empty()
        };
        if empty {
            log::debug!("overlay {:?} has no menu items; not opening", self.shared.id);
            self.abort_to_idle();
            return;
        }
        if !self.admit() {
            self.abort_to_idle();
            return;
        }

        let (props, translation, haptic_style) = {
            let mut core = self.core_mut();
            core.state = HoldItemState::Active;
            (
                self.menu_props(&core),
                core.translation,
                core.config.haptic_style,
            )
        };

        let context = &self.shared.context;
        context.claim(self.shared.id);
        context.set_menu_props(props);

        self.shared.scale.animate_to(
            1.0,
            AnimationType::Tween(AnimationSpec::tween(
                HOLD_ITEM_TRANSFORM_DURATION,
                Easing::EaseInOut,
            )),
        );
        if haptic_style != HapticStyle::None {
            let haptics = context.haptics();
            context
                .runtime()
                .post_app(move || haptics.impact(haptic_style));
        }
        self.shared.opacity.snap_to(1.0);
        self.shared.is_active.set(true);
        self.shared
            .translate_y
            .animate_to(translation, AnimationType::Spring(overlay_spring()));
        context.set_phase(InteractionPhase::Active);
    }

    fn on_gesture_finalized(&self, success: bool) {
        let state = {
            let mut core = self.core_mut();
            core.tick = None;
            core.probe.invalidate();
            core.state
        };
        match state {
            HoldItemState::PressHeld | HoldItemState::ScalingDown if !success => {
                log::trace!("overlay {:?} hold cancelled", self.shared.id);
                self.abort_to_idle();
            }
            _ => {}
        }
    }

    /// Drops an activation that never opened and scales the content back.
    fn abort_to_idle(&self) {
        {
            let mut core = self.core_mut();
            core.state = HoldItemState::Idle;
            core.probe.invalidate();
            core.activation = None;
            core.menu_height = 0.0;
            core.translation = 0.0;
        }
        self.shared.scale.animate_to(
            1.0,
            AnimationType::Tween(AnimationSpec::tween(
                HOLD_ITEM_TRANSFORM_DURATION,
                Easing::EaseInOut,
            )),
        );
    }

    fn on_menu_closed(&self) {
        {
            let mut core = self.core_mut();
            if core.state != HoldItemState::Active {
                return;
            }
            core.state = HoldItemState::Dismissing;
            core.overlay_tap.reset();
        }
        log::debug!("overlay {:?} dismissing", self.shared.id);

        self.shared.is_active.set(false);
        self.shared.translate_y.animate_to(
            0.0,
            AnimationType::Tween(AnimationSpec::tween(
                HOLD_ITEM_TRANSFORM_DURATION,
                Easing::EaseInOut,
            )),
        );
        let weak = self.downgrade();
        self.shared.opacity.animate_to_then(
            0.0,
            AnimationType::Tween(AnimationSpec::linear(0).with_delay(HOLD_ITEM_TRANSFORM_DURATION)),
            move |end| match end {
                AnimationEnd::Finished => {
                    if let Some(item) = Self::upgrade(&weak) {
                        item.finish_dismiss();
                    }
                }
                AnimationEnd::Interrupted => log::warn!("overlay fade-out interrupted"),
            },
        );
    }

    fn finish_dismiss(&self) {
        {
            let mut core = self.core_mut();
            if core.state != HoldItemState::Dismissing {
                return;
            }
            core.state = HoldItemState::Idle;
            core.long_press.reset();
            core.tick = None;
            core.probe.invalidate();
            core.activation = None;
            core.menu_height = 0.0;
            core.translation = 0.0;
        }
        self.shared.scale.snap_to(1.0);
        self.shared.context.release(self.shared.id);
        log::debug!("overlay {:?} idle", self.shared.id);
    }

    /// Re-solves the translation of an open overlay after the screen or the
    /// menu changed, and springs to the new offset.
    fn resolve_open_overlay(&self) {
        let context = &self.shared.context;
        let screen = context.screen();
        let insets = context.safe_area_insets();
        let (translation, props) = {
            let mut guard = self.core_mut();
            let core = &mut *guard;
            if core.state != HoldItemState::Active {
                return;
            }
            let Some(probe) = core.activation else {
                return;
            };
            core.menu_height = core.estimator.estimate(&core.menu);
            let translation = solve_for(core, &probe, &screen, insets);
            if translation == core.translation {
                return;
            }
            core.translation = translation;
            (translation, self.menu_props(core))
        };
        log::debug!(
            "overlay {:?} re-solved translation to {translation}",
            self.shared.id
        );
        context.set_menu_props(props);
        self.shared
            .translate_y
            .animate_to(translation, AnimationType::Spring(menu_spring()));
    }

    fn menu_props(&self, core: &ItemCore) -> MenuProps {
        let probe = core.activation.unwrap_or(ProbeResult {
            rect: Rect::ZERO,
            origin: TransformOrigin::default(),
        });
        let screen = self.shared.context.screen();
        MenuProps {
            owner: Some(self.shared.id),
            item_rect: probe.rect,
            menu_rect: menu_bounds(
                &probe.rect,
                probe.origin,
                screen.menu_width(),
                core.menu_height,
                SPACING,
            ),
            anchor: probe.origin,
            menu_height: core.menu_height,
            transform_value: core.translation,
            item_count: core.menu.len(),
        }
    }

    fn core(&self) -> Ref<'_, ItemCore> {
        self.shared.core.borrow()
    }

    fn core_mut(&self) -> RefMut<'_, ItemCore> {
        self.shared.core.borrow_mut()
    }

    fn downgrade(&self) -> Weak<Shared> {
        Rc::downgrade(&self.shared)
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }
}

fn solve_for(
    core: &ItemCore,
    probe: &ProbeResult,
    screen: &ScreenMetrics,
    insets: EdgeInsets,
) -> f32 {
    if core.config.disable_move {
        return 0.0;
    }
    solve_translation(&TransformInput::new(
        probe.rect,
        core.menu_height,
        probe.origin,
        screen,
        insets,
    ))
}

impl std::fmt::Debug for HoldItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldItem")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/hold_item_tests.rs"]
mod tests;
