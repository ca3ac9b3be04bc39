//! Full-screen dimming layer behind an open menu.

use crate::constants::{
    BACKDROP_BLUR_INTENSITY, BACKDROP_DARK_BLUR_COLOR, BACKDROP_DARK_OPAQUE_COLOR,
    BACKDROP_LIGHT_BLUR_COLOR, BACKDROP_LIGHT_OPAQUE_COLOR, HOLD_ITEM_SCALE_DOWN_DURATION,
    HOLD_ITEM_TRANSFORM_DURATION,
};
use crate::context::{HoldMenuContext, InteractionPhase, Theme};
use holdmenu_animation::{Animatable, AnimationSpec, AnimationType, Easing};
use holdmenu_core::Subscription;
use holdmenu_foundation::{PointerEvent, TapGesture, TAP_SLOP};
use holdmenu_ui_graphics::Color;
use std::cell::RefCell;

/// Tint for `theme`; near-opaque when the platform cannot blur.
pub fn backdrop_color(theme: Theme, blur_supported: bool) -> Color {
    match (theme, blur_supported) {
        (Theme::Light, true) => BACKDROP_LIGHT_BLUR_COLOR,
        (Theme::Dark, true) => BACKDROP_DARK_BLUR_COLOR,
        (Theme::Light, false) => BACKDROP_LIGHT_OPAQUE_COLOR,
        (Theme::Dark, false) => BACKDROP_DARK_OPAQUE_COLOR,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropVisualState {
    /// Laid out and hit-testable; only while the menu is open.
    pub visible: bool,
    pub opacity: f32,
    pub blur_intensity: f32,
    pub color: Color,
}

/// Owns the tap-to-dismiss gesture. Its look is a function of the shared
/// phase alone; it never writes anything but `Ended`.
pub struct HoldMenuBackdrop {
    context: HoldMenuContext,
    tap: RefCell<TapGesture>,
    opacity: Animatable<f32>,
    intensity: Animatable<f32>,
    _phase: Subscription,
}

impl HoldMenuBackdrop {
    pub fn new(context: &HoldMenuContext) -> Self {
        let runtime = context.runtime();
        let opacity = Animatable::new(0.0, runtime.clone());
        let intensity = Animatable::new(0.0, runtime);

        let (fade, blur) = (opacity.clone(), intensity.clone());
        let phase = context.phase_state().subscribe(move |phase: &InteractionPhase| {
            let open = *phase == InteractionPhase::Active;
            fade.animate_to(
                if open { 1.0 } else { 0.0 },
                AnimationType::Tween(AnimationSpec::tween(
                    HOLD_ITEM_SCALE_DOWN_DURATION,
                    Easing::EaseInOut,
                )),
            );
            blur.animate_to(
                if open { BACKDROP_BLUR_INTENSITY } else { 0.0 },
                AnimationType::Tween(AnimationSpec::tween(
                    HOLD_ITEM_TRANSFORM_DURATION,
                    Easing::EaseInOut,
                )),
            );
        });

        Self {
            context: context.clone(),
            tap: RefCell::new(TapGesture::new()),
            opacity,
            intensity,
            _phase: phase,
        }
    }

    /// Handles a pointer event that reached the backdrop. A press released
    /// within [`TAP_SLOP`] of where it started closes the menu; anything
    /// longer is a drag or scroll and is ignored.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        if event.is_consumed() || !self.context.is_active() {
            self.tap.borrow_mut().reset();
            return false;
        }
        let release = self.tap.borrow_mut().on_pointer_event(event);
        match release {
            Some(release) if release.is_within(TAP_SLOP) => {
                event.consume();
                log::debug!("backdrop tapped; closing menu");
                self.context.set_phase(InteractionPhase::Ended)
            }
            Some(release) => {
                log::trace!("backdrop drag of {} ignored", release.distance());
                false
            }
            None => false,
        }
    }

    pub fn visual_state(&self) -> BackdropVisualState {
        BackdropVisualState {
            visible: self.context.is_active(),
            opacity: self.opacity.value(),
            blur_intensity: self.intensity.value(),
            color: backdrop_color(self.context.theme(), self.context.blur_supported()),
        }
    }
}

#[cfg(test)]
#[path = "tests/backdrop_tests.rs"]
mod tests;
