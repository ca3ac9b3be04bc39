use std::cell::RefCell;
use std::rc::Rc;

use holdmenu_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State};

use crate::easing::Easing;

/// Integration step for spring physics, in seconds.
const SPRING_TIMESTEP_SECS: f32 = 1.0 / 240.0;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone + PartialEq {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Rebuild a value from the physics domain.
    fn from_f32(value: f32) -> Self;

    /// Determine whether the current value is close enough to the target to
    /// consider the spring finished.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

/// Animation specification combining duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::default())
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness per unit mass. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation, in value units per second.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation, in value units.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Build a spring from a damping coefficient, mass and stiffness, the
    /// parameterisation used by physical spring configs.
    pub fn from_physics(damping: f32, mass: f32, stiffness: f32) -> Self {
        let mass = mass.max(f32::EPSILON);
        let critical = 2.0 * (stiffness * mass).sqrt();
        Self {
            damping_ratio: if critical > 0.0 { damping / critical } else { 1.0 },
            stiffness: stiffness / mass,
            ..Self::default_spring()
        }
    }

    pub fn with_thresholds(mut self, velocity: f32, position: f32) -> Self {
        self.velocity_threshold = velocity;
        self.position_threshold = position;
        self
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// Reached its target.
    Finished,
    /// Replaced by another animation, a snap, or an explicit stop.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEnd)>;

/// Generic animatable value holder.
///
/// At most one animation runs on an `Animatable` at a time: starting a new
/// one, snapping, or stopping interrupts the running animation and reports
/// [`AnimationEnd::Interrupted`] to its end callback.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    /// Value units per second; carried across spring retargets.
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    running: bool,
    on_end: Option<EndCallback>,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: SpringScalar + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::with_runtime(initial.clone(), runtime.clone()),
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            running: false,
            on_end: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to the target value using the specified animation.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Animate to the target value and report how the animation ended.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    fn start_animation(&self, target: T, animation: AnimationType, on_end: Option<EndCallback>) {
        self.interrupt();
        {
            let mut inner = self.inner.borrow_mut();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.running = true;
            inner.on_end = on_end;
            if matches!(animation, AnimationType::Tween(_)) {
                inner.velocity = 0.0;
            }
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, target: T) {
        self.interrupt();
        let state = {
            let mut inner = self.inner.borrow_mut();
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.state.clone()
        };
        state.set(target);
    }

    /// Stop the running animation, leaving the value where it is.
    pub fn stop(&self) {
        self.interrupt();
        let mut inner = self.inner.borrow_mut();
        inner.target = inner.current.clone();
        inner.velocity = 0.0;
    }

    fn interrupt(&self) {
        let (registration, on_end) = {
            let mut inner = self.inner.borrow_mut();
            inner.running = false;
            (inner.registration.take(), inner.on_end.take())
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
        if let Some(on_end) = on_end {
            on_end(AnimationEnd::Interrupted);
        }
    }

    /// Return the current animation target.
    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    /// Return the most recently computed value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Return the animation spec currently driving this animatable.
    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    /// Get the observable value.
    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (state, value, schedule_next, on_end) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => step_tween(&mut inner, spec, frame_time_nanos),
                AnimationType::Spring(spec) => step_spring(&mut inner, spec, frame_time_nanos),
            };

            let on_end = if finished {
                inner.current = inner.target.clone();
                inner.start = inner.target.clone();
                inner.start_time_nanos = None;
                inner.last_frame_nanos = None;
                inner.velocity = 0.0;
                inner.running = false;
                inner.on_end.take()
            } else {
                None
            };
            (inner.state.clone(), inner.current.clone(), !finished, on_end)
        };

        state.set(value);

        if schedule_next {
            Self::schedule_frame(this);
        } else if let Some(on_end) = on_end {
            on_end(AnimationEnd::Finished);
        }
    }
}

/// Advances a tween; returns true once the target is reached.
fn step_tween<T: SpringScalar>(
    inner: &mut AnimatableInner<T>,
    spec: AnimationSpec,
    frame_time_nanos: u64,
) -> bool {
    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
    let delay_nanos = spec.delay_millis * 1_000_000;

    if elapsed_nanos < delay_nanos {
        return false;
    }

    if spec.duration_millis == 0 {
        return true;
    }

    let animation_elapsed = elapsed_nanos - delay_nanos;
    let duration_nanos = spec.duration_millis * 1_000_000;
    let linear_progress = (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
    let progress = spec.easing.transform(linear_progress);
    inner.current = inner.start.lerp(&inner.target, progress);
    linear_progress >= 1.0
}

/// Advances a damped harmonic oscillator from the previous frame to this
/// one; returns true once both speed and displacement are under threshold.
fn step_spring<T: SpringScalar>(
    inner: &mut AnimatableInner<T>,
    spec: SpringSpec,
    frame_time_nanos: u64,
) -> bool {
    let Some(last_frame) = inner.last_frame_nanos.replace(frame_time_nanos) else {
        inner.start_time_nanos = Some(frame_time_nanos);
        return false;
    };
    let dt = frame_time_nanos.saturating_sub(last_frame) as f32 / 1_000_000_000.0;
    let target = inner.target.to_f32();
    let stiffness = spec.stiffness;
    let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();

    let mut position = inner.current.to_f32();
    let mut velocity = inner.velocity;
    let mut simulated = 0.0f32;
    while simulated < dt {
        let step = SPRING_TIMESTEP_SECS.min(dt - simulated);
        // Semi-implicit Euler: F = -k * displacement - c * velocity
        let force = -stiffness * (position - target) - damping * velocity;
        velocity += force * step;
        position += velocity * step;
        simulated += step;
    }

    inner.velocity = velocity;
    inner.current = T::from_f32(position);
    log::trace!("spring position {position} velocity {velocity} target {target}");

    velocity.abs() < spec.velocity_threshold
        && T::is_near_target(&inner.current, &inner.target, spec.position_threshold)
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
