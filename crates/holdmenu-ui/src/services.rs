//! Collaborators the core calls into but does not implement.

/// Strength/kind of a haptic pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HapticStyle {
    None,
    Selection,
    Light,
    Medium,
    /// The strong impact fired on activation.
    #[default]
    Heavy,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget haptic dispatch. Always invoked on the application
/// thread.
pub trait HapticFeedback: Send + Sync {
    fn impact(&self, style: HapticStyle);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHaptics;

impl HapticFeedback for NoopHaptics {
    fn impact(&self, _style: HapticStyle) {}
}
