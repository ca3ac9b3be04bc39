//! Platform abstraction traits for runtime services.
//!
//! These traits let the host platform drive frame scheduling and timing
//! without the runtime depending on a particular windowing or clock API.

/// Schedules work for the runtime.
///
/// Implementations are responsible for making the host produce a frame,
/// which in turn calls [`crate::RuntimeHandle::drain_frame_callbacks`].
/// They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}
