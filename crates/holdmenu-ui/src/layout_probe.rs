//! One-shot measurement of the held content.

use crate::transform::TransformOrigin;
use holdmenu_ui_graphics::Rect;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureError {
    /// The content has not been through a layout pass yet.
    NotLaidOut,
    /// The content is no longer attached to a window.
    Detached,
    /// Measurement produced NaN or infinite coordinates.
    NonFinite(Rect),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::NotLaidOut => write!(f, "content has not been laid out"),
            MeasureError::Detached => write!(f, "content is detached from the window"),
            MeasureError::NonFinite(rect) => {
                write!(f, "content measured to non-finite bounds {rect:?}")
            }
        }
    }
}

impl std::error::Error for MeasureError {}

/// Content that can report its bounds in window coordinates.
pub trait MeasurableContent {
    fn measure_in_window(&self) -> Result<Rect, MeasureError>;
}

impl<F> MeasurableContent for F
where
    F: Fn() -> Result<Rect, MeasureError>,
{
    fn measure_in_window(&self) -> Result<Rect, MeasureError> {
        self()
    }
}

/// What the probe learned about the content for the current activation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeResult {
    pub rect: Rect,
    pub origin: TransformOrigin,
}

/// Measures content at most once per activation.
///
/// Measurement failures never abort an activation: they are logged and the
/// content is treated as a zero rect at the window origin.
#[derive(Debug, Default)]
pub struct LayoutProbe {
    measured: Option<ProbeResult>,
}

impl LayoutProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures `content` unless already measured, and resolves the origin
    /// from `configured` or from the content's horizontal position.
    pub fn probe(
        &mut self,
        content: &dyn MeasurableContent,
        configured: Option<TransformOrigin>,
        horizontal_extent: f32,
    ) -> ProbeResult {
        if let Some(result) = self.measured {
            return result;
        }
        let rect = measure_or_zero(content);
        let origin =
            configured.unwrap_or_else(|| TransformOrigin::derive(&rect, horizontal_extent));
        let result = ProbeResult { rect, origin };
        self.measured = Some(result);
        result
    }

    pub fn is_measured(&self) -> bool {
        self.measured.is_some()
    }

    pub fn result(&self) -> Option<ProbeResult> {
        self.measured
    }

    /// Forgets the measurement so the next activation measures again.
    pub fn invalidate(&mut self) {
        self.measured = None;
    }
}

/// Measures `content`, degrading to [`Rect::ZERO`] on any failure.
pub fn measure_or_zero(content: &dyn MeasurableContent) -> Rect {
    let measured = content.measure_in_window().and_then(|rect| {
        if rect.is_finite() {
            Ok(rect)
        } else {
            Err(MeasureError::NonFinite(rect))
        }
    });
    match measured {
        Ok(rect) => {
            log::trace!("measured content at {rect:?}");
            rect
        }
        Err(err) => {
            log::warn!("measuring held content failed: {err}; using a zero rect");
            Rect::ZERO
        }
    }
}

#[cfg(test)]
#[path = "tests/layout_probe_tests.rs"]
mod tests;
