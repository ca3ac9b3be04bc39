/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    LinearEasing,
    /// Standard ease-in-out, `cubic-bezier(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps a linear progress fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction.clamp(0.0, 1.0),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// Evaluates the CSS-style curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`,
/// `(1, 1)` at horizontal position `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients: B(t) = ((a t + b) t + c) t.
    let coefficients = |p1: f32, p2: f32| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        (1.0 - c - b, b, c)
    };
    let (ax, bx, cx) = coefficients(x1, x2);
    let (ay, by, cy) = coefficients(y1, y2);
    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;

    let mut t = fraction;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            return sample(ay, by, cy, t);
        }
        let slope = (3.0 * ax * t + 2.0 * bx) * t + cx;
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; bisect instead.
    let (mut low, mut high) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..20 {
        let x = sample(ax, bx, cx, t);
        if (x - fraction).abs() < 1e-6 {
            break;
        }
        if x > fraction {
            high = t;
        } else {
            low = t;
        }
        t = 0.5 * (low + high);
    }
    sample(ay, by, cy, t)
}
