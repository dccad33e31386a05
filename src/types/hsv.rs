//! HSV samples and bound boxes (8-bit scale: hue 0-179, saturation/value 0-255)

use serde::{Deserialize, Serialize};

/// Full hue circle on the 8-bit scale
pub const HUE_CIRCLE: f64 = 180.0;

/// Saturation / value channel span
pub const CHANNEL_SPAN: f64 = 255.0;

/// One HSV triple; also used as an averaged sample over a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert one RGB pixel.
    ///
    /// Hue is degrees / 2 rounded to the nearest integer and wrapped into
    /// 0..180; saturation is `255 * (max - min) / max`; value is `max`.
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let v = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = f64::from(v - min);

        let s = if v == 0 {
            0
        } else {
            (diff * CHANNEL_SPAN / f64::from(v)).round() as u8
        };

        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        let h = if diff == 0.0 {
            0.0
        } else if r >= g && r >= b {
            30.0 * (g - b) / diff
        } else if g >= b {
            60.0 + 30.0 * (b - r) / diff
        } else {
            120.0 + 30.0 * (r - g) / diff
        };
        let h = (h.round() as i32).rem_euclid(HUE_CIRCLE as i32) as u8;

        Self { h, s, v }
    }

    /// Channel-wise mean of a set of samples, truncated toward zero.
    ///
    /// Returns `None` for an empty set.
    pub fn mean<I: IntoIterator<Item = Hsv>>(samples: I) -> Option<Self> {
        let (mut h, mut s, mut v, mut n) = (0u64, 0u64, 0u64, 0u64);
        for px in samples {
            h += u64::from(px.h);
            s += u64::from(px.s);
            v += u64::from(px.v);
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Self {
            h: (h / n) as u8,
            s: (s / n) as u8,
            v: (v / n) as u8,
        })
    }
}

impl std::fmt::Display for Hsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hsv({}, {}, {})", self.h, self.s, self.v)
    }
}

/// Midpoint of an [`HsvRange`]; fractional, unlike samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvCenter {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Inclusive bound box in HSV space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Every channel within `[lower, upper]`
    pub fn contains(&self, sample: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&sample.h)
            && (self.lower.s..=self.upper.s).contains(&sample.s)
            && (self.lower.v..=self.upper.v).contains(&sample.v)
    }

    pub fn center(&self) -> HsvCenter {
        HsvCenter {
            h: (f64::from(self.lower.h) + f64::from(self.upper.h)) / 2.0,
            s: (f64::from(self.lower.s) + f64::from(self.upper.s)) / 2.0,
            v: (f64::from(self.lower.v) + f64::from(self.upper.v)) / 2.0,
        }
    }
}

/// Shortest distance between two hues on the 180-step circle
pub fn circular_hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(HUE_CIRCLE - d)
}
