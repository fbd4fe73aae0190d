//! Sequential color scales

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form for SVG attributes
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Relative luminance in `0.0..=1.0` (Rec. 601 weights)
    pub fn luminance(self) -> f64 {
        (0.299 * self.0 as f64 + 0.587 * self.1 as f64 + 0.114 * self.2 as f64) / 255.0
    }

    /// Black or white, whichever reads better on top of this color
    pub fn contrasting_text(self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb(0, 0, 0)
        } else {
            Rgb(255, 255, 255)
        }
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Evenly spaced color stops, linearly interpolated
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: &'static [Rgb],
}

/// Multi-hue rainbow: purple through blue, cyan, green and yellow to red
const RAINBOW: &[Rgb] = &[
    Rgb(150, 0, 90),
    Rgb(0, 0, 200),
    Rgb(0, 25, 255),
    Rgb(0, 152, 255),
    Rgb(44, 255, 150),
    Rgb(151, 255, 0),
    Rgb(255, 234, 0),
    Rgb(255, 111, 0),
    Rgb(255, 0, 0),
];

impl ColorScale {
    pub fn rainbow() -> Self {
        Self { stops: RAINBOW }
    }

    pub fn stops(&self) -> &[Rgb] {
        self.stops
    }

    /// Color at position `t`, clamped to `0.0..=1.0`
    pub fn at(&self, t: f64) -> Rgb {
        debug_assert!(self.stops.len() >= 2, "color scale needs at least two stops");
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);

        self.stops[index].lerp(self.stops[index + 1], scaled - index as f64)
    }

    /// Color for `value` on the range `lo..=hi`; a degenerate range maps to the middle
    pub fn map(&self, value: f64, lo: f64, hi: f64) -> Rgb {
        if hi > lo {
            self.at((value - lo) / (hi - lo))
        } else {
            self.at(0.5)
        }
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::rainbow()
    }
}
