use crate::foundation::error::{NubesError, NubesResult};

pub use kurbo::{Ellipse, Point, Rect, Size, Vec2};

/// Viewports at or below this width get the reduced seed size and seed count.
pub const NARROW_VIEWPORT_MAX_WIDTH: f64 = 600.0;

/// Pixel dimensions of the surface clouds are laid out on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> NubesResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(NubesError::validation(
                "viewport dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn is_narrow(self) -> bool {
        self.width <= NARROW_VIEWPORT_MAX_WIDTH
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Half-extent of seed jitter, as fractions of the viewport width/height.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spread {
    pub x: f64,
    pub y: f64,
}

/// Half-open real interval `[min, max)`, serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interval(pub f64, pub f64);

impl Interval {
    pub fn min(self) -> f64 {
        self.0
    }

    pub fn max(self) -> f64 {
        self.1
    }

    pub fn validate(self, name: &str) -> NubesResult<()> {
        if !(self.0.is_finite() && self.1.is_finite()) {
            return Err(NubesError::config(format!("{name} bounds must be finite")));
        }
        if self.0 > self.1 {
            return Err(NubesError::config(format!(
                "{name} min must be <= max (got [{}, {}])",
                self.0, self.1
            )));
        }
        Ok(())
    }
}

/// Integer interval `[min, max)`; an empty interval (`min == max`) always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CountRange(pub u32, pub u32);

impl CountRange {
    pub fn validate(self, name: &str) -> NubesResult<()> {
        if self.0 > self.1 {
            return Err(NubesError::config(format!(
                "{name} min must be <= max (got [{}, {}])",
                self.0, self.1
            )));
        }
        Ok(())
    }
}
