use crate::{
    config::CloudConfig,
    foundation::core::{Point, Rect, Spread, Viewport},
    foundation::rng::RandomSource,
};

/// A randomly placed blob: centre position plus bounding width/height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Seed {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Seed {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned box of the seed's nominal ellipse.
    pub fn bounds(self) -> Rect {
        Rect::from_center_size(self.center(), (self.w, self.h))
    }
}

/// Draw the centre a whole field of seeds gathers around.
pub fn pick_center(rng: &mut impl RandomSource, viewport: Viewport, cfg: &CloudConfig) -> Point {
    let x = rng.sample(cfg.center_x) * viewport.width;
    let y = rng.sample(cfg.center_y) * viewport.height;
    Point::new(x, y)
}

/// Draw how many seeds one pass produces for this viewport class.
pub fn seed_count(rng: &mut impl RandomSource, viewport: Viewport, cfg: &CloudConfig) -> u32 {
    let range = if viewport.is_narrow() {
        cfg.seeds.narrow
    } else {
        cfg.seeds.wide
    };
    rng.count(range)
}

/// Generate `n` seeds jittered around `center`.
///
/// Width is uniform over `cfg.size` (the upper bound shrinks on narrow viewports), height is
/// width times a uniform aspect factor, and the position is `center` plus independent uniform
/// jitter of up to `spread` viewport fractions on each axis.
pub fn generate_seeds(
    rng: &mut impl RandomSource,
    n: usize,
    viewport: Viewport,
    center: Point,
    spread: Spread,
    cfg: &CloudConfig,
) -> Vec<Seed> {
    let max_w = if viewport.is_narrow() {
        cfg.size.max() * cfg.narrow_size_scale
    } else {
        cfg.size.max()
    };

    (0..n)
        .map(|_| {
            let w = rng.range(cfg.size.min(), max_w);
            let h = w * rng.sample(cfg.aspect);
            let x = center.x + rng.range(-spread.x, spread.x) * viewport.width;
            let y = center.y + rng.range(-spread.y, spread.y) * viewport.height;
            Seed { x, y, w, h }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/seed.rs"]
mod tests;
