use crate::{
    clouds::lobes::Lobe,
    foundation::core::{Ellipse, Interval, Point, Rect},
    foundation::error::{NubesError, NubesResult},
    foundation::rng::RandomSource,
};

/// One filled ellipse in shape-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeLobe {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl ShapeLobe {
    pub fn ellipse(self) -> Ellipse {
        Ellipse::new((self.cx, self.cy), (self.rx, self.ry), 0.0)
    }
}

/// Multi-lobe geometry rendered as a single element.
///
/// Lobe radii are sampled once at construction; rendering the same shape twice produces the
/// same output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositeShape {
    /// Padded bounding box width, in whole pixels (>= 1).
    pub width: u32,
    /// Padded bounding box height, in whole pixels (>= 1).
    pub height: u32,
    /// Top-left corner of the padded box in world coordinates.
    pub origin: Point,
    /// Padding applied on each side.
    pub padding: f64,
    /// Lobes relative to `origin`.
    pub lobes: Vec<ShapeLobe>,
}

impl CompositeShape {
    /// Local frame `[0, width] x [0, height]`.
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Padded box placed at `origin`.
    pub fn world_bounds(&self) -> Rect {
        self.local_bounds() + self.origin.to_vec2()
    }
}

/// Lay `lobes` out in a shared local frame.
///
/// Each lobe's radii are drawn from `radius_jitter` times its width/height (x then y, lobe by
/// lobe), then a single padding value is drawn from `padding`. The box covers every lobe's
/// nominal extent (`w/2`, `h/2`) and its jittered radii, so each ellipse stays inside the
/// output frame.
pub fn build_composite_shape(
    rng: &mut impl RandomSource,
    lobes: &[Lobe],
    padding: Interval,
    radius_jitter: Interval,
) -> NubesResult<CompositeShape> {
    if lobes.is_empty() {
        return Err(NubesError::validation(
            "cannot build a composite shape without lobes",
        ));
    }

    let radii: Vec<(f64, f64)> = lobes
        .iter()
        .map(|l| {
            let rx = l.w * rng.sample(radius_jitter);
            let ry = l.h * rng.sample(radius_jitter);
            (rx, ry)
        })
        .collect();

    let content = lobes
        .iter()
        .zip(&radii)
        .map(|(l, &(rx, ry))| {
            let jittered = Rect::from_center_size(l.center(), (rx * 2.0, ry * 2.0));
            l.bounds().union(jittered)
        })
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO);

    let pad = rng.sample(padding);
    let width = padded_extent(content.width(), pad);
    let height = padded_extent(content.height(), pad);

    let local = lobes
        .iter()
        .zip(&radii)
        .map(|(l, &(rx, ry))| ShapeLobe {
            cx: l.x - content.x0 + pad,
            cy: l.y - content.y0 + pad,
            rx,
            ry,
        })
        .collect();

    Ok(CompositeShape {
        width,
        height,
        origin: Point::new(content.x0 - pad, content.y0 - pad),
        padding: pad,
        lobes: local,
    })
}

/// `extent + 2 * pad` rounded, but never below the far edge of the content or 1.
fn padded_extent(extent: f64, pad: f64) -> u32 {
    let rounded = (extent + pad * 2.0).round();
    let content_edge = (extent + pad).ceil();
    rounded.max(content_edge).max(1.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/shape.rs"]
mod tests;
