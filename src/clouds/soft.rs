use crate::{
    clouds::{
        field::Cloud,
        filter::TurbulenceFilter,
        seed::Seed,
        shape::{CompositeShape, ShapeLobe},
    },
    config::SoftConfig,
    foundation::core::{Point, Viewport},
    foundation::error::{NubesError, NubesResult},
    foundation::rng::RandomSource,
};

/// Draw how many soft clouds one pass produces for this viewport class.
pub fn soft_count(rng: &mut impl RandomSource, viewport: Viewport, cfg: &SoftConfig) -> u32 {
    let range = if viewport.is_narrow() {
        cfg.count.narrow
    } else {
        cfg.count.wide
    };
    rng.count(range)
}

/// Build one free-floating cloud: a single ellipse centred in a box of the drawn size.
///
/// Draws width, aspect, colour, the filter, top, left and opacity, in that order. Box size,
/// ellipse centre and radii are whole pixels; the radii are clamped so the ellipse stays inside
/// the box. Returns the seed the cloud was drawn from (box centre and size) with the cloud.
pub fn build_soft_cloud(
    rng: &mut impl RandomSource,
    id: String,
    viewport: Viewport,
    cfg: &SoftConfig,
    palette: &[String],
) -> NubesResult<(Seed, Cloud)> {
    let max_w = if viewport.is_narrow() {
        cfg.size.max() * cfg.narrow_size_scale
    } else {
        cfg.size.max()
    };
    let w = rng.range(cfg.size.min(), max_w);
    let h = w * rng.sample(cfg.aspect);
    let color = rng
        .pick(palette)
        .cloned()
        .ok_or_else(|| NubesError::config("clouds.palette must not be empty"))?;
    let filter = TurbulenceFilter::sample(rng, &cfg.filter);

    let size = viewport.size();
    let top = rng.sample(cfg.top) * size.height;
    let left = rng.sample(cfg.left) * size.width;
    let origin = Point::new(left, top);
    let opacity = rng.sample(cfg.opacity);

    let width = w.round().max(1.0);
    let height = h.round().max(1.0);
    let cx = (w / 2.0).round().min(width);
    let cy = (h / 2.0).round().min(height);
    let rx = (w * cfg.radius_scale).round().min(cx).min(width - cx);
    let ry = (h * cfg.radius_scale).round().min(cy).min(height - cy);

    let seed = Seed::new(origin.x + w / 2.0, origin.y + h / 2.0, w, h);
    let shape = CompositeShape {
        width: width as u32,
        height: height as u32,
        origin,
        padding: 0.0,
        lobes: vec![ShapeLobe { cx, cy, rx, ry }],
    };

    Ok((
        seed,
        Cloud {
            id,
            seed_count: 1,
            color,
            opacity,
            filter,
            shape,
        },
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/soft.rs"]
mod tests;
