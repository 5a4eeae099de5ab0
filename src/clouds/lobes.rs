use crate::{
    clouds::{cluster::Cluster, seed::Seed},
    config::{LobeConfig, MAX_LOBES},
    foundation::core::Interval,
    foundation::error::{NubesError, NubesResult},
    foundation::rng::RandomSource,
};

/// One ellipse of a composite shape, before local-frame conversion. Same fields as a [`Seed`].
pub type Lobe = Seed;

/// Normalize `cluster` to a lobe count drawn uniformly from `[cfg.min, cfg.max]`.
///
/// Larger clusters are shuffled and truncated (a random subset of seeds survives). Smaller
/// clusters keep every seed and gain synthesized lobes placed on a vertically squashed ring
/// around the centroid; synthesized heights never drop below `cfg.min_height`. `aspect` is the
/// height/width range used for synthesized lobes.
pub fn build_lobes(
    rng: &mut impl RandomSource,
    cluster: &Cluster,
    cfg: &LobeConfig,
    aspect: Interval,
) -> NubesResult<Vec<Lobe>> {
    let (Some(center), Some((avg_w, _avg_h))) = (cluster.centroid(), cluster.average_size())
    else {
        return Err(NubesError::validation(
            "cannot build lobes from an empty cluster",
        ));
    };
    if cfg.min > cfg.max {
        return Err(NubesError::validation("lobe count min must be <= max"));
    }
    if cfg.max > MAX_LOBES {
        return Err(NubesError::validation(format!(
            "lobe count max must be <= {MAX_LOBES}"
        )));
    }

    let desired = rng.int_range(cfg.min, cfg.max.saturating_add(1)) as usize;
    let mut lobes = cluster.seeds.clone();

    if lobes.len() > desired {
        rng.shuffle(&mut lobes);
        lobes.truncate(desired);
        return Ok(lobes);
    }

    while lobes.len() < desired {
        let angle = rng.range(0.0, std::f64::consts::TAU);
        let radius = avg_w * rng.sample(cfg.offset);
        let x = center.x + angle.cos() * radius;
        let y = center.y + angle.sin() * radius * cfg.vertical_squash;
        let w = avg_w * rng.sample(cfg.size);
        let h = (w * rng.sample(aspect)).max(cfg.min_height);
        lobes.push(Seed { x, y, w, h });
    }

    Ok(lobes)
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/lobes.rs"]
mod tests;
