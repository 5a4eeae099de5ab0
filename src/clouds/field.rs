use crate::{
    clouds::{
        cluster::cluster_seeds,
        filter::TurbulenceFilter,
        lobes::build_lobes,
        seed::{Seed, generate_seeds, pick_center, seed_count},
        shape::{CompositeShape, build_composite_shape},
        soft::{build_soft_cloud, soft_count},
    },
    config::{CloudConfig, CloudStyle},
    foundation::core::{Point, Viewport},
    foundation::error::{NubesError, NubesResult},
    foundation::rng::RandomSource,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One rendered cloud: a composite shape plus its paint.
pub struct Cloud {
    /// Document-unique identifier, also used to name the cloud's filter.
    pub id: String,
    /// Number of seeds the cloud was clustered from.
    pub seed_count: usize,
    /// Fill colour for every lobe.
    pub color: String,
    /// Whole-cloud opacity in `[0, 1]`.
    pub opacity: f64,
    /// Edge distortion.
    pub filter: TurbulenceFilter,
    /// Geometry.
    pub shape: CompositeShape,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Output of one generation pass over a viewport.
///
/// For the soft style `center` is the viewport centre and every cloud has exactly one seed.
pub struct CloudField {
    /// Viewport the field was generated for.
    pub viewport: Viewport,
    /// Point the seeds were scattered around.
    pub center: Point,
    /// Raw seeds, in generation order.
    pub seeds: Vec<Seed>,
    /// One cloud per seed cluster, in cluster order.
    pub clouds: Vec<Cloud>,
}

impl CloudField {
    /// Run one full pass with the generator selected by `cfg.style`.
    ///
    /// [`CloudStyle::Clustered`] scatters seeds, clusters them, and turns every cluster into a
    /// multi-lobe cloud. [`CloudStyle::Soft`] spreads independent single-ellipse clouds over
    /// the viewport.
    #[tracing::instrument(skip(rng, cfg), fields(style = ?cfg.style))]
    pub fn generate(
        rng: &mut impl RandomSource,
        viewport: Viewport,
        cfg: &CloudConfig,
    ) -> NubesResult<Self> {
        cfg.validate()?;
        match cfg.style {
            CloudStyle::Clustered => Self::clustered(rng, viewport, cfg),
            CloudStyle::Soft => Self::soft(rng, viewport, cfg),
        }
    }

    fn soft(rng: &mut impl RandomSource, viewport: Viewport, cfg: &CloudConfig) -> NubesResult<Self> {
        let n = soft_count(rng, viewport, &cfg.soft) as usize;
        let mut seeds = Vec::with_capacity(n);
        let mut clouds = Vec::with_capacity(n);
        for i in 0..n {
            let (seed, cloud) =
                build_soft_cloud(rng, format!("cloud-{i}"), viewport, &cfg.soft, &cfg.palette)?;
            seeds.push(seed);
            clouds.push(cloud);
        }

        tracing::info!(clouds = clouds.len(), "generated soft cloud field");

        let size = viewport.size();
        Ok(Self {
            viewport,
            center: Point::new(size.width / 2.0, size.height / 2.0),
            seeds,
            clouds,
        })
    }

    fn clustered(
        rng: &mut impl RandomSource,
        viewport: Viewport,
        cfg: &CloudConfig,
    ) -> NubesResult<Self> {
        let center = pick_center(rng, viewport, cfg);
        let n = seed_count(rng, viewport, cfg) as usize;
        let seeds = generate_seeds(rng, n, viewport, center, cfg.spread, cfg);
        let clusters = cluster_seeds(&seeds, cfg.merge_factor);

        let mut clouds = Vec::with_capacity(clusters.len());
        for (i, cluster) in clusters.iter().enumerate() {
            let color = rng
                .pick(&cfg.palette)
                .cloned()
                .ok_or_else(|| NubesError::config("clouds.palette must not be empty"))?;
            let filter = TurbulenceFilter::sample(rng, &cfg.filter);
            let lobes = build_lobes(rng, cluster, &cfg.lobes, cfg.aspect)?;
            let shape = build_composite_shape(rng, &lobes, cfg.padding, cfg.radius_jitter)?;
            let opacity = rng.sample(cfg.opacity);

            tracing::debug!(
                cloud = i,
                seeds = cluster.len(),
                lobes = shape.lobes.len(),
                width = shape.width,
                height = shape.height,
                "built cloud"
            );

            clouds.push(Cloud {
                id: format!("cloud-{i}"),
                seed_count: cluster.len(),
                color,
                opacity,
                filter,
                shape,
            });
        }

        tracing::info!(seeds = seeds.len(), clouds = clouds.len(), "generated cloud field");

        Ok(Self {
            viewport,
            center,
            seeds,
            clouds,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clouds/field.rs"]
mod tests;
