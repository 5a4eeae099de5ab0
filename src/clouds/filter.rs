use crate::{config::FilterConfig, foundation::rng::RandomSource};

/// Fractal-noise displacement applied to one composite shape.
///
/// Rendered as `feTurbulence` -> `feDisplacementMap` -> `feGaussianBlur` -> `feComposite`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TurbulenceFilter {
    pub base_frequency: f64,
    pub octaves: u32,
    pub seed: u32,
    pub displacement: u32,
    pub blur: f64,
}

impl TurbulenceFilter {
    /// Draw filter parameters. Frequency keeps 4 decimals and blur keeps 1, matching what
    /// ends up in the serialized markup.
    pub fn sample(rng: &mut impl RandomSource, cfg: &FilterConfig) -> Self {
        let base_frequency = round_to(rng.sample(cfg.base_frequency), 4);
        let octaves = rng.count(cfg.octaves);
        let seed = rng.count(cfg.noise_seed);
        let displacement = rng.count(cfg.displacement);
        let blur = round_to(rng.sample(cfg.blur), 1);
        Self {
            base_frequency,
            octaves,
            seed,
            displacement,
            blur,
        }
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}
