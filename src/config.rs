//! JSON configuration for cloud generation and gallery image resolution.
//!
//! Every field has a default, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "clouds": { "merge_factor": 0.8, "lobes": { "min": 5, "max": 7 } } }
//! ```

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::{CountRange, Interval, Spread},
    foundation::error::{NubesError, NubesResult},
    gallery::image_ref::ImageExt,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Root configuration document.
pub struct NubesConfig {
    /// Cloud field generation parameters.
    pub clouds: CloudConfig,
    /// Gallery image resolution parameters.
    pub gallery: GalleryConfig,
}

impl NubesConfig {
    /// Parse a configuration from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> NubesResult<Self> {
        serde_json::from_reader(r).map_err(|e| NubesError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse and validate a configuration file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> NubesResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            NubesError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate both sections.
    pub fn validate(&self) -> NubesResult<()> {
        self.clouds.validate()?;
        self.gallery.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters of one cloud field generation pass.
pub struct CloudConfig {
    /// Which generator [`crate::CloudField::generate`] runs.
    pub style: CloudStyle,
    /// Seed width range in pixels.
    pub size: Interval,
    /// Factor applied to `size.max` on narrow viewports.
    pub narrow_size_scale: f64,
    /// Seed height as a fraction of its width.
    pub aspect: Interval,
    /// Number of seeds per pass.
    pub seeds: SeedCounts,
    /// Seed jitter around the field centre, as viewport fractions.
    pub spread: Spread,
    /// Field centre x, as a fraction of viewport width.
    pub center_x: Interval,
    /// Field centre y, as a fraction of viewport height.
    pub center_y: Interval,
    /// Seeds merge when their distance is below `merge_factor` times their average size.
    pub merge_factor: f64,
    /// Padding added on every side of a composite shape's bounding box.
    pub padding: Interval,
    /// Lobe count normalization.
    pub lobes: LobeConfig,
    /// Rendered radius as a fraction of the lobe's full width/height.
    pub radius_jitter: Interval,
    /// Whole-shape opacity.
    pub opacity: Interval,
    /// Per-shape noise distortion.
    pub filter: FilterConfig,
    /// Fill colours, one picked per shape.
    pub palette: Vec<String>,
    /// Parameters of the [`CloudStyle::Soft`] generator.
    pub soft: SoftConfig,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            style: CloudStyle::default(),
            size: Interval(220.0, 700.0),
            narrow_size_scale: 0.7,
            aspect: Interval(0.45, 0.7),
            seeds: SeedCounts::default(),
            spread: Spread { x: 0.18, y: 0.12 },
            center_x: Interval(0.3, 0.7),
            center_y: Interval(0.2, 0.6),
            merge_factor: 0.9,
            padding: Interval(14.0, 28.0),
            lobes: LobeConfig::default(),
            radius_jitter: Interval(0.45, 0.55),
            opacity: Interval(0.62, 0.95),
            filter: FilterConfig::default(),
            palette: vec![
                "#ffffff".to_string(),
                "#fff6e5".to_string(),
                "#ffe1ec".to_string(),
                "#ece3ff".to_string(),
                "#ffe5d4".to_string(),
            ],
            soft: SoftConfig::default(),
        }
    }
}

impl CloudConfig {
    /// Check every range and scalar for usable values.
    pub fn validate(&self) -> NubesResult<()> {
        self.size.validate("clouds.size")?;
        if self.size.min() <= 0.0 {
            return Err(NubesError::config("clouds.size must be > 0"));
        }
        if !(self.narrow_size_scale > 0.0 && self.narrow_size_scale <= 1.0) {
            return Err(NubesError::config(
                "clouds.narrow_size_scale must be in (0, 1]",
            ));
        }
        if self.size.min() > self.size.max() * self.narrow_size_scale {
            return Err(NubesError::config(
                "clouds.size min exceeds the narrow-viewport max",
            ));
        }
        self.aspect.validate("clouds.aspect")?;
        if self.aspect.min() <= 0.0 {
            return Err(NubesError::config("clouds.aspect must be > 0"));
        }
        self.seeds.narrow.validate("clouds.seeds.narrow")?;
        self.seeds.wide.validate("clouds.seeds.wide")?;
        if self.seeds.narrow.0 == 0 || self.seeds.wide.0 == 0 {
            return Err(NubesError::config("clouds.seeds must produce at least one seed"));
        }
        self.center_x.validate("clouds.center_x")?;
        self.center_y.validate("clouds.center_y")?;
        if !(self.merge_factor.is_finite() && self.merge_factor > 0.0) {
            return Err(NubesError::config("clouds.merge_factor must be finite and > 0"));
        }
        self.padding.validate("clouds.padding")?;
        if self.padding.min() < 0.0 {
            return Err(NubesError::config("clouds.padding must be >= 0"));
        }
        self.lobes.validate()?;
        self.radius_jitter.validate("clouds.radius_jitter")?;
        if self.radius_jitter.min() <= 0.0 {
            return Err(NubesError::config("clouds.radius_jitter must be > 0"));
        }
        self.opacity.validate("clouds.opacity")?;
        if self.opacity.min() < 0.0 || self.opacity.max() > 1.0 {
            return Err(NubesError::config("clouds.opacity must lie in [0, 1]"));
        }
        self.filter.validate()?;
        if self.palette.is_empty() {
            return Err(NubesError::config("clouds.palette must not be empty"));
        }
        self.soft.validate()
    }
}

/// Cloud generator variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudStyle {
    /// Seeds scattered around one centre, merged by proximity into multi-lobe shapes.
    #[default]
    Clustered,
    /// Independent single-ellipse clouds spread over the whole viewport.
    Soft,
}

impl std::str::FromStr for CloudStyle {
    type Err = NubesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clustered" => Ok(CloudStyle::Clustered),
            "soft" => Ok(CloudStyle::Soft),
            other => Err(NubesError::validation(format!("unknown cloud style '{other}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters of the soft generator: one filtered ellipse per cloud, no clustering.
pub struct SoftConfig {
    /// Number of clouds per pass.
    pub count: SeedCounts,
    /// Cloud width range in pixels.
    pub size: Interval,
    /// Factor applied to `size.max` on narrow viewports.
    pub narrow_size_scale: f64,
    /// Cloud height as a fraction of its width.
    pub aspect: Interval,
    /// Ellipse radius as a fraction of the cloud's width/height, at most 0.5.
    pub radius_scale: f64,
    /// Top edge, as a fraction of viewport height (may start above the viewport).
    pub top: Interval,
    /// Left edge, as a fraction of viewport width (may start left of the viewport).
    pub left: Interval,
    /// Whole-cloud opacity.
    pub opacity: Interval,
    /// Per-cloud noise distortion.
    pub filter: FilterConfig,
}

impl Default for SoftConfig {
    fn default() -> Self {
        Self {
            count: SeedCounts {
                narrow: CountRange(6, 12),
                wide: CountRange(12, 22),
            },
            size: Interval(120.0, 350.0),
            narrow_size_scale: 0.65,
            aspect: Interval(0.45, 0.7),
            radius_scale: 0.38,
            top: Interval(-0.08, 0.85),
            left: Interval(-0.10, 0.95),
            opacity: Interval(0.6, 0.95),
            filter: FilterConfig {
                displacement: CountRange(15, 40),
                blur: Interval(2.0, 5.0),
                ..FilterConfig::default()
            },
        }
    }
}

impl SoftConfig {
    pub(crate) fn validate(&self) -> NubesResult<()> {
        self.count.narrow.validate("clouds.soft.count.narrow")?;
        self.count.wide.validate("clouds.soft.count.wide")?;
        self.size.validate("clouds.soft.size")?;
        if self.size.min() <= 0.0 {
            return Err(NubesError::config("clouds.soft.size must be > 0"));
        }
        if !(self.narrow_size_scale > 0.0 && self.narrow_size_scale <= 1.0) {
            return Err(NubesError::config(
                "clouds.soft.narrow_size_scale must be in (0, 1]",
            ));
        }
        if self.size.min() > self.size.max() * self.narrow_size_scale {
            return Err(NubesError::config(
                "clouds.soft.size min exceeds the narrow-viewport max",
            ));
        }
        self.aspect.validate("clouds.soft.aspect")?;
        if self.aspect.min() <= 0.0 {
            return Err(NubesError::config("clouds.soft.aspect must be > 0"));
        }
        if !(self.radius_scale > 0.0 && self.radius_scale <= 0.5) {
            return Err(NubesError::config(
                "clouds.soft.radius_scale must be in (0, 0.5]",
            ));
        }
        self.top.validate("clouds.soft.top")?;
        self.left.validate("clouds.soft.left")?;
        self.opacity.validate("clouds.soft.opacity")?;
        if self.opacity.min() < 0.0 || self.opacity.max() > 1.0 {
            return Err(NubesError::config("clouds.soft.opacity must lie in [0, 1]"));
        }
        self.filter.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Seed count ranges by viewport class.
pub struct SeedCounts {
    /// Used when the viewport is narrow.
    pub narrow: CountRange,
    /// Used otherwise.
    pub wide: CountRange,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            narrow: CountRange(8, 12),
            wide: CountRange(12, 18),
        }
    }
}

/// Upper bound on lobes per composite shape.
pub const MAX_LOBES: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Lobe count normalization and synthesis parameters.
pub struct LobeConfig {
    /// Smallest lobe count (inclusive).
    pub min: u32,
    /// Largest lobe count (inclusive).
    pub max: u32,
    /// Distance of a synthesized lobe from the cluster centroid, as a fraction of average width.
    pub offset: Interval,
    /// Width of a synthesized lobe, as a fraction of average width.
    pub size: Interval,
    /// Floor for the height of synthesized lobes.
    pub min_height: f64,
    /// Vertical compression of the synthesized lobe ring.
    pub vertical_squash: f64,
}

impl Default for LobeConfig {
    fn default() -> Self {
        Self {
            min: 8,
            max: 12,
            offset: Interval(0.08, 0.22),
            size: Interval(0.75, 1.15),
            min_height: 20.0,
            vertical_squash: 0.6,
        }
    }
}

impl LobeConfig {
    pub(crate) fn validate(&self) -> NubesResult<()> {
        if self.min == 0 {
            return Err(NubesError::config("clouds.lobes.min must be >= 1"));
        }
        if self.min > self.max {
            return Err(NubesError::config("clouds.lobes.min must be <= max"));
        }
        if self.max > MAX_LOBES {
            return Err(NubesError::config(format!(
                "clouds.lobes.max must be <= {MAX_LOBES}"
            )));
        }
        self.offset.validate("clouds.lobes.offset")?;
        self.size.validate("clouds.lobes.size")?;
        if self.size.min() <= 0.0 {
            return Err(NubesError::config("clouds.lobes.size must be > 0"));
        }
        if !(self.min_height.is_finite() && self.min_height > 0.0) {
            return Err(NubesError::config("clouds.lobes.min_height must be > 0"));
        }
        if !self.vertical_squash.is_finite() {
            return Err(NubesError::config("clouds.lobes.vertical_squash must be finite"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Ranges for the per-shape fractal-noise displacement filter.
pub struct FilterConfig {
    /// Noise base frequency.
    pub base_frequency: Interval,
    /// Noise octave count.
    pub octaves: CountRange,
    /// Noise seed.
    pub noise_seed: CountRange,
    /// Displacement map scale.
    pub displacement: CountRange,
    /// Gaussian blur standard deviation.
    pub blur: Interval,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            base_frequency: Interval(0.01, 0.04),
            octaves: CountRange(2, 5),
            noise_seed: CountRange(1, 9999),
            displacement: CountRange(18, 44),
            blur: Interval(2.5, 5.5),
        }
    }
}

impl FilterConfig {
    pub(crate) fn validate(&self) -> NubesResult<()> {
        self.base_frequency.validate("clouds.filter.base_frequency")?;
        if self.base_frequency.min() < 0.0 {
            return Err(NubesError::config("clouds.filter.base_frequency must be >= 0"));
        }
        self.octaves.validate("clouds.filter.octaves")?;
        if self.octaves.0 == 0 {
            return Err(NubesError::config("clouds.filter.octaves must be >= 1"));
        }
        self.noise_seed.validate("clouds.filter.noise_seed")?;
        self.displacement.validate("clouds.filter.displacement")?;
        self.blur.validate("clouds.filter.blur")?;
        if self.blur.min() < 0.0 {
            return Err(NubesError::config("clouds.filter.blur must be >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Where gallery images live and which formats to try.
pub struct GalleryConfig {
    /// Gallery directory, relative to the site root.
    pub root: String,
    /// Candidate order for images that belong to a multi-image sequence.
    pub sequence_extensions: Vec<ImageExt>,
    /// Candidate order for standalone images.
    pub single_extensions: Vec<ImageExt>,
    /// Directory name used for primary (desktop) captures.
    pub primary_dir: String,
    /// Directory name used for secondary (mobile) captures.
    pub secondary_dir: String,
    /// Directory under `root` holding one `<device>.png` placeholder per device.
    pub placeholder_dir: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            root: "gallery".to_string(),
            sequence_extensions: vec![ImageExt::Webp, ImageExt::Jpeg, ImageExt::Jpg, ImageExt::Png],
            single_extensions: vec![ImageExt::Webp, ImageExt::Png, ImageExt::Jpg, ImageExt::Jpeg],
            primary_dir: "desktop".to_string(),
            secondary_dir: "mobile".to_string(),
            placeholder_dir: "_placeholder".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Reject empty candidate lists and path segments that would escape the gallery root.
    pub fn validate(&self) -> NubesResult<()> {
        if self.sequence_extensions.is_empty() || self.single_extensions.is_empty() {
            return Err(NubesError::config(
                "gallery extension lists must not be empty",
            ));
        }
        for (name, seg) in [
            ("gallery.primary_dir", &self.primary_dir),
            ("gallery.secondary_dir", &self.secondary_dir),
            ("gallery.placeholder_dir", &self.placeholder_dir),
        ] {
            if seg.is_empty() || seg.contains('/') || seg.contains('\\') || seg == ".." {
                return Err(NubesError::config(format!(
                    "{name} must be a single non-empty path segment"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
