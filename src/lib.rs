#![forbid(unsafe_code)]
//! `nubes` generates soft procedural cloud backdrops as SVG and resolves gallery images across
//! a list of candidate file formats, remembering which format worked per folder and device.
//!
//! Randomness is injected through [`RandomSource`], so every generation pass is reproducible
//! from a seed or a scripted sequence.

pub mod clouds;
pub mod config;
pub mod foundation;
pub mod gallery;

pub use clouds::{
    cluster::{Cluster, cluster_seeds},
    field::{Cloud, CloudField},
    filter::TurbulenceFilter,
    lobes::{Lobe, build_lobes},
    raster::{rasterize_svg, save_png},
    seed::Seed,
    shape::{CompositeShape, ShapeLobe, build_composite_shape},
    soft::{build_soft_cloud, soft_count},
    svg::{render_field, render_shape},
};
pub use config::{
    CloudConfig, CloudStyle, FilterConfig, GalleryConfig, LobeConfig, MAX_LOBES, NubesConfig,
    SeedCounts, SoftConfig,
};
pub use foundation::core::{CountRange, Interval, Point, Rect, Size, Spread, Vec2, Viewport};
pub use foundation::error::{NubesError, NubesResult};
pub use foundation::rng::{RandomSource, Rng64, SequenceRng};
pub use gallery::{
    ext_cache::{CacheKey, ExtensionCache},
    image_ref::{Device, ImageExt, ImageRef, Multiplicity, placeholder_src},
    resolver::{ImageResolver, LoadOutcome},
    target::{FsImageTarget, ImageTarget, LoadSignal},
};
