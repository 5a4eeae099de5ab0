//! Procedural cloud generation: seeds, clustering, lobes, composite shapes, soft single-ellipse
//! clouds and SVG output.

pub mod cluster;
pub mod field;
pub mod filter;
pub mod lobes;
pub mod raster;
pub mod seed;
pub mod shape;
pub mod soft;
pub mod svg;
