//! Gallery image addressing and format-fallback loading.

pub mod ext_cache;
pub mod image_ref;
pub mod resolver;
pub mod target;
