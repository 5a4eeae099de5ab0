use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{NubesError, NubesResult};

/// Parse `svg` with usvg and rasterize it with resvg at its intrinsic size.
///
/// Returns straight (non-premultiplied) RGBA8.
pub fn rasterize_svg(svg: &str) -> NubesResult<image::RgbaImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        NubesError::render(format!(
            "cannot allocate {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    image::RgbaImage::from_raw(size.width(), size.height(), rgba)
        .ok_or_else(|| NubesError::render("pixmap size does not match its pixel buffer"))
}

/// Write `img` as PNG, creating parent directories as needed.
pub fn save_png(img: &image::RgbaImage, path: impl AsRef<Path>) -> NubesResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
