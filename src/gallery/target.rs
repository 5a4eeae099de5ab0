use std::{
    future::Future,
    path::{Path, PathBuf},
};

/// Result of pointing a target at one source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSignal {
    Loaded,
    Failed,
}

/// Something that displays an image from a source path and reports whether it loaded.
///
/// Each call replaces the target's current source; the returned future completes once the
/// load has succeeded or failed.
pub trait ImageTarget {
    fn load(&mut self, src: &str) -> impl Future<Output = LoadSignal>;

    /// Source most recently handed to [`ImageTarget::load`].
    fn current_src(&self) -> Option<&str>;
}

/// Target backed by a site directory: a source loads when the file exists under `site_root`
/// and decodes as an image.
#[derive(Clone, Debug)]
pub struct FsImageTarget {
    site_root: PathBuf,
    current: Option<String>,
    dimensions: Option<(u32, u32)>,
}

impl FsImageTarget {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            current: None,
            dimensions: None,
        }
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Pixel size of the last successfully loaded source.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn decode(&self, src: &str) -> anyhow::Result<(u32, u32)> {
        use anyhow::Context as _;

        let path = self.site_root.join(Path::new(src));
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        let img = image::load_from_memory(&bytes)
            .with_context(|| format!("decode image '{}'", path.display()))?;
        Ok((img.width(), img.height()))
    }
}

impl ImageTarget for FsImageTarget {
    async fn load(&mut self, src: &str) -> LoadSignal {
        self.current = Some(src.to_string());
        match self.decode(src) {
            Ok(dims) => {
                self.dimensions = Some(dims);
                LoadSignal::Loaded
            }
            Err(err) => {
                tracing::debug!(src, error = %format!("{err:#}"), "image candidate failed");
                self.dimensions = None;
                LoadSignal::Failed
            }
        }
    }

    fn current_src(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
