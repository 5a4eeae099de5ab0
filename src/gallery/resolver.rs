use crate::{
    config::GalleryConfig,
    foundation::error::NubesResult,
    gallery::{
        ext_cache::{CacheKey, ExtensionCache},
        image_ref::{Device, ImageExt, ImageRef, Multiplicity, normalize_folder, placeholder_src},
        target::{ImageTarget, LoadSignal},
    },
};

/// How a fallback chain ended. Either way the target shows something.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A candidate loaded; its extension is now cached for the slot class.
    Loaded { src: String, ext: ImageExt },
    /// Every candidate failed and the target was pointed at the device placeholder.
    Placeholder { src: String },
}

impl LoadOutcome {
    pub fn src(&self) -> &str {
        match self {
            LoadOutcome::Loaded { src, .. } | LoadOutcome::Placeholder { src } => src,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, LoadOutcome::Placeholder { .. })
    }
}

/// Picks the first working file format for gallery images, learning as it goes.
///
/// Owns its [`ExtensionCache`]; independent resolvers never share entries.
#[derive(Debug)]
pub struct ImageResolver {
    config: GalleryConfig,
    cache: ExtensionCache,
}

impl ImageResolver {
    pub fn new(config: GalleryConfig) -> NubesResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: ExtensionCache::new(),
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn cache(&self) -> &ExtensionCache {
        &self.cache
    }

    fn defaults(&self, class: Multiplicity) -> &[ImageExt] {
        match class {
            Multiplicity::Sequence => &self.config.sequence_extensions,
            Multiplicity::Single => &self.config.single_extensions,
        }
    }

    /// Extensions to try, in order, for a slot class.
    ///
    /// The configured default for the class, with the last extension that worked for this
    /// `(folder, device, class)` moved to the front. `folder` is normalized the same way
    /// [`ImageRef::new`] normalizes it, so `"studio/"` and `"studio"` share an entry.
    pub fn resolve_candidate_order(
        &self,
        folder: &str,
        device: Device,
        is_sequence: bool,
    ) -> NubesResult<Vec<ImageExt>> {
        let class = if is_sequence {
            Multiplicity::Sequence
        } else {
            Multiplicity::Single
        };
        let key = CacheKey::new(normalize_folder(folder)?, device, class);
        Ok(self.cache.candidate_order(&key, self.defaults(class)))
    }

    /// Best-guess source for prefetching: the front candidate, unverified.
    pub fn resolve_direct_src(&self, image: &ImageRef) -> String {
        let key = CacheKey::for_image(image);
        let order = self.cache.candidate_order(&key, self.defaults(key.class));
        match order.first() {
            Some(&ext) => image.src(&self.config, ext),
            None => placeholder_src(&self.config, image.device()),
        }
    }

    /// Try each candidate on `target` in order, one at a time, until one loads.
    ///
    /// A success caches its extension. If all fail, `target` is pointed at the device
    /// placeholder. Completes after at most one load per candidate plus the placeholder.
    #[tracing::instrument(
        skip(self, target),
        fields(folder = image.folder(), device = ?image.device(), index = image.index())
    )]
    pub async fn load_with_fallback<T: ImageTarget>(
        &self,
        target: &mut T,
        image: &ImageRef,
    ) -> LoadOutcome {
        let key = CacheKey::for_image(image);
        let candidates = self.cache.candidate_order(&key, self.defaults(key.class));

        for ext in candidates {
            let src = image.src(&self.config, ext);
            match target.load(&src).await {
                LoadSignal::Loaded => {
                    tracing::debug!(%src, "image resolved");
                    self.cache.record(key, ext);
                    return LoadOutcome::Loaded { src, ext };
                }
                LoadSignal::Failed => tracing::debug!(%src, "candidate failed, trying next"),
            }
        }

        let src = placeholder_src(&self.config, image.device());
        tracing::warn!(%src, key = %key, "no candidate loaded, using placeholder");
        // The placeholder is terminal whether or not it loads.
        if target.load(&src).await == LoadSignal::Failed {
            tracing::debug!(%src, "placeholder failed to load");
        }
        LoadOutcome::Placeholder { src }
    }

    /// Resolve both device captures of one sequence frame concurrently.
    pub async fn load_pair<P: ImageTarget, S: ImageTarget>(
        &self,
        primary: &mut P,
        secondary: &mut S,
        folder: &str,
        index: u32,
        count: u32,
    ) -> NubesResult<(LoadOutcome, LoadOutcome)> {
        let primary_ref = ImageRef::new(folder, Device::Primary, index, count)?;
        let secondary_ref = ImageRef::new(folder, Device::Secondary, index, count)?;
        Ok(futures::future::join(
            self.load_with_fallback(primary, &primary_ref),
            self.load_with_fallback(secondary, &secondary_ref),
        )
        .await)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/resolver.rs"]
mod tests;
