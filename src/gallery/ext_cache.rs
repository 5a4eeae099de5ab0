use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::gallery::image_ref::{Device, ImageExt, ImageRef, Multiplicity};

/// Cache key: the slot class an extension was learned for.
///
/// Only whether the slot is a sequence matters, not its length, so a folder whose image count
/// changes keeps its entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub folder: String,
    pub device: Device,
    pub class: Multiplicity,
}

impl CacheKey {
    pub fn new(folder: impl Into<String>, device: Device, class: Multiplicity) -> Self {
        Self {
            folder: folder.into(),
            device,
            class,
        }
    }

    pub fn for_image(image: &ImageRef) -> Self {
        Self::new(image.folder(), image.device(), image.multiplicity())
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let device = match self.device {
            Device::Primary => "primary",
            Device::Secondary => "secondary",
        };
        let class = match self.class {
            Multiplicity::Single => "single",
            Multiplicity::Sequence => "multi",
        };
        write!(f, "{}|{device}|{class}", self.folder)
    }
}

/// Remembers the last extension that loaded for each [`CacheKey`].
///
/// Entries are only ever inserted or overwritten (last write wins); nothing is evicted. Shared
/// by reference between concurrent resolutions. A stale entry costs one failed attempt, never a
/// wrong image.
#[derive(Debug, Default)]
pub struct ExtensionCache {
    entries: Mutex<HashMap<CacheKey, ImageExt>>,
}

impl ExtensionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<ImageExt> {
        self.lock().get(key).copied()
    }

    pub fn record(&self, key: CacheKey, ext: ImageExt) {
        self.lock().insert(key, ext);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `defaults` with the cached extension for `key` (if any) moved to the front.
    pub fn candidate_order(&self, key: &CacheKey, defaults: &[ImageExt]) -> Vec<ImageExt> {
        match self.get(key) {
            None => defaults.to_vec(),
            Some(cached) => std::iter::once(cached)
                .chain(defaults.iter().copied().filter(|&ext| ext != cached))
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, ImageExt>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
