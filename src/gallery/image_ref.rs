use crate::{
    config::GalleryConfig,
    foundation::error::{NubesError, NubesResult},
};

/// Which capture of a project an image shows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Desktop capture.
    Primary,
    /// Mobile capture.
    Secondary,
}

impl Device {
    /// Directory name this device's images live under.
    pub fn dir_name(self, cfg: &GalleryConfig) -> &str {
        match self {
            Device::Primary => &cfg.primary_dir,
            Device::Secondary => &cfg.secondary_dir,
        }
    }
}

impl std::str::FromStr for Device {
    type Err = NubesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "desktop" => Ok(Device::Primary),
            "secondary" | "mobile" => Ok(Device::Secondary),
            other => Err(NubesError::validation(format!("unknown device '{other}'"))),
        }
    }
}

/// Image file formats the gallery may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExt {
    Webp,
    Jpeg,
    Jpg,
    Png,
}

impl ImageExt {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageExt::Webp => "webp",
            ImageExt::Jpeg => "jpeg",
            ImageExt::Jpg => "jpg",
            ImageExt::Png => "png",
        }
    }
}

impl std::fmt::Display for ImageExt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageExt {
    type Err = NubesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "webp" => Ok(ImageExt::Webp),
            "jpeg" => Ok(ImageExt::Jpeg),
            "jpg" => Ok(ImageExt::Jpg),
            "png" => Ok(ImageExt::Png),
            other => Err(NubesError::validation(format!(
                "unsupported image extension '{other}'"
            ))),
        }
    }
}

/// Whether an image stands alone or is one frame of a numbered sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Single,
    Sequence,
}

impl Multiplicity {
    pub fn from_count(count: u32) -> Self {
        if count > 1 {
            Multiplicity::Sequence
        } else {
            Multiplicity::Single
        }
    }

    pub fn is_sequence(self) -> bool {
        self == Multiplicity::Sequence
    }
}

/// A logical image slot: one frame of one project's capture for one device.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef {
    folder: String,
    device: Device,
    index: u32,
    count: u32,
}

impl ImageRef {
    /// `folder` is normalized (see [`normalize_folder`]); `count` must be at least 1.
    pub fn new(folder: &str, device: Device, index: u32, count: u32) -> NubesResult<Self> {
        if count == 0 {
            return Err(NubesError::validation("image count must be >= 1"));
        }
        Ok(Self {
            folder: normalize_folder(folder)?,
            device,
            index,
            count,
        })
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn multiplicity(&self) -> Multiplicity {
        Multiplicity::from_count(self.count)
    }

    /// Same slot, different frame.
    pub fn with_index(&self, index: u32) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }

    /// Path without extension: `<root>/<folder>/<device>` plus `-<n>` (1-based, wrapping) for
    /// sequences.
    pub fn base_path(&self, cfg: &GalleryConfig) -> String {
        let dir = self.device.dir_name(cfg);
        let name = if self.multiplicity().is_sequence() {
            format!("{dir}-{}", (self.index % self.count) + 1)
        } else {
            dir.to_string()
        };
        join_path(&[&cfg.root, &self.folder, &name])
    }

    /// Full path for one candidate extension.
    pub fn src(&self, cfg: &GalleryConfig, ext: ImageExt) -> String {
        format!("{}.{ext}", self.base_path(cfg))
    }
}

/// Fixed fallback image shown when no candidate of `device` loads.
pub fn placeholder_src(cfg: &GalleryConfig, device: Device) -> String {
    let file = format!("{}.png", device.dir_name(cfg));
    join_path(&[&cfg.root, &cfg.placeholder_dir, &file])
}

/// Normalize a gallery folder name.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths, parent
/// traversals (`..`) and empty names.
pub fn normalize_folder(folder: &str) -> NubesResult<String> {
    let s = folder.replace('\\', "/");
    if s.starts_with('/') {
        return Err(NubesError::validation("gallery folders must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(NubesError::validation(
                "gallery folders must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(NubesError::validation("gallery folder must be non-empty"));
    }
    Ok(out.join("/"))
}

fn join_path(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/image_ref.rs"]
mod tests;
