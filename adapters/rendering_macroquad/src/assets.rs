use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use macroquad::texture::Texture2D;
use tinyworld_core::VisualKind;
use tinyworld_rendering::{asset_name, ALL_VISUAL_KINDS};

/// Process-lifetime cache of one texture per renderable kind.
///
/// The registry is constructed once before the first frame; a kind that
/// fails to load aborts construction rather than degrading to a fallback
/// texture. Lookups after construction cannot miss because every kind is
/// preloaded.
#[derive(Debug)]
pub struct AssetRegistry {
    textures: HashMap<VisualKind, Texture2D>,
}

impl AssetRegistry {
    /// Loads every kind's texture from `<dir>/<name>.png`.
    pub fn from_assets_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_loader(dir, default_loader)
    }

    /// Default asset directory relative to the working directory.
    #[must_use]
    pub fn default_assets_dir() -> PathBuf {
        PathBuf::from("assets")
    }

    /// Retrieves the cached texture for the provided kind.
    #[must_use]
    pub fn texture(&self, kind: VisualKind) -> Option<Texture2D> {
        self.textures.get(&kind).copied()
    }

    /// Returns whether the registry holds a texture for the provided kind.
    #[must_use]
    pub fn contains(&self, kind: VisualKind) -> bool {
        self.textures.contains_key(&kind)
    }

    /// Number of textures held by the registry.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Releases every cached texture handle.
    pub fn dispose(self) {
        for texture in self.textures.values() {
            texture.delete();
        }
    }

    fn with_loader(
        dir: impl AsRef<Path>,
        mut loader: impl FnMut(VisualKind, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        let mut textures = HashMap::with_capacity(ALL_VISUAL_KINDS.len());
        for kind in ALL_VISUAL_KINDS {
            let path = dir.join(format!("{}.png", asset_name(kind)));
            let texture = loader(kind, &path).with_context(|| {
                format!("failed to load asset for {kind:?} from {}", path.display())
            })?;
            let _ = textures.insert(kind, texture);
        }
        Ok(Self { textures })
    }
}

fn default_loader(_kind: VisualKind, path: &Path) -> Result<Texture2D> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}
