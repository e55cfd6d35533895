//! Sidecar JSON cache of detected scenes.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::selection::Scene;

/// Errors that can occur while reading or writing the scene cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid video path: {0}")]
    InvalidPath(PathBuf),
}

/// Stores scene lists as `{video_stem}_escenas.json`.
///
/// By default the cache file sits next to the video; a fixed directory can be
/// set instead.
#[derive(Debug, Clone, Default)]
pub struct SceneCache {
    dir: Option<PathBuf>,
}

impl SceneCache {
    /// Cache files next to each video.
    pub fn sidecar() -> Self {
        Self { dir: None }
    }

    /// Cache files in a fixed directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    /// Path of the cache file for `video`.
    pub fn cache_path(&self, video: &Path) -> Result<PathBuf, CacheError> {
        let stem = video
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CacheError::InvalidPath(video.to_path_buf()))?;

        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => video.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Ok(dir.join(format!("{stem}_escenas.json")))
    }

    /// Load cached scenes. `Ok(None)` when no cache file exists.
    pub fn load(&self, video: &Path) -> Result<Option<Vec<Scene>>, CacheError> {
        let path = self.cache_path(video)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&path)?;
        let scenes: Vec<Scene> = serde_json::from_str(&json)?;
        Ok(Some(scenes))
    }

    /// Write the scene list, replacing any previous cache.
    pub fn store(&self, video: &Path, scenes: &[Scene]) -> Result<PathBuf, CacheError> {
        let path = self.cache_path(video)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, serde_json::to_string(scenes)?)?;
        Ok(path)
    }
}
