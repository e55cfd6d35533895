//! Short-clip pipeline: scenes in, highlight clip out.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ffmpeg::{Encoder, FfmpegError};
use crate::scenes::{
    CacheError, Scene, SceneCache, SceneDetector, SelectionConfig, SelectionError,
    select_segments,
};
use crate::subtitles::SubtitleError;
use crate::transcribe::TranscribeError;

/// Encoded shorts at or below this size are treated as failed encodes.
const MIN_OUTPUT_BYTES: u64 = 1024;

/// Errors that can occur while producing a short or a subtitled video.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No video stream in {0}")]
    NoVideoStream(PathBuf),

    #[error("Invalid video path: {0}")]
    InvalidPath(PathBuf),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Encoder error: {0}")]
    Ffmpeg(#[from] FfmpegError),

    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    #[error("Transcription error: {0}")]
    Transcribe(#[from] TranscribeError),

    #[error("Output {path} is too small ({size} bytes)")]
    OutputTooSmall { path: PathBuf, size: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summary of a created short.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortReport {
    pub output: PathBuf,
    pub segments: Vec<Scene>,
    pub total_duration: f64,
    pub target_duration: f64,
    /// Where the first segment starts and the last one ends, in percent of the source.
    pub coverage: (f64, f64),
}

/// Output path of the short for `video`: `{out_dir}/{stem}_corto.mp4`.
pub fn short_output_path(video: &Path, out_dir: &Path) -> Result<PathBuf, PipelineError> {
    let stem = video
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::InvalidPath(video.to_path_buf()))?;
    Ok(out_dir.join(format!("{stem}_corto.mp4")))
}

/// Creates shorts from long videos.
pub struct ShortsPipeline<D: SceneDetector, E: Encoder> {
    detector: D,
    encoder: E,
    cache: SceneCache,
    config: SelectionConfig,
}

impl<D: SceneDetector, E: Encoder> ShortsPipeline<D, E> {
    pub fn new(detector: D, encoder: E, cache: SceneCache, config: SelectionConfig) -> Self {
        Self {
            detector,
            encoder,
            cache,
            config,
        }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Scenes for `video`, read from the cache or detected and then cached.
    pub fn scenes_for(&self, video: &Path) -> Result<Vec<Scene>, PipelineError> {
        match self.cache.load(video) {
            Ok(Some(scenes)) => {
                info!("Loaded {} cached scenes for {}", scenes.len(), video.display());
                return Ok(scenes);
            }
            Ok(None) => {}
            Err(CacheError::InvalidPath(path)) => return Err(PipelineError::InvalidPath(path)),
            Err(e) => warn!("Ignoring scene cache for {}: {}", video.display(), e),
        }

        let scenes = self.detector.detect(video)?;
        info!("Detected {} scenes in {}", scenes.len(), video.display());

        if !scenes.is_empty() {
            match self.cache.store(video, &scenes) {
                Ok(path) => debug!("Scenes cached at {}", path.display()),
                Err(e) => warn!("Could not cache scenes for {}: {}", video.display(), e),
            }
        }

        Ok(scenes)
    }

    /// Build `{out_dir}/{stem}_corto.mp4` from the selected scenes of `video`.
    pub fn create_short(&self, video: &Path, out_dir: &Path) -> Result<ShortReport, PipelineError> {
        if !self.encoder.has_video_stream(video)? {
            return Err(PipelineError::NoVideoStream(video.to_path_buf()));
        }

        let scenes = self.scenes_for(video)?;
        let selection = select_segments(&scenes, &self.config)?;

        info!(
            "Target {:.2}s, selected {} segments totalling {:.2}s",
            selection.target_duration,
            selection.segments.len(),
            selection.total_duration
        );
        for segment in &selection.segments {
            info!(
                "  {:.2}s - {:.2}s ({:.2}s)",
                segment.start,
                segment.end,
                segment.duration()
            );
        }

        std::fs::create_dir_all(out_dir)?;
        let output = short_output_path(video, out_dir)?;
        self.encoder
            .concat_segments(video, &selection.segments, &output)?;

        let size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
        if size <= MIN_OUTPUT_BYTES {
            return Err(PipelineError::OutputTooSmall { path: output, size });
        }

        let coverage = selection.coverage();
        info!(
            "Short written to {} (covers {:.1}% to {:.1}% of the source)",
            output.display(),
            coverage.0,
            coverage.1
        );

        Ok(ShortReport {
            output,
            segments: selection.segments,
            total_duration: selection.total_duration,
            target_duration: selection.target_duration,
            coverage,
        })
    }
}
