//! Folder batch: subtitle every input video, then cut shorts.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::ffmpeg::{Encoder, SubtitleStyle};
use crate::llm::{Translator, needs_translation, translate_segments};
use crate::scenes::SceneDetector;
use crate::subtitles::{subtitle_font_size, write_srt};
use crate::transcribe::{RetryPolicy, Transcriber, transcribe_with_retry};

use super::shorts::{PipelineError, ShortsPipeline};

/// Extensions picked up from the input folder.
pub const INPUT_EXTENSIONS: [&str; 2] = ["mp4", "ts"];

/// Working folders of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct Folders {
    pub input: PathBuf,
    pub output: PathBuf,
    pub shorts: PathBuf,
}

impl Folders {
    /// `Entrada`, `Salida` and `Cortos` under `base`.
    pub fn under(base: &Path) -> Self {
        Self {
            input: base.join("Entrada"),
            output: base.join("Salida"),
            shorts: base.join("Cortos"),
        }
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [&self.input, &self.output, &self.shorts] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Files in `dir` with one of `extensions` (case-insensitive), sorted by name.
pub fn list_videos(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    let mut videos: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        })
        .collect();
    videos.sort();
    Ok(videos)
}

/// Counters for a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub subtitled: usize,
    pub skipped: usize,
    pub failed: usize,
    pub shorts: usize,
    pub shorts_failed: usize,
}

/// Subtitles and shortens every video of a folder tree.
pub struct VideoBatch<D: SceneDetector, E: Encoder, T: Transcriber> {
    shorts: ShortsPipeline<D, E>,
    transcriber: T,
    folders: Folders,
    language: Option<String>,
    translation: Option<(Box<dyn Translator>, String)>,
    retry: RetryPolicy,
}

impl<D: SceneDetector, E: Encoder, T: Transcriber> VideoBatch<D, E, T> {
    pub fn new(shorts: ShortsPipeline<D, E>, transcriber: T, folders: Folders) -> Self {
        Self {
            shorts,
            transcriber,
            folders,
            language: None,
            translation: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Translate fresh transcriptions into `target` before writing the SRT.
    pub fn with_translation(mut self, translator: Box<dyn Translator>, target: String) -> Self {
        self.translation = Some((translator, target));
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn folders(&self) -> &Folders {
        &self.folders
    }

    fn output_paths(&self, video: &Path) -> Result<(PathBuf, PathBuf), PipelineError> {
        let stem = video
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PipelineError::InvalidPath(video.to_path_buf()))?;
        Ok((
            self.folders.output.join(format!("{stem}.mp4")),
            self.folders.output.join(format!("{stem}.srt")),
        ))
    }

    /// Subtitled video and SRT both exist and the video is playable.
    pub fn is_processed(&self, video: &Path) -> bool {
        let Ok((output, srt)) = self.output_paths(video) else {
            return false;
        };
        if !output.exists() || !srt.exists() {
            return false;
        }

        let non_empty = std::fs::metadata(&output).is_ok_and(|m| m.len() > 0);
        non_empty && matches!(self.shorts.encoder().has_video_stream(&output), Ok(true))
    }

    fn burn(&self, video: &Path, srt: &Path, output: &Path) -> Result<(), PipelineError> {
        let info = self.shorts.encoder().probe(video)?;
        let style = SubtitleStyle::new(subtitle_font_size(info.width), info.height);
        info!(
            "Burning subtitles into {} ({}x{}, font {}px)",
            video.display(),
            info.width,
            info.height,
            style.font_size
        );
        self.shorts
            .encoder()
            .burn_subtitles(video, srt, output, &style)?;
        Ok(())
    }

    /// Produce `Salida/{stem}.mp4` and `Salida/{stem}.srt` for one video.
    ///
    /// An existing SRT is reused; otherwise the audio is transcribed first,
    /// then translated when a target language is set.
    pub fn subtitle_video(&self, video: &Path) -> Result<PathBuf, PipelineError> {
        let (output, srt) = self.output_paths(video)?;

        if srt.exists() {
            info!("Reusing existing subtitles {}", srt.display());
            self.burn(video, &srt, &output)?;
            return Ok(output);
        }

        let audio = srt.with_extension("wav");
        self.shorts.encoder().extract_audio(video, &audio)?;
        let transcribed = transcribe_with_retry(
            &self.transcriber,
            &audio,
            self.language.as_deref(),
            &self.retry,
        );
        if let Err(e) = std::fs::remove_file(&audio) {
            warn!("Could not remove {}: {}", audio.display(), e);
        }

        let mut segments = transcribed?;
        info!("{} subtitle segments", segments.len());

        if let Some((translator, target)) = &self.translation
            && needs_translation(self.language.as_deref(), target)
        {
            let source = self.language.as_deref().unwrap_or("auto");
            segments = translate_segments(translator.as_ref(), &segments, source, target);
        }

        write_srt(&segments, &srt)?;

        self.burn(video, &srt, &output)?;
        Ok(output)
    }

    fn create_shorts(&self, videos: &[PathBuf], summary: &mut BatchSummary) {
        for video in videos {
            match self.shorts.create_short(video, &self.folders.shorts) {
                Ok(report) => {
                    info!("Short created: {}", report.output.display());
                    summary.shorts += 1;
                }
                Err(e) => {
                    error!("Could not create short for {}: {}", video.display(), e);
                    summary.shorts_failed += 1;
                }
            }
        }
    }

    /// Run the batch. Failures are logged per video and counted.
    pub fn run(&self, skip_subtitles: bool) -> Result<BatchSummary, PipelineError> {
        self.folders.ensure()?;
        let mut summary = BatchSummary::default();

        let inputs = list_videos(&self.folders.input, &INPUT_EXTENSIONS)?;
        if inputs.is_empty() {
            warn!("No videos found in {}", self.folders.input.display());
        }

        if skip_subtitles {
            info!("Skipping subtitles, creating shorts from {}", self.folders.input.display());
            self.create_shorts(&inputs, &mut summary);
            return Ok(summary);
        }

        for (i, video) in inputs.iter().enumerate() {
            info!("[{}/{}] {}", i + 1, inputs.len(), video.display());

            if self.is_processed(video) {
                info!("Already processed, skipping");
                summary.skipped += 1;
                continue;
            }

            match self.subtitle_video(video) {
                Ok(output) => {
                    info!("Subtitled video written to {}", output.display());
                    summary.subtitled += 1;
                }
                Err(e) => {
                    error!("Failed to subtitle {}: {}", video.display(), e);
                    summary.failed += 1;
                }
            }
        }

        let outputs = list_videos(&self.folders.output, &["mp4"])?;
        self.create_shorts(&outputs, &mut summary);

        Ok(summary)
    }
}
