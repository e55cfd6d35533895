//! Scene boundary detection with ffmpeg's scene score.

use std::path::Path;

use tracing::{debug, info};

use crate::ffmpeg::{Encoder, Ffmpeg, FfmpegError};

use super::selection::Scene;

/// Cut points closer than this to the previous boundary are ignored.
const MIN_CUT_GAP_SECS: f64 = 0.5;

/// Finds scene boundaries in a video.
#[cfg_attr(test, mockall::automock)]
pub trait SceneDetector: Send + Sync {
    /// Ordered, contiguous scenes covering the video. Empty when nothing was found.
    fn detect(&self, video: &Path) -> Result<Vec<Scene>, FfmpegError>;
}

/// Detector backed by `select='gt(scene,T)',showinfo`.
pub struct FfmpegSceneDetector {
    ffmpeg: Ffmpeg,
    threshold: f64,
}

impl FfmpegSceneDetector {
    pub fn new(ffmpeg: Ffmpeg, threshold: f64) -> Self {
        Self { ffmpeg, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl SceneDetector for FfmpegSceneDetector {
    fn detect(&self, video: &Path) -> Result<Vec<Scene>, FfmpegError> {
        let info = self.ffmpeg.probe(video)?;
        info!(
            "Detecting scenes in {} ({:.2}s, threshold {})",
            video.display(),
            info.duration_sec,
            self.threshold
        );

        let filter = format!("select='gt(scene,{})',showinfo", self.threshold);
        let mut command = self.ffmpeg.ffmpeg_command();
        command
            .args(["-hide_banner", "-i"])
            .arg(video)
            .args(["-filter:v", filter.as_str(), "-an", "-f", "null", "-"]);

        let output = Ffmpeg::run(command, "ffmpeg")?;
        let cuts = parse_cut_points(&String::from_utf8_lossy(&output.stderr));
        debug!("{} cut points found", cuts.len());

        Ok(scenes_from_cuts(&cuts, info.duration_sec))
    }
}

/// Extract `pts_time:` values from showinfo log lines.
pub fn parse_cut_points(log: &str) -> Vec<f64> {
    log.lines()
        .filter(|line| line.contains("showinfo"))
        .filter_map(|line| line.split("pts_time:").nth(1))
        .filter_map(|rest| rest.split_whitespace().next())
        .filter_map(|value| value.parse::<f64>().ok())
        .collect()
}

/// Turn cut points into contiguous scenes from 0 to `duration`.
pub fn scenes_from_cuts(cuts: &[f64], duration: f64) -> Vec<Scene> {
    if duration <= 0.0 {
        return Vec::new();
    }

    let mut boundaries = vec![0.0];
    for &cut in cuts {
        let previous = boundaries[boundaries.len() - 1];
        if cut - previous >= MIN_CUT_GAP_SECS && duration - cut >= MIN_CUT_GAP_SECS {
            boundaries.push(cut);
        }
    }
    boundaries.push(duration);

    boundaries
        .windows(2)
        .map(|pair| Scene::new(pair[0], pair[1]))
        .collect()
}
