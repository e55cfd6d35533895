//! External encoder integration.
//!
//! Wraps the ffmpeg and ffprobe command-line tools behind the [`Encoder`]
//! trait so the pipelines can be exercised with mock implementations.

mod encoder;
mod filter;
mod types;

pub use encoder::{Ffmpeg, parse_video_info};
pub use filter::{build_concat_filter, escape_filter_path, subtitles_filter};
pub use types::{BURN_PRESETS, FfmpegError, SubtitleStyle, VideoInfo};

use std::path::Path;

use crate::scenes::Scene;

/// Trait for the operations the pipelines need from the encoder.
#[cfg_attr(test, mockall::automock)]
pub trait Encoder: Send + Sync {
    /// Probe the first video stream.
    fn probe(&self, input: &Path) -> Result<VideoInfo, FfmpegError>;

    /// Whether the file holds a decodable video stream.
    fn has_video_stream(&self, input: &Path) -> Result<bool, FfmpegError>;

    /// Extract mono 16 kHz PCM audio for transcription.
    fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), FfmpegError>;

    /// Trim `segments` out of `input` and join them into `output`.
    fn concat_segments(
        &self,
        input: &Path,
        segments: &[Scene],
        output: &Path,
    ) -> Result<(), FfmpegError>;

    /// Render an SRT file into the video frames.
    fn burn_subtitles(
        &self,
        input: &Path,
        subtitles: &Path,
        output: &Path,
        style: &SubtitleStyle,
    ) -> Result<(), FfmpegError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // ===========================================
    // Filter graph construction
    // ===========================================

    #[test]
    fn test_concat_filter_two_segments() {
        let segments = vec![Scene::new(0.0, 12.0), Scene::new(12.5, 42.25)];
        let filter = build_concat_filter(&segments);

        assert_eq!(
            filter,
            "[0:v]trim=start=0.000:end=12.000,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=start=0.000:end=12.000,asetpts=PTS-STARTPTS[a0];\
             [0:v]trim=start=12.500:end=42.250,setpts=PTS-STARTPTS[v1];\
             [0:a]atrim=start=12.500:end=42.250,asetpts=PTS-STARTPTS[a1];\
             [v0][v1]concat=n=2:v=1:a=0[vout];[a0][a1]concat=n=2:v=0:a=1[aout]"
        );
    }

    #[test]
    fn test_concat_filter_rounds_to_milliseconds() {
        let filter = build_concat_filter(&[Scene::new(1.23456, 2.0)]);
        assert!(filter.starts_with("[0:v]trim=start=1.235:end=2.000"));
        assert!(filter.ends_with("[v0]concat=n=1:v=1:a=0[vout];[a0]concat=n=1:v=0:a=1[aout]"));
    }

    #[test]
    fn test_escape_filter_path() {
        let escaped = escape_filter_path(&PathBuf::from("C:\\videos\\it's.srt"));
        assert_eq!(escaped, "C\\:/videos/it\\'s.srt");
    }

    #[test]
    fn test_subtitles_filter_scales_font_to_script_units() {
        let style = SubtitleStyle::new(56, 1080);
        let filter = subtitles_filter(&PathBuf::from("/out/clip.srt"), &style);

        assert!(filter.starts_with("subtitles='/out/clip.srt'"));
        // 56px on a 1080-line frame -> 56 * 288 / 1080 = 14.9
        assert!(filter.contains("FontSize=15,"));
        assert!(filter.contains("FontName=Calibri"));
        assert!(filter.contains("MarginV=37'"));
    }

    // ===========================================
    // Probe parsing
    // ===========================================

    #[test]
    fn test_parse_video_info() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{
                "streams": [{"width": 1920, "height": 1080, "duration": "120.5"}],
                "format": {"duration": "121.000000"}
            }"#,
        )
        .unwrap();

        let info = parse_video_info(&json).unwrap();
        assert_eq!(info.width, 1920);
        assert_eq!(info.height, 1080);
        assert_eq!(info.duration_sec, 121.0);
    }

    #[test]
    fn test_parse_video_info_stream_duration_fallback() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{"streams": [{"width": 640, "height": 360, "duration": "33.3"}]}"#,
        )
        .unwrap();

        let info = parse_video_info(&json).unwrap();
        assert_eq!(info.duration_sec, 33.3);
    }

    #[test]
    fn test_parse_video_info_without_stream() {
        let json: serde_json::Value = serde_json::from_str(r#"{"streams": []}"#).unwrap();
        assert!(matches!(
            parse_video_info(&json),
            Err(FfmpegError::InvalidOutput(_))
        ));
    }

    // ===========================================
    // Process handling
    // ===========================================

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let ffmpeg = Ffmpeg::with_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        let result = ffmpeg.probe(&PathBuf::from("video.mp4"));

        assert!(matches!(result, Err(FfmpegError::SpawnFailed { .. })));
    }

    #[test]
    fn test_concat_rejects_empty_segments() {
        let ffmpeg = Ffmpeg::new();
        let result = ffmpeg.concat_segments(
            &PathBuf::from("in.mp4"),
            &[],
            &PathBuf::from("out.mp4"),
        );

        assert!(matches!(result, Err(FfmpegError::EmptySegments)));
    }
}
