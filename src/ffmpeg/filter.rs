//! Filter graph strings.

use std::path::Path;

use crate::scenes::Scene;

use super::types::SubtitleStyle;

/// libass renders SRT input on a 288-line script canvas.
const ASS_PLAY_RES_Y: f64 = 288.0;
/// Distance of the subtitle baseline from the bottom, as a fraction of the height.
const BOTTOM_MARGIN_RATIO: f64 = 0.13;

/// Trim every segment out of input 0 and concatenate video and audio into
/// `[vout]` and `[aout]`.
pub fn build_concat_filter(segments: &[Scene]) -> String {
    let mut parts = Vec::with_capacity(segments.len() * 2 + 1);

    for (i, segment) in segments.iter().enumerate() {
        parts.push(format!(
            "[0:v]trim=start={:.3}:end={:.3},setpts=PTS-STARTPTS[v{i}]",
            segment.start, segment.end
        ));
        parts.push(format!(
            "[0:a]atrim=start={:.3}:end={:.3},asetpts=PTS-STARTPTS[a{i}]",
            segment.start, segment.end
        ));
    }

    let count = segments.len();
    let video_inputs: String = (0..count).map(|i| format!("[v{i}]")).collect();
    let audio_inputs: String = (0..count).map(|i| format!("[a{i}]")).collect();
    parts.push(format!(
        "{video_inputs}concat=n={count}:v=1:a=0[vout];{audio_inputs}concat=n={count}:v=0:a=1[aout]"
    ));

    parts.join(";")
}

/// Escape a path for use inside a quoted filter argument.
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// `subtitles=` filter burning an SRT file with the given style.
pub fn subtitles_filter(srt: &Path, style: &SubtitleStyle) -> String {
    let height = f64::from(style.video_height.max(1));
    let font_size = (f64::from(style.font_size) * ASS_PLAY_RES_Y / height).round().max(1.0);
    let margin = (ASS_PLAY_RES_Y * BOTTOM_MARGIN_RATIO).round();

    format!(
        "subtitles='{}':force_style='FontName={},Bold=1,FontSize={},PrimaryColour=&H00FFFFFF,OutlineColour=&H00000000,BorderStyle=1,Outline=2,Alignment=2,MarginV={}'",
        escape_filter_path(srt),
        style.font_name,
        font_size,
        margin
    )
}
