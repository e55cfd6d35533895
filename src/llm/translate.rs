//! Subtitle translation.

use tracing::{info, warn};

use crate::subtitles::SubtitleSegment;

use super::Translator;

/// Translate each segment's text, keeping its timing.
///
/// Blank lines stay blank. A line whose translation fails or comes back
/// empty keeps its original text.
pub fn translate_segments(
    translator: &dyn Translator,
    segments: &[SubtitleSegment],
    source: &str,
    target: &str,
) -> Vec<SubtitleSegment> {
    info!(
        "Translating {} segments from {} to {}",
        segments.len(),
        source,
        target
    );

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let original = segment.text.trim();
            let text = if original.is_empty() {
                String::new()
            } else {
                match translator.translate(original, source, target) {
                    Ok(translated) if !translated.trim().is_empty() => {
                        translated.trim().to_string()
                    }
                    Ok(_) => {
                        warn!("Segment {} came back empty, keeping original", i + 1);
                        original.to_string()
                    }
                    Err(e) => {
                        warn!("Segment {} could not be translated: {}", i + 1, e);
                        original.to_string()
                    }
                }
            };

            SubtitleSegment {
                start: segment.start,
                end: segment.end,
                text,
            }
        })
        .collect()
}

/// Whether subtitles in `source` need translating into `target`.
///
/// An unknown source never matches, so any target triggers translation.
pub fn needs_translation(source: Option<&str>, target: &str) -> bool {
    match source {
        Some(source) => !source.trim().eq_ignore_ascii_case(target.trim()),
        None => true,
    }
}
