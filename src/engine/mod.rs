//! Pipelines that tie the components together.
//!
//! - [`ShortsPipeline`]: scenes, selection and encoding of one short.
//! - [`VideoBatch`]: folder-level subtitling followed by shorts.
//! - [`NarrationEngine`]: script entries to WAV narration.

mod narration;
mod shorts;
mod video;

pub use narration::{NarrationEngine, NarrationError, PART_SILENCE_MS, sanitize_file_name};
pub use shorts::{PipelineError, ShortReport, ShortsPipeline, short_output_path};
pub use video::{BatchSummary, Folders, INPUT_EXTENSIONS, VideoBatch, list_videos};
