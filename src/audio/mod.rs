//! Audio assembly for narration output.

mod concat;

pub use concat::{AudioError, concat_with_silence, silence_samples, wav_duration};
