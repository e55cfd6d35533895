//! WAV concatenation with silence padding.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

/// Errors that can occur while joining audio clips.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Clip {index} has format {found}, expected {expected}")]
    FormatMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("No audio clips to join")]
    Empty,
}

fn describe(spec: &WavSpec) -> String {
    format!(
        "{} ch / {} Hz / {}-bit {:?}",
        spec.channels, spec.sample_rate, spec.bits_per_sample, spec.sample_format
    )
}

fn same_format(a: &WavSpec, b: &WavSpec) -> bool {
    a.channels == b.channels
        && a.sample_rate == b.sample_rate
        && a.bits_per_sample == b.bits_per_sample
        && a.sample_format == b.sample_format
}

/// Number of interleaved samples in `silence_ms` of audio.
pub fn silence_samples(spec: &WavSpec, silence_ms: u32) -> usize {
    let frames = u64::from(spec.sample_rate) * u64::from(silence_ms) / 1000;
    (frames * u64::from(spec.channels)) as usize
}

/// Join WAV clips into one WAV, inserting `silence_ms` of silence between them.
///
/// All clips must share the first clip's channel count, rate and sample format.
pub fn concat_with_silence(clips: &[Vec<u8>], silence_ms: u32) -> Result<Vec<u8>, AudioError> {
    let mut readers = clips
        .iter()
        .map(|clip| WavReader::new(Cursor::new(clip.as_slice())))
        .collect::<Result<Vec<_>, _>>()?;

    let spec = readers.first().ok_or(AudioError::Empty)?.spec();
    for (index, reader) in readers.iter().enumerate() {
        if !same_format(&spec, &reader.spec()) {
            return Err(AudioError::FormatMismatch {
                index,
                expected: describe(&spec),
                found: describe(&reader.spec()),
            });
        }
    }

    let gap = silence_samples(&spec, silence_ms);
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        let count = readers.len();

        for (index, reader) in readers.iter_mut().enumerate() {
            match spec.sample_format {
                SampleFormat::Int => {
                    for sample in reader.samples::<i32>() {
                        writer.write_sample(sample?)?;
                    }
                }
                SampleFormat::Float => {
                    for sample in reader.samples::<f32>() {
                        writer.write_sample(sample?)?;
                    }
                }
            }

            if index + 1 < count {
                for _ in 0..gap {
                    match spec.sample_format {
                        SampleFormat::Int => writer.write_sample(0i32)?,
                        SampleFormat::Float => writer.write_sample(0.0f32)?,
                    }
                }
            }
        }

        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Duration of a WAV buffer in seconds.
pub fn wav_duration(data: &[u8]) -> Result<f64, AudioError> {
    let reader = WavReader::new(Cursor::new(data))?;
    let spec = reader.spec();
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}
