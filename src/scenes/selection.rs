//! Scene grouping and duration-bounded sampling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sources up to this length (seconds) use the short-video tier.
const SHORT_SOURCE_SECS: f64 = 300.0;
/// Sources up to this length (seconds) use the medium-video tier.
const MEDIUM_SOURCE_SECS: f64 = 3600.0;
/// Upper bound for the short tier.
const SHORT_TARGET_CAP: f64 = 60.0;
/// Upper bound for every other tier.
const LONG_TARGET_CAP: f64 = 300.0;
/// Shortest scene length (seconds) accepted for `min_scene` and used as split step.
pub const MIN_SCENE_SECS: f64 = 0.1;

/// Errors raised while selecting segments for a short.
#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Not enough scenes to build a short: {0} detected, at least 2 required")]
    TooFewScenes(usize),

    #[error("No segments left after grouping and sampling")]
    NoSegments,

    #[error("Invalid selection config: {0}")]
    InvalidConfig(String),
}

/// A `[start, end)` time range in seconds.
///
/// Serialized as a two-element array so cache files read as `[[0.0, 8.5], ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Scene {
    pub start: f64,
    pub end: f64,
}

impl Scene {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl From<(f64, f64)> for Scene {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

impl From<Scene> for (f64, f64) {
    fn from(scene: Scene) -> Self {
        (scene.start, scene.end)
    }
}

/// Tunables for [`select_segments`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Scenes shorter than this are merged forward, leftovers below it are dropped.
    pub min_scene: f64,
    /// Scenes longer than this are split into chunks of this size.
    pub max_scene: f64,
    /// Accepted overshoot above the target duration.
    pub margin: f64,
    /// Roughly one segment is sampled per this many seconds of target.
    pub seconds_per_sample: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_scene: 10.0,
            max_scene: 30.0,
            margin: 5.0,
            seconds_per_sample: 20.0,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), SelectionError> {
        let fields = [
            ("min_scene", self.min_scene),
            ("max_scene", self.max_scene),
            ("margin", self.margin),
            ("seconds_per_sample", self.seconds_per_sample),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SelectionError::InvalidConfig(format!(
                "{name} must be a finite number, got {value}"
            )));
        }
        if self.min_scene < MIN_SCENE_SECS {
            return Err(SelectionError::InvalidConfig(format!(
                "min_scene must be at least {MIN_SCENE_SECS}s"
            )));
        }
        if self.max_scene < self.min_scene {
            return Err(SelectionError::InvalidConfig(format!(
                "max_scene ({}) must be >= min_scene ({})",
                self.max_scene, self.min_scene
            )));
        }
        if self.margin < 0.0 {
            return Err(SelectionError::InvalidConfig(
                "margin cannot be negative".to_string(),
            ));
        }
        if self.seconds_per_sample <= 0.0 {
            return Err(SelectionError::InvalidConfig(
                "seconds_per_sample must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Chosen segments, sorted by start time.
    pub segments: Vec<Scene>,
    pub target_duration: f64,
    pub total_duration: f64,
    /// Length of the source, taken from the end of the last detected scene.
    pub source_duration: f64,
}

impl Selection {
    /// Percentage of the source where the first segment starts and the last one ends.
    pub fn coverage(&self) -> (f64, f64) {
        if self.source_duration <= 0.0 {
            return (0.0, 0.0);
        }
        let first = self.segments.first().map_or(0.0, |s| s.start);
        let last = self.segments.last().map_or(0.0, |s| s.end);
        (
            first / self.source_duration * 100.0,
            last / self.source_duration * 100.0,
        )
    }
}

/// Target length of the short for a source of `source_secs` seconds.
pub fn target_duration(source_secs: f64) -> f64 {
    if source_secs <= SHORT_SOURCE_SECS {
        (source_secs * 0.8).min(SHORT_TARGET_CAP)
    } else if source_secs <= MEDIUM_SOURCE_SECS {
        (source_secs * 0.3).min(LONG_TARGET_CAP)
    } else {
        LONG_TARGET_CAP
    }
}

pub fn total_duration(scenes: &[Scene]) -> f64 {
    scenes.iter().map(Scene::duration).sum()
}

/// Extend each scene shorter than `min_scene` over the following ones until it
/// is long enough. The last scene is kept even when it stays short.
pub fn merge_short_scenes(scenes: &[Scene], min_scene: f64) -> Vec<Scene> {
    let mut merged = Vec::with_capacity(scenes.len());
    let Some((first, rest)) = scenes.split_first() else {
        return merged;
    };

    let mut current = *first;
    for next in rest {
        if current.duration() < min_scene {
            current.end = next.end;
            continue;
        }
        merged.push(current);
        current = *next;
    }
    merged.push(current);

    merged
}

/// Drop scenes shorter than `min_scene` and cut scenes longer than `max_scene`
/// into `max_scene` chunks. A trailing chunk below `min_scene` is discarded.
///
/// Chunks are never shorter than [`MIN_SCENE_SECS`], whatever `max_scene` says.
pub fn split_long_scenes(scenes: &[Scene], min_scene: f64, max_scene: f64) -> Vec<Scene> {
    let mut bounded = Vec::with_capacity(scenes.len());
    let step = max_scene.max(MIN_SCENE_SECS);

    for scene in scenes {
        let duration = scene.duration();
        if duration < min_scene {
            continue;
        }
        if duration <= step {
            bounded.push(*scene);
            continue;
        }

        let mut start = scene.start;
        while start < scene.end {
            let end = (start + step).min(scene.end);
            // Step lost to float precision at this magnitude
            if end <= start {
                break;
            }
            if end - start >= min_scene {
                bounded.push(Scene::new(start, end));
            }
            start = end;
        }
    }

    bounded
}

/// Merge short scenes, then split long ones; output is sorted by start.
pub fn group_scenes(scenes: &[Scene], config: &SelectionConfig) -> Vec<Scene> {
    let merged = merge_short_scenes(scenes, config.min_scene);
    let mut grouped = split_long_scenes(&merged, config.min_scene, config.max_scene);
    sort_by_start(&mut grouped);
    grouped
}

/// Pick about one scene per `seconds_per_sample` of target, striding evenly
/// over list positions.
pub fn sample_scenes(scenes: &[Scene], target: f64, seconds_per_sample: f64) -> Vec<Scene> {
    let wanted = ((target / seconds_per_sample) as usize).max(1);
    if scenes.len() <= wanted {
        return scenes.to_vec();
    }

    let step = scenes.len() as f64 / wanted as f64;
    (0..wanted)
        .map(|i| (i as f64 * step) as usize)
        .filter(|&index| index < scenes.len())
        .map(|index| scenes[index])
        .collect()
}

/// Drop the longest segment until the total fits `target + margin` or only two remain.
pub fn trim_to_target(mut segments: Vec<Scene>, target: f64, margin: f64) -> Vec<Scene> {
    let limit = target + margin;

    while segments.len() > 2 && total_duration(&segments) > limit {
        // First longest wins on ties.
        let longest = segments
            .iter()
            .enumerate()
            .fold(0, |best, (index, scene)| {
                if scene.duration() > segments[best].duration() {
                    index
                } else {
                    best
                }
            });
        segments.remove(longest);
    }

    segments
}

/// Run the full grouping, sampling and trimming pass over detected scenes.
pub fn select_segments(
    scenes: &[Scene],
    config: &SelectionConfig,
) -> Result<Selection, SelectionError> {
    config.validate()?;

    let Some(last) = scenes.last().filter(|_| scenes.len() >= 2) else {
        return Err(SelectionError::TooFewScenes(scenes.len()));
    };
    let source_duration = last.end;
    let target = target_duration(source_duration);

    let grouped = group_scenes(scenes, config);
    let sampled = sample_scenes(&grouped, target, config.seconds_per_sample);
    let mut segments = trim_to_target(sampled, target, config.margin);

    if segments.is_empty() {
        return Err(SelectionError::NoSegments);
    }
    sort_by_start(&mut segments);

    Ok(Selection {
        total_duration: total_duration(&segments),
        segments,
        target_duration: target,
        source_duration,
    })
}

fn sort_by_start(scenes: &mut [Scene]) {
    scenes.sort_by(|a, b| a.start.total_cmp(&b.start));
}
