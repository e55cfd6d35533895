//! Scene boundaries: detection, sidecar caching and short-clip selection.

mod cache;
mod detect;
mod selection;

#[cfg(test)]
pub use detect::MockSceneDetector;
pub use cache::{CacheError, SceneCache};
pub use detect::{FfmpegSceneDetector, SceneDetector, parse_cut_points, scenes_from_cuts};
pub use selection::{
    MIN_SCENE_SECS, Scene, Selection, SelectionConfig, SelectionError, group_scenes, merge_short_scenes,
    sample_scenes, select_segments, split_long_scenes, target_duration, total_duration,
    trim_to_target,
};
