//! Rotask synthesizes labeled image/video pairs of 2D shapes rotating rigidly
//! about their own centroids, for training and evaluating vision or
//! generative models.
//!
//! A seeded sampler produces an immutable [`Scene`]; the compositor renders a
//! "before" frame, an "after" frame at the signed target angle, and optionally
//! a smooth interpolated video, paired with a natural-language description of
//! the motion:
//!
//! - Sample or build a [`Scene`]
//! - Create a [`TaskGenerator`]
//! - Generate [`TaskPair`]s and export frames as PNG / video as MP4
#![forbid(unsafe_code)]

pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod task;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Vec2};
pub use crate::foundation::error::{RotaskError, RotaskResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::compositor::FrameCompositor;
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::describe::describe_scene;
pub use crate::scene::model::{
    ObjectColor, RotationDirection, Scene, SceneObject, Shape, TaskPair,
};
pub use crate::scene::sampler::SceneSampler;
pub use crate::task::generator::{TaskConfig, TaskGenerator, interpolation_fractions};
