use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::RotaskResult;
use crate::render::compositor::FrameCompositor;
use crate::scene::describe::describe_scene;
use crate::scene::model::{Scene, TaskPair};
use crate::scene::sampler::SceneSampler;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration consumed by the task generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Whether to encode an interpolated ground-truth video per task.
    #[serde(default)]
    pub generate_videos: bool,
    /// Target video frame rate.
    #[serde(default = "default_fps")]
    pub video_fps: u32,
    /// Domain tag, used only for artifact path naming.
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_fps() -> u32 {
    8
}

fn default_domain() -> String {
    "rotation".to_string()
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 768,
                height: 768,
            },
            generate_videos: false,
            video_fps: default_fps(),
            domain: default_domain(),
        }
    }
}

/// Uniform interpolation fractions `t` in `[0, 1]` for the video frames.
///
/// `max(8, fps) + 1` samples: the first frame is always `t = 0` and the last
/// always `t = 1`, so the video starts at the unrotated pose and ends exactly
/// at the target angle.
pub fn interpolation_fractions(fps: u32) -> Vec<f64> {
    let transition_frames = fps.max(8) as usize;
    (0..=transition_frames)
        .map(|i| i as f64 / transition_frames as f64)
        .collect()
}

/// Produces [`TaskPair`]s: prompt, first/final frames, optional video.
///
/// Single-threaded and self-contained; separate generators share no state, so
/// an outer scheduler may run many of them in parallel.
pub struct TaskGenerator {
    config: TaskConfig,
    compositor: FrameCompositor,
    sampler: SceneSampler,
}

impl TaskGenerator {
    pub fn new(config: TaskConfig) -> Self {
        let compositor = FrameCompositor::new(config.canvas);
        let sampler = SceneSampler::new(config.canvas);
        Self {
            config,
            compositor,
            sampler,
        }
    }

    /// Sample a scene from `seed` and generate its task pair.
    pub fn generate(&mut self, task_id: &str, seed: u64) -> RotaskResult<TaskPair> {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = self.sampler.sample(&mut rng);
        self.generate_from_scene(task_id, &scene)
    }

    /// Generate the task pair for a fully specified scene.
    pub fn generate_from_scene(&mut self, task_id: &str, scene: &Scene) -> RotaskResult<TaskPair> {
        scene.validate()?;

        let prompt = describe_scene(&scene.objects, scene.direction, scene.degrees);

        let first_frame = self.compositor.render_frame(scene, 0.0)?;
        let final_frame = self
            .compositor
            .render_frame(scene, scene.target_angle_rad())?;

        // Video encoding failure downgrades the task to image-only output,
        // never aborts it.
        let video_path = if self.config.generate_videos {
            let out_path = self.video_out_path(task_id);
            let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out_path));
            match self.render_video_frames(scene, &mut sink) {
                Ok(()) => Some(out_path),
                Err(e) => {
                    tracing::warn!(task_id, error = %e, "video encoding failed, task degraded to image-only");
                    // Drop reaps a mid-stream ffmpeg child; the partial file
                    // must not survive either.
                    drop(sink);
                    let _ = std::fs::remove_file(&out_path);
                    None
                }
            }
        } else {
            None
        };

        Ok(TaskPair {
            task_id: task_id.to_string(),
            domain: self.config.domain.clone(),
            prompt,
            first_frame,
            final_frame,
            video_path,
        })
    }

    /// Render the interpolated frame sequence of `scene` into `sink`.
    ///
    /// Exposed for in-memory sinks in tests; `generate_from_scene` feeds it
    /// an [`FfmpegSink`].
    pub fn render_video_frames(
        &mut self,
        scene: &Scene,
        sink: &mut dyn FrameSink,
    ) -> RotaskResult<()> {
        let fps = Fps::new(self.config.video_fps.max(1), 1)?;
        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps,
        })?;

        let target = scene.target_angle_rad();
        for (i, t) in interpolation_fractions(self.config.video_fps)
            .into_iter()
            .enumerate()
        {
            let frame = self.compositor.render_frame(scene, target * t)?;
            sink.push_frame(FrameIndex(i as u64), &frame)?;
        }
        sink.end()
    }

    fn video_out_path(&self, task_id: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("{}_videos", self.config.domain))
            .join(format!("{task_id}_ground_truth.mp4"))
    }
}
