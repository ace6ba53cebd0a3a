use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rotask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a batch of rotation task pairs (PNG frames + optional MP4).
    Generate(GenerateArgs),
    /// Render a single frame of a serialized scene as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Number of tasks to generate.
    #[arg(long, default_value_t = 1)]
    count: u64,

    /// Base RNG seed; task i uses seed + i.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output directory for frames and manifests.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 768)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Also encode an interpolated ground-truth video (requires `ffmpeg`).
    #[arg(long)]
    video: bool,

    /// Video frame rate.
    #[arg(long, default_value_t = 8)]
    fps: u32,

    /// Domain tag used for artifact path naming.
    #[arg(long, default_value = "rotation")]
    domain: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Rotation angle applied to every object, in signed degrees
    /// (positive sweeps visually clockwise).
    #[arg(long, default_value_t = 0.0)]
    angle_deg: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 768)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,
}

/// Per-task manifest written next to the exported frames.
#[derive(serde::Serialize)]
struct TaskManifest {
    task_id: String,
    domain: String,
    prompt: String,
    first_frame: PathBuf,
    final_frame: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let canvas = rotask::Canvas::new(args.width, args.height)?;
    let config = rotask::TaskConfig {
        canvas,
        generate_videos: args.video,
        video_fps: args.fps,
        domain: args.domain,
    };

    if args.video && !rotask::is_ffmpeg_on_path() {
        eprintln!("warning: ffmpeg not found on PATH, tasks will be image-only");
    }

    let mut generator = rotask::TaskGenerator::new(config);
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for i in 0..args.count {
        let task_id = format!("task_{:06}", i);
        let pair = generator.generate(&task_id, args.seed.wrapping_add(i))?;

        let first_path = args.out.join(format!("{task_id}_first.png"));
        let final_path = args.out.join(format!("{task_id}_final.png"));
        pair.first_frame.save_png(&first_path)?;
        pair.final_frame.save_png(&final_path)?;

        let manifest = TaskManifest {
            task_id: pair.task_id.clone(),
            domain: pair.domain.clone(),
            prompt: pair.prompt.clone(),
            first_frame: first_path,
            final_frame: final_path,
            video: pair.video_path.clone(),
        };
        let manifest_path = args.out.join(format!("{task_id}.json"));
        let f = File::create(&manifest_path)
            .with_context(|| format!("create manifest '{}'", manifest_path.display()))?;
        serde_json::to_writer_pretty(f, &manifest)
            .with_context(|| "write task manifest JSON")?;

        eprintln!("wrote {}", manifest_path.display());
    }

    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    scene.validate()?;

    let canvas = rotask::Canvas::new(args.width, args.height)?;
    let mut compositor = rotask::FrameCompositor::new(canvas);
    let frame = compositor.render_frame(&scene, args.angle_deg.to_radians())?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_scene_json(path: &Path) -> anyhow::Result<rotask::Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: rotask::Scene = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}
