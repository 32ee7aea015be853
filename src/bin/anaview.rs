use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use anaview::{
    AnimationConfig, CaptionFont, CaptionStyle, Ease, Image, Reduction, RunConfig, RunRecord,
};

#[derive(Parser, Debug)]
#[command(name = "anaview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered views, or write the views grid of an image.
    Views(ViewsArgs),
    /// Render the transition animation of an image under a view.
    Animate(AnimateArgs),
    /// Write a reproducibility record (and optionally the sample images) for a run.
    Record(RecordArgs),
}

#[derive(Parser, Debug)]
struct ViewsArgs {
    /// Square PNG of side 64 or 256 to render through the views.
    #[arg(long)]
    image: Option<PathBuf>,

    /// View names (`name` or `name:arg`).
    #[arg(long = "view", default_values_t = ["identity".to_owned(), "flip".to_owned()])]
    views: Vec<String>,

    /// Output directory for `sample_{side}.png` and `sample_{side}.views.png`.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Square source image.
    #[arg(long)]
    image: PathBuf,

    /// View to animate. Ignored when `--record` supplies one.
    #[arg(long, default_value = "flip")]
    view: String,

    /// Run directory or `metadata.json`; supplies the view and both captions.
    #[arg(long)]
    record: Option<PathBuf>,

    #[arg(long, default_value = "")]
    caption1: String,

    #[arg(long, default_value = "")]
    caption2: String,

    /// Output MP4 path.
    #[arg(long, default_value = "animation.mp4")]
    out: PathBuf,

    /// Write a PNG sequence here instead of an MP4.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    #[arg(long, default_value_t = 120)]
    hold: usize,

    #[arg(long, default_value_t = 10)]
    fade: usize,

    #[arg(long, default_value_t = 45)]
    transition: usize,

    #[arg(long, default_value_t = 256)]
    image_side: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    #[arg(long, default_value = "in_out_cubic")]
    ease: Ease,

    /// Caption font file; the system monospace font is used when omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 16.0)]
    font_size: f32,

    /// Worker threads for transition frames.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "results")]
    save_dir: PathBuf,

    /// One prompt per view.
    #[arg(long = "prompt", required = true)]
    prompts: Vec<String>,

    #[arg(long, default_value = "")]
    style: String,

    #[arg(long = "view", required = true)]
    views: Vec<String>,

    #[arg(long, default_value_t = 100)]
    num_inference_steps: u32,

    #[arg(long, default_value_t = 100)]
    num_samples: u32,

    #[arg(long, default_value_t = false)]
    sum_reduction: bool,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 7.0)]
    guidance_scale: f64,

    #[arg(long, default_value_t = 50)]
    noise_level: u32,

    #[arg(long, default_value = "cuda")]
    device: String,

    /// Generated sample to store alongside the record.
    #[arg(long)]
    image: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Views(args) => cmd_views(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Record(args) => cmd_record(args),
    }
}

fn read_image(path: &Path) -> anyhow::Result<image::RgbImage> {
    Ok(image::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .to_rgb8())
}

fn cmd_views(args: ViewsArgs) -> anyhow::Result<()> {
    let Some(image_path) = args.image else {
        for name in anaview::view_names() {
            let spec = anaview::spec_for_name(name)?;
            println!("{name:<14} {}", serde_json::to_string(&spec)?);
        }
        return Ok(());
    };

    let im = Image::from_rgb8(&read_image(&image_path)?)?;
    let views = anaview::get_views(&args.views)?;
    let (sample, grid) = anaview::save_illusion(&im, &views, &args.out)?;
    eprintln!("wrote {}", sample.display());
    eprintln!("wrote {}", grid.display());
    Ok(())
}

fn caption_font(path: Option<&Path>) -> anyhow::Result<Option<CaptionFont>> {
    match path {
        Some(p) => Ok(Some(CaptionFont::from_file(p)?)),
        None => Ok(CaptionFont::system_monospace()),
    }
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let im = read_image(&args.image)?;

    let (view, caption1, caption2) = match &args.record {
        Some(path) => RunRecord::load(path)?.animation_subject()?,
        None => (
            anaview::get_view(&args.view)?,
            args.caption1.clone(),
            args.caption2.clone(),
        ),
    };

    let cfg = AnimationConfig {
        hold_frames: args.hold,
        fade_frames: args.fade,
        transition_frames: args.transition,
        image_side: args.image_side,
        canvas_side: anaview::render::raster::canvas_side_for(args.image_side),
        fps: args.fps,
        ease: args.ease,
        caption: CaptionStyle {
            font: caption_font(args.font.as_deref())?,
            size_px: args.font_size,
            ..CaptionStyle::default()
        },
        threads: args.threads,
    };

    let seq = anaview::render_animation(&im, view.as_ref(), &caption1, &caption2, &cfg)?;

    let frames_dir = match args.frames_dir {
        Some(dir) => Some(dir),
        None if !anaview::is_ffmpeg_on_path() => {
            let dir = args.out.with_extension("frames");
            tracing::warn!(dir = %dir.display(), "ffmpeg not found, writing a PNG sequence instead");
            Some(dir)
        }
        None => None,
    };

    match frames_dir {
        Some(dir) => {
            let paths = anaview::write_png_sequence(&seq, &dir)?;
            eprintln!("wrote {} frames to {}", paths.len(), dir.display());
        }
        None => {
            anaview::write_mp4(&seq, &args.out)?;
            eprintln!("wrote {}", args.out.display());
        }
    }
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let cfg = RunConfig {
        name: args.name,
        save_dir: args.save_dir,
        prompts: args.prompts,
        style: args.style,
        views: args.views,
        num_inference_steps: args.num_inference_steps,
        num_samples: args.num_samples,
        reduction: if args.sum_reduction {
            Reduction::Sum
        } else {
            Reduction::Mean
        },
        seed: args.seed,
        guidance_scale: args.guidance_scale,
        noise_level: args.noise_level,
        device: args.device,
    };
    let record = RunRecord::from_config(cfg)?;
    let dir = record.args.run_dir();
    let path = record.save(&dir)?;
    eprintln!("wrote {}", path.display());

    if let Some(image_path) = args.image {
        let im = Image::from_rgb8(&read_image(&image_path)?)?;
        let (sample, grid) = anaview::save_illusion(&im, &record.build_views()?, &dir)?;
        eprintln!("wrote {}", sample.display());
        eprintln!("wrote {}", grid.display());
    }
    Ok(())
}
