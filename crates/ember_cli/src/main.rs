use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{cornell_box, Scene};
use ember_renderer::{ProgressiveRenderer, RenderError, RenderSettings, SampleType};

/// Progressive path tracer for the Cornell box.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON render settings; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PNG file to write
    #[arg(short, long, default_value = "ember.png")]
    output: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Total samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Samples per pixel added by each progressive step
    #[arg(long)]
    samples_per_pass: Option<u32>,

    /// color, albedo, normal, barycentric, primitive_id or material_id
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<SampleType>,

    #[arg(long)]
    seed: Option<u32>,

    /// Seed of the primitive and material id colors
    #[arg(long)]
    color_seed: Option<u32>,

    /// Rewrite the output every N samples per pixel
    #[arg(long)]
    snapshot_every: Option<u32>,

    /// Log per-pass timings
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn parse_mode(s: &str) -> std::result::Result<SampleType, String> {
    s.parse().map_err(|e: RenderError| e.to_string())
}

/// Settings from the config file (or defaults) with flag overrides applied.
fn build_settings(args: &Args) -> Result<RenderSettings> {
    let mut settings = match &args.config {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(samples) = args.samples {
        settings.total_samples = samples;
    }
    if let Some(samples_per_pass) = args.samples_per_pass {
        settings.samples_per_pass = samples_per_pass;
    }
    if let Some(mode) = args.mode {
        settings.sample_type = mode;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(color_seed) = args.color_seed {
        settings.color_seed = color_seed;
    }

    settings.validate().context("Invalid render settings")?;
    Ok(settings)
}

/// First multiple of `every` above `samples`.
fn next_snapshot(samples: u32, every: u32) -> u32 {
    (samples / every + 1).saturating_mul(every)
}

fn log_scene(scene: &Scene) {
    log::info!(
        "Scene: {} triangles, {} materials, {} emissive triangles",
        scene.triangles().len(),
        scene.materials().len(),
        scene.emissive_triangle_count()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let settings = build_settings(&args)?;
    let snapshot_every = args.snapshot_every.filter(|&n| n > 0);
    if let Some(every) = snapshot_every {
        if every >= settings.total_samples {
            log::warn!(
                "Snapshot interval {} is not below the sample target {}; only the final image will be written",
                every,
                settings.total_samples
            );
        }
    }

    let scene = cornell_box();
    log_scene(&scene);
    log::info!(
        "Rendering {}x{} at {} samples per pixel ({})",
        settings.width,
        settings.height,
        settings.total_samples,
        settings.sample_type
    );

    let mut renderer = ProgressiveRenderer::new(scene, settings).context("Failed to set up renderer")?;
    let start = Instant::now();
    let mut snapshot_at = snapshot_every.map(|every| next_snapshot(0, every));

    while renderer.step() > 0 {
        let samples = renderer.samples();
        if let (Some(at), Some(every)) = (snapshot_at, snapshot_every) {
            if samples >= at && !renderer.is_done() {
                renderer
                    .save_png(&args.output)
                    .with_context(|| format!("Failed to write snapshot {}", args.output.display()))?;
                log::info!("Snapshot at {} samples", samples);
                snapshot_at = Some(next_snapshot(samples, every));
            }
        }
    }

    log::info!("Rendered in {:.2}s", start.elapsed().as_secs_f64());
    renderer
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
