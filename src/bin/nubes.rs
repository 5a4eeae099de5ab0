use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nubes", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a cloud field and write it as SVG (and optionally PNG).
    Cloud(CloudArgs),
    /// Resolve every image of a gallery slot against a site directory.
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
struct CloudArgs {
    /// Viewport width in pixels.
    #[arg(long)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long)]
    height: f64,

    /// Generator style (`clustered` or `soft`); overrides the config file.
    #[arg(long)]
    style: Option<nubes::CloudStyle>,

    /// Random seed; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Optional config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Also rasterize the field to this PNG path.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Site root that gallery sources are relative to.
    #[arg(long)]
    site: PathBuf,

    /// Gallery folder name.
    #[arg(long)]
    folder: String,

    /// Number of images in the slot.
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Device variant (`primary`/`desktop` or `secondary`/`mobile`).
    #[arg(long, default_value = "primary")]
    device: nubes::Device,

    /// Optional config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print best-guess sources without loading anything.
    #[arg(long)]
    prefetch: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Cloud(args) => cmd_cloud(args),
        Command::Resolve(args) => cmd_resolve(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<nubes::NubesConfig> {
    match path {
        Some(p) => Ok(nubes::NubesConfig::from_path(p)?),
        None => Ok(nubes::NubesConfig::default()),
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_cloud(args: CloudArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(style) = args.style {
        cfg.clouds.style = style;
    }
    let viewport = nubes::Viewport::new(args.width, args.height)?;
    let seed = args.seed.unwrap_or_else(time_seed);

    let mut rng = nubes::Rng64::new(seed);
    let field = nubes::CloudField::generate(&mut rng, viewport, &cfg.clouds)?;
    let svg = nubes::render_field(&field);

    create_parent(&args.out)?;
    std::fs::write(&args.out, &svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} clouds, seed {seed})",
        args.out.display(),
        field.clouds.len()
    );

    if let Some(png) = &args.png {
        let img = nubes::rasterize_svg(&svg)?;
        create_parent(png)?;
        nubes::save_png(&img, png)?;
        eprintln!("wrote {}", png.display());
    }
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let resolver = nubes::ImageResolver::new(cfg.gallery)?;
    let count = args.count.max(1);

    if args.prefetch {
        for index in 0..count {
            let image = nubes::ImageRef::new(&args.folder, args.device, index, count)?;
            println!("{index}\t{}", resolver.resolve_direct_src(&image));
        }
        return Ok(());
    }

    let mut target = nubes::FsImageTarget::new(&args.site);
    for index in 0..count {
        let image = nubes::ImageRef::new(&args.folder, args.device, index, count)?;
        let outcome = pollster::block_on(resolver.load_with_fallback(&mut target, &image));
        let tag = if outcome.is_placeholder() {
            "placeholder"
        } else {
            "loaded"
        };
        println!("{index}\t{tag}\t{}", outcome.src());
    }
    Ok(())
}
