use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stream_overlay::encode::sink::write_single;

#[derive(Parser, Debug)]
#[command(name = "stream-overlay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bind values and write the composited overlay frame as a PNG.
    Render(RenderArgs),
    /// Validate a layout (bounds, and bindings when a values file is given).
    Check(CheckArgs),
    /// Print the complementary color of a `#RRGGBB` hex color.
    Complement(ComplementArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Layout document JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Values file JSON.
    #[arg(long)]
    values: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output scale factor relative to the design canvas.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Root for image paths in the values file (defaults to the layout's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Directory of .ttf/.otf/.ttc files used for text.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Also load system fonts.
    #[arg(long, default_value_t = false)]
    system_fonts: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Layout document JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Optional values file to pre-flight against the layout.
    #[arg(long)]
    values: Option<PathBuf>,

    /// Root for image paths in the values file (defaults to the layout's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComplementArgs {
    /// Color as `#RRGGBB`.
    color: String,
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
        Command::Render(args) => cmd_render(args),
        Command::Check(args) => cmd_check(args),
        Command::Complement(args) => cmd_complement(args),
    }
}

fn assets_for(layout: &Path, root: Option<PathBuf>) -> stream_overlay::AssetStore {
    let root = root.unwrap_or_else(|| {
        layout
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    stream_overlay::AssetStore::new(root)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let board = stream_overlay::LayoutBoard::load(&args.layout)
        .with_context(|| format!("load layout '{}'", args.layout.display()))?;
    let assets = assets_for(&args.layout, args.assets_root);
    let values = stream_overlay::MapResolver::from_path(&args.values, &assets)
        .with_context(|| format!("load values '{}'", args.values.display()))?;

    let rasterizer = stream_overlay::TextRasterizer::new(stream_overlay::TextRasterizerOpts {
        load_system_fonts: args.system_fonts,
        fonts_dir: args.fonts_dir,
        ..Default::default()
    })?;
    let mut compositor = stream_overlay::Compositor::new(stream_overlay::CompositorOpts {
        scale: stream_overlay::ScaleFactor::new(args.scale)?,
        ..Default::default()
    });
    let frame = compositor.generate(&board, &values, &rasterizer)?;

    let mut sink = stream_overlay::PngSink::new(args.out.clone());
    write_single(&mut sink, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let board = stream_overlay::LayoutBoard::load(&args.layout)
        .with_context(|| format!("load layout '{}'", args.layout.display()))?;
    for c in board.collections() {
        let r = c.rect();
        eprintln!(
            "{} '{}': {} element(s) at [{}, {}, {}, {}]{}",
            c.id(),
            c.name(),
            c.elements().len(),
            r.left,
            r.top,
            r.right,
            r.bottom,
            if c.mirror() { " (mirrored)" } else { "" },
        );
    }
    board.validate_for_save()?;

    if let Some(path) = args.values {
        let assets = assets_for(&args.layout, args.assets_root);
        let values = stream_overlay::MapResolver::from_path(&path, &assets)
            .with_context(|| format!("load values '{}'", path.display()))?;
        stream_overlay::Compositor::default().preflight(&board, &values)?;
    }

    eprintln!("ok");
    Ok(())
}

fn cmd_complement(args: ComplementArgs) -> anyhow::Result<()> {
    println!("{}", stream_overlay::complement_hex(&args.color)?);
    Ok(())
}
