use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use icon_variants::{
    BackgroundColor, DEFAULT_RADIUS_RATIO, DEFAULT_SCALE_RATIO, DEFAULT_SVG_SIZE, IconRenderer,
    OutputTarget, RenderProfile, VariantSettings,
};

#[derive(Parser, Debug)]
#[command(name = "icon-variants", version, about = "Generate app icon variants from one source image")]
struct Cli {
    /// Log more (repeat for trace output). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce the standard asset set (rounded, tray, Android) into a directory.
    Standard(StandardArgs),
    /// Run a job described by a JSON profile.
    Run(RunArgs),
    /// Print the standard job as a JSON profile.
    Profile(StandardArgs),
    /// White rounded-square background.
    Rounded(RoundedArgs),
    /// Opaque background with no alpha channel.
    Solid(SolidArgs),
    /// Shrink and center for Android adaptive icons.
    Padded(PaddedArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Source image (square PNG, or SVG).
    #[arg(long)]
    source: PathBuf,

    /// Edge length used to rasterise SVG sources.
    #[arg(long, default_value_t = DEFAULT_SVG_SIZE)]
    svg_size: u32,
}

#[derive(Args, Debug)]
struct StandardArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory the artifacts are written to.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Profile JSON. Relative paths inside resolve against its directory.
    #[arg(long)]
    profile: PathBuf,
}

#[derive(Args, Debug)]
struct RoundedArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (.png or .ico).
    #[arg(long)]
    out: PathBuf,

    /// Corner radius as a fraction of the icon edge.
    #[arg(long, default_value_t = DEFAULT_RADIUS_RATIO)]
    radius_ratio: f64,

    /// Background color.
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Anti-alias the rounded corners instead of using hard edges.
    #[arg(long)]
    anti_alias: bool,
}

#[derive(Args, Debug)]
struct SolidArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (.png or .ico).
    #[arg(long)]
    out: PathBuf,

    /// Background color.
    #[arg(long, default_value = "#ffffff")]
    background: String,
}

#[derive(Args, Debug)]
struct PaddedArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (.png or .ico).
    #[arg(long)]
    out: PathBuf,

    /// Fraction of the canvas the content keeps.
    #[arg(long, default_value_t = DEFAULT_SCALE_RATIO)]
    scale_ratio: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Standard(args) => {
            let profile = standard_profile(&args);
            run_profile(&profile)
        }
        Command::Run(args) => {
            let profile = RenderProfile::load(&args.profile)
                .with_context(|| format!("load profile '{}'", args.profile.display()))?;
            run_profile(&profile)
        }
        Command::Profile(args) => {
            let json = standard_profile(&args)
                .to_json_pretty()
                .context("serialize profile")?;
            println!("{json}");
            Ok(())
        }
        Command::Rounded(args) => run_single(
            args.source,
            args.out,
            VariantSettings::RoundedWhite {
                radius_ratio: args.radius_ratio,
                background: BackgroundColor::new(args.background),
                anti_alias: args.anti_alias,
            },
        ),
        Command::Solid(args) => run_single(
            args.source,
            args.out,
            VariantSettings::SolidWhite {
                background: BackgroundColor::new(args.background),
            },
        ),
        Command::Padded(args) => run_single(
            args.source,
            args.out,
            VariantSettings::PaddedForeground {
                scale_ratio: args.scale_ratio,
            },
        ),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn standard_profile(args: &StandardArgs) -> RenderProfile {
    let mut profile = RenderProfile::standard(&args.source.source, &args.out_dir);
    profile.svg_size = args.source.svg_size;
    profile
}

fn run_single(source: SourceArgs, out: PathBuf, variant: VariantSettings) -> anyhow::Result<()> {
    let mut profile = RenderProfile::new(source.source).with_target(OutputTarget::new(out, variant));
    profile.svg_size = source.svg_size;
    run_profile(&profile)
}

fn run_profile(profile: &RenderProfile) -> anyhow::Result<()> {
    let renderer = IconRenderer::open_with_svg_size(&profile.source, profile.svg_size)
        .with_context(|| format!("load source '{}'", profile.source.display()))?;
    profile.run_with(&renderer, |artifact| println!("{artifact}"))?;
    Ok(())
}
