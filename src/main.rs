use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thumbfit::config::{self, ResizeConfig};
use thumbfit::imaging::{Format, Kernel, RustBackend};
use thumbfit::input::{InputSource, OutputTarget};
use thumbfit::process::{self, ResizeRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "thumbfit")]
#[command(about = "Resize an image to fit a bounding box")]
#[command(long_about = "\
Resize an image to fit a bounding box

The aspect ratio is always preserved. With both --width and --height the
image fits inside the box; with only one, that axis is matched exactly; with
neither, the image keeps its size and is only re-encoded.

Kernels, fastest to sharpest:
  nearest    pick the closest source pixel
  bilinear   triangle filter, radius 1
  bicubic    Catmull-Rom cubic (B=0, C=0.5), radius 2
  mitchell   Mitchell-Netravali cubic (B=C=1/3), radius 2
  lanczos2   windowed sinc, radius 2
  lanczos3   windowed sinc, radius 3

Examples:
  thumbfit --in photo.jpg --out thumb.jpg --width 320 --height 320 --kernel lanczos3
  curl -s https://example.com/a.png | thumbfit --width 64 --format webp > a.webp

Run 'thumbfit --print-config' to see a documented config file.")]
#[command(version)]
struct Cli {
    /// Input: file path, file:// or http(s):// URL, or - for stdin
    #[arg(long = "in", default_value = "-")]
    input: String,

    /// Output: file path, or - for stdout
    #[arg(long, default_value = "-")]
    out: String,

    /// Interpolation kernel [default: nearest]
    #[arg(long, visible_alias = "kernel", value_name = "KERNEL")]
    interpolation_function: Option<String>,

    /// Maximum output width in pixels (0 = unbounded)
    #[arg(long)]
    width: Option<u32>,

    /// Maximum output height in pixels (0 = unbounded)
    #[arg(long)]
    height: Option<u32>,

    /// Output format; defaults to the input's format
    #[arg(long)]
    format: Option<Format>,

    /// Never make the image larger than the source
    #[arg(long)]
    no_enlarge: bool,

    /// Resampling threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// TOML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented, then exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut settings = config::load_config(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli)?;
    settings.validate()?;
    init_thread_pool(&settings.processing);

    let source = InputSource::parse(&cli.input)?;
    let target = OutputTarget::parse(&cli.out);

    tracing::debug!(input = %source.describe(), "reading input");
    let bytes = source.read_all()?;

    let request = ResizeRequest {
        params: settings.resize_params(),
        format: settings.format,
    };
    let result = process::process(&RustBackend::new(), &bytes, &request)?;

    target.write_all(&result.bytes)?;
    tracing::debug!(
        bytes = result.bytes.len(),
        format = %result.format,
        "wrote {}",
        result.target
    );
    Ok(())
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(
    settings: &mut ResizeConfig,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(name) = &cli.interpolation_function {
        settings.kernel = name.parse::<Kernel>()?;
    }
    if let Some(width) = cli.width {
        settings.max_width = width;
    }
    if let Some(height) = cli.height {
        settings.max_height = height;
    }
    if cli.format.is_some() {
        settings.format = cli.format;
    }
    if cli.no_enlarge {
        settings.enlarge = false;
    }
    if cli.threads.is_some() {
        settings.processing.max_threads = cli.threads;
    }
    Ok(())
}

/// Log to stderr; stdout may be carrying image bytes.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thumbfit=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    rayon::ThreadPoolBuilder::new()
        .num_threads(processing.worker_threads())
        .build_global()
        .ok();
}
