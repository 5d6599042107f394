//! Checkout CLI
//!
//! Prices a JSON request body, or a fixture set by name, and prints either a receipt table or
//! the JSON response envelope.
//!
//! Use `-r` to price a JSON request file
//! Use `-f` to load a fixture set by name (ignored when `-r` is given)
//! Use `--format json` to print the response envelope instead of a receipt

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use checkout::{
    basket::Cart,
    config::{PricingConfig, ZeroAmountLines},
    fixtures::Fixture,
    pipeline::DiscountPipeline,
    receipt::DiscountResult,
    requests::{self, DiscountRequest},
    responses::Envelope,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// What to print for a priced cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Receipt tables
    Table,

    /// Response envelope as JSON
    Json,
}

/// Checkout pricing CLI
#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Price a cart against discount campaigns", long_about = None)]
struct Args {
    /// JSON request file to price
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Fixture set to price when no request file is given
    #[arg(short, long, default_value = "demo")]
    fixture: String,

    /// Directory holding fixture sets
    #[arg(long, default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// YAML pricing configuration
    #[arg(short, long, env = "CHECKOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the zero-amount line policy from the configuration
    #[arg(long, value_enum)]
    zero_amount_lines: Option<ZeroAmountLines>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args)?;

    let pipeline = DiscountPipeline::new(load_config(&args)?);

    let start = Instant::now();

    let exit_code = match (&args.request, args.format) {
        (Some(path), OutputFormat::Json) => {
            let body = read_request(path)?;
            let envelope = Envelope::from(requests::price_json(&body, &pipeline));

            write_envelope(&envelope)?;

            if envelope.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        (Some(path), OutputFormat::Table) => {
            let body = read_request(path)?;
            let (cart, campaigns) =
                DiscountRequest::from_json(&body)?.into_parts(pipeline.config())?;
            let result = pipeline.calculate(&cart, &campaigns)?;

            write_receipt(&result, &cart, start)?;

            ExitCode::SUCCESS
        }
        (None, format) => {
            let fixture = Fixture::from_set_at(&args.fixtures_dir, &args.fixture)
                .with_context(|| format!("loading fixture set {:?}", args.fixture))?;
            let cart = fixture.cart()?;
            let result = pipeline.calculate(&cart, fixture.campaigns())?;

            match format {
                OutputFormat::Table => write_receipt(&result, &cart, start)?,
                OutputFormat::Json => write_envelope(&Envelope::success(result))?,
            }

            ExitCode::SUCCESS
        }
    };

    info!(elapsed = %start.elapsed().human(Truncate::Nano), "done");

    Ok(exit_code)
}

fn load_config(args: &Args) -> Result<PricingConfig> {
    let mut config = match &args.config {
        Some(path) => PricingConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PricingConfig::default(),
    };

    if let Some(policy) = args.zero_amount_lines {
        config.zero_amount_lines = policy;
    }

    debug!(?config, "pricing configuration");

    Ok(config)
}

fn read_request(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading request {}", path.display()))
}

fn write_receipt(result: &DiscountResult, cart: &Cart, start: Instant) -> Result<()> {
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    result.write_to(&mut handle, cart)?;

    writeln!(
        handle,
        " {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}

fn write_envelope(envelope: &Envelope) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    serde_json::to_writer_pretty(&mut handle, envelope)?;
    writeln!(handle)?;

    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    match args.log_format {
        LogFormat::Compact => init_with_layer(
            args,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(true),
        ),
        LogFormat::Json => init_with_layer(
            args,
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_target(true),
        ),
    }
}

fn init_with_layer<L>(args: &Args, fmt_layer: L) -> Result<()>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
