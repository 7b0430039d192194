//! CLI entry point for the school infrastructure indicator run.
//!
//! With no arguments it reproduces the fixed run: Curitiba schools from the
//! 2024 basic-education census, a 200-school sample with seed 42, outputs in
//! `resultados/`.

use anyhow::Result;
use censo_infra::pipeline::{
    DEFAULT_INPUT, DEFAULT_MUNICIPALITY, DEFAULT_OUT_DIR, DEFAULT_PREFIX, DEFAULT_SAMPLE_SIZE,
    DEFAULT_SEED, PipelineConfig, run,
};
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "censo_infra")]
#[command(about = "Infrastructure indicators for the schools of one municipality", long_about = None)]
struct Cli {
    /// Semicolon-delimited, Latin-1 census microdata file
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory for all outputs
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Municipality name (matched upper-cased, exactly)
    #[arg(short, long, default_value = DEFAULT_MUNICIPALITY)]
    municipality: String,

    /// Number of schools to sample
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Seed for the sampler
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Prefix of the sample output files
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Also score every filtered school under this prefix (e.g. "curitiba_completo")
    #[arg(long)]
    full_prefix: Option<String>,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        PipelineConfig {
            input: cli.input,
            out_dir: cli.out_dir,
            municipality: cli.municipality.to_uppercase(),
            sample_size: cli.sample_size,
            seed: cli.seed,
            prefix: cli.prefix,
            full_prefix: cli.full_prefix,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/censo_infra.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("censo_infra.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = PipelineConfig::from(Cli::parse());
    let report = run(&config)?;

    info!(
        filtered = report.filtered_rows,
        sampled = report.sampled_rows,
        sample_csv = %report.sample_csv.display(),
        indicators = %report.sample_outputs.indicators_csv.display(),
        histogram = %report.sample_outputs.histogram_png.display(),
        "Done, check the output directory"
    );
    if let Some(full) = &report.full_outputs {
        info!(indicators = %full.indicators_csv.display(), "Full municipality scored");
    }

    Ok(())
}
