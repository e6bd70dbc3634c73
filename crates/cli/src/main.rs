//! `tetragen` - generate labeled tetrahedron pair datasets.
//!
//! Reads a dataset configuration, generates pairs in the configured class
//! proportions and writes them as CSV, JSON or a directory of OBJ files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tetra_dataset::{DatasetConfig, DatasetDriver, DatasetWriter, OutputFormat};
use tetra_generator::PairGenerator;

#[derive(Parser, Debug)]
#[command(name = "tetragen")]
#[command(about = "Generate tetrahedron pairs labeled by intersection class", long_about = None)]
struct Cli {
    /// Dataset configuration file
    #[arg(short, long, default_value = "config/config.json")]
    config: PathBuf,

    /// Directory the dataset is written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Seed for reproducible runs (drawn from the OS when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of pairs, overriding `dataset_size`
    #[arg(short = 'n', long)]
    entries: Option<usize>,

    /// Output format, overriding `output_format`
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Obj,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Obj => OutputFormat::Obj,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = DatasetConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if let Some(entries) = cli.entries {
        anyhow::ensure!(entries > 0, "--entries must be greater than 0");
        config.dataset_size = entries;
    }
    if let Some(format) = cli.format {
        config.output_format = format.into();
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, size = config.dataset_size, format = %config.output_format, "starting run");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut writer = DatasetWriter::create(&config, &cli.output_dir)
        .context("Failed to create dataset writer")?;

    let driver = DatasetDriver::new(PairGenerator::default(), config);
    let summary = driver
        .run(&mut writer, &mut rng)
        .context("Dataset generation failed")?;
    let path = writer.finish().context("Failed to finish dataset")?;

    info!(
        path = %path.display(),
        pairs = summary.total(),
        intersecting = summary.intersecting,
        "dataset written"
    );
    Ok(())
}
