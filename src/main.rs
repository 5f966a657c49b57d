//! pavement-synth - generate a labeled IMU pavement dataset
//!
//! # Usage
//! ```bash
//! pavement-synth --preset baseline --seed 42
//! pavement-synth --preset composite --output - --format jsonl | head
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pavement_synth::config::SynthConfig;
use pavement_synth::dataset::{
    self, BatchAssembler, DatasetSummary, OutputFormat, OutputTarget, Preset, SilentProgress,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pavement-synth")]
#[command(about = "Synthetic 6-axis IMU pavement dataset generator")]
#[command(version)]
struct Args {
    /// Config file (default: $PAVEMENT_SYNTH_CONFIG, then ./synth_config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset recipe
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Run seed for reproducible output
    #[arg(long, env = "PAVEMENT_SYNTH_SEED")]
    seed: Option<u64>,

    /// Output file, `-` for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// CLI flags win over file values
    fn apply_overrides(&self, config: &mut SynthConfig) {
        if let Some(preset) = self.preset {
            config.dataset.preset = preset;
        }
        if let Some(seed) = self.seed {
            config.dataset.seed = Some(seed);
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Logs always go to stderr so `--output -` keeps stdout clean.
fn init_logging(args: &Args) {
    let default_level = if args.quiet { "warn" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let mut config = match &args.config {
        Some(path) => SynthConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SynthConfig::load(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let plan = config.dataset.preset.plan();
    info!(
        preset = %config.dataset.preset,
        samples = plan.total_samples(),
        points_per_sample = config.waveform.n_points(),
        sample_rate_hz = config.waveform.sample_rate_hz,
        "Starting pavement dataset generation"
    );

    let mut assembler = BatchAssembler::new(config.waveform).seed(config.dataset.seed);
    if args.quiet {
        assembler = assembler.progress(SilentProgress);
    }
    let dataset = assembler.run(&plan).context("Dataset generation failed")?;

    let target = OutputTarget::from_path(&config.output_path());
    dataset::export(&dataset, &target, config.output.format)
        .with_context(|| format!("Failed to write dataset to {target}"))?;

    DatasetSummary::from_dataset(&dataset).log();
    info!(seed = dataset.seed(), "Rerun with --seed {} to reproduce", dataset.seed());

    Ok(())
}
