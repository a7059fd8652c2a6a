//! numfix-gen - write the standard array fixture set

use anyhow::{Context, Result};
use clap::Parser;
use numfix::fixtures::{self, FixtureConfig};
use std::path::PathBuf;

/// Generate deterministic .npy and .npz fixture files
#[derive(Parser)]
#[command(name = "numfix-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to write the fixtures into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with fixture settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Years covered by the weather series
    #[arg(long)]
    years: Option<u32>,

    /// Hours between two weather records
    #[arg(long)]
    step_hours: Option<u32>,

    /// Seed for the weather values
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the archive that includes the float16 array
    #[arg(long)]
    no_f16: bool,
}

impl Cli {
    fn into_config(self) -> Result<FixtureConfig> {
        let mut config = match &self.config {
            Some(path) => FixtureConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => FixtureConfig::default(),
        };

        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(step_hours) = self.step_hours {
            config.step_hours = step_hours;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.no_f16 {
            config.write_float16_archive = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("numfix=info".parse()?),
        )
        .init();

    let config = Cli::parse().into_config()?;
    tracing::info!(
        output = %config.output_dir.display(),
        years = config.years,
        step_hours = config.step_hours,
        seed = config.seed,
        "generating fixtures"
    );

    let report = fixtures::generate(&config)
        .with_context(|| format!("writing fixtures to {}", config.output_dir.display()))?;

    for file in &report.files {
        println!("{}", file.display());
    }
    Ok(())
}
