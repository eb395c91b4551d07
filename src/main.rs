use anyhow::{Context, Result};
use clap::Parser;
use pavement_report::config::ReportConfig;
use pavement_report::pipeline::generate_report;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pavement-report")]
#[command(about = "Build pavement distress detail and segment reports from labelme annotations")]
struct Args {
    /// Directory containing labelme JSON files
    #[arg(short, long)]
    labels: PathBuf,

    /// Position index file (`pile->image->...` per line)
    #[arg(short, long)]
    index: PathBuf,

    /// Output spreadsheet path
    #[arg(short, long, default_value = "report.xlsx")]
    output: PathBuf,

    /// JSON file with report settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Real distance covered by one image's height (m)
    #[arg(long)]
    real_height: Option<f64>,

    /// Real distance covered by one image's width (m)
    #[arg(long)]
    real_width: Option<f64>,

    /// Positions aggregated into one segment row
    #[arg(long)]
    segment_size: Option<usize>,

    /// Meters between consecutive positions
    #[arg(long)]
    pile_step: Option<u64>,

    /// Trailing characters dropped from every pile key
    #[arg(long)]
    suffix_width: Option<usize>,

    /// Log per-image and per-segment detail
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                anyhow::ensure!(
                    self.real_height.is_some() && self.real_width.is_some(),
                    "--real-height and --real-width are required without --config"
                );
                ReportConfig::default()
            }
        };

        if let Some(real_height) = self.real_height {
            config.real_height_m = real_height;
        }
        if let Some(real_width) = self.real_width {
            config.real_width_m = real_width;
        }
        if let Some(segment_size) = self.segment_size {
            config.segment_size = segment_size;
        }
        if let Some(pile_step) = self.pile_step {
            config.pile_step_m = pile_step;
        }
        if let Some(suffix_width) = self.suffix_width {
            config.pile_key.suffix_width = suffix_width;
        }

        config.validate().context("invalid report settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "pavement_report=debug"
    } else {
        "pavement_report=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = args.report_config()?;
    info!(
        real_height_m = config.real_height_m,
        real_width_m = config.real_width_m,
        segment_size = config.segment_size,
        pile_step_m = config.pile_step_m,
        "report settings"
    );

    let stats = generate_report(&args.labels, &args.index, &args.output, &config)
        .with_context(|| format!("failed to build report from {}", args.labels.display()))?;

    println!("{}", stats.summary_string());
    Ok(())
}
