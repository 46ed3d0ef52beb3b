//! Borough Census CLI - Chart NYC borough metrics from a QuickFacts export
//!
//! # Commands
//!
//! ```bash
//! borough-census report                           # Read "NYC Census Jan-09-2020.csv", write 4 PNGs here
//! borough-census report export.csv -o charts/     # Custom input and output directory
//! borough-census inspect export.csv               # Print derived metrics as JSON
//! ```

use census::logs::log_error;
use census::transform::pipeline::DEFAULT_INPUT;
use census::{prepare_census, run_report, ChartStyle, HeaderPolicy, PipelineOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "borough-census")]
#[command(about = "Compare NYC boroughs from a Census QuickFacts export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input CSV export
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Map borough columns by position without checking their headers
    #[arg(long)]
    positional_headers: bool,
}

impl InputArgs {
    fn header_policy(&self) -> HeaderPolicy {
        if self.positional_headers {
            HeaderPolicy::Positional
        } else {
            HeaderPolicy::Strict
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: CSV → metrics → four bar charts
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Directory the charts are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Chart width in pixels
        #[arg(long, default_value = "1000")]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value = "600")]
        height: u32,
    },

    /// Print the derived per-borough metrics as JSON
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            input,
            out_dir,
            width,
            height,
        } => cmd_report(input, out_dir, width, height),

        Commands::Inspect { input } => cmd_inspect(input),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_report(
    input: InputArgs,
    out_dir: PathBuf,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = PipelineOptions {
        header_policy: input.header_policy(),
        input: input.input,
        output_dir: out_dir,
        chart: ChartStyle {
            width,
            height,
            ..ChartStyle::default()
        },
    };

    let summary = run_report(&options)?;

    eprintln!("\n📊 Charts:");
    for path in &summary.charts {
        eprintln!("   💾 {}", path.display());
    }
    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_inspect(input: InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = PipelineOptions {
        header_policy: input.header_policy(),
        input: input.input,
        ..PipelineOptions::default()
    };

    let report = prepare_census(&options)?;
    println!("{}", serde_json::to_string_pretty(&report.profiles)?);
    Ok(())
}
