use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questc::QuestConverter;

#[derive(Parser)]
#[command(
    name = "questc",
    version,
    about = "Transpile Jython quest scripts to Java quest classes"
)]
struct Cli {
    /// Quest script file, or a directory searched for quest scripts
    path: PathBuf,

    /// Report format printed after conversion
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("questc v{}", env!("CARGO_PKG_VERSION"));

    let converter = QuestConverter::new();
    let reports = converter.convert_path(&cli.path)?;

    match cli.report {
        ReportFormat::Text => {
            for report in &reports {
                print!("{}", report.render_text());
            }
            let warning_count: usize = reports.iter().map(|r| r.warnings.len()).sum();
            println!(
                "{} {} script(s) converted, {} warning(s)",
                "Done:".bright_green().bold(),
                reports.len(),
                warning_count
            );
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)?;
            println!("{json}");
        }
    }

    Ok(())
}
