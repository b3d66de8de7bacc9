//! Changeover optimizer CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use u_changeover::models::LineId;
use u_changeover::{
    export, ChangeoverService, OptimizationReport, OptimizationRequest, OptimizerConfig, Result,
};

#[derive(Parser)]
#[command(name = "changeover")]
#[command(about = "Exact changeover sequencing for shared production lines")]
#[command(version)]
struct Cli {
    /// Transition workbook (JSON)
    #[arg(short, long, env = "CHANGEOVER_WORKBOOK")]
    workbook: PathBuf,

    /// Optimizer configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List production lines
    Lines,

    /// List items available on a line
    Items {
        /// Line number
        #[arg(short, long)]
        line: u32,
    },

    /// Find the cheapest production order
    Optimize {
        /// Line number
        #[arg(short, long)]
        line: u32,

        /// Items to sequence (comma separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        items: Vec<String>,

        /// Baseline order for the savings figure (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        baseline: Option<Vec<String>>,

        /// Write the summary CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(format!("u_changeover={level},changeover={level}")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("u_changeover=info,changeover=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => OptimizerConfig::from_json_file(path)?,
        None => OptimizerConfig::default(),
    };
    let service = ChangeoverService::from_workbook_file(&cli.workbook, config)?;

    match cli.command {
        Commands::Lines => {
            for line in service.list_lines()? {
                println!("{line}");
            }
        }
        Commands::Items { line } => {
            for item in service.list_items(LineId(line))? {
                println!("{item}");
            }
        }
        Commands::Optimize {
            line,
            items,
            baseline,
            csv,
            json,
        } => {
            let mut request = OptimizationRequest::new(LineId(line), items);
            if let Some(baseline) = baseline {
                request = request.with_baseline(baseline);
            }
            let report = service.optimize(&request)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
            if let Some(path) = csv {
                export::save_csv(&report, &path)?;
                println!("CSV written to {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_summary(report: &OptimizationReport) {
    println!("\n{:=<72}", "");
    println!("LINE {} CHANGEOVER SCHEDULE", report.line);
    println!("{:=<72}", "");
    println!("{:<4} {:<24} {:<24} {:>10} {:>8}", "#", "From", "To", "Gallons", "Process");
    println!("{:-<72}", "");
    for (step, t) in report.transitions.iter().enumerate() {
        let process = t.process.map(|p| p.label()).unwrap_or("-");
        println!(
            "{:<4} {:<24} {:<24} {:>10.2} {:>8}",
            step + 1,
            t.from,
            t.to,
            t.cost,
            process
        );
    }
    println!("{:-<72}", "");
    println!("Order:    {}", report.order.join(export::ORDER_SEPARATOR));
    println!("Total:    {:.2} gallons", report.total_cost);
    println!("Baseline: {:.2} gallons", report.baseline_cost);
    println!("Saved:    {:.2} gallons", report.saved);
}
