use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docx_formula_mover::config::Config;
use docx_formula_mover::pipeline::{BatchOptions, run_batch_async};

#[derive(Parser)]
#[command(
    name = "docx-formula-mover",
    version,
    about = "Sort .docx files by whether they contain unescaped $$...$$ display math"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory and copy each document into formula_error/ or no_error/
    Scan {
        /// Input .docx file or directory
        input: PathBuf,

        /// Output root for the sorted copies and the reports
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Only scan the top level of an input directory
        #[arg(long)]
        no_recursive: bool,

        /// Report where files would go without copying anything
        #[arg(long)]
        dry_run: bool,

        /// Number of files to scan concurrently
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Log every file's outcome
        #[arg(short, long)]
        verbose: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init,
    /// Print the configuration file location
    Path,
    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "docx_formula_mover=debug"
    } else {
        "docx_formula_mover=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            out,
            no_recursive,
            dry_run,
            jobs,
            verbose,
        } => {
            init_logging(verbose);
            let config = Config::load().context("failed to load configuration")?;

            let output_root = out
                .or(config.output_root.clone())
                .context("no output root: pass --out or set output_root in the config file")?;

            let options = BatchOptions {
                input,
                output_root,
                recursive: config.recursive && !no_recursive,
                dry_run,
                jobs: jobs.unwrap_or(config.jobs).max(1),
                delimiter: config.delimiter.scanner(),
            };

            let outcome = run_batch_async(options, |_| {}).await?;
            let summary = &outcome.summary;
            println!(
                "Scanned {} file(s): {} formula_error, {} no_error, {} skipped",
                summary.total(),
                summary.formula_error,
                summary.no_error,
                summary.skipped
            );
            if summary.copy_failures > 0 {
                println!("{} file(s) could not be copied; see the report", summary.copy_failures);
            }
            if dry_run {
                println!("Dry run: no files were copied");
            }
            println!("Reports: {}", outcome.reports.json.display());
            println!("         {}", outcome.reports.csv.display());
        }
        Commands::Config { action } => {
            init_logging(false);
            match action {
                ConfigAction::Init => {
                    Config::init_default()?;
                    if let Some(path) = Config::get_config_path() {
                        println!("Wrote {}", path.display());
                    }
                }
                ConfigAction::Path => match Config::get_config_path() {
                    Some(path) => println!("{}", path.display()),
                    None => println!("No configuration directory on this platform"),
                },
                ConfigAction::Show => {
                    let config = Config::load()?;
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
        }
    }

    Ok(())
}
