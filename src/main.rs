use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lab_scheduler::parser::{find_default_config, load_config, load_planning_config, save_config};
use lab_scheduler::planificar::ejecutar;
use lab_scheduler::reporter::print_summary;
use lab_scheduler::types::ResultadosOrganizacion;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lab-scheduler")]
#[command(about = "Round-robin lab session scheduling engine for university lab courses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the planning pipeline over a configuration document
    Plan {
        /// Path to the configuration JSON document
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress the per-advisory detail lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-print the summary of a document's existing planning result
    Report {
        /// Path to the configuration JSON document
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { config, quiet } => run_plan(config, quiet),
        Commands::Report { config } => run_report(&config),
    }
}

fn resolve_config_path(config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = config {
        return Ok(path);
    }
    find_default_config().context("no --config given and no default configuration file found")
}

fn run_plan(config: Option<PathBuf>, quiet: bool) -> Result<()> {
    let path = match resolve_config_path(config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{} {e}", "[ERROR]".red().bold());
            std::process::exit(1);
        }
    };

    let document = match load_config(&path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{} {e}", "[ERROR]".red().bold());
            std::process::exit(1);
        }
    };

    let planning_config = load_planning_config(&path.with_file_name("lab_scheduler.toml"));
    let document = ejecutar(document, &planning_config);

    let Some(raw) = &document.resultados_organizacion else {
        bail!("planning run produced no result section");
    };
    let resultados: ResultadosOrganizacion = serde_json::from_value(raw.clone())
        .context("failed to deserialize the planning result for summary printing")?;

    if !quiet {
        print_summary(&resultados);
    }

    save_config(&path, &document).context("failed to write the updated configuration document")?;

    Ok(())
}

fn run_report(config: &PathBuf) -> Result<()> {
    let document = match load_config(config) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{} {e}", "[ERROR]".red().bold());
            std::process::exit(1);
        }
    };

    let Some(raw) = &document.resultados_organizacion else {
        bail!("document has no resultados_organizacion section; run `plan` first");
    };
    let resultados: ResultadosOrganizacion =
        serde_json::from_value(raw.clone()).context("failed to deserialize resultados_organizacion")?;

    print_summary(&resultados);
    Ok(())
}
