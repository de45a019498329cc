use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use parts_movement::{
    config::{self, AppConfig},
    db::{self, DbPool},
    seed,
    services::{parts_log::PartsLogService, submitters::SubmitterService},
};
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize().await?;

    match cli.command {
        Commands::Migrate => handle_migrate(&context, cli.json).await?,
        Commands::Submitters(command) => {
            handle_submitters_command(&context, command, cli.json).await?
        }
        Commands::ExportCsv { output } => handle_export_csv(&context, output).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "partslog",
    about = "Maintenance commands for the parts movement log",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing tables and seed empty ones with the default rows
    Migrate,
    #[command(subcommand)]
    Submitters(SubmittersCommands),
    /// Write the movement log as CSV, newest first
    ExportCsv {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SubmittersCommands {
    /// List registered submitters
    List,
    /// Register a new submitter
    Add {
        /// Display name; surrounding whitespace is ignored
        name: String,
    },
}

struct CliContext {
    db: Arc<DbPool>,
}

impl CliContext {
    async fn initialize() -> Result<Self> {
        let config = config::load_config().context("failed to load application config")?;
        config::init_tracing(config.log_level(), config.log_json);

        let db_pool = connect(&config).await?;
        Ok(Self {
            db: Arc::new(db_pool),
        })
    }

    fn submitter_service(&self) -> SubmitterService {
        SubmitterService::new(self.db.clone())
    }

    fn parts_log_service(&self) -> PartsLogService {
        PartsLogService::new(self.db.clone())
    }
}

async fn connect(config: &AppConfig) -> Result<DbPool> {
    db::establish_connection_from_app_config(config)
        .await
        .context("failed to connect to database")
}

async fn handle_migrate(context: &CliContext, json: bool) -> Result<()> {
    db::run_migrations(&context.db)
        .await
        .context("failed to run migrations")?;
    let report = seed::seed_defaults(&context.db)
        .await
        .context("failed to seed default rows")?;

    if json {
        print_json(&serde_json::json!({
            "migrated": true,
            "seeded_etchings": report.etchings,
            "seeded_submitters": report.submitters,
        }))?;
    } else {
        println!(
            "Migrations applied; seeded {} etching(s) and {} submitter(s)",
            report.etchings, report.submitters
        );
    }

    Ok(())
}

async fn handle_submitters_command(
    context: &CliContext,
    command: SubmittersCommands,
    json: bool,
) -> Result<()> {
    let service = context.submitter_service();

    match command {
        SubmittersCommands::List => {
            let names = service
                .list()
                .await
                .context("failed to list submitters")?;
            if json {
                print_json(&names)?;
            } else if names.is_empty() {
                println!("No submitters registered");
            } else {
                for name in names {
                    println!("- {}", name);
                }
            }
        }
        SubmittersCommands::Add { name } => {
            let stored = service
                .register(Some(name))
                .await
                .context("failed to register submitter")?;
            if json {
                print_json(&serde_json::json!({ "ok": true, "name": stored }))?;
            } else {
                println!("Registered {}", stored);
            }
        }
    }

    Ok(())
}

async fn handle_export_csv(context: &CliContext, output: Option<PathBuf>) -> Result<()> {
    let csv = context
        .parts_log_service()
        .export_csv()
        .await
        .context("failed to export parts log")?;

    match output {
        Some(path) => {
            fs::write(&path, &csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {} byte(s) to {}", csv.len(), path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
