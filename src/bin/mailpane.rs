use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use mailpane::config::{Config, SourceKind, load_config, load_config_from};
use mailpane::mail::open_provider;
use mailpane::state::Mailbox;
use mailpane::state::load::LoadOutcome;
use mailpane::state::task::TaskStatus;
use mailpane::store::sqlite::SqliteCache;
use mailpane::tasks::runner_for;
use mailpane::terminal::run_tui;
use mailpane::view::{ListRow, ViewQuery};

#[derive(Parser)]
#[command(name = "mailpane")]
#[command(about = "Three-pane mail reader", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured mailbox source
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Directory or database for the source
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive three-pane UI
    Tui {
        /// Start with this search text
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Load the mailbox once and print the message list
    List {
        #[arg(long, default_value = "")]
        search: String,

        /// Mark these ids as starred before printing
        #[arg(long, num_args = 1..)]
        starred: Vec<u32>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the background task once and print its status
    RunTask,

    /// Copy the configured source into a SQLite cache file
    Cache {
        /// Database file to create or update
        db: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => load_config_from(path)?,
            None => load_config().map_err(|e| anyhow!("Configuration error: {e}"))?,
        };
        if let Some(kind) = self.source {
            cfg.source.kind = kind;
        }
        if let Some(path) = &self.path {
            cfg.source.path = Some(path.clone());
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = cli.config()?;

    match cli.cmd {
        Command::Tui { search } => {
            let provider = open_provider(&cfg.source)?;
            let runner = runner_for(&cfg.task);
            run_tui(provider, runner, ViewQuery::search(search)).await?;
            Ok(ExitCode::SUCCESS)
        }

        Command::List {
            search,
            starred,
            json,
        } => {
            let provider = open_provider(&cfg.source)?;
            let mut mailbox = Mailbox::new();

            if let LoadOutcome::Failed(reason) = mailbox.request(provider.as_ref()).await {
                eprintln!("Error: {reason}");
                return Ok(ExitCode::FAILURE);
            }
            for id in starred {
                mailbox.toggle_star(id);
            }

            let view = mailbox.view(&ViewQuery::search(search));
            if json {
                println!("{}", serde_json::to_string_pretty(&view.rows)?);
            } else {
                for row in &view.rows {
                    println!("{}", format_row(row));
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::RunTask => {
            let runner = runner_for(&cfg.task);
            let mut mailbox = Mailbox::new();
            let status = mailbox.run_task(runner.as_ref()).await;
            println!("{status}");
            Ok(match status {
                TaskStatus::Failed(_) => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }

        Command::Cache { db } => {
            let provider = open_provider(&cfg.source)?;
            let count = SqliteCache::new(&db).import_from(provider.as_ref()).await?;
            println!("Cached {count} message(s) in {}", db.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn format_row(row: &ListRow<'_>) -> String {
    let m = row.message;
    format!(
        "{}{} {:>5}  {:<12} {:<20} {}",
        if row.selected { '>' } else { ' ' },
        if row.starred { '*' } else { ' ' },
        m.id,
        m.date,
        m.sender,
        m.subject
    )
}
