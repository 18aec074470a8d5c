mod commands;
mod config;
mod logging;

use std::sync::Arc;

use clap::Parser;
use commands::Command;
use config::Config;
use localset_core::SettingsService;
use localset_storage_sqlite::{create_pool, db, run_migrations, SettingsRepository};
use logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "localset")]
#[command(about = "Read and write localized settings")]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides LOCALSET_DB_PATH)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Language used to resolve localized fields (overrides LOCALSET_LANGUAGE)
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.db, cli.lang);
    init_tracing(&config.log_format);

    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;

    let store = Arc::new(SettingsRepository::new(pool));
    let service = SettingsService::new(store, config.language);

    let stdout = std::io::stdout();
    commands::run(&service, None, cli.command, &mut stdout.lock())
}
