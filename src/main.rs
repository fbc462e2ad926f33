use clap::Parser;
use sqlpipe::cli::{Cli, Commands};
use sqlpipe::cli_handlers;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cli { db, command } = Cli::parse();

    let result = match command {
        Commands::Load { table, file } => cli_handlers::handle_load(&db, table, file),
        Commands::Export { table, file } => cli_handlers::handle_export(&db, table, file),
        Commands::Sql {
            script,
            file,
            title,
        } => cli_handlers::handle_sql(&db, script, file, title),
        Commands::Ctas {
            table,
            select,
            title,
        } => cli_handlers::handle_ctas(&db, table, select, title),
        Commands::Run { manifest } => cli_handlers::handle_run(&db, &manifest),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
