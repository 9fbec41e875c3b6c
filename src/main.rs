mod cli;
mod config;
mod db;
mod engine;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Log {
            metric,
            value,
            date,
        }) => {
            handlers::handle_log(&conn, &config, &metric, value, date.as_deref())?;
        }
        Some(Commands::Goal { action }) => {
            handlers::handle_goal(&mut config, &action)?;
        }
        Some(Commands::Stats { week, metric, json }) => {
            handlers::handle_stats(&conn, &config, week, metric.as_deref(), json)?;
        }
        Some(Commands::Milestones { metric }) => {
            handlers::handle_milestones(&conn, &config, metric.as_deref())?;
        }
        Some(Commands::Plate) => {
            handlers::handle_plate()?;
        }
        Some(Commands::Menu { action }) => {
            handlers::handle_menu(&conn, &action)?;
        }
        Some(Commands::Shopping { action }) => {
            handlers::handle_shopping(&conn, &action)?;
        }
        Some(Commands::Export { json }) => {
            handlers::handle_export(&conn, &config, json)?;
        }

        // No subcommand → today's overview
        None => {
            handlers::handle_overview(&conn, &config)?;
        }
    }

    Ok(())
}
