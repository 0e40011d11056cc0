//! `smartstock` command-line entry point.
//!
//! Usage: `smartstock [stats|items|low-stock|bills|predictions|insights|reorder|alerts|export-csv|export-json|reset]`

use anyhow::anyhow;
use serde::Serialize;

use smartstock_desktop::commands;
use smartstock_desktop::{AppConfig, AppState};

fn print_json<T: Serialize>(value: Result<T, String>) -> anyhow::Result<()> {
    let value = value.map_err(|e| anyhow!(e))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    smartstock_observability::init();

    let config = AppConfig::from_env()?;
    let state = AppState::open(&config)?;
    tracing::info!(in_memory = config.in_memory, season = ?config.season, "smartstock started");

    let action = std::env::args().nth(1).unwrap_or_else(|| "stats".to_string());
    match action.as_str() {
        "stats" => print_json(commands::get_stats(&state)),
        "items" => print_json(commands::list_inventory_items(&state)),
        "low-stock" => print_json(commands::get_low_stock_items(&state)),
        "bills" => print_json(commands::list_scanned_bills(&state)),
        "predictions" => print_json(commands::get_predictions(&state)),
        "insights" => print_json(commands::get_insights(&state)),
        "reorder" => print_json(commands::get_reorder_recommendations(&state)),
        "alerts" => print_json(commands::get_alerts(&state)),
        "reset" => print_json(commands::reset_all_data(&state)),
        "export-csv" | "export-json" => {
            let format = action.trim_start_matches("export-");
            let payload = commands::export_inventory(&state, format).map_err(|e| anyhow!(e))?;
            eprintln!("{}", payload.filename);
            println!("{}", payload.contents);
            Ok(())
        }
        other => Err(anyhow!("unknown command: {other}")),
    }
}
