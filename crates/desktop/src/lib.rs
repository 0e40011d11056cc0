//! `smartstock-desktop`
//!
//! **Responsibility:** thin host shell around the inventory store.
//!
//! This crate provides:
//! - Environment configuration ([`AppConfig`])
//! - Shared application state wiring the store and the forecaster ([`AppState`])
//! - The command functions the UI layer invokes
//!
//! All business rules live in the domain crates.

pub mod commands;
pub mod config;

pub use commands::{AppState, ExportPayload};
pub use config::AppConfig;
