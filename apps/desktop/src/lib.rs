//! Flashdeck desktop backend: SQLite store, import/export and the command layer
//! shared by the `flashdeck` CLI.

pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod state;
pub mod transfer;

pub use commands::CommandError;
pub use config::Config;
pub use logging::init_tracing;
pub use state::AppState;
