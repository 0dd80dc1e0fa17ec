//! Linguad Server
//!
//! HTTP API for language identification. Two routes do the work:
//! `GET /languages` lists the supported catalog and `POST /detect` classifies
//! a text, returning per-language scores above the configured threshold.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use state::AppState;
