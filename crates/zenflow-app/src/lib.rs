//! Zen Flow Application
//!
//! Command-line shell over the core: artwork listing, export, replay to
//! frames and a demo stroke.

mod app;
mod cli;

pub use app::{App, AppConfig, AppError, AppResult, RenderOptions};
pub use cli::{Cli, Commands, run};
