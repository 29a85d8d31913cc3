//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categorize` - Categorize a single description
//! - `common` - Shared utilities (config loading, seeding, delays, formatting)
//! - `config` - Show the resolved configuration
//! - `dashboard` - Dashboard command and the shared renderers
//! - `sample` - Print generated sample data
//! - `shell` - Interactive session

pub mod categorize;
pub mod common;
pub mod config;
pub mod dashboard;
pub mod sample;
pub mod shell;

// Re-export command functions for main.rs
pub use categorize::*;
pub use common::*;
pub use config::*;
pub use dashboard::*;
pub use sample::*;
pub use shell::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First eight characters of an ID, enough to type back into the shell
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(i, _)| &id[..i])
}
