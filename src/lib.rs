// pgnopts - Argument resolution for a PGN extraction tool
//
// This is the library crate containing the resolver and its data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, ToolSettings};
pub use models::RunConfig;
pub use services::{ArgsError, ArgumentResolver, Collaborators, Registry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
