//! Services module - argument resolution.
//!
//! Everything here works on a [`RunConfig`](crate::models::RunConfig) passed in
//! by reference; nothing reads process-wide state, and every failure comes back
//! as an [`ArgsError`] for the caller to report.
//!
//! # Components
//!
//! - [`ArgumentResolver`]: owns one resolution pass and drives the command line.
//!   The dispatchers and the argument-file interpreter are methods on it:
//!   - `apply_short` (short_form.rs): the single-character codes
//!   - `apply_long` (long_form.rs): the named options, returning how many tokens they used
//!   - `read_args_file` (argsfile.rs): the argument-file interpreter, with the
//!     include-stack guard against self-referential files
//! - [`classify_line`]: recognises `:-X` directive lines
//! - [`PlyBounds::apply`](crate::models::PlyBounds::apply): the bound resolver
//! - [`Collaborators`]: where values the resolver does not interpret are sent;
//!   [`Registry`] records them
//!
//! # Usage Example
//!
//! ```ignore
//! use pgnopts::config::ToolSettings;
//! use pgnopts::models::RunConfig;
//! use pgnopts::services::{ArgumentResolver, Registry};
//!
//! let settings = ToolSettings::default();
//! let mut config = RunConfig::default();
//! let mut registry = Registry::new();
//!
//! ArgumentResolver::new(&mut config, &mut registry, &settings)
//!     .resolve_command_line(&["-Aoptions.txt", "--stopafter", "10", "games.pgn"])?;
//! ```

pub mod argsfile;
pub mod bounds;
pub mod classifier;
pub mod collaborators;
pub mod error;
pub mod long_form;
pub mod resolver;
pub mod short_form;
pub mod usage;

pub use argsfile::LineSource;
pub use bounds::{BoundKind, BoundRejection, BoundSelector, parse_bound_spec};
pub use classifier::{Directive, classify_line};
pub use collaborators::{CollaboratorError, Collaborators, Registry, SourceKind, TagCriterion};
pub use error::ArgsError;
pub use long_form::{Consumed, LongOption, long_option, long_options};
pub use resolver::ArgumentResolver;
pub use usage::usage_text;
