//! Data models for argument resolution.
//!
//! - [`RunConfig`]: the single configuration record every dispatcher mutates
//! - [`ArgCode`]: the closed set of single-character argument codes
//! - [`GameRanges`]: ascending game-number ranges for `--selectonly`/`--skipmatching`
//! - [`OutputTarget`], [`LogTarget`], [`NonMatchingTarget`]: opened destinations
//! - [`ToolSettings`]: installation-level settings loaded by the config manager

pub mod arg_code;
pub mod destinations;
pub mod ranges;
pub mod run_config;
pub mod settings;

pub use arg_code::ArgCode;
pub use destinations::{LogTarget, NonMatchingTarget, OpenMode, OutputTarget};
pub use ranges::{GameRange, GameRanges, RangeListError};
pub use run_config::{
    OutputFormat, PlyBounds, RunConfig, SetupTagPolicy, SideToMove, TagOutputFormat,
};
pub use settings::ToolSettings;
