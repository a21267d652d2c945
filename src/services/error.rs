use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

use crate::services::collaborators::CollaboratorError;

/// Errors that stop argument resolution.
///
/// Nothing is rolled back: once one of these is returned the configuration
/// record must not be used. The binary reports the message on the diagnostic
/// destination and exits with [`ArgsError::exit_code`].
#[derive(Error, Debug)]
pub enum ArgsError {
    /// Malformed value or missing required value.
    #[error("{0}")]
    Usage(String),

    /// Two options whose combined effect is contradictory.
    #[error("{0}")]
    Conflict(String),

    /// An input or output file could not be opened.
    #[error("Cannot open {path} for {purpose}: {source}")]
    Resource {
        path: Utf8PathBuf,
        purpose: &'static str,
        #[source]
        source: io::Error,
    },

    /// A code reached a branch with no defined behaviour.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Argument file {path} includes itself.")]
    RecursiveInclude { path: Utf8PathBuf },

    #[error("Argument file {path} is nested more than {limit} levels deep.")]
    IncludeTooDeep { path: Utf8PathBuf, limit: usize },

    /// A collaborator rejected a value handed to it.
    #[error("{context}: {source}")]
    Collaborator {
        context: String,
        #[source]
        source: CollaboratorError,
    },

    /// `-h`, `-?` or `--help`.
    #[error("Usage requested")]
    HelpRequested,

    /// `--version`.
    #[error("pgnopts {0}")]
    VersionRequested(&'static str),
}

impl ArgsError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgsError::VersionRequested(_) => 0,
            // Reported by the shell as 255 on Unix.
            ArgsError::Internal(_) => -1,
            ArgsError::Usage(_)
            | ArgsError::Conflict(_)
            | ArgsError::Resource { .. }
            | ArgsError::RecursiveInclude { .. }
            | ArgsError::IncludeTooDeep { .. }
            | ArgsError::Collaborator { .. }
            | ArgsError::HelpRequested => 1,
        }
    }

    pub(crate) fn usage(message: impl Into<String>) -> Self {
        ArgsError::Usage(message.into())
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        ArgsError::Conflict(message.into())
    }

    pub(crate) fn resource(path: impl Into<Utf8PathBuf>, purpose: &'static str, source: io::Error) -> Self {
        ArgsError::Resource {
            path: path.into(),
            purpose,
            source,
        }
    }
}
