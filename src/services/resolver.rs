use camino::{Utf8Path, Utf8PathBuf};

use crate::config::ToolSettings;
use crate::metrics::ResolveMetrics;
use crate::models::{ArgCode, RunConfig};
use crate::services::collaborators::{CollaboratorError, Collaborators, SourceKind};
use crate::services::error::ArgsError;

/// Drives argument resolution for one run.
///
/// Holds the configuration record being built, the collaborators that receive
/// values the resolver does not interpret itself, and the stack of argument
/// files currently being read. The short-form dispatcher, long-form dispatcher
/// and argument-file interpreter are all methods on this type.
///
/// # Example
///
/// ```ignore
/// let settings = ToolSettings::default();
/// let mut config = RunConfig::default();
/// let mut registry = Registry::new();
/// let mut resolver = ArgumentResolver::new(&mut config, &mut registry, &settings);
/// resolver.resolve_command_line(&["-ofound.pgn", "--minmoves", "20", "games.pgn"])?;
/// ```
pub struct ArgumentResolver<'a> {
    pub(crate) config: &'a mut RunConfig,
    pub(crate) collaborators: &'a mut dyn Collaborators,
    pub(crate) settings: &'a ToolSettings,
    pub(crate) include_stack: Vec<Utf8PathBuf>,
    pub(crate) metrics: ResolveMetrics,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(
        config: &'a mut RunConfig,
        collaborators: &'a mut dyn Collaborators,
        settings: &'a ToolSettings,
    ) -> Self {
        Self {
            config,
            collaborators,
            settings,
            include_stack: Vec::new(),
            metrics: ResolveMetrics::default(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        self.config
    }

    pub fn metrics(&self) -> &ResolveMetrics {
        &self.metrics
    }

    /// Process command-line tokens left to right.
    ///
    /// `--name` tokens go to the long-form dispatcher, which may also consume
    /// the following token. `-Xvalue` tokens go to the short-form dispatcher
    /// with the attached value. Anything else names a source file.
    pub fn resolve_command_line<S: AsRef<str>>(&mut self, args: &[S]) -> Result<(), ArgsError> {
        let mut index = 0;

        while index < args.len() {
            let arg = args[index].as_ref();

            if let Some(name) = arg.strip_prefix("--") {
                let value = args.get(index + 1).map(|v| v.as_ref()).unwrap_or("");
                let consumed = self.apply_long(name, value)?;
                index += consumed.tokens();
            } else if let Some(rest) = arg.strip_prefix('-') {
                let letter = rest
                    .chars()
                    .next()
                    .ok_or_else(|| ArgsError::usage("Missing argument letter after -"))?;
                let code = ArgCode::from_letter(letter)
                    .ok_or_else(|| ArgsError::usage(format!("Unknown flag: -{}. Use -h for help.", letter)))?;
                self.apply_short(code, &rest[letter.len_utf8()..])?;
                index += 1;
            } else {
                self.add_source(Utf8Path::new(arg), SourceKind::Normal);
                index += 1;
            }
        }

        self.metrics.log_summary();
        Ok(())
    }

    pub(crate) fn add_source(&mut self, path: &Utf8Path, kind: SourceKind) {
        tracing::debug!("Registering {:?} source {}", kind, path);
        self.collaborators.add_source_file(path, kind);
        self.metrics.record_source_file();
    }

    /// Report an inconsistency that does not stop the run.
    ///
    /// The message reaches the user through the diagnostic destination only;
    /// the trace copy stays at `debug` so the default stderr layer does not
    /// repeat it.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Soft inconsistency: {}", message);
        self.config.diagnostic(&message);
        self.metrics.record_warning();
    }

    /// Attach the option that supplied a value to a collaborator's refusal.
    pub(crate) fn collaborator_result(
        context: impl Into<String>,
        result: Result<(), CollaboratorError>,
    ) -> Result<(), ArgsError> {
        result.map_err(|source| ArgsError::Collaborator {
            context: context.into(),
            source,
        })
    }
}

/// Drop the spaces that may separate an option from its value.
pub(crate) fn skip_leading_spaces(value: &str) -> &str {
    value.trim_start_matches(' ')
}
