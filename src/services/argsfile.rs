//! Argument files.
//!
//! One directive per line:
//!
//! ```text
//! :-ofound.pgn          short-form argument with its value
//! :--minmoves 20        long-form argument, value after the first space
//! :games.pgn            a source file
//! :-t                   start of a tag-criteria block
//! White "Fischer"       data line for the block above
//! ```
//!
//! Directives for tags, rosters, variations and material descriptors leave a
//! pending mode behind; plain lines that follow are handed to that mode's
//! handler until the next directive.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};

use crate::models::ArgCode;
use crate::services::classifier::{Directive, classify_line};
use crate::services::collaborators::SourceKind;
use crate::services::error::ArgsError;
use crate::services::resolver::{ArgumentResolver, skip_leading_spaces};

/// Reads a text file one line at a time with line endings removed.
pub struct LineSource {
    path: Utf8PathBuf,
    reader: BufReader<File>,
    buffer: String,
}

impl LineSource {
    pub fn open(path: &Utf8Path) -> Result<Self, ArgsError> {
        let file = File::open(path).map_err(|e| ArgsError::resource(path, "reading", e))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buffer: String::new(),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Iterator for LineSource {
    type Item = Result<String, ArgsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                let line = self.buffer.trim_end_matches(['\n', '\r']);
                Some(Ok(line.to_string()))
            }
            Err(e) => Some(Err(ArgsError::resource(self.path.clone(), "reading", e))),
        }
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl ArgumentResolver<'_> {
    /// Interpret an argument file, including any files it names with `-A`.
    ///
    /// Fails if the file is already being read further up the chain or the
    /// chain is already `max_include_depth` files deep.
    pub fn read_args_file(&mut self, path: &Utf8Path) -> Result<(), ArgsError> {
        let canonical = path
            .canonicalize_utf8()
            .map_err(|e| ArgsError::resource(path, "reading", e))?;

        if self.include_stack.contains(&canonical) {
            return Err(ArgsError::RecursiveInclude {
                path: path.to_path_buf(),
            });
        }
        let limit = self.settings.max_include_depth;
        if self.include_stack.len() >= limit {
            return Err(ArgsError::IncludeTooDeep {
                path: path.to_path_buf(),
                limit,
            });
        }

        tracing::info!("Reading arguments from {} (depth {})", path, self.include_stack.len() + 1);
        self.metrics.record_args_file();

        self.include_stack.push(canonical);
        let result = self.interpret_args_file(path);
        self.include_stack.pop();
        result
    }

    fn interpret_args_file(&mut self, path: &Utf8Path) -> Result<(), ArgsError> {
        let mut pending: Option<ArgCode> = None;

        for line in LineSource::open(path)? {
            let line = line?;
            if is_blank(&line) {
                continue;
            }

            match classify_line(&line)? {
                Some(Directive {
                    code: ArgCode::LongForm,
                    value,
                }) => {
                    let (name, value) = match value.split_once(' ') {
                        Some((name, value)) => (name, skip_leading_spaces(value)),
                        None => (value, ""),
                    };
                    self.apply_long(name, value)?;
                    pending = None;
                }
                Some(Directive { code, value }) => {
                    self.apply_short(code, value)?;
                    pending = code.persists_across_lines().then_some(code);
                }
                None => {
                    if let Some(source) = line.strip_prefix(':') {
                        self.add_source(Utf8Path::new(source), SourceKind::Normal);
                    } else if let Some(mode) = pending {
                        self.apply_data_line(mode, &line, path.as_str())?;
                    } else {
                        return Err(ArgsError::usage(format!(
                            "Missing argument type for line {} in the argument file.",
                            line
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Route one plain line to the handler for the pending mode.
    pub(crate) fn apply_data_line(&mut self, mode: ArgCode, line: &str, origin: &str) -> Result<(), ArgsError> {
        self.metrics.record_data_line();
        let context = format!("{} line \"{}\" from {}", mode, line, origin);

        let result = match mode {
            ArgCode::Moves => self.collaborators.add_textual_variation(line),
            ArgCode::Positions => {
                self.config.positional_variations = true;
                self.collaborators.add_positional_variation(line)
            }
            ArgCode::Tags => self.collaborators.add_tag_criterion(line, origin),
            ArgCode::TagRoster => self.collaborators.add_roster_line(line),
            ArgCode::Endings => self.collaborators.add_material_description(line, true),
            ArgCode::EndingsColoured => self.collaborators.add_material_description(line, false),
            other => {
                return Err(ArgsError::Internal(format!(
                    "{} has no handler for data lines",
                    other
                )));
            }
        };

        Self::collaborator_result(context, result)
    }

    /// Feed every non-blank line of a file to one mode's handler.
    pub(crate) fn feed_file(&mut self, mode: ArgCode, path: &Utf8Path) -> Result<(), ArgsError> {
        tracing::debug!("Reading {} lines from {}", mode, path);
        for line in LineSource::open(path)? {
            let line = line?;
            if !is_blank(&line) {
                self.apply_data_line(mode, &line, path.as_str())?;
            }
        }
        Ok(())
    }

    /// Register every file named in a list file, one name per line.
    pub(crate) fn read_file_list(&mut self, path: &Utf8Path, kind: SourceKind) -> Result<(), ArgsError> {
        for line in LineSource::open(path)? {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                self.add_source(Utf8Path::new(name), kind);
            }
        }
        Ok(())
    }
}
