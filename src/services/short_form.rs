//! Single-character argument codes.
//!
//! The same dispatcher serves `-Xvalue` on the command line, `:-Xvalue` in
//! argument files, and the long-form names that are plain aliases.

use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;

use crate::models::run_config::{GAME_FILE_SUFFIX, MAX_ECO_LEVEL, MIN_ECO_LEVEL, UCI_LINE_LENGTH};
use crate::models::{
    ArgCode, LogTarget, NonMatchingTarget, OpenMode, OutputFormat, OutputTarget, TagOutputFormat,
};
use crate::services::bounds::{BoundKind, BoundSpecError, parse_bound_spec};
use crate::services::collaborators::SourceKind;
use crate::services::error::ArgsError;
use crate::services::resolver::{ArgumentResolver, skip_leading_spaces};

static POLYGLOT_HASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0[xX])?([0-9a-fA-F]{1,16})$").expect("Invalid polyglot hash regex")
});

impl ArgumentResolver<'_> {
    /// Validate and apply one short-form argument.
    pub fn apply_short(&mut self, code: ArgCode, value: &str) -> Result<(), ArgsError> {
        tracing::debug!("Applying {} with value {:?}", code, value);
        self.metrics.record_short_form();

        let filename = skip_leading_spaces(value);

        match code {
            ArgCode::WriteToOutputFile => self.select_output(code, filename, OpenMode::Write),
            ArgCode::AppendToOutputFile => self.select_output(code, filename, OpenMode::Append),
            ArgCode::WriteToLogFile => {
                self.select_log(filename, OpenMode::Write);
                Ok(())
            }
            ArgCode::AppendToLogFile => {
                self.select_log(filename, OpenMode::Append);
                Ok(())
            }
            ArgCode::DuplicatesFile => {
                if filename.is_empty() {
                    return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
                }
                if self.config.suppress_duplicates {
                    return Err(ArgsError::conflict(format!(
                        "{} clashes with the {} flag.",
                        code,
                        ArgCode::DontKeepDuplicates
                    )));
                }
                let target = OutputTarget::open(Utf8Path::new(filename), OpenMode::Write)
                    .map_err(|e| ArgsError::resource(filename, "writing", e))?;
                self.config.duplicates = Some(target);
                Ok(())
            }
            ArgCode::NonMatchingGames => {
                if filename.is_empty() {
                    return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
                }
                self.config.non_matching = None;
                let target = if filename == "stdout" {
                    NonMatchingTarget::Stdout
                } else {
                    let file = OutputTarget::open(Utf8Path::new(filename), OpenMode::Write)
                        .map_err(|e| ArgsError::resource(filename, "writing", e))?;
                    NonMatchingTarget::File(file)
                };
                self.config.non_matching = Some(target);
                Ok(())
            }
            ArgCode::UseEcoFile => {
                self.config.add_eco = true;
                if !filename.is_empty() {
                    self.config.eco_file = filename.into();
                } else if let Some(eco_file) = &self.settings.eco_file {
                    self.config.eco_file = eco_file.clone();
                }
                let eco_file = self.config.eco_file.clone();
                Self::collaborator_result(
                    format!("{}{}", code, eco_file),
                    self.collaborators.build_eco_table(&eco_file),
                )
            }
            ArgCode::EcoOutputLevel => {
                if let Some(name) = self.config.output_filename() {
                    return Err(ArgsError::conflict(format!(
                        "{}: File {} has already been selected for output.",
                        code, name
                    )));
                }
                if self.config.games_per_file > 0 {
                    return Err(ArgsError::conflict(format!(
                        "{} conflicts with {}.",
                        code,
                        ArgCode::GamesPerFile
                    )));
                }
                let level = parse_unsigned(value).ok_or_else(|| {
                    ArgsError::usage(format!("{0} requires a number attached, e.g., {0}1.", code))
                })?;
                if !(MIN_ECO_LEVEL..=MAX_ECO_LEVEL).contains(&level) {
                    return Err(ArgsError::usage(format!(
                        "{} level should be between {} and {}.",
                        code, MIN_ECO_LEVEL, MAX_ECO_LEVEL
                    )));
                }
                self.config.eco_level = level;
                Ok(())
            }
            ArgCode::GamesPerFile => {
                if self.config.eco_level > 0 {
                    return Err(ArgsError::conflict(format!(
                        "{} conflicts with {}.",
                        code,
                        ArgCode::EcoOutputLevel
                    )));
                }
                if let Some(name) = self.config.output_filename() {
                    return Err(ArgsError::conflict(format!(
                        "{}: File {} has already been selected for output.",
                        code, name
                    )));
                }
                if let Some((games, first_file)) = value.split_once(',') {
                    match (parse_unsigned(games), parse_unsigned(first_file)) {
                        (Some(games), Some(first_file)) => {
                            self.config.games_per_file = games;
                            self.config.next_file_number = first_file;
                        }
                        _ => {
                            return Err(ArgsError::usage(format!(
                                "{} should be followed by either one or two unsigned integers.",
                                code
                            )));
                        }
                    }
                } else {
                    self.config.games_per_file = parse_unsigned(value).ok_or_else(|| {
                        ArgsError::usage(format!("{} should be followed by an unsigned integer.", code))
                    })?;
                }
                Ok(())
            }
            ArgCode::CheckFile => {
                if filename.is_empty() {
                    return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
                }
                if is_game_file(filename) {
                    self.add_source(Utf8Path::new(filename), SourceKind::Check);
                    Ok(())
                } else {
                    self.read_file_list(Utf8Path::new(filename), SourceKind::Check)
                }
            }
            ArgCode::FileOfFiles => {
                if filename.is_empty() {
                    return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
                }
                self.read_file_list(Utf8Path::new(filename), SourceKind::Normal)
            }
            ArgCode::FileOfArguments => {
                if filename.is_empty() {
                    return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
                }
                self.read_args_file(Utf8Path::new(filename))
            }
            ArgCode::MoveBounds => self.apply_bound_spec(code, BoundKind::Moves, value),
            ArgCode::PlyBounds => self.apply_bound_spec(code, BoundKind::Ply, value),
            ArgCode::TagExtraction => Self::collaborator_result(
                code.to_string(),
                self.collaborators.add_tag_criterion(value, "command line"),
            ),
            ArgCode::LineWidth => {
                let width = parse_unsigned(value).ok_or_else(|| {
                    ArgsError::usage(format!("{} should be followed by an unsigned integer.", code))
                })?;
                self.set_line_length(width);
                Ok(())
            }
            ArgCode::Help | ArgCode::AlternativeHelp => Err(ArgsError::HelpRequested),
            ArgCode::OutputFormat => {
                let format = OutputFormat::parse(value)
                    .ok_or_else(|| ArgsError::usage(format!("Unknown output format {}.", value)))?;
                if format == OutputFormat::Uci {
                    self.config.keep_nags = false;
                    self.config.keep_comments = false;
                    self.config.keep_move_numbers = false;
                    self.config.keep_checks = false;
                    self.config.keep_variations = false;
                    self.set_line_length(UCI_LINE_LENGTH);
                }
                self.config.output_format = format;
                Ok(())
            }
            ArgCode::SevenTagRoster => {
                let roster_free = matches!(
                    self.config.tag_output,
                    TagOutputFormat::AllTags | TagOutputFormat::SevenTagRoster
                );
                if !roster_free || self.config.only_output_wanted_tags {
                    return Err(ArgsError::conflict(format!(
                        "{} clashes with another roster-related argument.",
                        code
                    )));
                }
                self.config.tag_output = TagOutputFormat::SevenTagRoster;
                Ok(())
            }
            ArgCode::DontKeepComments => {
                if self.config.keep_only_commented_games {
                    return Err(ArgsError::conflict(format!("{} clashes with --commented.", code)));
                }
                self.config.keep_comments = false;
                Ok(())
            }
            ArgCode::DontKeepDuplicates => {
                if self.config.duplicates.is_some() {
                    return Err(ArgsError::conflict(format!(
                        "{} clashes with the {} flag.",
                        code,
                        ArgCode::DuplicatesFile
                    )));
                }
                self.config.suppress_duplicates = true;
                Ok(())
            }
            ArgCode::DontMatchPermutations => {
                self.config.match_permutations = false;
                Ok(())
            }
            ArgCode::DontKeepNags => {
                self.config.keep_nags = false;
                Ok(())
            }
            ArgCode::OutputFenString => {
                if !value.is_empty() {
                    if self.config.add_fen_comments {
                        self.warn(format!("{}{} conflicts with --fencomments", code, value));
                    } else {
                        self.config.fen_comment_pattern = Some(value.to_string());
                    }
                }
                // --fencomments already puts a FEN after every move.
                self.config.output_fen_string = !self.config.add_fen_comments;
                Ok(())
            }
            ArgCode::CheckOnly => {
                self.config.check_only = true;
                Ok(())
            }
            ArgCode::KeepSilent => {
                self.config.verbosity = 1;
                Ok(())
            }
            ArgCode::UseSoundex => {
                self.config.use_soundex = true;
                Ok(())
            }
            ArgCode::MatchCheckmate => {
                if self.config.match_only_insufficient_material {
                    return Err(ArgsError::conflict(format!("{} clashes with --insufficient.", code)));
                }
                if self.config.match_only_stalemate {
                    return Err(ArgsError::conflict(format!("{} clashes with --stalemate.", code)));
                }
                self.config.match_only_checkmate = true;
                Ok(())
            }
            ArgCode::SuppressOriginals => {
                self.config.suppress_originals = true;
                Ok(())
            }
            ArgCode::DontKeepVariations => {
                if self.config.split_variants {
                    return Err(ArgsError::conflict(format!(
                        "{} clashes with --splitvariants.",
                        code
                    )));
                }
                self.config.keep_variations = false;
                Ok(())
            }
            ArgCode::UseVirtualHashTable => {
                self.config.use_virtual_hash_table = true;
                Ok(())
            }
            ArgCode::Tags
            | ArgCode::TagRoster
            | ArgCode::Moves
            | ArgCode::Positions
            | ArgCode::Endings
            | ArgCode::EndingsColoured => {
                if filename.is_empty() {
                    Ok(())
                } else {
                    self.feed_file(code, Utf8Path::new(filename))
                }
            }
            ArgCode::HashcodeMatch => {
                let hash = parse_polyglot_hash(value).ok_or_else(|| {
                    ArgsError::usage(format!(
                        "{} must be followed by a hexadecimal hash value rather than {}.",
                        code, value
                    ))
                })?;
                self.collaborators.match_polyglot_hash(hash);
                self.config.positional_variations = true;
                Ok(())
            }
            ArgCode::LongForm => Err(ArgsError::Internal(format!(
                "{} reached the short-form dispatcher",
                code
            ))),
        }
    }

    fn select_output(&mut self, code: ArgCode, filename: &str, mode: OpenMode) -> Result<(), ArgsError> {
        if self.config.eco_level > 0 {
            return Err(ArgsError::conflict(format!(
                "{} conflicts with {}.",
                code,
                ArgCode::EcoOutputLevel
            )));
        }
        if self.config.games_per_file > 0 {
            return Err(ArgsError::conflict(format!(
                "{} conflicts with {}.",
                code,
                ArgCode::GamesPerFile
            )));
        }
        if let Some(name) = self.config.output_filename() {
            return Err(ArgsError::conflict(format!(
                "{}: File {} has already been selected for output.",
                code, name
            )));
        }
        if filename.is_empty() {
            return Err(ArgsError::usage(format!("Usage: {}filename.", code)));
        }

        let target = OutputTarget::open(Utf8Path::new(filename), mode)
            .map_err(|e| ArgsError::resource(filename, "writing", e))?;
        tracing::info!("Output goes to {}", target.path());
        self.config.output = Some(target);
        Ok(())
    }

    /// Switch the diagnostic destination, falling back to standard error.
    fn select_log(&mut self, filename: &str, mode: OpenMode) {
        // Close any earlier log file before opening the next one.
        self.config.log = LogTarget::Stderr;

        match OutputTarget::open(Utf8Path::new(filename), mode) {
            Ok(target) => {
                tracing::info!("Diagnostics go to {}", target.path());
                self.config.log = LogTarget::File(target);
            }
            Err(e) => {
                tracing::debug!("Log file {} unusable: {}", filename, e);
                self.warn(format!("Unable to open {} for writing.", filename));
            }
        }
    }

    fn apply_bound_spec(&mut self, code: ArgCode, kind: BoundKind, value: &str) -> Result<(), ArgsError> {
        let (selector, number) = parse_bound_spec(value).map_err(|e| match e {
            BoundSpecError::BadSelector => {
                ArgsError::usage(format!("{} must be followed by e, l, or u.", code))
            }
            BoundSpecError::BadNumber => {
                ArgsError::usage(format!("{0} should be in the form {0}[elu]number.", code))
            }
        })?;
        self.config
            .ply_bounds
            .apply(kind, selector, number)
            .map_err(|rejection| ArgsError::conflict(rejection.to_string()))
    }

    pub(crate) fn set_line_length(&mut self, width: u32) {
        self.config.line_length = width;
        self.collaborators.set_output_line_length(width);
    }
}

/// Whether a `-c` value names a game file rather than a list of them.
fn is_game_file(filename: &str) -> bool {
    let suffix_len = GAME_FILE_SUFFIX.len();
    filename.len() > suffix_len
        && filename
            .get(filename.len() - suffix_len..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(GAME_FILE_SUFFIX))
}

pub(crate) fn parse_unsigned(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_polyglot_hash(value: &str) -> Option<u64> {
    let captures = POLYGLOT_HASH.captures(value.trim())?;
    u64::from_str_radix(&captures[1], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolSettings;
    use crate::models::{RunConfig, SideToMove};
    use crate::services::collaborators::{MockCollaborators, Registry};
    use tempfile::TempDir;

    fn resolve(args: &[&str]) -> Result<(RunConfig, Registry), ArgsError> {
        let settings = ToolSettings::default();
        let mut config = RunConfig::default();
        let mut registry = Registry::new();
        ArgumentResolver::new(&mut config, &mut registry, &settings).resolve_command_line(args)?;
        Ok((config, registry))
    }

    #[test]
    fn test_output_file_is_opened() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.pgn");
        let arg = format!("-o{}", path.display());

        let (config, _) = resolve(&[&arg]).unwrap();
        assert!(config.output.is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_second_output_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let first = format!("-o{}", dir.path().join("a.pgn").display());
        let second = format!("-a{}", dir.path().join("b.pgn").display());

        let err = resolve(&[&first, &second]).unwrap_err();
        assert!(matches!(err, ArgsError::Conflict(_)));
        assert!(err.to_string().contains("already been selected for output"));
    }

    #[test]
    fn test_output_conflicts_with_eco_split() {
        let dir = TempDir::new().unwrap();
        let output = format!("-o{}", dir.path().join("a.pgn").display());

        let err = resolve(&["-E2", &output]).unwrap_err();
        assert!(matches!(err, ArgsError::Conflict(_)));

        let err = resolve(&["-#10", "-E2"]).unwrap_err();
        assert!(matches!(err, ArgsError::Conflict(_)));
    }

    #[test]
    fn test_empty_filename_is_usage_error() {
        for arg in ["-o", "-a", "-d", "-n", "-A", "-f", "-c"] {
            let err = resolve(&[arg]).unwrap_err();
            assert!(matches!(err, ArgsError::Usage(_)), "{} gave {:?}", arg, err);
        }
    }

    #[test]
    fn test_unusable_log_file_falls_back_to_stderr() {
        let dir = TempDir::new().unwrap();
        let arg = format!("-l{}", dir.path().join("missing").join("log.txt").display());

        let (config, _) = resolve(&[&arg]).unwrap();
        assert!(matches!(config.log, LogTarget::Stderr));
    }

    #[test]
    fn test_games_per_file_values() {
        let (config, _) = resolve(&["-#50,3"]).unwrap();
        assert_eq!(config.games_per_file, 50);
        assert_eq!(config.next_file_number, 3);

        assert!(matches!(resolve(&["-#50,"]).unwrap_err(), ArgsError::Usage(_)));
        assert!(matches!(resolve(&["-#many"]).unwrap_err(), ArgsError::Usage(_)));
    }

    #[test]
    fn test_eco_level_range() {
        assert_eq!(resolve(&["-E10"]).unwrap().0.eco_level, 10);
        assert!(matches!(resolve(&["-E0"]).unwrap_err(), ArgsError::Usage(_)));
        assert!(matches!(resolve(&["-E11"]).unwrap_err(), ArgsError::Usage(_)));
        assert!(matches!(resolve(&["-E"]).unwrap_err(), ArgsError::Usage(_)));
    }

    #[test]
    fn test_short_bound_rejection_is_fatal() {
        let err = resolve(&["-b10", "-bl12"]).unwrap_err();
        assert!(matches!(err, ArgsError::Conflict(_)));

        let err = resolve(&["-bx3"]).unwrap_err();
        assert!(err.to_string().contains("must be followed by e, l, or u"));
    }

    #[test]
    fn test_uci_format_side_effects() {
        let (config, registry) = resolve(&["-Wuci"]).unwrap();
        assert_eq!(config.output_format, OutputFormat::Uci);
        assert!(!config.keep_comments && !config.keep_nags && !config.keep_variations);
        assert!(!config.keep_move_numbers && !config.keep_checks);
        assert_eq!(config.line_length, UCI_LINE_LENGTH);
        assert_eq!(registry.line_length, Some(UCI_LINE_LENGTH));

        assert!(matches!(resolve(&["-Wpgn"]).unwrap_err(), ArgsError::Usage(_)));
    }

    #[test]
    fn test_exclusive_flags() {
        assert!(resolve(&["-D", "-ddupes.pgn"]).is_err());
        assert!(resolve(&["--splitvariants", "-V"]).is_err());
        assert!(resolve(&["--stalemate", "-M"]).is_err());
        assert!(resolve(&["--xroster", "-7"]).is_err());
        assert!(resolve(&["--commented", "-C"]).is_err());
    }

    #[test]
    fn test_fen_pattern_yields_to_fen_comments() {
        let (config, _) = resolve(&["-F[^p]"]).unwrap();
        assert!(config.output_fen_string);
        assert_eq!(config.fen_comment_pattern.as_deref(), Some("[^p]"));

        let (config, _) = resolve(&["--fencomments", "-Fpattern"]).unwrap();
        assert!(!config.output_fen_string);
        assert!(config.fen_comment_pattern.is_none());
    }

    #[test]
    fn test_check_file_suffix() {
        let (_, registry) = resolve(&["-cold.PGN"]).unwrap();
        let checks: Vec<_> = registry.source_files(SourceKind::Check).collect();
        assert_eq!(checks, vec![Utf8Path::new("old.PGN")]);

        let err = resolve(&["-cmissing-list.txt"]).unwrap_err();
        assert!(matches!(err, ArgsError::Resource { .. }));
    }

    #[test]
    fn test_polyglot_hash() {
        let (config, registry) = resolve(&["-H463b96181691fc9c"]).unwrap();
        assert!(config.positional_variations);
        assert_eq!(registry.polyglot_hashes, vec![0x463b96181691fc9c]);

        assert!(matches!(resolve(&["-Hxyz"]).unwrap_err(), ArgsError::Usage(_)));
    }

    #[test]
    fn test_eco_file_falls_back_to_settings() {
        let settings = ToolSettings {
            eco_file: Some("/data/eco.pgn".into()),
            ..ToolSettings::default()
        };
        let mut config = RunConfig::default();
        let mut collaborators = MockCollaborators::new();
        collaborators
            .expect_build_eco_table()
            .withf(|path| path.as_str() == "/data/eco.pgn")
            .times(1)
            .returning(|_| Ok(()));

        ArgumentResolver::new(&mut config, &mut collaborators, &settings)
            .apply_short(ArgCode::UseEcoFile, "")
            .unwrap();
        assert!(config.add_eco);
        assert_eq!(config.eco_file.as_str(), "/data/eco.pgn");
    }

    #[test]
    fn test_help_and_long_form_codes() {
        assert!(matches!(resolve(&["-h"]).unwrap_err(), ArgsError::HelpRequested));
        assert!(matches!(resolve(&["-?"]).unwrap_err(), ArgsError::HelpRequested));

        let settings = ToolSettings::default();
        let mut config = RunConfig::default();
        let mut registry = Registry::new();
        let err = ArgumentResolver::new(&mut config, &mut registry, &settings)
            .apply_short(ArgCode::LongForm, "json")
            .unwrap_err();
        assert_eq!(err.exit_code(), -1);
        assert_eq!(config.side_to_move, SideToMove::Either);
    }
}
