use crate::models::destinations::{LogTarget, NonMatchingTarget, OutputTarget};
use crate::models::ranges::GameRanges;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::io::Write;

/// Suffix identifying a single game file (as opposed to a list of file names).
pub const GAME_FILE_SUFFIX: &str = ".pgn";

/// ECO classification file used when `-e` names none and `ECO_FILE` is unset.
pub const DEFAULT_ECO_FILE: &str = "eco.pgn";

/// Accepted range for `-E`.
pub const MIN_ECO_LEVEL: u32 = 1;
pub const MAX_ECO_LEVEL: u32 = 10;

pub const DEFAULT_LINE_LENGTH: u32 = 75;

/// Line length forced by `-Wuci` so that each game sits on one line.
pub const UCI_LINE_LENGTH: u32 = 5000;

/// Upper ply bound in force until one is given.
pub const DEFAULT_UPPER_PLY_BOUND: u64 = 10_000;

/// How moves are written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Moves as they appeared in the source.
    Source,
    /// Standard algebraic, optionally with language-specific piece letters.
    San { piece_letters: Option<String> },
    ChessMaster,
    Epd,
    Fen,
    HyphenatedLongAlgebraic,
    LongAlgebraic,
    EnhancedLongAlgebraic,
    ExtendedLongAlgebraic,
    ExtendedLongAlgebraicCastling,
    Uci,
}

impl OutputFormat {
    /// Recognise a `-W` value. An empty value selects the source form.
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let format = match lower.as_str() {
            "" => OutputFormat::Source,
            "san" => OutputFormat::San {
                piece_letters: None,
            },
            "cm" => OutputFormat::ChessMaster,
            "epd" => OutputFormat::Epd,
            "fen" => OutputFormat::Fen,
            "halg" => OutputFormat::HyphenatedLongAlgebraic,
            "lalg" => OutputFormat::LongAlgebraic,
            "elalg" => OutputFormat::EnhancedLongAlgebraic,
            "xlalg" => OutputFormat::ExtendedLongAlgebraic,
            "xolalg" => OutputFormat::ExtendedLongAlgebraicCastling,
            "uci" => OutputFormat::Uci,
            _ => {
                // san followed by the six piece letters PNBRQK in another language
                let letters = lower.strip_prefix("san")?;
                if letters.chars().count() != 6 || !letters.chars().all(char::is_alphabetic) {
                    return None;
                }
                OutputFormat::San {
                    piece_letters: Some(name[3..].to_string()),
                }
            }
        };
        Some(format)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::San {
            piece_letters: None,
        }
    }
}

/// Which tags accompany each game in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagOutputFormat {
    #[default]
    AllTags,
    SevenTagRoster,
    NoTags,
}

/// Policy for games carrying a SetUp tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupTagPolicy {
    #[default]
    Allowed,
    Excluded,
    Required,
}

/// Side-to-move filter applied to positional matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideToMove {
    #[default]
    Either,
    White,
    Black,
}

impl fmt::Display for SideToMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideToMove::Either => write!(f, "either side"),
            SideToMove::White => write!(f, "white to move"),
            SideToMove::Black => write!(f, "black to move"),
        }
    }
}

/// Lower and upper ply bounds on game length. `lower <= upper` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlyBounds {
    pub lower: u64,
    pub upper: u64,
    /// Set once any bound has been applied.
    pub active: bool,
}

impl Default for PlyBounds {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: DEFAULT_UPPER_PLY_BOUND,
            active: false,
        }
    }
}

/// The fully resolved run-time configuration.
///
/// Built once with defaults, mutated only by the argument dispatchers, then
/// handed to the rest of the tool. Destinations are opened as soon as they are
/// selected so that an unusable file fails the run before any game is read.
#[derive(Debug)]
pub struct RunConfig {
    // Destinations
    pub output: Option<OutputTarget>,
    pub log: LogTarget,
    pub duplicates: Option<OutputTarget>,
    pub non_matching: Option<NonMatchingTarget>,
    pub games_per_file: u32,
    pub next_file_number: u32,
    pub eco_level: u32,

    // Game selection
    pub ply_bounds: PlyBounds,
    pub select_only: Option<GameRanges>,
    pub skip_matching: Option<GameRanges>,
    pub first_game_number: u64,
    pub game_limit: u64,
    pub maximum_matches: Option<u64>,
    pub start_ply: u32,
    pub piece_count: Option<u32>,
    pub quiescence_threshold: u32,
    pub positional_search_depth: u32,
    pub n_move_rule: Option<u32>,
    pub repetition: Option<u32>,
    pub side_to_move: SideToMove,
    pub setup_tags: SetupTagPolicy,
    pub match_only_checkmate: bool,
    pub match_only_stalemate: bool,
    pub match_only_insufficient_material: bool,
    pub higher_rated_winner: bool,
    pub lower_rated_winner: bool,
    pub keep_only_commented_games: bool,
    pub find_odds_games: bool,
    pub match_underpromotion: bool,
    pub match_permutations: bool,
    pub positional_variations: bool,
    pub variation_match_anywhere: bool,
    pub tag_match_anywhere: bool,
    pub use_soundex: bool,
    pub delete_same_setup: bool,
    pub reject_inconsistent_results: bool,
    pub suppress_matched: bool,

    // Duplicates
    pub suppress_duplicates: bool,
    pub suppress_originals: bool,
    pub use_virtual_hash_table: bool,
    pub fuzzy_match_duplicates: bool,
    pub fuzzy_match_depth: u32,

    // ECO
    pub add_eco: bool,
    pub eco_file: Utf8PathBuf,

    // Output content
    pub output_format: OutputFormat,
    pub json_format: bool,
    pub line_length: u32,
    pub tag_output: TagOutputFormat,
    pub only_output_wanted_tags: bool,
    pub keep_comments: bool,
    pub keep_nags: bool,
    pub keep_variations: bool,
    pub keep_checks: bool,
    pub keep_move_numbers: bool,
    pub keep_results: bool,
    pub split_variants: bool,
    pub split_depth_limit: u32,
    pub output_ply_limit: Option<u32>,
    pub drop_ply_number: i32,
    pub drop_comment_pattern: Option<String>,
    pub output_fen_string: bool,
    pub fen_comment_pattern: Option<String>,
    pub add_fen_comments: bool,
    pub add_fen_castling: bool,
    pub add_hashcode_comments: bool,
    pub add_hashcode_tag: bool,
    pub add_match_tag: bool,
    pub add_matchlabel_tag: bool,
    pub add_position_match_comments: bool,
    pub position_match_comment: Option<String>,
    pub output_evaluation: bool,
    pub output_plycount: bool,
    pub output_total_plycount: bool,
    pub separate_comment_lines: bool,
    pub suppress_redundant_ep_info: bool,
    pub line_number_marker: Option<String>,

    // Input handling
    pub allow_null_moves: bool,
    pub allow_nested_comments: bool,
    pub keep_broken_games: bool,
    pub fix_result_tags: bool,
    pub fix_tag_strings: bool,
    pub lichess_comment_fix: bool,

    // Reporting
    pub check_only: bool,
    pub verbosity: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: None,
            log: LogTarget::Stderr,
            duplicates: None,
            non_matching: None,
            games_per_file: 0,
            next_file_number: 1,
            eco_level: 0,

            ply_bounds: PlyBounds::default(),
            select_only: None,
            skip_matching: None,
            first_game_number: 1,
            game_limit: u64::MAX,
            maximum_matches: None,
            start_ply: 1,
            piece_count: None,
            quiescence_threshold: 0,
            positional_search_depth: 0,
            n_move_rule: None,
            repetition: None,
            side_to_move: SideToMove::Either,
            setup_tags: SetupTagPolicy::Allowed,
            match_only_checkmate: false,
            match_only_stalemate: false,
            match_only_insufficient_material: false,
            higher_rated_winner: false,
            lower_rated_winner: false,
            keep_only_commented_games: false,
            find_odds_games: false,
            match_underpromotion: false,
            match_permutations: true,
            positional_variations: false,
            variation_match_anywhere: false,
            tag_match_anywhere: false,
            use_soundex: false,
            delete_same_setup: false,
            reject_inconsistent_results: false,
            suppress_matched: false,

            suppress_duplicates: false,
            suppress_originals: false,
            use_virtual_hash_table: false,
            fuzzy_match_duplicates: false,
            fuzzy_match_depth: 0,

            add_eco: false,
            eco_file: Utf8PathBuf::from(DEFAULT_ECO_FILE),

            output_format: OutputFormat::default(),
            json_format: false,
            line_length: DEFAULT_LINE_LENGTH,
            tag_output: TagOutputFormat::AllTags,
            only_output_wanted_tags: false,
            keep_comments: true,
            keep_nags: true,
            keep_variations: true,
            keep_checks: true,
            keep_move_numbers: true,
            keep_results: true,
            split_variants: false,
            split_depth_limit: 0,
            output_ply_limit: None,
            drop_ply_number: 0,
            drop_comment_pattern: None,
            output_fen_string: false,
            fen_comment_pattern: None,
            add_fen_comments: false,
            add_fen_castling: false,
            add_hashcode_comments: false,
            add_hashcode_tag: false,
            add_match_tag: false,
            add_matchlabel_tag: false,
            add_position_match_comments: false,
            position_match_comment: None,
            output_evaluation: false,
            output_plycount: false,
            output_total_plycount: false,
            separate_comment_lines: false,
            suppress_redundant_ep_info: false,
            line_number_marker: None,

            allow_null_moves: false,
            allow_nested_comments: false,
            keep_broken_games: false,
            fix_result_tags: false,
            fix_tag_strings: false,
            lichess_comment_fix: false,

            check_only: false,
            verbosity: 2,
        }
    }
}

impl RunConfig {
    /// Name of the file selected with `-o`/`-a`, if any.
    pub fn output_filename(&self) -> Option<&Utf8Path> {
        self.output.as_ref().map(|target| target.path())
    }

    /// Write one line to the diagnostic destination.
    ///
    /// A failing diagnostic stream has nowhere left to report to, so write
    /// errors are only traced.
    pub fn diagnostic(&mut self, message: impl fmt::Display) {
        if let Err(e) = writeln!(self.log, "{}", message) {
            tracing::error!("Failed to write diagnostic: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::default();
        assert!(config.output.is_none());
        assert_eq!(config.ply_bounds.lower, 0);
        assert_eq!(config.ply_bounds.upper, DEFAULT_UPPER_PLY_BOUND);
        assert!(!config.ply_bounds.active);
        assert_eq!(config.eco_file, Utf8PathBuf::from("eco.pgn"));
        assert_eq!(config.line_length, 75);
        assert_eq!(config.verbosity, 2);
        assert!(config.keep_comments && config.keep_variations && config.match_permutations);
        assert_eq!(config.game_limit, u64::MAX);
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::parse(""), Some(OutputFormat::Source));
        assert_eq!(OutputFormat::parse("UCI"), Some(OutputFormat::Uci));
        assert_eq!(
            OutputFormat::parse("xolalg"),
            Some(OutputFormat::ExtendedLongAlgebraicCastling)
        );
        assert_eq!(OutputFormat::parse("pgn"), None);
    }

    #[test]
    fn test_output_format_language_letters() {
        assert_eq!(
            OutputFormat::parse("sanBSLTDK"),
            Some(OutputFormat::San {
                piece_letters: Some("BSLTDK".to_string())
            })
        );
        assert_eq!(OutputFormat::parse("sanXY"), None);
    }
}
