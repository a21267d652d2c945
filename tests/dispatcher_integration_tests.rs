//! Integration tests for the command-line dispatchers
//!
//! These tests verify:
//! - Mutually exclusive options in both orders
//! - Output destination selection and its conflicts
//! - Idempotent repeats of the same policy
//! - Move and ply bounds through the short and long forms
//! - What reaches the collaborators, using a mock

use camino::{Utf8Path, Utf8PathBuf};
use mockall::mock;
use mockall::predicate::eq;
use pgnopts::models::{OutputFormat, SideToMove};
use pgnopts::services::{CollaboratorError, SourceKind};
use pgnopts::{ArgsError, ArgumentResolver, Collaborators, Registry, RunConfig, ToolSettings};
use tempfile::TempDir;

mock! {
    pub Sink {}

    impl Collaborators for Sink {
        fn add_source_file(&mut self, path: &Utf8Path, kind: SourceKind);
        fn add_textual_variation(&mut self, line: &str) -> Result<(), CollaboratorError>;
        fn add_positional_variation(&mut self, line: &str) -> Result<(), CollaboratorError>;
        fn add_tag_criterion(&mut self, line: &str, origin: &str) -> Result<(), CollaboratorError>;
        fn add_roster_line(&mut self, line: &str) -> Result<(), CollaboratorError>;
        fn suppress_tag(&mut self, tag: &str);
        fn add_material_description(&mut self, descriptor: &str, both_colours: bool) -> Result<(), CollaboratorError>;
        fn add_fen_pattern(&mut self, pattern: &str, either_colour: bool) -> Result<(), CollaboratorError>;
        fn build_eco_table(&mut self, eco_file: &Utf8Path) -> Result<(), CollaboratorError>;
        fn match_polyglot_hash(&mut self, hash: u64);
        fn set_output_line_length(&mut self, width: u32);
    }
}

fn resolve(args: &[&str]) -> (Result<(), ArgsError>, RunConfig, Registry) {
    let settings = ToolSettings::default();
    let mut config = RunConfig::default();
    let mut registry = Registry::new();
    let result =
        ArgumentResolver::new(&mut config, &mut registry, &settings).resolve_command_line(args);
    (result, config, registry)
}

fn create_output_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, dir)
}

#[test]
fn test_ending_conditions_are_exclusive_in_both_orders() {
    let pairs = [
        ("--checkmate", "--stalemate"),
        ("--checkmate", "--insufficient"),
        ("--stalemate", "--insufficient"),
        ("-M", "--stalemate"),
    ];

    for (first, second) in pairs {
        let (result, _, _) = resolve(&[first, second]);
        assert!(
            matches!(result, Err(ArgsError::Conflict(_))),
            "{} then {} should conflict",
            first,
            second
        );

        let (result, _, _) = resolve(&[second, first]);
        assert!(
            matches!(result, Err(ArgsError::Conflict(_))),
            "{} then {} should conflict",
            second,
            first
        );
    }
}

#[test]
fn test_rated_winner_options_are_exclusive() {
    let (result, _, _) = resolve(&["--higherratedwinner", "--lowerratedwinner"]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));

    let (result, config, _) = resolve(&["--lowerratedwinner", "--lowerratedwinner"]);
    result.unwrap();
    assert!(config.lower_rated_winner);
    assert!(!config.higher_rated_winner);
}

#[test]
fn test_second_output_file_is_rejected() {
    let (_temp_dir, dir) = create_output_dir();
    let first = dir.join("a.pgn");
    let second = dir.join("b.pgn");

    let (result, config, _) = resolve(&["--output", first.as_str(), "--output", second.as_str()]);
    let err = result.unwrap_err();

    assert!(matches!(err, ArgsError::Conflict(_)));
    assert!(err.to_string().contains("already been selected"));
    assert_eq!(config.output_filename(), Some(first.as_path()));
    assert!(!second.exists());
}

#[test]
fn test_output_conflicts_with_split_output() {
    let (_temp_dir, dir) = create_output_dir();
    let output = dir.join("out.pgn");
    let short_output = format!("-o{}", output);

    let (result, _, _) = resolve(&["-E2", short_output.as_str()]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));

    let (result, _, _) = resolve(&[short_output.as_str(), "-#100"]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));

    let (result, config, _) = resolve(&["-#100,5"]);
    result.unwrap();
    assert_eq!((config.games_per_file, config.next_file_number), (100, 5));
}

#[test]
fn test_fifty_move_rule_is_idempotent() {
    let (result, config, _) = resolve(&["--fifty", "--fifty", "--50"]);
    result.unwrap();
    assert_eq!(config.n_move_rule, Some(50));

    let (result, _, _) = resolve(&["--fifty", "--seventyfive"]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));
}

#[test]
fn test_side_to_move_policy() {
    let (result, config, _) = resolve(&["--wtm", "--wtm"]);
    result.unwrap();
    assert_eq!(config.side_to_move, SideToMove::White);

    let (result, _, _) = resolve(&["--btm", "--wtm"]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));
}

#[test]
fn test_move_bounds_convert_to_ply() {
    let (result, config, _) = resolve(&["-b10"]);
    result.unwrap();
    assert_eq!((config.ply_bounds.lower, config.ply_bounds.upper), (19, 20));
    assert!(config.ply_bounds.active);

    let (result, config, _) = resolve(&["-b10", "-bl12"]);
    assert!(matches!(result, Err(ArgsError::Conflict(_))));
    assert_eq!((config.ply_bounds.lower, config.ply_bounds.upper), (19, 20));

    let (result, config, _) = resolve(&["-pl30", "-pu40", "--maxmoves", "10"]);
    result.unwrap();
    assert_eq!((config.ply_bounds.lower, config.ply_bounds.upper), (30, 40));
}

#[test]
fn test_bad_bound_spec() {
    let (result, _, _) = resolve(&["-bx10"]);
    assert!(matches!(result, Err(ArgsError::Usage(_))));

    let (result, _, _) = resolve(&["-p"]);
    assert!(matches!(result, Err(ArgsError::Usage(_))));
}

#[test]
fn test_selectonly_and_skipmatching() {
    let (result, config, _) = resolve(&["--selectonly", "2,5:8", "--skipmatching", "1"]);
    result.unwrap();
    assert_eq!(config.select_only.as_ref().map(|r| r.len()), Some(2));
    assert_eq!(config.skip_matching.as_ref().map(|r| r.len()), Some(1));

    let (result, _, _) = resolve(&["--selectonly", "5,2"]);
    assert!(result.is_err());
}

#[test]
fn test_uci_format_sets_line_length() {
    let (result, config, registry) = resolve(&["-Wuci"]);
    result.unwrap();
    assert_eq!(config.output_format, OutputFormat::Uci);
    assert_eq!(config.line_length, 5000);
    assert_eq!(registry.line_length, Some(5000));

    let (result, _, _) = resolve(&["-Wnotation"]);
    assert!(matches!(result, Err(ArgsError::Usage(_))));
}

#[test]
fn test_sources_in_order_with_options_between() {
    let (result, _, registry) = resolve(&["one.pgn", "-s", "two.pgn", "--quiet", "three.pgn"]);
    result.unwrap();

    let sources: Vec<_> = registry
        .source_files(SourceKind::Normal)
        .map(|p| p.as_str())
        .collect();
    assert_eq!(sources, vec!["one.pgn", "two.pgn", "three.pgn"]);
}

#[test]
fn test_unknown_arguments() {
    let (result, _, _) = resolve(&["-K"]);
    assert!(matches!(result, Err(ArgsError::Usage(_))));

    let (result, _, _) = resolve(&["--nosuchoption"]);
    assert!(matches!(result, Err(ArgsError::Usage(_))));

    let (result, _, _) = resolve(&["--help"]);
    assert!(matches!(result, Err(ArgsError::HelpRequested)));
}

#[test]
fn test_eco_and_hash_reach_collaborators() {
    let settings = ToolSettings::default();
    let mut config = RunConfig::default();
    let mut sink = MockSink::new();
    sink.expect_build_eco_table()
        .withf(|path| path.as_str() == "openings.pgn")
        .times(1)
        .returning(|_| Ok(()));
    sink.expect_match_polyglot_hash()
        .with(eq(0x463b96181691fc9c_u64))
        .times(1)
        .return_const(());
    sink.expect_add_source_file()
        .withf(|path, kind| path.as_str() == "games.pgn" && *kind == SourceKind::Normal)
        .times(1)
        .return_const(());

    ArgumentResolver::new(&mut config, &mut sink, &settings)
        .resolve_command_line(&["-eopenings.pgn", "-H463b96181691fc9c", "games.pgn"])
        .unwrap();

    assert!(config.add_eco);
}

#[test]
fn test_tag_criterion_rejection_is_fatal() {
    let settings = ToolSettings::default();
    let mut config = RunConfig::default();
    let mut sink = MockSink::new();
    sink.expect_add_tag_criterion()
        .withf(|_, origin| origin == "command line")
        .times(1)
        .returning(|_, _| Err(CollaboratorError("unknown tag".into())));
    sink.expect_add_source_file().never();

    let err = ArgumentResolver::new(&mut config, &mut sink, &settings)
        .resolve_command_line(&["-TwFischer", "games.pgn"])
        .unwrap_err();

    assert!(matches!(err, ArgsError::Collaborator { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_short_tag_criteria_are_recorded() {
    let (result, _, registry) = resolve(&["-TwFischer", "-Te\"B90\"", "games.pgn"]);
    result.unwrap();

    let recorded: Vec<_> = registry
        .tag_criteria
        .iter()
        .map(|c| (c.line.as_str(), c.origin.as_str()))
        .collect();
    assert_eq!(
        recorded,
        vec![("wFischer", "command line"), ("e\"B90\"", "command line")]
    );
    assert_eq!(registry.sources.len(), 1);
}
