//! Named (`--name`) arguments.
//!
//! Each name maps to a [`LongOption`] describing what it does and whether it
//! takes the following token as its value. Lookup is case-insensitive.

use std::str::FromStr;
use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::VERSION;
use crate::models::{ArgCode, GameRanges, RunConfig, SetupTagPolicy, SideToMove, TagOutputFormat};
use crate::services::bounds::{BoundKind, BoundSelector};
use crate::services::error::ArgsError;
use crate::services::resolver::ArgumentResolver;

/// How many command-line tokens a long-form argument used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    NameOnly,
    NameAndValue,
}

impl Consumed {
    pub fn tokens(self) -> usize {
        match self {
            Consumed::NameOnly => 1,
            Consumed::NameAndValue => 2,
        }
    }
}

type LongHandler = for<'r, 'a, 'o, 'v> fn(
    &'r mut ArgumentResolver<'a>,
    &'o LongOption,
    &'v str,
) -> Result<Consumed, ArgsError>;

enum LongAction {
    /// Set or clear one field; never takes a value.
    Flag(fn(&mut RunConfig)),
    /// Same as a short-form code.
    Alias(ArgCode),
    Handler(LongHandler),
}

/// One entry in the long-form table.
pub struct LongOption {
    pub name: &'static str,
    /// Placeholder for the value in help output; `None` for bare flags.
    pub value_hint: Option<&'static str>,
    pub summary: &'static str,
    action: LongAction,
}

impl LongOption {
    pub fn takes_value(&self) -> bool {
        self.value_hint.is_some()
    }
}

fn flag(name: &'static str, summary: &'static str, set: fn(&mut RunConfig)) -> LongOption {
    LongOption {
        name,
        value_hint: None,
        summary,
        action: LongAction::Flag(set),
    }
}

fn alias(
    name: &'static str,
    value_hint: Option<&'static str>,
    summary: &'static str,
    code: ArgCode,
) -> LongOption {
    LongOption {
        name,
        value_hint,
        summary,
        action: LongAction::Alias(code),
    }
}

fn handler(
    name: &'static str,
    value_hint: Option<&'static str>,
    summary: &'static str,
    run: LongHandler,
) -> LongOption {
    LongOption {
        name,
        value_hint,
        summary,
        action: LongAction::Handler(run),
    }
}

static LONG_OPTIONS: LazyLock<IndexMap<&'static str, LongOption>> = LazyLock::new(|| {
    let options = vec![
        flag("addfencastling", "add castling rights to FEN comments", |c| {
            c.add_fen_castling = true
        }),
        flag("addhashcode", "add a HashCode tag to each game", |c| c.add_hashcode_tag = true),
        flag("addlabeltag", "add a MatchLabel tag naming the matching criterion", |c| {
            c.add_matchlabel_tag = true
        }),
        flag("addmatchtag", "add a MaterialMatch tag to games matched by material", |c| {
            c.add_match_tag = true
        }),
        flag("allownullmoves", "allow null moves in the main line", |c| c.allow_null_moves = true),
        alias("append", Some("file"), "append output to file", ArgCode::AppendToOutputFile),
        handler("btm", None, "match positions only with black to move", |r, o, _| {
            side_to_move(r, o, SideToMove::Black)
        }),
        alias("checkfile", Some("file"), "file of games to check for duplicates", ArgCode::CheckFile),
        alias("checkmate", None, "match only games ending in checkmate", ArgCode::MatchCheckmate),
        handler("commented", None, "match only games containing comments", |r, o, _| {
            if !r.config.keep_comments {
                return Err(ArgsError::conflict(format!(
                    "--{} clashes with {}.",
                    o.name,
                    ArgCode::DontKeepComments
                )));
            }
            r.config.keep_only_commented_games = true;
            Ok(Consumed::NameOnly)
        }),
        flag("commentlines", "output each comment on a separate line", |c| {
            c.separate_comment_lines = true
        }),
        flag("deletesamesetup", "suppress games sharing a SetUp position", |c| {
            c.delete_same_setup = true
        }),
        handler("detag", Some("tag"), "do not output the named tag", |r, o, v| {
            let tag = required(o, v, "a tag name")?;
            r.collaborators.suppress_tag(tag);
            Ok(Consumed::NameAndValue)
        }),
        handler("dropbefore", Some("comment"), "drop moves before the matching comment", |r, o, v| {
            r.config.drop_comment_pattern = Some(required(o, v, "a string")?.to_string());
            Ok(Consumed::NameAndValue)
        }),
        handler("dropply", Some("ply"), "drop moves up to the given ply", |r, o, v| {
            r.config.drop_ply_number = number(o, v)?;
            Ok(Consumed::NameAndValue)
        }),
        alias("duplicates", Some("file"), "write duplicate games to file", ArgCode::DuplicatesFile),
        flag("evaluation", "add an evaluation comment after each move", |c| {
            c.output_evaluation = true
        }),
        handler("fencomments", None, "add a FEN comment after each move", |r, o, _| {
            if r.config.fen_comment_pattern.is_some() {
                r.warn(format!("--{} conflicts with {}pattern", o.name, ArgCode::OutputFenString));
            } else {
                r.config.add_fen_comments = true;
                r.config.output_fen_string = false;
            }
            Ok(Consumed::NameOnly)
        }),
        handler("fenpattern", Some("pattern"), "match positions against a FEN pattern", |r, o, v| {
            fen_pattern(r, o, v, false)
        }),
        handler(
            "fenpatterni",
            Some("pattern"),
            "match a FEN pattern and its colour inversion",
            |r, o, v| fen_pattern(r, o, v, true),
        ),
        handler("fifty", None, "match games drawn by the 50-move rule", |r, o, _| {
            move_rule(r, o, 50)
        }),
        handler("50", None, "same as --fifty", |r, o, _| move_rule(r, o, 50)),
        handler("firstgame", Some("N"), "start processing at game N", |r, o, v| {
            let first: u64 = number(o, v)?;
            if first == 0 {
                return Err(ArgsError::usage(format!(
                    "--{} requires a number greater than or equal to 1.",
                    o.name
                )));
            }
            if first > r.config.game_limit {
                return Err(ArgsError::conflict(format!(
                    "--{} {} is incompatible with --gamelimit {}.",
                    o.name, first, r.config.game_limit
                )));
            }
            r.config.first_game_number = first;
            Ok(Consumed::NameAndValue)
        }),
        flag("fixresulttags", "correct Result tags that disagree with the game", |c| {
            c.fix_result_tags = true
        }),
        flag("fixtagstrings", "repair malformed tag strings", |c| c.fix_tag_strings = true),
        handler("fuzzydepth", Some("ply"), "treat games as duplicates if they match at ply", |r, o, v| {
            r.config.fuzzy_match_depth = number(o, v).map_err(|_| {
                ArgsError::usage(format!("--{} requires a positive number following it.", o.name))
            })?;
            r.config.fuzzy_match_duplicates = true;
            Ok(Consumed::NameAndValue)
        }),
        handler("gamelimit", Some("N"), "stop processing after game N", |r, o, v| {
            let limit: u64 = number(o, v)?;
            if limit < r.config.first_game_number {
                return Err(ArgsError::conflict(format!(
                    "--{} {} is incompatible with --firstgame {}.",
                    o.name, limit, r.config.first_game_number
                )));
            }
            r.config.game_limit = limit;
            Ok(Consumed::NameAndValue)
        }),
        flag("hashcomments", "add a hashcode comment after each move", |c| {
            c.add_hashcode_comments = true
        }),
        alias("help", None, "print this message", ArgCode::Help),
        handler("higherratedwinner", None, "match only wins by the higher rated player", |r, o, _| {
            if r.config.lower_rated_winner {
                return Err(ArgsError::conflict(format!("--{} clashes with --lowerratedwinner.", o.name)));
            }
            r.config.higher_rated_winner = true;
            Ok(Consumed::NameOnly)
        }),
        handler("insufficient", None, "match only games ending with insufficient material", |r, o, _| {
            if r.config.match_only_checkmate {
                return Err(ArgsError::conflict(format!("--{} clashes with --checkmate.", o.name)));
            }
            if r.config.match_only_stalemate {
                return Err(ArgsError::conflict(format!("--{} clashes with --stalemate.", o.name)));
            }
            r.config.match_only_insufficient_material = true;
            Ok(Consumed::NameOnly)
        }),
        flag("json", "output games in JSON", |c| c.json_format = true),
        flag("keepbroken", "keep games with errors in them", |c| c.keep_broken_games = true),
        flag("lichesscommentfix", "repair lichess comment formatting", |c| {
            c.lichess_comment_fix = true
        }),
        alias("linelength", Some("N"), "set the output line length", ArgCode::LineWidth),
        handler("linenumbers", Some("marker"), "add a comment with the source line number", |r, o, v| {
            r.config.line_number_marker = Some(required(o, v, "a string")?.to_string());
            Ok(Consumed::NameAndValue)
        }),
        handler("lowerratedwinner", None, "match only wins by the lower rated player", |r, o, _| {
            if r.config.higher_rated_winner {
                return Err(ArgsError::conflict(format!("--{} clashes with --higherratedwinner.", o.name)));
            }
            r.config.lower_rated_winner = true;
            Ok(Consumed::NameOnly)
        }),
        handler("markmatches", Some("comment"), "mark positional matches with a comment", |r, o, v| {
            let comment = required(o, v, "a comment string")?;
            r.config.add_position_match_comments = true;
            r.config.position_match_comment = Some(comment.to_string());
            Ok(Consumed::NameAndValue)
        }),
        handler("matchplylimit", Some("N"), "search for positional matches only to ply N", |r, o, v| {
            let limit = at_least(o, v, 1)?;
            if limit < r.config.positional_search_depth {
                return Err(ArgsError::conflict(format!(
                    "--{} of {} conflicts with existing higher limit of {}.",
                    o.name, limit, r.config.positional_search_depth
                )));
            }
            r.config.positional_search_depth = limit;
            Ok(Consumed::NameAndValue)
        }),
        handler("materialy", Some("material"), "match material for the given colours", |r, o, v| {
            material(r, o, v, false)
        }),
        handler("materialz", Some("material"), "match material for either colour", |r, o, v| {
            material(r, o, v, true)
        }),
        handler("maxmoves", Some("N"), "match games of at most N moves", |r, o, v| {
            soft_bound(r, o, v, BoundKind::Moves, BoundSelector::Upper)
        }),
        handler("maxply", Some("N"), "match games of at most N ply", |r, o, v| {
            soft_bound(r, o, v, BoundKind::Ply, BoundSelector::Upper)
        }),
        handler("minmoves", Some("N"), "match games of at least N moves", |r, o, v| {
            soft_bound(r, o, v, BoundKind::Moves, BoundSelector::Lower)
        }),
        handler("minply", Some("N"), "match games of at least N ply", |r, o, v| {
            soft_bound(r, o, v, BoundKind::Ply, BoundSelector::Lower)
        }),
        flag("nestedcomments", "allow nested comments", |c| c.allow_nested_comments = true),
        flag("nobadresults", "reject games with inconsistent results", |c| {
            c.reject_inconsistent_results = true
        }),
        flag("nochecks", "do not output check indicators", |c| c.keep_checks = false),
        alias("nocomments", None, "do not output comments", ArgCode::DontKeepComments),
        alias("noduplicates", None, "do not output duplicate games", ArgCode::DontKeepDuplicates),
        flag("nofauxep", "omit redundant en passant squares from FEN", |c| {
            c.suppress_redundant_ep_info = true
        }),
        flag("nomovenumbers", "do not output move numbers", |c| c.keep_move_numbers = false),
        alias("nonags", None, "do not output NAGs", ArgCode::DontKeepNags),
        flag("noresults", "do not output results", |c| c.keep_results = false),
        handler("nosetuptags", None, "do not match games with a SetUp tag", |r, o, _| {
            setup_tags(r, o, SetupTagPolicy::Excluded)
        }),
        handler("notags", None, "do not output any tags", |r, o, _| {
            match r.config.tag_output {
                TagOutputFormat::AllTags | TagOutputFormat::NoTags => {
                    r.config.tag_output = TagOutputFormat::NoTags;
                    Ok(Consumed::NameOnly)
                }
                TagOutputFormat::SevenTagRoster => Err(ArgsError::conflict(format!(
                    "--{} clashes with another roster-related argument.",
                    o.name
                ))),
            }
        }),
        alias("nounique", None, "do not output the first of a set of duplicates", ArgCode::SuppressOriginals),
        alias("novars", None, "do not output variations", ArgCode::DontKeepVariations),
        flag("odds", "match only odds games", |c| c.find_odds_games = true),
        handler("onlysetuptags", None, "match only games with a SetUp tag", |r, o, _| {
            setup_tags(r, o, SetupTagPolicy::Required)
        }),
        alias("output", Some("file"), "write output to file", ArgCode::WriteToOutputFile),
        handler("piececount", Some("N"), "match positions with N pieces", |r, o, v| {
            r.config.piece_count = Some(at_least(o, v, 2)?);
            Ok(Consumed::NameAndValue)
        }),
        flag("plycount", "add a PlyCount tag", |c| c.output_plycount = true),
        handler("plylimit", Some("N"), "output at most N ply of each game", |r, o, v| {
            r.config.output_ply_limit = Some(at_least(o, v, 0)?);
            Ok(Consumed::NameAndValue)
        }),
        handler("quiescent", Some("N"), "require N quiet ply after a positional match", |r, o, v| {
            r.config.quiescence_threshold = at_least(o, v, 0)?;
            Ok(Consumed::NameAndValue)
        }),
        flag("quiet", "no progress output at all", |c| c.verbosity = 0),
        handler("repetition", None, "match games with a threefold repetition", |r, o, _| {
            repetition(r, o, 3)
        }),
        handler("repetition5", None, "match games with a fivefold repetition", |r, o, _| {
            repetition(r, o, 5)
        }),
        handler("selectonly", Some("N[:M],..."), "output only the listed matches", |r, o, v| {
            r.config.select_only = Some(game_ranges(o, v)?);
            Ok(Consumed::NameAndValue)
        }),
        alias("seven", None, "output only the seven tag roster", ArgCode::SevenTagRoster),
        handler("seventyfive", None, "match games drawn by the 75-move rule", |r, o, _| {
            move_rule(r, o, 75)
        }),
        handler("75", None, "same as --seventyfive", |r, o, _| move_rule(r, o, 75)),
        handler("skipmatching", Some("N[:M],..."), "skip the listed matches", |r, o, v| {
            r.config.skip_matching = Some(game_ranges(o, v)?);
            Ok(Consumed::NameAndValue)
        }),
        handler("splitvariants", Some("[depth]"), "output variations as separate games", |r, o, v| {
            if !r.config.keep_variations {
                return Err(ArgsError::conflict(format!(
                    "--{} clashes with {}.",
                    o.name,
                    ArgCode::DontKeepVariations
                )));
            }
            r.config.split_variants = true;
            match v.trim().parse::<u32>() {
                Ok(depth) => {
                    r.config.split_depth_limit = depth;
                    Ok(Consumed::NameAndValue)
                }
                Err(_) => Ok(Consumed::NameOnly),
            }
        }),
        handler("stalemate", None, "match only games ending in stalemate", |r, o, _| {
            if r.config.match_only_checkmate {
                return Err(ArgsError::conflict(format!("--{} clashes with --checkmate.", o.name)));
            }
            if r.config.match_only_insufficient_material {
                return Err(ArgsError::conflict(format!("--{} clashes with --insufficient.", o.name)));
            }
            r.config.match_only_stalemate = true;
            Ok(Consumed::NameOnly)
        }),
        handler("startply", Some("N"), "start positional matching at ply N", |r, o, v| {
            r.config.start_ply = at_least(o, v, 1)?;
            Ok(Consumed::NameAndValue)
        }),
        handler("stopafter", Some("N"), "stop after N matches", |r, o, v| {
            r.config.maximum_matches = Some(u64::from(at_least(o, v, 1)?));
            Ok(Consumed::NameAndValue)
        }),
        flag("suppressmatched", "do not output matched games", |c| c.suppress_matched = true),
        flag("tagsubstr", "match tag values anywhere in the tag", |c| c.tag_match_anywhere = true),
        flag("totalplycount", "add a TotalPlyCount tag", |c| c.output_total_plycount = true),
        flag("underpromotion", "match only games with an underpromotion", |c| {
            c.match_underpromotion = true
        }),
        flag("vanywhere", "match textual variations anywhere in the game", |c| {
            c.variation_match_anywhere = true
        }),
        handler("version", None, "print the version and exit", |_, _, _| {
            Err(ArgsError::VersionRequested(VERSION))
        }),
        handler("wtm", None, "match positions only with white to move", |r, o, _| {
            side_to_move(r, o, SideToMove::White)
        }),
        handler("xroster", None, "output only the tags named in the roster", |r, o, _| {
            if r.config.tag_output == TagOutputFormat::SevenTagRoster {
                return Err(ArgsError::conflict(format!(
                    "--{} clashes with {}.",
                    o.name,
                    ArgCode::SevenTagRoster
                )));
            }
            r.config.only_output_wanted_tags = true;
            Ok(Consumed::NameOnly)
        }),
    ];

    options.into_iter().map(|option| (option.name, option)).collect()
});

/// Find a long-form argument, ignoring case.
pub fn long_option(name: &str) -> Option<&'static LongOption> {
    LONG_OPTIONS.get(name.to_ascii_lowercase().as_str())
}

/// Every long-form argument in help order.
pub fn long_options() -> impl Iterator<Item = &'static LongOption> {
    LONG_OPTIONS.values()
}

impl ArgumentResolver<'_> {
    /// Validate and apply one long-form argument.
    ///
    /// `value` is the token after the name (or the rest of the argument-file
    /// line); it is only used when the option takes one, as reported by the
    /// returned [`Consumed`].
    pub fn apply_long(&mut self, name: &str, value: &str) -> Result<Consumed, ArgsError> {
        let option = long_option(name)
            .ok_or_else(|| ArgsError::usage(format!("Unrecognized argument: --{}", name)))?;

        tracing::debug!("Applying --{} with value {:?}", option.name, value);
        self.metrics.record_long_form();

        match option.action {
            LongAction::Flag(set) => {
                set(self.config);
                Ok(Consumed::NameOnly)
            }
            LongAction::Alias(code) if option.takes_value() => {
                self.apply_short(code, value)?;
                Ok(Consumed::NameAndValue)
            }
            LongAction::Alias(code) => {
                self.apply_short(code, "")?;
                Ok(Consumed::NameOnly)
            }
            LongAction::Handler(run) => run(self, option, value),
        }
    }
}

fn required<'v>(option: &LongOption, value: &'v str, what: &str) -> Result<&'v str, ArgsError> {
    if value.is_empty() {
        return Err(ArgsError::usage(format!(
            "--{} requires {} following it.",
            option.name, what
        )));
    }
    Ok(value)
}

fn number<T: FromStr>(option: &LongOption, value: &str) -> Result<T, ArgsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::usage(format!("--{} requires a number following it.", option.name)))
}

/// Parse a signed number and check it against a minimum.
fn at_least(option: &LongOption, value: &str, minimum: i64) -> Result<u32, ArgsError> {
    let n: i64 = number(option, value)?;
    if n < minimum {
        return Err(ArgsError::usage(format!(
            "--{} requires a number greater than or equal to {}.",
            option.name, minimum
        )));
    }
    u32::try_from(n).map_err(|_| ArgsError::usage(format!("--{} value {} is too large.", option.name, n)))
}

fn soft_bound(
    r: &mut ArgumentResolver<'_>,
    option: &LongOption,
    value: &str,
    kind: BoundKind,
    selector: BoundSelector,
) -> Result<Consumed, ArgsError> {
    let n: u32 = number(option, value)?;
    if let Err(rejection) = r.config.ply_bounds.apply(kind, selector, n) {
        r.warn(format!("--{} {}: {}", option.name, n, rejection));
    }
    Ok(Consumed::NameAndValue)
}

fn move_rule(r: &mut ArgumentResolver<'_>, option: &LongOption, moves: u32) -> Result<Consumed, ArgsError> {
    match r.config.n_move_rule {
        Some(current) if current != moves => Err(ArgsError::conflict(format!(
            "--{} conflicts with a previous setting of {}.",
            option.name, current
        ))),
        _ => {
            r.config.n_move_rule = Some(moves);
            Ok(Consumed::NameOnly)
        }
    }
}

fn repetition(r: &mut ArgumentResolver<'_>, option: &LongOption, count: u32) -> Result<Consumed, ArgsError> {
    match r.config.repetition {
        Some(current) if current != count => Err(ArgsError::conflict(format!(
            "--{} conflicts with a previous setting of {}-fold repetition.",
            option.name, current
        ))),
        _ => {
            r.config.repetition = Some(count);
            Ok(Consumed::NameOnly)
        }
    }
}

fn side_to_move(r: &mut ArgumentResolver<'_>, option: &LongOption, side: SideToMove) -> Result<Consumed, ArgsError> {
    let current = r.config.side_to_move;
    if current != SideToMove::Either && current != side {
        return Err(ArgsError::conflict(format!(
            "--{} conflicts with previous setting of {}.",
            option.name, current
        )));
    }
    r.config.side_to_move = side;
    Ok(Consumed::NameOnly)
}

fn setup_tags(
    r: &mut ArgumentResolver<'_>,
    option: &LongOption,
    policy: SetupTagPolicy,
) -> Result<Consumed, ArgsError> {
    let current = r.config.setup_tags;
    if current != SetupTagPolicy::Allowed && current != policy {
        let other = match current {
            SetupTagPolicy::Excluded => "--nosetuptags",
            _ => "--onlysetuptags",
        };
        return Err(ArgsError::conflict(format!("--{} conflicts with {}.", option.name, other)));
    }
    r.config.setup_tags = policy;
    Ok(Consumed::NameOnly)
}

fn fen_pattern(
    r: &mut ArgumentResolver<'_>,
    option: &LongOption,
    value: &str,
    either_colour: bool,
) -> Result<Consumed, ArgsError> {
    let pattern = required(option, value, "a pattern")?;
    ArgumentResolver::collaborator_result(
        format!("--{} {}", option.name, pattern),
        r.collaborators.add_fen_pattern(pattern, either_colour),
    )?;
    r.config.positional_variations = true;
    Ok(Consumed::NameAndValue)
}

fn material(
    r: &mut ArgumentResolver<'_>,
    option: &LongOption,
    value: &str,
    both_colours: bool,
) -> Result<Consumed, ArgsError> {
    let descriptor = required(option, value, "a string of material")?;
    ArgumentResolver::collaborator_result(
        format!("--{} {}", option.name, descriptor),
        r.collaborators.add_material_description(descriptor, both_colours),
    )?;
    Ok(Consumed::NameAndValue)
}

fn game_ranges(option: &LongOption, value: &str) -> Result<GameRanges, ArgsError> {
    GameRanges::parse(value).map_err(|e| ArgsError::usage(format!("--{}: {}", option.name, e)))
}
