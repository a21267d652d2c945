use std::fmt;

/// Single-character argument codes.
///
/// The letters are a user-facing contract: they are accepted as `-<code>` on
/// the command line and as `:-<code>` in argument files. [`ArgCode::LongForm`]
/// only appears in argument files, where `:--name value` introduces a
/// long-form option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgCode {
    SevenTagRoster,
    GamesPerFile,
    AppendToOutputFile,
    FileOfArguments,
    MoveBounds,
    CheckFile,
    DontKeepComments,
    DuplicatesFile,
    DontKeepDuplicates,
    UseEcoFile,
    EcoOutputLevel,
    OutputFenString,
    FileOfFiles,
    HashcodeMatch,
    Help,
    AlternativeHelp,
    WriteToLogFile,
    AppendToLogFile,
    MatchCheckmate,
    NonMatchingGames,
    DontKeepNags,
    WriteToOutputFile,
    PlyBounds,
    DontMatchPermutations,
    TagRoster,
    CheckOnly,
    UseSoundex,
    KeepSilent,
    Tags,
    TagExtraction,
    SuppressOriginals,
    Moves,
    DontKeepVariations,
    LineWidth,
    OutputFormat,
    Positions,
    EndingsColoured,
    Endings,
    UseVirtualHashTable,
    LongForm,
}

impl ArgCode {
    /// Every code, in the order they are listed by `--help`.
    pub const ALL: [ArgCode; 40] = [
        ArgCode::SevenTagRoster,
        ArgCode::GamesPerFile,
        ArgCode::AppendToOutputFile,
        ArgCode::FileOfArguments,
        ArgCode::MoveBounds,
        ArgCode::CheckFile,
        ArgCode::DontKeepComments,
        ArgCode::DuplicatesFile,
        ArgCode::DontKeepDuplicates,
        ArgCode::UseEcoFile,
        ArgCode::EcoOutputLevel,
        ArgCode::OutputFenString,
        ArgCode::FileOfFiles,
        ArgCode::HashcodeMatch,
        ArgCode::Help,
        ArgCode::AlternativeHelp,
        ArgCode::WriteToLogFile,
        ArgCode::AppendToLogFile,
        ArgCode::MatchCheckmate,
        ArgCode::NonMatchingGames,
        ArgCode::DontKeepNags,
        ArgCode::WriteToOutputFile,
        ArgCode::PlyBounds,
        ArgCode::DontMatchPermutations,
        ArgCode::TagRoster,
        ArgCode::CheckOnly,
        ArgCode::UseSoundex,
        ArgCode::KeepSilent,
        ArgCode::Tags,
        ArgCode::TagExtraction,
        ArgCode::SuppressOriginals,
        ArgCode::Moves,
        ArgCode::DontKeepVariations,
        ArgCode::LineWidth,
        ArgCode::OutputFormat,
        ArgCode::Positions,
        ArgCode::EndingsColoured,
        ArgCode::Endings,
        ArgCode::UseVirtualHashTable,
        ArgCode::LongForm,
    ];

    /// Map a code letter to its argument, if the letter is recognised.
    pub fn from_letter(letter: char) -> Option<Self> {
        let code = match letter {
            '7' => ArgCode::SevenTagRoster,
            '#' => ArgCode::GamesPerFile,
            'a' => ArgCode::AppendToOutputFile,
            'A' => ArgCode::FileOfArguments,
            'b' => ArgCode::MoveBounds,
            'c' => ArgCode::CheckFile,
            'C' => ArgCode::DontKeepComments,
            'd' => ArgCode::DuplicatesFile,
            'D' => ArgCode::DontKeepDuplicates,
            'e' => ArgCode::UseEcoFile,
            'E' => ArgCode::EcoOutputLevel,
            'F' => ArgCode::OutputFenString,
            'f' => ArgCode::FileOfFiles,
            'H' => ArgCode::HashcodeMatch,
            'h' => ArgCode::Help,
            '?' => ArgCode::AlternativeHelp,
            'l' => ArgCode::WriteToLogFile,
            'L' => ArgCode::AppendToLogFile,
            'M' => ArgCode::MatchCheckmate,
            'n' => ArgCode::NonMatchingGames,
            'N' => ArgCode::DontKeepNags,
            'o' => ArgCode::WriteToOutputFile,
            'p' => ArgCode::PlyBounds,
            'P' => ArgCode::DontMatchPermutations,
            'R' => ArgCode::TagRoster,
            'r' => ArgCode::CheckOnly,
            'S' => ArgCode::UseSoundex,
            's' => ArgCode::KeepSilent,
            't' => ArgCode::Tags,
            'T' => ArgCode::TagExtraction,
            'U' => ArgCode::SuppressOriginals,
            'v' => ArgCode::Moves,
            'V' => ArgCode::DontKeepVariations,
            'w' => ArgCode::LineWidth,
            'W' => ArgCode::OutputFormat,
            'x' => ArgCode::Positions,
            'y' => ArgCode::EndingsColoured,
            'z' => ArgCode::Endings,
            'Z' => ArgCode::UseVirtualHashTable,
            '-' => ArgCode::LongForm,
            _ => return None,
        };
        Some(code)
    }

    /// The letter used for this code on the command line.
    pub fn letter(self) -> char {
        match self {
            ArgCode::SevenTagRoster => '7',
            ArgCode::GamesPerFile => '#',
            ArgCode::AppendToOutputFile => 'a',
            ArgCode::FileOfArguments => 'A',
            ArgCode::MoveBounds => 'b',
            ArgCode::CheckFile => 'c',
            ArgCode::DontKeepComments => 'C',
            ArgCode::DuplicatesFile => 'd',
            ArgCode::DontKeepDuplicates => 'D',
            ArgCode::UseEcoFile => 'e',
            ArgCode::EcoOutputLevel => 'E',
            ArgCode::OutputFenString => 'F',
            ArgCode::FileOfFiles => 'f',
            ArgCode::HashcodeMatch => 'H',
            ArgCode::Help => 'h',
            ArgCode::AlternativeHelp => '?',
            ArgCode::WriteToLogFile => 'l',
            ArgCode::AppendToLogFile => 'L',
            ArgCode::MatchCheckmate => 'M',
            ArgCode::NonMatchingGames => 'n',
            ArgCode::DontKeepNags => 'N',
            ArgCode::WriteToOutputFile => 'o',
            ArgCode::PlyBounds => 'p',
            ArgCode::DontMatchPermutations => 'P',
            ArgCode::TagRoster => 'R',
            ArgCode::CheckOnly => 'r',
            ArgCode::UseSoundex => 'S',
            ArgCode::KeepSilent => 's',
            ArgCode::Tags => 't',
            ArgCode::TagExtraction => 'T',
            ArgCode::SuppressOriginals => 'U',
            ArgCode::Moves => 'v',
            ArgCode::DontKeepVariations => 'V',
            ArgCode::LineWidth => 'w',
            ArgCode::OutputFormat => 'W',
            ArgCode::Positions => 'x',
            ArgCode::EndingsColoured => 'y',
            ArgCode::Endings => 'z',
            ArgCode::UseVirtualHashTable => 'Z',
            ArgCode::LongForm => '-',
        }
    }

    /// Whether unprefixed lines following this code in an argument file
    /// belong to it.
    pub fn persists_across_lines(self) -> bool {
        matches!(
            self,
            ArgCode::Tags
                | ArgCode::Moves
                | ArgCode::Positions
                | ArgCode::TagRoster
                | ArgCode::Endings
                | ArgCode::EndingsColoured
        )
    }

    /// Short description shown by `--help`.
    pub fn summary(self) -> &'static str {
        match self {
            ArgCode::SevenTagRoster => "output only the seven tag roster for each game",
            ArgCode::GamesPerFile => "num[,first] -- output num games per file, to files named 1.pgn, 2.pgn, ...",
            ArgCode::AppendToOutputFile => "file -- append extracted games to file (see -o)",
            ArgCode::FileOfArguments => "file -- read further arguments from file",
            ArgCode::MoveBounds => "[elu]num -- bound the number of moves in a game (equal, lower, upper)",
            ArgCode::CheckFile => "file -- file.pgn is a duplicate check-file; any other name lists check-files",
            ArgCode::DontKeepComments => "don't include comments in the output",
            ArgCode::DuplicatesFile => "file -- write duplicate games to file",
            ArgCode::DontKeepDuplicates => "don't output duplicate games",
            ArgCode::UseEcoFile => "[file] -- classify games by ECO using file (default eco.pgn or $ECO_FILE)",
            ArgCode::EcoOutputLevel => "level -- split output into files by ECO code at the given depth (1-10)",
            ArgCode::OutputFenString => "[pattern] -- output a FEN comment after the final (or matching) move",
            ArgCode::FileOfFiles => "file -- file lists the PGN source files, one per line",
            ArgCode::HashcodeMatch => "hash -- match games containing the given polyglot hash value",
            ArgCode::Help => "print details of the arguments",
            ArgCode::AlternativeHelp => "print details of the arguments",
            ArgCode::WriteToLogFile => "file -- write diagnostics to file rather than stderr",
            ArgCode::AppendToLogFile => "file -- append diagnostics to file",
            ArgCode::MatchCheckmate => "match only games which end in checkmate",
            ArgCode::NonMatchingGames => "file -- write games that do not match to file (or stdout)",
            ArgCode::DontKeepNags => "don't include NAGs in the output",
            ArgCode::WriteToOutputFile => "file -- write extracted games to file (existing contents lost)",
            ArgCode::PlyBounds => "[elu]num -- bound the number of ply in a game (equal, lower, upper)",
            ArgCode::DontMatchPermutations => "don't match permutations of the textual variations (-v)",
            ArgCode::TagRoster => "file -- tag ordering for the output roster",
            ArgCode::CheckOnly => "report errors but don't extract",
            ArgCode::UseSoundex => "use soundex matching for player tags (must precede -t and -T)",
            ArgCode::KeepSilent => "silent mode: don't report each game as it is extracted",
            ArgCode::Tags => "file -- file of tag extraction criteria",
            ArgCode::TagExtraction => "criterion -- a single tag extraction criterion",
            ArgCode::SuppressOriginals => "don't output games that only occur once (see -d)",
            ArgCode::Moves => "file -- file of textual move variations of interest",
            ArgCode::DontKeepVariations => "don't include variations in the output",
            ArgCode::LineWidth => "width -- approximate line width for output",
            ArgCode::OutputFormat => "[format] -- output format: cm, epd, fen, halg, lalg, elalg, xlalg, xolalg, san, uci",
            ArgCode::Positions => "file -- file of move sequences leading to positions of interest",
            ArgCode::EndingsColoured => "file -- material balances of interest for the given colours",
            ArgCode::Endings => "file -- material balances of interest for either colour",
            ArgCode::UseVirtualHashTable => "use an external hash table for duplicate detection",
            ArgCode::LongForm => "name [value] -- long-form argument (argument files only)",
        }
    }
}

impl fmt::Display for ArgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}", self.letter())
    }
}
