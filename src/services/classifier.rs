use crate::models::ArgCode;
use crate::services::error::ArgsError;

/// Prefix of a directive line in an argument file.
pub const DIRECTIVE_PREFIX: &str = ":-";

/// A directive line split into its code and the text after the code letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub code: ArgCode,
    pub value: &'a str,
}

/// Decide whether an argument-file line declares an argument.
///
/// Returns `Ok(None)` for anything that is not `:-` followed by at least one
/// character. An unknown code letter fails the whole file.
pub fn classify_line(line: &str) -> Result<Option<Directive<'_>>, ArgsError> {
    let Some(rest) = line.strip_prefix(DIRECTIVE_PREFIX) else {
        return Ok(None);
    };
    let Some(letter) = rest.chars().next() else {
        return Ok(None);
    };

    let code = ArgCode::from_letter(letter).ok_or_else(|| {
        ArgsError::usage(format!("Unrecognized argument: {} in the argument file.", line))
    })?;

    Ok(Some(Directive {
        code,
        value: &rest[letter.len_utf8()..],
    }))
}
