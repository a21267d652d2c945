use crate::models::ArgCode;
use crate::services::long_form::long_options;
use crate::{APP_NAME, VERSION};

/// The `-h`/`--help` text, built from the short-form codes and the long-form table.
pub fn usage_text() -> String {
    let mut lines = vec![
        format!("{} {}", APP_NAME, VERSION),
        format!("Usage: {} [arguments] [file.pgn ...]", APP_NAME),
        String::new(),
    ];

    lines.extend(
        ArgCode::ALL
            .iter()
            .filter(|code| **code != ArgCode::LongForm)
            .map(|code| format!("{}{}", code, describe_short(code.summary()))),
    );

    lines.push(String::new());
    lines.extend(long_options().map(|option| match option.value_hint {
        Some(hint) => format!("--{} {} -- {}", option.name, hint, option.summary),
        None => format!("--{} -- {}", option.name, option.summary),
    }));

    lines.push(String::new());
    lines.push(format!(
        "In an argument file each line is :-<code>[value], :--name [value], :<file.pgn>, \
         or a data line for the last {} {} {} {} {} or {}.",
        ArgCode::Tags,
        ArgCode::Moves,
        ArgCode::Positions,
        ArgCode::TagRoster,
        ArgCode::EndingsColoured,
        ArgCode::Endings
    ));

    lines.join("\n")
}

/// Summaries that start with a value placeholder read `-xvalue -- text`.
fn describe_short(summary: &str) -> String {
    if summary.contains(" -- ") {
        summary.to_string()
    } else {
        format!(" -- {}", summary)
    }
}
