//! Incremental lower/upper bounds on game length.
//!
//! Move counts are converted to ply counts before they are stored, so a single
//! [`PlyBounds`] pair serves both `-b`/`--minmoves` and `-p`/`--minply`.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::PlyBounds;

/// `[elu]N`, with exact as the default selector.
static BOUND_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([elu]?)(\d+)$").expect("Invalid bound regex"));

/// What the number in a bound counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Moves,
    Ply,
}

/// Which side of the pair a bound sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSelector {
    Lower,
    Upper,
    Exact,
}

impl BoundSelector {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(BoundSelector::Lower),
            'u' => Some(BoundSelector::Upper),
            'e' => Some(BoundSelector::Exact),
            _ => None,
        }
    }
}

/// A bound that would have left `lower > upper`. The pair is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundRejection {
    #[error("Lower bound of ply limit is greater than the upper bound: bound ignored.")]
    LowerAboveUpper { lower: u64, upper: u64 },

    #[error("Upper bound of ply limit is smaller than the lower bound: bound ignored.")]
    UpperBelowLower { lower: u64, upper: u64 },
}

/// Why a `-b`/`-p` value could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundSpecError {
    #[error("must be followed by e, l, or u")]
    BadSelector,
    #[error("should be in the form [elu]number")]
    BadNumber,
}

/// First ply of move `n`. Move 0 maps to ply 0.
fn first_ply_of_move(n: u64) -> u64 {
    (2 * n).saturating_sub(1)
}

fn last_ply_of_move(n: u64) -> u64 {
    2 * n
}

impl PlyBounds {
    /// Apply one bound, converting move numbers to ply.
    ///
    /// Exact bounds always apply. A lower bound above the current upper bound,
    /// or an upper bound below the current lower bound, is rejected without
    /// touching either value.
    pub fn apply(
        &mut self,
        kind: BoundKind,
        selector: BoundSelector,
        number: u32,
    ) -> Result<(), BoundRejection> {
        let n = u64::from(number);
        let (lower, upper) = match kind {
            BoundKind::Moves => (first_ply_of_move(n), last_ply_of_move(n)),
            BoundKind::Ply => (n, n),
        };

        match selector {
            BoundSelector::Exact => {
                self.lower = lower;
                self.upper = upper;
            }
            BoundSelector::Lower => {
                if lower > self.upper {
                    return Err(BoundRejection::LowerAboveUpper {
                        lower,
                        upper: self.upper,
                    });
                }
                self.lower = lower;
            }
            BoundSelector::Upper => {
                if upper < self.lower {
                    return Err(BoundRejection::UpperBelowLower {
                        lower: self.lower,
                        upper,
                    });
                }
                self.upper = upper;
            }
        }

        self.active = true;
        tracing::debug!(
            "Ply bounds now {}..={} after {:?} {:?} {}",
            self.lower,
            self.upper,
            kind,
            selector,
            number
        );
        Ok(())
    }
}

/// Read a `-b`/`-p` value of the form `[elu]N`.
pub fn parse_bound_spec(value: &str) -> Result<(BoundSelector, u32), BoundSpecError> {
    match value.chars().next() {
        Some(c) if BoundSelector::from_char(c).is_some() || c.is_ascii_digit() => {}
        _ => return Err(BoundSpecError::BadSelector),
    }

    let captures = BOUND_SPEC
        .captures(value)
        .ok_or(BoundSpecError::BadNumber)?;
    let selector = captures
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(BoundSelector::from_char)
        .unwrap_or(BoundSelector::Exact);
    let number = captures[2]
        .parse::<u32>()
        .map_err(|_| BoundSpecError::BadNumber)?;

    Ok((selector, number))
}
