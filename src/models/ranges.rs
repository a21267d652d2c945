use std::str::FromStr;
use thiserror::Error;

/// One inclusive range of game numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRange {
    pub min: u64,
    pub max: u64,
}

impl GameRange {
    pub fn contains(&self, number: u64) -> bool {
        self.min <= number && number <= self.max
    }
}

/// A list of game-number ranges failed to parse. The whole list is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Numbers in {list} must be in the format N or N:N and in ascending order.")]
pub struct RangeListError {
    pub list: String,
}

/// Strictly ascending, non-overlapping game-number ranges used by
/// `--selectonly` and `--skipmatching`.
///
/// Matching consumers walk the list alongside an ascending game counter with
/// [`GameRanges::matches`]; [`GameRanges::reset`] rewinds the walk to the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRanges {
    ranges: Vec<GameRange>,
    cursor: usize,
}

impl GameRanges {
    /// Parse `range[,range ...]` where each range is `N` or `N1:N2`.
    ///
    /// Game numbers start at 1, each range must satisfy `N1 <= N2`, and each
    /// range must start strictly after the previous one ends.
    pub fn parse(text: &str) -> Result<Self, RangeListError> {
        let fail = || RangeListError {
            list: text.to_string(),
        };

        let mut ranges = Vec::new();
        let mut last_number = 0u64;

        for token in text.split(',').filter(|token| !token.is_empty()) {
            let range = match token.split_once(':') {
                Some((min, max)) => {
                    let min = parse_number(min).ok_or_else(fail)?;
                    let max = parse_number(max).ok_or_else(fail)?;
                    GameRange { min, max }
                }
                None => {
                    let number = parse_number(token).ok_or_else(fail)?;
                    GameRange {
                        min: number,
                        max: number,
                    }
                }
            };

            if range.min <= last_number || range.min > range.max {
                return Err(fail());
            }
            last_number = range.max;
            ranges.push(range);
        }

        if ranges.is_empty() {
            return Err(fail());
        }

        Ok(Self { ranges, cursor: 0 })
    }

    pub fn ranges(&self) -> &[GameRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The range the walk is currently positioned on, if any remain.
    ///
    /// Part of the walk used by the matching engine, alongside [`matches`](Self::matches).
    pub fn current(&self) -> Option<&GameRange> {
        self.ranges.get(self.cursor)
    }

    /// Check `number` against the list, moving past ranges that end before it.
    ///
    /// Numbers must be presented in ascending order between resets.
    pub fn matches(&mut self, number: u64) -> bool {
        while let Some(range) = self.ranges.get(self.cursor) {
            if number > range.max {
                self.cursor += 1;
            } else {
                return range.contains(number);
            }
        }
        false
    }

    /// True once every range has been walked past, so the matching engine can
    /// stop selecting early.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ranges.len()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl FromStr for GameRanges {
    type Err = RangeListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_number(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(ranges: &GameRanges) -> Vec<(u64, u64)> {
        ranges.ranges().iter().map(|r| (r.min, r.max)).collect()
    }

    #[test]
    fn test_parse_mixed_list() {
        let ranges = GameRanges::parse("1,3:5,7").unwrap();
        assert_eq!(pairs(&ranges), vec![(1, 1), (3, 5), (7, 7)]);
    }

    #[test]
    fn test_descending_rejected() {
        assert!(GameRanges::parse("3,1").is_err());
        assert!(GameRanges::parse("5,3").is_err());
    }

    #[test]
    fn test_overlap_rejected() {
        assert!(GameRanges::parse("1:5,4:6").is_err());
        assert!(GameRanges::parse("1:5,5").is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(GameRanges::parse("3:1").is_err());
        assert!(GameRanges::parse("abc").is_err());
        assert!(GameRanges::parse("1:").is_err());
        assert!(GameRanges::parse("-2").is_err());
        assert!(GameRanges::parse("").is_err());
    }

    #[test]
    fn test_zero_is_not_a_game_number() {
        assert!(GameRanges::parse("0").is_err());
        assert!(GameRanges::parse("0:4").is_err());
    }

    #[test]
    fn test_error_names_the_list() {
        let err = GameRanges::parse("4,2").unwrap_err();
        assert!(err.to_string().contains("4,2"));
    }

    #[test]
    fn test_sequential_walk() {
        let mut ranges = GameRanges::parse("2,4:6,9").unwrap();
        let matched: Vec<u64> = (1..=10).filter(|n| ranges.matches(*n)).collect();
        assert_eq!(matched, vec![2, 4, 5, 6, 9]);
        assert!(ranges.is_exhausted());

        ranges.reset();
        assert_eq!(ranges.current(), Some(&GameRange { min: 2, max: 2 }));
        assert!(ranges.matches(2));
    }
}
