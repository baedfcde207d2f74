//! Split ratio parsing.
//!
//! A ratio `a/b` (or `a:b`) means `a` old shares become `b` new shares.
//! Quantities scale by `b/a` and per-unit prices by `a/b`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RatioError;

lazy_static! {
    /// Two unsigned integers separated by `/` or `:`, whitespace allowed around each part.
    static ref SPLIT_RATIO_REGEX: Regex =
        Regex::new(r"^\s*([0-9]+)\s*[/:]\s*([0-9]+)\s*$").expect("Invalid split ratio regex");
}

/// Direction of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitKind {
    /// More new shares than old (e.g. 1:2).
    Forward,
    /// Fewer new shares than old (e.g. 10:1 consolidation).
    Reverse,
    /// Same count on both sides; quantities and prices are unchanged.
    Neutral,
}

/// A validated split ratio. Both components are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRatio {
    numerator: u64,
    denominator: u64,
}

impl SplitRatio {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, RatioError> {
        if numerator == 0 || denominator == 0 {
            return Err(RatioError::NonPositive);
        }
        Ok(SplitRatio {
            numerator,
            denominator,
        })
    }

    /// Old share count unit.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// New share count unit.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Factor applied to quantities (`denominator / numerator`).
    pub fn multiplier(&self) -> Decimal {
        Decimal::from(self.denominator) / Decimal::from(self.numerator)
    }

    pub fn kind(&self) -> SplitKind {
        match self.denominator.cmp(&self.numerator) {
            std::cmp::Ordering::Greater => SplitKind::Forward,
            std::cmp::Ordering::Less => SplitKind::Reverse,
            std::cmp::Ordering::Equal => SplitKind::Neutral,
        }
    }
}

impl fmt::Display for SplitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

impl FromStr for SplitRatio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_split_ratio(s)
    }
}

/// Parses user text such as `"1/2"` or `"2 : 1"` into a [`SplitRatio`].
///
/// Never panics on user input. Signs, decimals and components too large for
/// a `u64` are reported as [`RatioError::InvalidFormat`]; zero components as
/// [`RatioError::NonPositive`].
pub fn parse_split_ratio(input: &str) -> Result<SplitRatio, RatioError> {
    let captures = SPLIT_RATIO_REGEX
        .captures(input)
        .ok_or(RatioError::InvalidFormat)?;

    let numerator = captures[1]
        .parse::<u64>()
        .map_err(|_| RatioError::InvalidFormat)?;
    let denominator = captures[2]
        .parse::<u64>()
        .map_err(|_| RatioError::InvalidFormat)?;

    SplitRatio::new(numerator, denominator)
}

/// Tagged view of a parse attempt, shaped for JSON hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioParseOutcome {
    pub valid: bool,
    pub numerator: Option<u64>,
    pub denominator: Option<u64>,
    pub multiplier: Option<Decimal>,
    pub error: Option<String>,
}

impl From<Result<SplitRatio, RatioError>> for RatioParseOutcome {
    fn from(result: Result<SplitRatio, RatioError>) -> Self {
        match result {
            Ok(ratio) => RatioParseOutcome {
                valid: true,
                numerator: Some(ratio.numerator()),
                denominator: Some(ratio.denominator()),
                multiplier: Some(ratio.multiplier()),
                error: None,
            },
            Err(e) => RatioParseOutcome {
                valid: false,
                numerator: None,
                denominator: None,
                multiplier: None,
                error: Some(e.to_string()),
            },
        }
    }
}
