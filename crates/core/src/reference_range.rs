//! Reference-range parsing.
//!
//! Drug records store their normal/toxic/lethal levels as free text. Four
//! encodings are recognized:
//!
//! | Text      | Interval        |
//! |-----------|-----------------|
//! | `10-20`   | `[10, 20]`      |
//! | `>5`      | `[5, +inf)`     |
//! | `<=5`     | `(-inf, 5]`     |
//! | `7`       | `[7, 7]`        |
//!
//! The checks run in a fixed order: two-sided (`-`), then `>`, then `>=`,
//! then `<=`, then exact value. Because `>` is tested before `>=`, text such
//! as `>=5` is handled by the `>` branch and fails to parse (`=5` is not a
//! number).

use std::str::FromStr;

use serde::Serialize;

use crate::error::RangeParseError;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// A closed interval of blood-level concentrations.
///
/// Either bound may be infinite. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub lower: f64,
    pub upper: f64,
}

impl ReferenceRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// A degenerate interval matching exactly one value.
    pub fn exact(value: f64) -> Self {
        Self::new(value, value)
    }

    /// `[lower, +inf)`.
    pub fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    /// `(-inf, upper]`.
    pub fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    /// Inclusive membership test on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl FromStr for ReferenceRange {
    type Err = RangeParseError;

    /// Parse one non-empty range string. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let number = |token: &str| parse_number(token, text);

        if text.contains('-') {
            let mut parts = text.split('-');
            return match (parts.next(), parts.next(), parts.next()) {
                (Some(start), Some(end), None) => Ok(Self::new(number(start)?, number(end)?)),
                _ => Err(invalid(text)),
            };
        }

        if let Some(rest) = text.strip_prefix('>') {
            return Ok(Self::at_least(number(rest)?));
        }

        // Unreachable for well-formed input: the `>` branch above already
        // claims anything starting with `>=`.
        if let Some(rest) = text.strip_prefix(">=") {
            return Ok(Self::at_least(number(rest)?));
        }

        if let Some(rest) = text.strip_prefix("<=") {
            return Ok(Self::at_most(number(rest)?));
        }

        Ok(Self::exact(number(text)?))
    }
}

/* --------------------------------------------------------------------------
Functions
-------------------------------------------------------------------------- */

/// Parse an optional range string.
///
/// Returns `Ok(None)` when the text is absent or empty, and an error when
/// it is present but matches none of the recognized formats.
pub fn parse_range(text: Option<&str>) -> Result<Option<ReferenceRange>, RangeParseError> {
    match text {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some),
    }
}

/// Whether `value` lies inside `range`. An absent range never matches.
pub fn is_in_range(value: f64, range: Option<&ReferenceRange>) -> bool {
    range.is_some_and(|r| r.contains(value))
}

fn parse_number(token: &str, original: &str) -> Result<f64, RangeParseError> {
    token.trim().parse::<f64>().map_err(|_| invalid(original))
}

fn invalid(text: &str) -> RangeParseError {
    RangeParseError {
        text: text.to_string(),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
