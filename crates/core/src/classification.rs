//! Blood-level classification against a drug's reference ranges.
//!
//! An observed level is first matched against the normal, toxic and lethal
//! ranges in that order (first match wins, so a value on a shared boundary
//! takes the earlier category). If none contain it, the gaps between and
//! around the ranges are checked.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::RangeParseError;
use crate::reference_range::{is_in_range, parse_range, ReferenceRange};

/* --------------------------------------------------------------------------
Labels
-------------------------------------------------------------------------- */

/// Outcome of classifying an observed blood level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BloodLevel {
    Normal,
    Toxic,
    Lethal,
    BelowNormal,
    AboveNormal,
    AboveToxic,
    AboveLethal,
    NotInRange,
}

impl BloodLevel {
    /// Human-readable label returned to API clients.
    pub fn label(self) -> &'static str {
        match self {
            BloodLevel::Normal => "Normal Blood Level",
            BloodLevel::Toxic => "Toxic Blood Level",
            BloodLevel::Lethal => "Lethal Blood Level",
            BloodLevel::BelowNormal => "Below Normal Blood Level",
            BloodLevel::AboveNormal => "Above Normal Blood Level",
            BloodLevel::AboveToxic => "Above Toxic Blood Level",
            BloodLevel::AboveLethal => "Above Lethal Blood Level",
            BloodLevel::NotInRange => "Not in range",
        }
    }
}

impl fmt::Display for BloodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for BloodLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/* --------------------------------------------------------------------------
Range sets
-------------------------------------------------------------------------- */

/// The raw `*_level_mg` strings of one drug record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeText<'a> {
    pub normal: Option<&'a str>,
    pub toxic: Option<&'a str>,
    pub lethal: Option<&'a str>,
}

/// Parsed normal/toxic/lethal ranges for one drug.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrugRangeSet {
    pub normal: Option<ReferenceRange>,
    pub toxic: Option<ReferenceRange>,
    pub lethal: Option<ReferenceRange>,
}

impl DrugRangeSet {
    /// Parse all three ranges. The first malformed string aborts parsing.
    pub fn parse(text: &RangeText<'_>) -> Result<Self, RangeParseError> {
        Ok(Self {
            normal: parse_range(text.normal)?,
            toxic: parse_range(text.toxic)?,
            lethal: parse_range(text.lethal)?,
        })
    }

    /// Classify `observed` against these ranges.
    pub fn classify(&self, observed: f64) -> BloodLevel {
        let members = [
            (self.normal, BloodLevel::Normal),
            (self.toxic, BloodLevel::Toxic),
            (self.lethal, BloodLevel::Lethal),
        ];
        if let Some((_, level)) = members
            .iter()
            .find(|(range, _)| is_in_range(observed, range.as_ref()))
        {
            return *level;
        }

        if let Some(normal) = self.normal {
            if observed < normal.lower {
                return BloodLevel::BelowNormal;
            }
        }
        if let (Some(normal), Some(toxic)) = (self.normal, self.toxic) {
            if normal.upper < observed && observed < toxic.lower {
                return BloodLevel::AboveNormal;
            }
        }
        if let (Some(toxic), Some(lethal)) = (self.toxic, self.lethal) {
            if toxic.upper < observed && observed < lethal.lower {
                return BloodLevel::AboveToxic;
            }
        }
        if let Some(lethal) = self.lethal {
            if observed > lethal.upper {
                return BloodLevel::AboveLethal;
            }
        }

        BloodLevel::NotInRange
    }
}

/// Parse a record's range strings and classify `observed` against them.
pub fn classify(text: &RangeText<'_>, observed: f64) -> Result<BloodLevel, RangeParseError> {
    Ok(DrugRangeSet::parse(text)?.classify(observed))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn text<'a>(
        normal: Option<&'a str>,
        toxic: Option<&'a str>,
        lethal: Option<&'a str>,
    ) -> RangeText<'a> {
        RangeText {
            normal,
            toxic,
            lethal,
        }
    }

    fn full() -> RangeText<'static> {
        text(Some("0-10"), Some("10-20"), Some("20-30"))
    }

    // -- direct matches --

    #[test]
    fn shared_boundary_prefers_earlier_category() {
        assert_eq!(classify(&full(), 10.0).unwrap(), BloodLevel::Normal);
        assert_eq!(classify(&full(), 20.0).unwrap(), BloodLevel::Toxic);
    }

    #[test]
    fn values_inside_each_range() {
        assert_eq!(classify(&full(), 5.0).unwrap(), BloodLevel::Normal);
        assert_eq!(classify(&full(), 15.0).unwrap(), BloodLevel::Toxic);
        assert_eq!(classify(&full(), 25.0).unwrap(), BloodLevel::Lethal);
    }

    #[test]
    fn overlapping_ranges_resolve_in_order() {
        let ranges = text(Some("0-20"), Some("10-30"), Some(">15"));
        assert_eq!(classify(&ranges, 18.0).unwrap(), BloodLevel::Normal);
        assert_eq!(classify(&ranges, 25.0).unwrap(), BloodLevel::Toxic);
        assert_eq!(classify(&ranges, 31.0).unwrap(), BloodLevel::Lethal);
    }

    // -- gaps --

    #[test]
    fn below_normal() {
        let ranges = text(Some("5-10"), None, None);
        assert_eq!(classify(&ranges, 1.0).unwrap(), BloodLevel::BelowNormal);
    }

    #[test]
    fn gap_between_normal_and_toxic() {
        let ranges = text(Some("0-10"), Some("15-20"), None);
        assert_eq!(classify(&ranges, 12.0).unwrap(), BloodLevel::AboveNormal);
    }

    #[test]
    fn gap_between_toxic_and_lethal() {
        let ranges = text(Some("0-10"), Some("10-20"), Some("25-30"));
        assert_eq!(classify(&ranges, 22.0).unwrap(), BloodLevel::AboveToxic);
    }

    #[test]
    fn above_lethal_without_other_ranges() {
        let ranges = text(None, None, Some("30-40"));
        assert_eq!(classify(&ranges, 50.0).unwrap(), BloodLevel::AboveLethal);
    }

    #[test]
    fn above_normal_without_toxic_is_not_in_range() {
        let ranges = text(Some("0-10"), None, None);
        assert_eq!(classify(&ranges, 11.0).unwrap(), BloodLevel::NotInRange);
    }

    #[test]
    fn gap_between_normal_and_lethal_skips_toxic_fallback() {
        let ranges = text(Some("0-10"), None, Some("30-40"));
        assert_eq!(classify(&ranges, 20.0).unwrap(), BloodLevel::NotInRange);
    }

    #[test]
    fn no_ranges_is_not_in_range() {
        let ranges = text(None, None, None);
        assert_eq!(classify(&ranges, 5.0).unwrap(), BloodLevel::NotInRange);
        let empty = text(Some(""), Some(""), Some(""));
        assert_eq!(classify(&empty, 5.0).unwrap(), BloodLevel::NotInRange);
    }

    #[test]
    fn open_ended_lethal_absorbs_high_values() {
        let ranges = text(Some("1-2"), Some("2-5"), Some(">5"));
        assert_eq!(classify(&ranges, 500.0).unwrap(), BloodLevel::Lethal);
    }

    #[test]
    fn at_most_normal_never_reports_below_normal() {
        let ranges = text(Some("<=0.5"), Some("1-2"), None);
        assert_eq!(classify(&ranges, -3.0).unwrap(), BloodLevel::Normal);
        assert_eq!(classify(&ranges, 0.7).unwrap(), BloodLevel::AboveNormal);
    }

    // -- errors --

    #[test]
    fn parse_error_propagates() {
        let ranges = text(Some("0-10"), Some("abc"), None);
        let err = classify(&ranges, 5.0).unwrap_err();
        assert_eq!(err.text, "abc");
    }

    // -- labels --

    #[test]
    fn labels_serialize_as_plain_strings() {
        assert_eq!(BloodLevel::AboveToxic.to_string(), "Above Toxic Blood Level");
        assert_eq!(
            serde_json::to_value(BloodLevel::NotInRange).unwrap(),
            serde_json::json!("Not in range")
        );
    }
}
