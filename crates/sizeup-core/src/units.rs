//! Unit conversion utilities
//!
//! Handles conversion between centimeters (the canonical geometry unit) and
//! inches. All layout math runs in centimeters; the functions here are only
//! used at the display boundary, for labels and for text typed by the user.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Centimeters per inch
pub const INCHES_TO_CM: f64 = 2.54;

/// Inches per centimeter
pub const CM_TO_INCHES: f64 = 1.0 / INCHES_TO_CM;

/// Glyph placed in front of diameter labels
pub const DIAMETER_GLYPH: char = '⌀';

/// Display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Centimeters
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    /// Inches
    #[serde(rename = "inches")]
    Inches,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", unit_label(*self))
    }
}

impl FromStr for Unit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeters" | "metric" => Ok(Self::Centimeters),
            "in" | "inch" | "inches" | "imperial" => Ok(Self::Inches),
            _ => Err(LayoutError::InvalidInput {
                input: s.to_string(),
                reason: "unknown unit".to_string(),
            }),
        }
    }
}

/// Convert a length between units
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Centimeters, Unit::Inches) => value * CM_TO_INCHES,
        (Unit::Inches, Unit::Centimeters) => value * INCHES_TO_CM,
        _ => value,
    }
}

/// Convert a canonical centimeter value into the display unit
pub fn to_display(value_cm: f64, unit: Unit) -> f64 {
    convert(value_cm, Unit::Centimeters, unit)
}

/// Convert a display-unit value back into centimeters
pub fn from_display(value: f64, unit: Unit) -> f64 {
    convert(value, unit, Unit::Centimeters)
}

/// Format a value that is already expressed in `unit`
///
/// One decimal digit, suffixed with `cm` or `"`. An absent value renders
/// as an empty string rather than `0.0`.
pub fn format(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, unit_suffix(unit)),
        None => String::new(),
    }
}

/// Format a centimeter length for display in `unit`
pub fn format_length(value_cm: Option<f64>, unit: Unit) -> String {
    format(value_cm.map(|v| to_display(v, unit)), unit)
}

/// Format a diameter label (`⌀ 30.0cm`) from a radius in centimeters
pub fn format_diameter(radius_cm: f64, unit: Unit) -> String {
    format!(
        "{} {}",
        DIAMETER_GLYPH,
        format_length(Some(radius_cm * 2.0), unit)
    )
}

/// Format a gap distance the way the distance slider shows it
///
/// Centimeters are shown as whole numbers (`30cm`), inches with one
/// decimal (`11.8"`).
pub fn format_distance(distance_cm: f64, unit: Unit) -> String {
    match unit {
        Unit::Centimeters => format!("{:.0}cm", distance_cm),
        Unit::Inches => format!("{:.1}\"", to_display(distance_cm, unit)),
    }
}

/// Parse user text typed in `unit` into centimeters
///
/// Empty input parses as zero. Inches accept decimal (`2.5`) and
/// fractional (`1 1/2`, `3/4`) forms. Sign checks are left to the caller.
pub fn parse_length(input: &str, unit: Unit) -> Result<f64, LayoutError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let invalid = |reason: &str| LayoutError::InvalidInput {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let value = match unit {
        Unit::Centimeters => trimmed
            .parse::<f64>()
            .map_err(|e| invalid(&e.to_string()))?,
        Unit::Inches if trimmed.contains('/') => {
            let mut total = 0.0;
            let mut sign = 1.0;
            for (i, part) in trimmed.split_whitespace().enumerate() {
                let part = if i == 0 {
                    match part.strip_prefix('-') {
                        Some(rest) => {
                            sign = -1.0;
                            rest
                        }
                        None => part,
                    }
                } else {
                    part
                };

                if part.contains('/') {
                    let fraction: Vec<&str> = part.split('/').collect();
                    if fraction.len() != 2 {
                        return Err(invalid("invalid fraction format"));
                    }
                    let num = fraction[0]
                        .parse::<f64>()
                        .map_err(|_| invalid("invalid numerator"))?;
                    let den = fraction[1]
                        .parse::<f64>()
                        .map_err(|_| invalid("invalid denominator"))?;
                    if den == 0.0 {
                        return Err(invalid("division by zero"));
                    }
                    total += num / den;
                } else {
                    total += part
                        .parse::<f64>()
                        .map_err(|_| invalid("invalid number part"))?;
                }
            }
            sign * total
        }
        Unit::Inches => trimmed
            .parse::<f64>()
            .map_err(|e| invalid(&e.to_string()))?,
    };

    if !value.is_finite() {
        return Err(invalid("value is not finite"));
    }

    Ok(from_display(value, unit))
}

/// Long unit label ("cm" or "inches")
pub fn unit_label(unit: Unit) -> &'static str {
    match unit {
        Unit::Centimeters => "cm",
        Unit::Inches => "inches",
    }
}

/// Suffix appended to formatted values ("cm" or a double quote)
pub fn unit_suffix(unit: Unit) -> &'static str {
    match unit {
        Unit::Centimeters => "cm",
        Unit::Inches => "\"",
    }
}

/// Allowed range of the gap-distance control, in the display unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: Unit,
}

impl DistanceRange {
    pub fn for_unit(unit: Unit) -> Self {
        match unit {
            Unit::Centimeters => Self {
                min: 5.0,
                max: 100.0,
                step: 5.0,
                unit,
            },
            Unit::Inches => Self {
                min: 5.0,
                max: 40.0,
                step: 1.0,
                unit,
            },
        }
    }

    /// Lower bound in centimeters
    pub fn min_cm(&self) -> f64 {
        from_display(self.min, self.unit)
    }

    /// Upper bound in centimeters
    pub fn max_cm(&self) -> f64 {
        from_display(self.max, self.unit)
    }

    /// Clamp a centimeter distance into this range
    pub fn clamp_cm(&self, distance_cm: f64) -> f64 {
        distance_cm.clamp(self.min_cm(), self.max_cm())
    }

    /// Labels shown at both ends of the control
    pub fn endpoint_labels(&self) -> (String, String) {
        let suffix = unit_suffix(self.unit);
        (
            format!("{:.0}{}", self.min, suffix),
            format!("{:.0}{}", self.max, suffix),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        assert_eq!(convert(12.5, Unit::Centimeters, Unit::Centimeters), 12.5);
        assert_eq!(convert(12.5, Unit::Inches, Unit::Inches), 12.5);
    }

    #[test]
    fn test_inch_conversion() {
        assert_eq!(convert(1.0, Unit::Inches, Unit::Centimeters), 2.54);
        assert!((convert(2.54, Unit::Centimeters, Unit::Inches) - 1.0).abs() < 1e-12);
        assert!((convert(100.0, Unit::Centimeters, Unit::Inches) - 39.3701).abs() < 1e-4);
    }

    #[test]
    fn test_format_suffixes() {
        assert_eq!(format(Some(120.0), Unit::Centimeters), "120.0cm");
        assert_eq!(format(Some(30.0), Unit::Inches), "30.0\"");
        assert_eq!(format(Some(0.0), Unit::Centimeters), "0.0cm");
    }

    #[test]
    fn test_format_absent_value() {
        assert_eq!(format(None, Unit::Centimeters), "");
        assert_eq!(format_length(None, Unit::Inches), "");
    }

    #[test]
    fn test_format_length_converts() {
        assert_eq!(format_length(Some(76.2), Unit::Inches), "30.0\"");
        assert_eq!(format_length(Some(76.2), Unit::Centimeters), "76.2cm");
    }

    #[test]
    fn test_format_diameter() {
        assert_eq!(format_diameter(15.0, Unit::Centimeters), "⌀ 30.0cm");
        assert_eq!(format_diameter(2.54, Unit::Inches), "⌀ 2.0\"");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(30.0, Unit::Centimeters), "30cm");
        assert_eq!(format_distance(30.0, Unit::Inches), "11.8\"");
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_length("10.5", Unit::Centimeters).unwrap(), 10.5);
        assert_eq!(parse_length("  42 ", Unit::Centimeters).unwrap(), 42.0);
        assert_eq!(parse_length("", Unit::Centimeters).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_inches() {
        assert_eq!(parse_length("1", Unit::Inches).unwrap(), 2.54);
        assert!((parse_length("1 1/2", Unit::Inches).unwrap() - 3.81).abs() < 1e-9);
        assert!((parse_length("3/4", Unit::Inches).unwrap() - 1.905).abs() < 1e-9);
        assert!((parse_length("-1/2", Unit::Inches).unwrap() + 1.27).abs() < 1e-9);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_length("abc", Unit::Centimeters).is_err());
        assert!(parse_length("1/0", Unit::Inches).is_err());
        assert!(parse_length("1/2/3", Unit::Inches).is_err());
        assert!(parse_length("inf", Unit::Centimeters).is_err());
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("cm".parse::<Unit>().unwrap(), Unit::Centimeters);
        assert_eq!("Inches".parse::<Unit>().unwrap(), Unit::Inches);
        assert!("furlongs".parse::<Unit>().is_err());
    }

    #[test]
    fn test_distance_range() {
        let cm = DistanceRange::for_unit(Unit::Centimeters);
        assert_eq!(cm.clamp_cm(1.0), 5.0);
        assert_eq!(cm.clamp_cm(150.0), 100.0);
        assert_eq!(cm.clamp_cm(30.0), 30.0);
        assert_eq!(
            cm.endpoint_labels(),
            ("5cm".to_string(), "100cm".to_string())
        );

        let inches = DistanceRange::for_unit(Unit::Inches);
        assert!((inches.max_cm() - 101.6).abs() < 1e-9);
        assert!((inches.min_cm() - 12.7).abs() < 1e-9);
        assert_eq!(
            inches.endpoint_labels(),
            ("5\"".to_string(), "40\"".to_string())
        );
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(
            serde_json::to_string(&Unit::Centimeters).unwrap(),
            "\"cm\""
        );
        assert_eq!(serde_json::to_string(&Unit::Inches).unwrap(), "\"inches\"");
    }
}
