//! Feet/inch parsing and formatting.
//!
//! Field crews enter heights in whatever shape is handy (`35'6"`, `35ft 6in`,
//! `15.5`), and downstream reports embed the formatted strings verbatim, so
//! both directions here are part of the engine's public contract:
//!
//! - [`parse_feet`] never fails; anything it cannot read becomes `None`
//! - [`format_feet_inches`] renders `"35' 6\""` or `"35ft 6in"`, and `"--"`
//!   for unknown values
//!
//! # Example
//!
//! ```rust
//! use polecalc::units::{format_feet_inches_tick_marks, parse_feet_str};
//!
//! assert_eq!(parse_feet_str("35' 6\""), Some(35.5));
//! assert_eq!(format_feet_inches_tick_marks(35.5), "35' 6\"");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const NUMBER: &str = r"(\d+(?:\.\d*)?|\.\d+)";
const FEET_UNIT: &str = r"(?:'|ft\.?|foot|feet)";
const INCH_UNIT: &str = r#"(?:"|''|in\.?|inch|inches)"#;

static INCHES_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(-)?\s*{NUMBER}\s*{INCH_UNIT}$")).expect("valid inches regex")
});

static FEET_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(-)?\s*{NUMBER}\s*{FEET_UNIT}$")).expect("valid feet regex")
});

static FEET_AND_INCHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(-)?\s*{NUMBER}\s*{FEET_UNIT}\s*{NUMBER}\s*{INCH_UNIT}?$"
    ))
    .expect("valid feet+inches regex")
});

static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(-)?\s*{NUMBER}$")).expect("valid number regex"));

/// A height as supplied by a caller: either decimal feet or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeightValue {
    Feet(f64),
    Text(String),
}

impl HeightValue {
    /// Decimal feet, or `None` when the value cannot be read.
    #[must_use]
    pub fn feet(&self) -> Option<f64> {
        parse_feet(self)
    }

    /// True when the caller supplied something other than an empty string.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            HeightValue::Feet(_) => true,
            HeightValue::Text(text) => !text.trim().is_empty(),
        }
    }
}

impl From<f64> for HeightValue {
    fn from(value: f64) -> Self {
        HeightValue::Feet(value)
    }
}

impl From<&str> for HeightValue {
    fn from(value: &str) -> Self {
        HeightValue::Text(value.to_string())
    }
}

impl From<String> for HeightValue {
    fn from(value: String) -> Self {
        HeightValue::Text(value)
    }
}

/// Parse a height value into decimal feet.
///
/// Numbers are returned unchanged (non-finite numbers are rejected).
pub fn parse_feet(value: &HeightValue) -> Option<f64> {
    match value {
        HeightValue::Feet(feet) => feet.is_finite().then_some(*feet),
        HeightValue::Text(text) => parse_feet_str(text),
    }
}

/// Parse a height string into decimal feet.
///
/// Accepted shapes, in match order:
/// - inches only: `10"`, `10''`, `10in`
/// - feet only: `15'`, `15ft`
/// - feet and inches: `35'6"`, `35' 6"`, `35ft 6in`
/// - bare number, read as feet: `15.5`
pub fn parse_feet_str(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = INCHES_ONLY.captures(text) {
        let inches = caps.get(2)?.as_str().parse::<f64>().ok()?;
        return Some(signed(caps.get(1).is_some(), inches / 12.0));
    }

    if let Some(caps) = FEET_ONLY.captures(text) {
        let feet = caps.get(2)?.as_str().parse::<f64>().ok()?;
        return Some(signed(caps.get(1).is_some(), feet));
    }

    if let Some(caps) = FEET_AND_INCHES.captures(text) {
        let feet = caps.get(2)?.as_str().parse::<f64>().ok()?;
        let inches = caps.get(3)?.as_str().parse::<f64>().ok()?;
        return Some(signed(caps.get(1).is_some(), feet + inches / 12.0));
    }

    if let Some(caps) = BARE_NUMBER.captures(text) {
        let feet = caps.get(2)?.as_str().parse::<f64>().ok()?;
        return Some(signed(caps.get(1).is_some(), feet));
    }

    None
}

fn signed(negative: bool, magnitude: f64) -> f64 {
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Rendering options for [`format_feet_inches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// `35' 6"` when true, `35ft 6in` when false.
    pub tick_marks: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { tick_marks: true }
    }
}

/// Format decimal feet as whole feet and rounded inches.
///
/// Inches that round up to 12 carry into the feet. Negative input always
/// keeps its leading `-`.
pub fn format_feet_inches(feet: impl Into<Option<f64>>, options: FormatOptions) -> String {
    let Some(value) = feet.into().filter(|v| v.is_finite()) else {
        return "--".to_string();
    };

    let magnitude = value.abs();
    let mut whole = magnitude.floor();
    let mut inches = ((magnitude - whole) * 12.0).round();
    if inches >= 12.0 {
        whole += 1.0;
        inches = 0.0;
    }

    let sign = if value < 0.0 { "-" } else { "" };

    if options.tick_marks {
        format!("{sign}{whole:.0}' {inches:.0}\"")
    } else {
        format!("{sign}{whole:.0}ft {inches:.0}in")
    }
}

pub fn format_feet_inches_tick_marks(feet: impl Into<Option<f64>>) -> String {
    format_feet_inches(feet, FormatOptions { tick_marks: true })
}

pub fn format_feet_inches_verbose(feet: impl Into<Option<f64>>) -> String {
    format_feet_inches(feet, FormatOptions { tick_marks: false })
}

/// Decimal feet to whole inches, rounded half away from zero.
#[must_use]
pub fn feet_to_inches(feet: f64) -> i64 {
    (feet * 12.0).round() as i64
}
