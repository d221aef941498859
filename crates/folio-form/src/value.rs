#![forbid(unsafe_code)]

//! Field values and submission payloads.

use std::borrow::Cow;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// The value held by a single form field.
///
/// Equality treats NaN as equal to NaN, so a NaN field compares equal to its
/// own default and re-setting NaN is not a change.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_WHOLE: f64 = 9_007_199_254_740_992.0;

impl Serialize for FieldValue {
    /// Text as a string, whole numbers up to 2^53 as integers, other finite
    /// numbers as floats, NaN and infinities as `null`.
    #[allow(clippy::cast_possible_truncation)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) if !n.is_finite() => serializer.serialize_none(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_WHOLE => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    /// Text rendering used by the required check and the bundled validators.
    ///
    /// Integral numbers print without a fractional part. Magnitudes of `1e21`
    /// and above, or below `1e-6`, use exponent form (`1e+21`, `1.5e-7`).
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(format_number(*n)),
        }
    }

    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Number(n) => Some(*n),
        }
    }

    /// Returns `true` for empty text.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Returns `true` for numeric zero (either sign) and NaN.
    #[must_use]
    pub fn is_zero_or_nan(&self) -> bool {
        matches!(self, Self::Number(n) if *n == 0.0 || n.is_nan())
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        // Display prints -0 as "-0".
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

// ---------------------------------------------------------------------------
// FormValues – snapshot of current values
// ---------------------------------------------------------------------------

/// Current field values in declaration order.
///
/// Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: Vec<(String, FieldValue)>,
}

impl FormValues {
    pub(crate) fn from_pairs(values: Vec<(String, FieldValue)>) -> Self {
        Self { values }
    }

    /// Get a value by field name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode as a JSON object string, preserving declaration order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a FormValues {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a FieldValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
