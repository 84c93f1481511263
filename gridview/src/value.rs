//! Cell values and their natural ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// The value of one cell, as read through a column accessor.
///
/// Filtering, searching and sorting all work on this type. A field that a
/// row does not have reads as [`CellValue::Null`], which displays as the
/// empty string.
///
/// # Example
///
/// ```
/// use gridview::CellValue;
///
/// let name = CellValue::from("Ahsan");
/// let balance = CellValue::from(1_200i64);
/// let active = CellValue::from(true);
/// assert_eq!(CellValue::Null.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Free text.
    Text(String),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the boolean value, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret this value as a status flag.
    ///
    /// Booleans map directly, numbers are set when non-zero, and text is set
    /// for `true`, `yes`, `1` or `active` (any case).
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Int(i) => *i != 0,
            CellValue::Float(f) => *f != 0.0,
            CellValue::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "yes" | "1" | "active"
            ),
            CellValue::Null | CellValue::Date(_) | CellValue::DateTime(_) => false,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
            CellValue::Text(_) => "text",
        }
    }

    /// Key used to order this value against others of any type.
    pub fn sort_key(&self) -> SortKey {
        match self {
            CellValue::Null => SortKey::Empty,
            CellValue::Bool(b) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
            CellValue::Int(i) => SortKey::Number(*i as f64),
            CellValue::Float(f) => SortKey::Number(*f),
            CellValue::Date(d) => SortKey::Instant(d.and_time(chrono::NaiveTime::MIN)),
            CellValue::DateTime(dt) => SortKey::Instant(dt.naive_utc()),
            CellValue::Text(s) => SortKey::from_text(s),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Natural ordering key for a cell.
///
/// Keys of different kinds order as `Empty < Number < Instant < Text`, so
/// the ordering is total even for columns holding mixed values. Text that
/// parses as a finite number or an ISO date is ordered as such.
#[derive(Debug, Clone)]
pub enum SortKey {
    Empty,
    Number(f64),
    Instant(NaiveDateTime),
    Text { folded: String, raw: String },
}

impl SortKey {
    fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return SortKey::Empty;
        }
        if let Ok(n) = trimmed.parse::<f64>()
            && n.is_finite()
        {
            return SortKey::Number(n);
        }
        if let Some(instant) = parse_instant(trimmed) {
            return SortKey::Instant(instant);
        }
        SortKey::Text {
            folded: trimmed.to_lowercase(),
            raw: s.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Number(_) => 1,
            SortKey::Instant(_) => 2,
            SortKey::Text { .. } => 3,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (
                SortKey::Text { folded: a, raw: ra },
                SortKey::Text { folded: b, raw: rb },
            ) => a.cmp(b).then_with(|| ra.cmp(rb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(CellValue::Int)
            .unwrap_or(CellValue::Float(v as f64))
    }
}

impl From<usize> for CellValue {
    fn from(v: usize) -> Self {
        CellValue::from(v as u64)
    }
}

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        CellValue::Float(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::DateTime(v.and_utc())
    }
}

impl<T> From<Option<T>> for CellValue
where
    CellValue: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => CellValue::from(v),
            None => CellValue::Null,
        }
    }
}
