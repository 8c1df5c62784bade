//! Typed values - raw claim payloads and their normalized forms

use std::cmp::Ordering;

/// Identifier of the default globe (Earth); coordinates on it omit the globe
pub const EARTH_GLOBE: &str = "Q2";

/// Raw typed payload of a claim's main value
///
/// One variant per type tag found in dumps. Tags this crate does not know
/// are kept as [`DataValue::Unsupported`] so interpretation stays total.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// `string`: passed through unchanged
    String(String),

    /// `wikibase-entityid`: reference to another entity by identifier
    EntityId(String),

    /// `time`: timestamp text such as `+1999-00-00T00:00:00Z`
    Time(String),

    /// `quantity`: decimal amount text such as `+12.5`
    Quantity(String),

    /// `monolingualtext`: text with its language tag already discarded
    MonolingualText(String),

    /// `globecoordinate`
    GlobeCoordinate(GlobeCoordinate),

    /// Any other type tag
    Unsupported(String),
}

/// Raw geographic coordinate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobeCoordinate {
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Altitude, rarely present
    pub altitude: Option<f64>,
    /// Globe identifier (last segment of the globe URI)
    pub globe: Option<String>,
}

/// How a value joins the bucket of its rank during reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulationPolicy {
    /// Clear the bucket first; the last value of the rank wins
    Replace,
    /// Append; every value of the rank is kept
    Append,
}

impl DataValue {
    /// The type tag as it appears in dumps
    pub fn type_tag(&self) -> &str {
        match self {
            DataValue::String(_) => "string",
            DataValue::EntityId(_) => "wikibase-entityid",
            DataValue::Time(_) => "time",
            DataValue::Quantity(_) => "quantity",
            DataValue::MonolingualText(_) => "monolingualtext",
            DataValue::GlobeCoordinate(_) => "globecoordinate",
            DataValue::Unsupported(tag) => tag,
        }
    }

    /// Entity references accumulate; everything else replaces
    pub fn accumulation(&self) -> AccumulationPolicy {
        match self {
            DataValue::EntityId(_) => AccumulationPolicy::Append,
            _ => AccumulationPolicy::Replace,
        }
    }
}

/// Normalized coordinate as emitted in output records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude, absent if the source had none
    pub lat: Option<f64>,
    /// Longitude, absent if the source had none
    pub lng: Option<f64>,
    /// Non-Earth globe identifier known to the resolver
    pub globe: Option<String>,
    /// Altitude, only when non-zero
    pub altitude: Option<f64>,
}

/// A value after interpretation
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    /// Strings, monolingual text, resolved labels and timestamps
    Text(String),
    /// Quantities
    Number(f64),
    /// Geographic coordinates
    Coordinate(Coordinate),
}

impl NormalizedValue {
    /// Returns the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NormalizedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            NormalizedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn kind_order(&self) -> u8 {
        match self {
            NormalizedValue::Text(_) => 0,
            NormalizedValue::Number(_) => 1,
            NormalizedValue::Coordinate(_) => 2,
        }
    }

    /// Total order used when a bucket holds several values
    ///
    /// Text sorts lexicographically, numbers by IEEE total order. Values of
    /// different kinds order as text < number < coordinate.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NormalizedValue::Text(a), NormalizedValue::Text(b)) => a.cmp(b),
            (NormalizedValue::Number(a), NormalizedValue::Number(b)) => a.total_cmp(b),
            (NormalizedValue::Coordinate(a), NormalizedValue::Coordinate(b)) => {
                cmp_opt(a.lat, b.lat)
                    .then_with(|| cmp_opt(a.lng, b.lng))
                    .then_with(|| a.globe.cmp(&b.globe))
                    .then_with(|| cmp_opt(a.altitude, b.altitude))
            }
            _ => self.kind_order().cmp(&other.kind_order()),
        }
    }
}

fn cmp_opt(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        NormalizedValue::Text(s.to_string())
    }
}

impl From<String> for NormalizedValue {
    fn from(s: String) -> Self {
        NormalizedValue::Text(s)
    }
}

impl From<f64> for NormalizedValue {
    fn from(n: f64) -> Self {
        NormalizedValue::Number(n)
    }
}
