//! Typed value interpretation
//!
//! Turns one raw [`DataValue`] into a [`NormalizedValue`], or `None` when
//! the value is unusable (unresolved reference, malformed timestamp,
//! unparseable amount, empty coordinate, unsupported type).

use crate::resolver::IdentifierResolver;
use crate::value::{Coordinate, DataValue, GlobeCoordinate, NormalizedValue, EARTH_GLOBE};
use regex::Regex;
use std::sync::LazyLock;

// Constant pattern: compiling it cannot fail at runtime.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)(\d+)-(\d+)-(\d+)T(\d+):(\d+):(\d+)").expect("timestamp pattern is valid")
});

/// Interpret a raw value against the labels known so far
///
/// # Examples
///
/// ```
/// use wikiflat_domain::{interpret, DataValue, IdentifierResolver, NormalizedValue};
///
/// let resolver = IdentifierResolver::new();
/// let value = interpret(&DataValue::Time("+1999-00-00T00:00:00Z".into()), &resolver);
/// assert_eq!(value, Some(NormalizedValue::Text("1999-01-01T00:00:00".into())));
/// ```
pub fn interpret(value: &DataValue, resolver: &IdentifierResolver) -> Option<NormalizedValue> {
    match value {
        DataValue::String(s) => Some(NormalizedValue::Text(s.clone())),
        DataValue::EntityId(id) => resolver.lookup(id).map(NormalizedValue::from),
        DataValue::Time(text) => normalize_timestamp(text).map(NormalizedValue::Text),
        DataValue::Quantity(amount) => amount.trim().parse::<f64>().ok().map(NormalizedValue::Number),
        DataValue::MonolingualText(text) => Some(NormalizedValue::Text(text.clone())),
        DataValue::GlobeCoordinate(coord) => {
            interpret_coordinate(coord, resolver).map(NormalizedValue::Coordinate)
        }
        DataValue::Unsupported(_) => None,
    }
}

/// Normalize `[+-]YYYY-MM-DDThh:mm:ss...` to `YYYY-MM-DDThh:mm:ss`
///
/// A zero month or day stands for reduced precision and becomes 1.
/// A leading `+` is dropped, a leading `-` is kept.
pub fn normalize_timestamp(text: &str) -> Option<String> {
    let caps = TIMESTAMP.captures(text)?;
    let sign = if &caps[1] == "-" { "-" } else { "" };
    let year: u64 = caps[2].parse().ok()?;
    let mut month: u32 = caps[3].parse().ok()?;
    let mut day: u32 = caps[4].parse().ok()?;
    let hour: u32 = caps[5].parse().ok()?;
    let minute: u32 = caps[6].parse().ok()?;
    let second: u32 = caps[7].parse().ok()?;

    if day == 0 {
        day = 1;
    }
    if month == 0 {
        month = 1;
    }

    Some(format!(
        "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        sign, year, month, day, hour, minute, second
    ))
}

fn interpret_coordinate(coord: &GlobeCoordinate, resolver: &IdentifierResolver) -> Option<Coordinate> {
    if !is_truthy(coord.latitude) && !is_truthy(coord.longitude) {
        return None;
    }

    let globe = coord
        .globe
        .as_deref()
        .filter(|g| !g.is_empty() && *g != EARTH_GLOBE && resolver.contains(g))
        .map(str::to_string);

    Some(Coordinate {
        lat: coord.latitude,
        lng: coord.longitude,
        globe,
        altitude: coord.altitude.filter(|a| *a != 0.0),
    })
}

// Zero and missing coordinates carry no position.
fn is_truthy(v: Option<f64>) -> bool {
    v.is_some_and(|v| v != 0.0)
}
