//! Conversion between reduced property values and stored JSON documents

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use wikiflat_domain::{Coordinate, NormalizedValue, ReducedValue};

/// Convert a property map into its stored JSON document
pub fn properties_to_document(properties: &BTreeMap<String, ReducedValue>) -> Value {
    let map: Map<String, Value> = properties
        .iter()
        .map(|(name, value)| (name.clone(), reduced_to_json(value)))
        .collect();
    Value::Object(map)
}

/// Convert a stored JSON document back into a property map
///
/// Entries that cannot have been produced by [`properties_to_document`]
/// (null, booleans, nested arrays) are dropped.
pub fn document_to_properties(document: &Value) -> BTreeMap<String, ReducedValue> {
    let Some(map) = document.as_object() else {
        return BTreeMap::new();
    };

    map.iter()
        .filter_map(|(name, value)| {
            let reduced = match value {
                Value::Array(items) => {
                    ReducedValue::List(items.iter().filter_map(json_to_value).collect())
                }
                other => ReducedValue::Single(json_to_value(other)?),
            };
            Some((name.clone(), reduced))
        })
        .collect()
}

fn reduced_to_json(value: &ReducedValue) -> Value {
    match value {
        ReducedValue::Single(v) => value_to_json(v),
        ReducedValue::List(vs) => Value::Array(vs.iter().map(value_to_json).collect()),
    }
}

/// Convert one normalized value into JSON
pub fn value_to_json(value: &NormalizedValue) -> Value {
    match value {
        NormalizedValue::Text(s) => Value::String(s.clone()),
        NormalizedValue::Number(n) => number(*n),
        NormalizedValue::Coordinate(c) => {
            let mut obj = Map::new();
            obj.insert("lat".into(), c.lat.map(number).unwrap_or(Value::Null));
            obj.insert("lng".into(), c.lng.map(number).unwrap_or(Value::Null));
            if let Some(globe) = &c.globe {
                obj.insert("globe".into(), Value::String(globe.clone()));
            }
            if let Some(altitude) = c.altitude {
                obj.insert("altitude".into(), number(altitude));
            }
            Value::Object(obj)
        }
    }
}

// Non-finite amounts have no JSON form.
fn number(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

fn json_to_value(value: &Value) -> Option<NormalizedValue> {
    match value {
        Value::String(s) => Some(NormalizedValue::Text(s.clone())),
        Value::Number(n) => n.as_f64().map(NormalizedValue::Number),
        Value::Object(obj) => Some(NormalizedValue::Coordinate(Coordinate {
            lat: obj.get("lat").and_then(Value::as_f64),
            lng: obj.get("lng").and_then(Value::as_f64),
            globe: obj.get("globe").and_then(Value::as_str).map(str::to_string),
            altitude: obj.get("altitude").and_then(Value::as_f64),
        })),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_shapes() {
        let mut properties = BTreeMap::new();
        properties.insert("motto".to_string(), ReducedValue::Single("hi".into()));
        properties.insert("height".to_string(), ReducedValue::Single(NormalizedValue::Number(1.5)));
        properties.insert(
            "member of".to_string(),
            ReducedValue::List(vec!["a".into(), "b".into()]),
        );
        properties.insert(
            "location".to_string(),
            ReducedValue::Single(NormalizedValue::Coordinate(Coordinate {
                lat: Some(1.0),
                lng: None,
                globe: Some("Q405".into()),
                altitude: None,
            })),
        );

        let doc = properties_to_document(&properties);
        assert_eq!(
            doc,
            json!({
                "height": 1.5,
                "location": {"lat": 1.0, "lng": null, "globe": "Q405"},
                "member of": ["a", "b"],
                "motto": "hi"
            })
        );
        assert_eq!(document_to_properties(&doc), properties);
    }

    #[test]
    fn test_non_finite_number_becomes_null() {
        assert_eq!(value_to_json(&NormalizedValue::Number(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_non_object_document() {
        assert!(document_to_properties(&json!([1, 2])).is_empty());
    }
}
