//! Decode raw JSON entities into domain entities
//!
//! Decoding is best-effort: only a missing identifier rejects an entity.
//! Everything else that does not have the expected shape is dropped at the
//! smallest possible granularity (one claim, one value).

use crate::error::DecodeError;
use serde_json::{Map, Value};
use wikiflat_domain::{Claim, DataValue, Entity, GlobeCoordinate, PropertyClaims, Rank};

/// Decode one entity, reading localized fields in `language` and the title
/// from the `site` link
pub fn decode_entity(value: &Value, language: &str, site: &str) -> Result<Entity, DecodeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(value)))?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingId)?
        .to_string();

    let title = nested_str(obj, "sitelinks", site, "title");
    let label = nested_str(obj, "labels", language, "value");
    let description = nested_str(obj, "descriptions", language, "value");

    let claims = obj
        .get("claims")
        .and_then(Value::as_object)
        .map(decode_claims)
        .unwrap_or_default();

    Ok(Entity {
        id,
        title,
        label,
        description,
        claims,
    })
}

fn nested_str(obj: &Map<String, Value>, section: &str, key: &str, field: &str) -> Option<String> {
    obj.get(section)?
        .get(key)?
        .get(field)?
        .as_str()
        .map(str::to_string)
}

fn decode_claims(claims: &Map<String, Value>) -> Vec<PropertyClaims> {
    claims
        .iter()
        .filter_map(|(property, list)| {
            let list = list.as_array()?;
            Some(PropertyClaims {
                property: property.clone(),
                claims: list.iter().filter_map(decode_claim).collect(),
            })
        })
        .collect()
}

/// Decode one claim object; `None` if it has no main snak or no known rank
pub fn decode_claim(claim: &Value) -> Option<Claim> {
    let mainsnak = claim.get("mainsnak")?.as_object()?;
    let rank = claim.get("rank").and_then(Value::as_str).and_then(Rank::parse)?;
    let value = mainsnak.get("datavalue").and_then(decode_data_value);
    Some(Claim::new(rank, value))
}

/// Decode a `{type, value}` data value
///
/// Returns `None` when the tag or payload is missing or has the wrong
/// shape. Unknown tags decode to [`DataValue::Unsupported`].
pub fn decode_data_value(datavalue: &Value) -> Option<DataValue> {
    let tag = datavalue.get("type")?.as_str()?;
    let value = datavalue.get("value")?;

    let decoded = match tag {
        "string" => DataValue::String(value.as_str()?.to_string()),
        "wikibase-entityid" => DataValue::EntityId(entity_id(value)?),
        "time" => DataValue::Time(value.get("time")?.as_str()?.to_string()),
        "quantity" => DataValue::Quantity(amount(value.get("amount")?)?),
        "monolingualtext" => DataValue::MonolingualText(value.get("text")?.as_str()?.to_string()),
        "globecoordinate" => DataValue::GlobeCoordinate(GlobeCoordinate {
            latitude: value.get("latitude").and_then(Value::as_f64),
            longitude: value.get("longitude").and_then(Value::as_f64),
            altitude: value.get("altitude").and_then(Value::as_f64),
            globe: value
                .get("globe")
                .and_then(Value::as_str)
                .map(|uri| uri.rsplit('/').next().unwrap_or(uri).to_string()),
        }),
        other => DataValue::Unsupported(other.to_string()),
    };

    Some(decoded)
}

fn entity_id(value: &Value) -> Option<String> {
    if let Some(id) = value.get("id").and_then(Value::as_str) {
        return Some(id.to_string());
    }

    // Older dumps only carry the numeric part
    let numeric = value.get("numeric-id")?.as_u64()?;
    let prefix = match value.get("entity-type").and_then(Value::as_str).unwrap_or("item") {
        "item" => 'Q',
        "property" => 'P',
        "lexeme" => 'L',
        _ => return None,
    };
    Some(format!("{}{}", prefix, numeric))
}

fn amount(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
