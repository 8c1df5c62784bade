//! Entity module - source entities, their claims, and projected records

use crate::rank::Rank;
use crate::value::{DataValue, NormalizedValue};
use std::collections::BTreeMap;

/// One ranked, typed assertion of a property's value
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Precedence of the claim
    pub rank: Rank,

    /// Main value; `None` for snaks without a usable data value
    pub value: Option<DataValue>,
}

impl Claim {
    /// Create a claim
    pub fn new(rank: Rank, value: Option<DataValue>) -> Self {
        Self { rank, value }
    }

    /// Create a claim carrying a value
    pub fn with_value(rank: Rank, value: DataValue) -> Self {
        Self::new(rank, Some(value))
    }
}

/// All claims of one property, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyClaims {
    /// Property identifier, e.g. `P31`
    pub property: String,

    /// Claims in the order they appear on the entity
    pub claims: Vec<Claim>,
}

/// A source entity with designated-language fields already selected
///
/// Entities are transient: built from one input line, projected, dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Stable, globally unique identifier (`Q42`, `P31`, ...)
    pub id: String,

    /// Display title from the designated site link
    pub title: Option<String>,

    /// Label in the designated language
    pub label: Option<String>,

    /// Description in the designated language
    pub description: Option<String>,

    /// Claims grouped by property, in source order
    pub claims: Vec<PropertyClaims>,
}

impl Entity {
    /// Create an entity with only its identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append the claims of one property
    pub fn with_claims(mut self, property: impl Into<String>, claims: Vec<Claim>) -> Self {
        self.claims.push(PropertyClaims {
            property: property.into(),
            claims,
        });
        self
    }
}

/// Final value of one property
#[derive(Debug, Clone, PartialEq)]
pub enum ReducedValue {
    /// Exactly one value survived
    Single(NormalizedValue),

    /// Several values survived, sorted by natural order
    List(Vec<NormalizedValue>),
}

impl ReducedValue {
    /// Returns the single value, if this is one
    pub fn as_single(&self) -> Option<&NormalizedValue> {
        match self {
            ReducedValue::Single(v) => Some(v),
            ReducedValue::List(_) => None,
        }
    }

    /// All values, whatever the shape
    pub fn values(&self) -> &[NormalizedValue] {
        match self {
            ReducedValue::Single(v) => std::slice::from_ref(v),
            ReducedValue::List(vs) => vs,
        }
    }
}

/// The flat record emitted for an accepted entity
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    /// Display title; unique key of the record
    pub title: String,

    /// Label in the designated language
    pub label: String,

    /// Source entity identifier
    pub entity_id: String,

    /// Description in the designated language
    pub description: Option<String>,

    /// Resolved property name to reduced value
    pub properties: BTreeMap<String, ReducedValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_builder() {
        let entity = Entity::new("Q42")
            .with_title("Douglas Adams")
            .with_label("Douglas Adams")
            .with_description("English writer")
            .with_claims(
                "P31",
                vec![Claim::with_value(Rank::Normal, DataValue::EntityId("Q5".into()))],
            );

        assert_eq!(entity.id, "Q42");
        assert_eq!(entity.title.as_deref(), Some("Douglas Adams"));
        assert_eq!(entity.claims.len(), 1);
        assert_eq!(entity.claims[0].property, "P31");
    }

    #[test]
    fn test_reduced_value_views() {
        let single = ReducedValue::Single(NormalizedValue::from("x"));
        assert_eq!(single.values().len(), 1);
        assert!(single.as_single().is_some());

        let list = ReducedValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.values().len(), 2);
        assert!(list.as_single().is_none());
    }
}
