//! Entity projection - one source entity in, one flat record (or a skip) out

use crate::entity::{Entity, OutputRecord};
use crate::reduce::reduce;
use crate::resolver::IdentifierResolver;
use std::collections::BTreeMap;

/// Why an entity produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// No site link in the designated site
    MissingTitle,

    /// No label in the designated language
    MissingLabel,

    /// An earlier entity already emitted this display title
    DuplicateTitle,
}

impl SkipReason {
    /// Short name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingTitle => "missing_title",
            SkipReason::MissingLabel => "missing_label",
            SkipReason::DuplicateTitle => "duplicate_title",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of projecting one entity
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The entity produced a record
    Accepted(OutputRecord),

    /// The entity was excluded
    Skipped(SkipReason),
}

impl Projection {
    /// The record, if the entity was accepted
    pub fn into_record(self) -> Option<OutputRecord> {
        match self {
            Projection::Accepted(record) => Some(record),
            Projection::Skipped(_) => None,
        }
    }
}

/// Projects entities against a shared resolver
///
/// The resolver is the only state carried between entities; callers must
/// feed entities in source order.
///
/// # Examples
///
/// ```
/// use wikiflat_domain::{Entity, IdentifierResolver, Projector};
///
/// let mut resolver = IdentifierResolver::new();
/// let projector = Projector::new();
///
/// let entity = Entity::new("Q42").with_title("Douglas Adams").with_label("Douglas Adams");
/// let record = projector.project(entity, &mut resolver).into_record().unwrap();
///
/// assert_eq!(record.entity_id, "Q42");
/// assert_eq!(resolver.lookup("Q42"), Some("Douglas Adams"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    register_untitled: bool,
}

impl Projector {
    /// Projector that only registers entities it emits
    pub fn new() -> Self {
        Self::default()
    }

    /// Also register labels of entities that have no display title
    ///
    /// Such entities are still skipped; only their label becomes resolvable.
    pub fn with_register_untitled(mut self, enabled: bool) -> Self {
        self.register_untitled = enabled;
        self
    }

    /// Whether untitled entities register their labels
    pub fn registers_untitled(&self) -> bool {
        self.register_untitled
    }

    /// Project one entity, updating the resolver
    pub fn project(&self, entity: Entity, resolver: &mut IdentifierResolver) -> Projection {
        let Entity {
            id,
            title,
            label,
            description,
            claims,
        } = entity;

        let Some(label) = label else {
            return Projection::Skipped(if title.is_none() {
                SkipReason::MissingTitle
            } else {
                SkipReason::MissingLabel
            });
        };

        let Some(title) = title else {
            if self.register_untitled {
                resolver.register(id, label);
            }
            return Projection::Skipped(SkipReason::MissingTitle);
        };

        if !resolver.claim_title(title.clone()) {
            return Projection::Skipped(SkipReason::DuplicateTitle);
        }
        resolver.register(id.clone(), label.clone());

        let mut properties = BTreeMap::new();
        for group in &claims {
            let Some(name) = resolver.lookup(&group.property) else {
                continue;
            };
            if let Some(value) = reduce(&group.claims, resolver) {
                properties.insert(name.to_string(), value);
            }
        }

        Projection::Accepted(OutputRecord {
            title,
            label,
            entity_id: id,
            description,
            properties,
        })
    }
}

/// Project with default settings
pub fn project(entity: Entity, resolver: &mut IdentifierResolver) -> Projection {
    Projector::new().project(entity, resolver)
}
