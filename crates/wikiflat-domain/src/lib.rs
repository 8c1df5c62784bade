//! Wikiflat Domain Layer
//!
//! This crate contains the core logic for flattening knowledge-base entities
//! into one record per entity. It has no infrastructure dependencies and
//! defines the model, the reduction algorithm, and the trait at the storage
//! boundary.
//!
//! ## Key Concepts
//!
//! - **Entity**: one source record with an identifier, label, title and claims
//! - **Claim**: a ranked, typed assertion of a property's value
//! - **Rank**: preferred outranks normal outranks deprecated
//! - **Identifier resolver**: identifier → label table built in input order
//! - **Output record**: display title, label, identifier, description and
//!   one reduced value per resolved property name
//!
//! ## Pipeline
//!
//! ```text
//! Entity → Projector → (resolver lookups) → reduce → interpret → OutputRecord
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod interpret;
pub mod project;
pub mod rank;
pub mod reduce;
pub mod resolver;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use entity::{Claim, Entity, OutputRecord, PropertyClaims, ReducedValue};
pub use interpret::{interpret, normalize_timestamp};
pub use project::{project, Projection, Projector, SkipReason};
pub use rank::Rank;
pub use reduce::{reduce, RankBuckets};
pub use resolver::IdentifierResolver;
pub use traits::RecordSink;
pub use value::{AccumulationPolicy, Coordinate, DataValue, GlobeCoordinate, NormalizedValue, EARTH_GLOBE};
