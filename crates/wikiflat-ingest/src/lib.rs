//! Wikiflat Ingestion
//!
//! Streams line-delimited entity JSON through the domain projector into a
//! [`RecordSink`](wikiflat_domain::RecordSink).
//!
//! ## Stages
//!
//! 1. [`JsonLines`] splits the input and tolerates dump framing
//! 2. [`decode_entity`] turns each JSON object into a domain entity
//! 3. [`Importer`] batches entities, projects them in input order and
//!    writes accepted records, collecting [`ImportMetrics`]

#![warn(missing_docs)]

pub mod config;
pub mod decode;
pub mod error;
pub mod importer;
pub mod metrics;
pub mod reader;

pub use config::ImportConfig;
pub use decode::{decode_claim, decode_data_value, decode_entity};
pub use error::{DecodeError, IngestError};
pub use importer::Importer;
pub use metrics::ImportMetrics;
pub use reader::{open_dump, JsonLines, Line};
