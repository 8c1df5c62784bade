//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::OutputRecord;

/// Trait for persisting projected records
///
/// Implemented by the infrastructure layer (wikiflat-store). Records are
/// keyed by display title; a sink may reject a second record with the same
/// title. Errors are not recovered by the caller.
pub trait RecordSink {
    /// Error type for sink operations
    type Error;

    /// Persist one record
    fn write(&mut self, record: &OutputRecord) -> Result<(), Self::Error>;

    /// Called before the records of a batch are written
    fn begin_batch(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the records of a batch were written
    fn commit_batch(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Collects records in memory; handy for tests and dry runs
impl RecordSink for Vec<OutputRecord> {
    type Error = std::convert::Infallible;

    fn write(&mut self, record: &OutputRecord) -> Result<(), Self::Error> {
        self.push(record.clone());
        Ok(())
    }
}
