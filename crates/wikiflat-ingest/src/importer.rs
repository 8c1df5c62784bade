//! Batched import of an entity stream into a record sink

use crate::config::ImportConfig;
use crate::decode::decode_entity;
use crate::error::IngestError;
use crate::metrics::ImportMetrics;
use crate::reader::{JsonLines, Line};
use std::fmt::Display;
use std::io::BufRead;
use std::time::Instant;
use wikiflat_domain::{Entity, IdentifierResolver, Projection, Projector, RecordSink};

/// Drives decoding, projection and writing for one input stream
///
/// Entities are buffered into batches of `batch_size`. Each batch is
/// projected sequentially in input order and written inside one sink
/// batch, so identifier registrations from earlier entities are always
/// visible to later ones.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use wikiflat_domain::{IdentifierResolver, OutputRecord};
/// use wikiflat_ingest::{ImportConfig, Importer};
///
/// let input = r#"{"id":"Q1","labels":{"en":{"value":"Universe"}},"sitelinks":{"enwiki":{"title":"Universe"}}}"#;
///
/// let importer = Importer::new(ImportConfig::default());
/// let mut resolver = IdentifierResolver::new();
/// let mut records: Vec<OutputRecord> = Vec::new();
///
/// let metrics = importer.run(Cursor::new(input), &mut resolver, &mut records).unwrap();
/// assert_eq!(metrics.written, 1);
/// assert_eq!(records[0].title, "Universe");
/// ```
pub struct Importer {
    config: ImportConfig,
    projector: Projector,
}

impl Importer {
    /// Create an importer with the given configuration
    pub fn new(config: ImportConfig) -> Self {
        let projector = Projector::new().with_register_untitled(config.register_untitled);
        Self { config, projector }
    }

    /// Create an importer with default configuration
    pub fn default_config() -> Self {
        Self::new(ImportConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import every entity readable from `reader`
    pub fn run<R, S>(
        &self,
        reader: R,
        resolver: &mut IdentifierResolver,
        sink: &mut S,
    ) -> Result<ImportMetrics, IngestError>
    where
        R: BufRead,
        S: RecordSink,
        S::Error: Display,
    {
        self.run_lines(JsonLines::new(reader), resolver, sink)
    }

    /// Import from an already framed line stream
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, failed reads and any sink
    /// failure. Records written in earlier batches stay committed.
    pub fn run_lines<R, S>(
        &self,
        lines: JsonLines<R>,
        resolver: &mut IdentifierResolver,
        sink: &mut S,
    ) -> Result<ImportMetrics, IngestError>
    where
        R: BufRead,
        S: RecordSink,
        S::Error: Display,
    {
        self.config.validate().map_err(IngestError::Config)?;

        let start = Instant::now();
        let mut metrics = ImportMetrics::new();
        let mut batch: Vec<Entity> = Vec::with_capacity(self.config.batch_size);

        tracing::info!(
            "Import started (batch size: {}, language: {}, site: {})",
            self.config.batch_size,
            self.config.language,
            self.config.site
        );

        for line in lines {
            if self.limit_reached(metrics.processed + batch.len() as u64) {
                tracing::info!("Entity limit reached, stopping");
                break;
            }

            match line? {
                Line::Value { number, value } => {
                    match decode_entity(&value, &self.config.language, &self.config.site) {
                        Ok(entity) => batch.push(entity),
                        Err(e) => {
                            tracing::warn!("Skipping line {}: {}", number, e);
                            metrics.malformed += 1;
                        }
                    }
                }
                Line::Malformed { number, error } => {
                    tracing::warn!("Skipping malformed line {}: {}", number, error);
                    metrics.malformed += 1;
                }
            }

            if batch.len() >= self.config.batch_size {
                self.flush(&mut batch, resolver, sink, &mut metrics)?;
            }
        }

        if !batch.is_empty() {
            self.flush(&mut batch, resolver, sink, &mut metrics)?;
        }

        metrics.elapsed = start.elapsed();
        tracing::info!(
            "Import finished: {} processed, {} written, {} skipped, {} malformed in {:.1}s",
            metrics.processed,
            metrics.written,
            metrics.skipped(),
            metrics.malformed,
            metrics.elapsed.as_secs_f64()
        );

        Ok(metrics)
    }

    fn limit_reached(&self, seen: u64) -> bool {
        self.config.limit.is_some_and(|limit| seen >= limit)
    }

    fn flush<S>(
        &self,
        batch: &mut Vec<Entity>,
        resolver: &mut IdentifierResolver,
        sink: &mut S,
        metrics: &mut ImportMetrics,
    ) -> Result<(), IngestError>
    where
        S: RecordSink,
        S::Error: Display,
    {
        sink.begin_batch().map_err(sink_error)?;

        for entity in batch.drain(..) {
            let id = entity.id.clone();
            match self.projector.project(entity, resolver) {
                Projection::Accepted(record) => {
                    sink.write(&record).map_err(sink_error)?;
                    metrics.written += 1;
                }
                Projection::Skipped(reason) => {
                    tracing::debug!("Skipped {}: {}", id, reason);
                    metrics.record_skip(reason);
                }
            }

            metrics.processed += 1;
            if metrics.processed % self.config.progress_interval == 0 {
                tracing::info!(
                    "Processed {} entities ({} written, {} skipped)",
                    metrics.processed,
                    metrics.written,
                    metrics.skipped()
                );
            }
        }

        sink.commit_batch().map_err(sink_error)?;
        metrics.batches += 1;
        tracing::debug!(
            "Batch {} committed ({} written so far)",
            metrics.batches,
            metrics.written
        );

        Ok(())
    }
}

fn sink_error<E: Display>(e: E) -> IngestError {
    IngestError::Sink(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wikiflat_domain::{OutputRecord, SkipReason};

    fn entity_line(id: &str, title: Option<&str>, label: Option<&str>) -> String {
        let mut obj = serde_json::json!({"id": id});
        if let Some(title) = title {
            obj["sitelinks"] = serde_json::json!({"enwiki": {"title": title}});
        }
        if let Some(label) = label {
            obj["labels"] = serde_json::json!({"en": {"value": label}});
        }
        obj.to_string()
    }

    fn run(config: ImportConfig, input: &str) -> (ImportMetrics, Vec<OutputRecord>) {
        let importer = Importer::new(config);
        let mut resolver = IdentifierResolver::new();
        let mut records = Vec::new();
        let metrics = importer
            .run(Cursor::new(input.to_string()), &mut resolver, &mut records)
            .unwrap();
        (metrics, records)
    }

    /// Sink that fails on the n-th write
    struct FailingSink {
        remaining: usize,
        commits: usize,
    }

    impl RecordSink for FailingSink {
        type Error = String;

        fn write(&mut self, _record: &OutputRecord) -> Result<(), Self::Error> {
            if self.remaining == 0 {
                return Err("disk full".to_string());
            }
            self.remaining -= 1;
            Ok(())
        }

        fn commit_batch(&mut self) -> Result<(), Self::Error> {
            self.commits += 1;
            Ok(())
        }
    }

    #[test]
    fn test_batches_and_final_partial_batch() {
        let input: Vec<String> = (1..=5)
            .map(|i| entity_line(&format!("Q{}", i), Some(&format!("T{}", i)), Some("x")))
            .collect();
        let config = ImportConfig {
            batch_size: 2,
            ..Default::default()
        };

        let (metrics, records) = run(config, &input.join("\n"));
        assert_eq!(metrics.processed, 5);
        assert_eq!(metrics.written, 5);
        assert_eq!(metrics.batches, 3);
        assert_eq!(records.len(), 5);
        assert_eq!(records[4].entity_id, "Q5");
    }

    #[test]
    fn test_skips_are_counted() {
        let input = [
            entity_line("Q1", Some("A"), Some("a")),
            entity_line("Q2", None, Some("b")),
            entity_line("Q3", Some("C"), None),
            entity_line("Q4", Some("A"), Some("d")),
        ]
        .join("\n");

        let (metrics, records) = run(ImportConfig::default(), &input);
        assert_eq!(metrics.processed, 4);
        assert_eq!(metrics.written, 1);
        assert_eq!(metrics.skipped_for(SkipReason::MissingTitle), 1);
        assert_eq!(metrics.skipped_for(SkipReason::MissingLabel), 1);
        assert_eq!(metrics.skipped_for(SkipReason::DuplicateTitle), 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_malformed_lines_do_not_stop_the_run() {
        let input = [
            entity_line("Q1", Some("A"), Some("a")),
            "{broken".to_string(),
            "[1, 2]".to_string(),
            entity_line("Q2", Some("B"), Some("b")),
        ]
        .join("\n");

        let (metrics, records) = run(ImportConfig::default(), &input);
        assert_eq!(metrics.malformed, 2);
        assert_eq!(metrics.written, 2);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_limit() {
        let input: Vec<String> = (1..=10)
            .map(|i| entity_line(&format!("Q{}", i), Some(&format!("T{}", i)), Some("x")))
            .collect();
        let config = ImportConfig {
            batch_size: 3,
            limit: Some(4),
            ..Default::default()
        };

        let (metrics, records) = run(config, &input.join("\n"));
        assert_eq!(metrics.processed, 4);
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let (metrics, records) = run(ImportConfig::default(), "");
        assert_eq!(metrics.processed, 0);
        assert_eq!(metrics.batches, 0);
        assert!(records.is_empty());
    }

    #[test]
    fn test_sink_error_aborts() {
        let input: Vec<String> = (1..=4)
            .map(|i| entity_line(&format!("Q{}", i), Some(&format!("T{}", i)), Some("x")))
            .collect();
        let importer = Importer::new(ImportConfig {
            batch_size: 2,
            ..Default::default()
        });
        let mut resolver = IdentifierResolver::new();
        let mut sink = FailingSink {
            remaining: 3,
            commits: 0,
        };

        let result = importer.run(Cursor::new(input.join("\n")), &mut resolver, &mut sink);
        assert!(matches!(result, Err(IngestError::Sink(ref msg)) if msg == "disk full"));
        assert_eq!(sink.commits, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let importer = Importer::new(ImportConfig {
            progress_interval: 0,
            ..Default::default()
        });
        let mut resolver = IdentifierResolver::new();
        let mut records: Vec<OutputRecord> = Vec::new();
        let result = importer.run(Cursor::new(""), &mut resolver, &mut records);
        assert!(matches!(result, Err(IngestError::Config(_))));
    }

    #[test]
    fn test_register_untitled_resolves_properties() {
        let property = serde_json::json!({
            "id": "P31",
            "labels": {"en": {"value": "instance of"}}
        });
        let item = serde_json::json!({
            "id": "Q1",
            "labels": {"en": {"value": "Universe"}},
            "sitelinks": {"enwiki": {"title": "Universe"}},
            "claims": {"P31": [{
                "mainsnak": {"datavalue": {"type": "string", "value": "cosmos"}},
                "rank": "normal"
            }]}
        });
        let input = format!("{}\n{}", property, item);

        let (_, records) = run(ImportConfig::default(), &input);
        assert!(records[0].properties.is_empty());

        let config = ImportConfig {
            register_untitled: true,
            ..Default::default()
        };
        let (metrics, records) = run(config, &input);
        assert!(records[0].properties.contains_key("instance of"));
        assert_eq!(metrics.skipped_for(SkipReason::MissingTitle), 1);
    }
}
