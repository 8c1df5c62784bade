//! Configuration for import runs

use serde::{Deserialize, Serialize};

/// Configuration for the [`Importer`](crate::Importer)
///
/// # Examples
///
/// ```
/// use wikiflat_ingest::ImportConfig;
///
/// let config = ImportConfig::default();
/// assert_eq!(config.batch_size, 1000);
/// assert_eq!(config.language, "en");
/// assert_eq!(config.site, "enwiki");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Entities buffered before a batch is projected and written
    /// Default: 1000
    pub batch_size: usize,

    /// Emit a progress event every this many processed entities
    /// Default: 1000
    pub progress_interval: u64,

    /// Language code of labels and descriptions
    /// Default: "en"
    pub language: String,

    /// Site whose link title becomes the display title
    /// Default: "enwiki"
    pub site: String,

    /// Register labels of entities without a display title
    /// Default: false
    pub register_untitled: bool,

    /// Stop after this many entities
    /// Default: no limit
    pub limit: Option<u64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            progress_interval: 1000,
            language: "en".to_string(),
            site: "enwiki".to_string(),
            register_untitled: false,
            limit: None,
        }
    }
}

impl ImportConfig {
    /// Preset for full dumps: property labels become resolvable even though
    /// property entities carry no site links
    pub fn full_dump() -> Self {
        Self {
            batch_size: 5000,
            progress_interval: 100_000,
            register_untitled: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.progress_interval == 0 {
            return Err("progress_interval must be greater than 0".to_string());
        }
        if self.language.trim().is_empty() {
            return Err("language must not be empty".to_string());
        }
        if self.site.trim().is_empty() {
            return Err("site must not be empty".to_string());
        }
        Ok(())
    }
}
