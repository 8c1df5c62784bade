//! CLI command definitions and argument parsing.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use wikiflat_ingest::ImportConfig;

/// Wikiflat - Flatten knowledge-base entity dumps into a searchable table.
#[derive(Debug, Parser)]
#[command(name = "wikiflat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.wikiflat/config.toml)
    #[arg(short, long, global = true, env = "WIKIFLAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Table of the identifying columns
    Table,
    /// Display titles only
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import an entity dump into a database
    Import(ImportArgs),

    /// Look up stored records
    Lookup(LookupArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Line-delimited JSON entity dump
    #[arg(short, long)]
    pub dump: PathBuf,

    /// Target database file
    #[arg(long, env = "WIKIFLAT_DATABASE")]
    pub database: Option<PathBuf>,

    /// Entities per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Log progress every N entities
    #[arg(long)]
    pub progress_interval: Option<u64>,

    /// Language code of labels and descriptions
    #[arg(short, long)]
    pub language: Option<String>,

    /// Site whose link titles become display titles
    #[arg(short, long)]
    pub site: Option<String>,

    /// Stop after N entities
    #[arg(long)]
    pub limit: Option<u64>,

    /// Register labels of entities without a site link
    #[arg(long)]
    pub register_untitled: bool,

    /// Append to the existing table instead of recreating it
    #[arg(long)]
    pub keep_existing: bool,
}

impl ImportArgs {
    /// Apply command-line overrides on top of file configuration
    pub fn apply(&self, mut config: ImportConfig) -> ImportConfig {
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(site) = &self.site {
            config.site = site.clone();
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }
        if self.register_untitled {
            config.register_untitled = true;
        }
        config
    }
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
#[command(group(
    ArgGroup::new("query")
        .required(true)
        .args(["wikidata_id", "title", "property"]),
))]
pub struct LookupArgs {
    /// Database file
    #[arg(long, env = "WIKIFLAT_DATABASE")]
    pub database: Option<PathBuf>,

    /// Entity identifier (e.g. Q42)
    #[arg(short, long)]
    pub wikidata_id: Option<String>,

    /// Display title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Property name to search
    #[arg(short, long, requires = "value")]
    pub property: Option<String>,

    /// Value the property must equal or contain
    #[arg(long, requires = "property")]
    pub value: Option<String>,

    /// Compare the value as a number
    #[arg(long, requires = "value")]
    pub numeric: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    pub save: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
