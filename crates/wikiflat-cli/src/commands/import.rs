//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use wikiflat_domain::IdentifierResolver;
use wikiflat_ingest::{open_dump, ImportMetrics, Importer};
use wikiflat_store::SqliteStore;

/// Execute the import command.
pub fn execute_import(args: ImportArgs, config: &Config, formatter: &Formatter) -> Result<ImportMetrics> {
    let import_config = args.apply(config.import.clone());
    let database = args
        .database
        .clone()
        .unwrap_or_else(|| config.settings.database.clone());

    // Open the dump first so a bad path leaves the database untouched
    let lines = open_dump(&args.dump)?;

    let mut resolver = IdentifierResolver::new();
    let mut store = if args.keep_existing {
        let store = SqliteStore::open(&database)?;
        let seeded = store.seed_resolver(&mut resolver)?;
        println!(
            "{}",
            formatter.info(&format!("Continuing on {} existing record(s)", seeded))
        );
        store
    } else {
        SqliteStore::recreate(&database)?
    };

    tracing::info!("Importing {} into {}", args.dump.display(), database.display());

    let importer = Importer::new(import_config);
    let metrics = importer.run_lines(lines, &mut resolver, &mut store)?;

    println!("{}", metrics.summary());
    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} record(s) into {}",
            metrics.written,
            database.display()
        ))
    );
    if metrics.malformed > 0 {
        println!(
            "{}",
            formatter.warning(&format!("{} malformed line(s) skipped", metrics.malformed))
        );
    }

    Ok(metrics)
}
