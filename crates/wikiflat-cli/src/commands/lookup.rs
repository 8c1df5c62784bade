//! Lookup command implementation.

use crate::cli::LookupArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use wikiflat_domain::{NormalizedValue, OutputRecord};
use wikiflat_store::SqliteStore;

/// Execute the lookup command.
pub fn execute_lookup(args: LookupArgs, config: &Config, formatter: &Formatter) -> Result<Vec<OutputRecord>> {
    let database = args
        .database
        .clone()
        .unwrap_or_else(|| config.settings.database.clone());

    if !database.exists() {
        return Err(CliError::InvalidInput(format!(
            "Database not found: {}",
            database.display()
        )));
    }

    let store = SqliteStore::open(&database)?;
    let records = find(&store, &args)?;

    println!("{}", formatter.format_records(&records)?);

    Ok(records)
}

fn find(store: &SqliteStore, args: &LookupArgs) -> Result<Vec<OutputRecord>> {
    if let Some(id) = &args.wikidata_id {
        return Ok(store.find_by_wikidata_id(id)?);
    }

    if let Some(title) = &args.title {
        return Ok(store.get(title)?.into_iter().collect());
    }

    match (&args.property, &args.value) {
        (Some(property), Some(value)) => {
            let needle = parse_value(value, args.numeric)?;
            Ok(store.find_by_property(property, &needle)?)
        }
        _ => Err(CliError::InvalidInput(
            "Specify --wikidata-id, --title or --property with --value".to_string(),
        )),
    }
}

/// Interpret a search value from the command line.
pub fn parse_value(value: &str, numeric: bool) -> Result<NormalizedValue> {
    if !numeric {
        return Ok(NormalizedValue::Text(value.to_string()));
    }

    value
        .trim()
        .parse::<f64>()
        .map(NormalizedValue::Number)
        .map_err(|_| CliError::InvalidInput(format!("Not a number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_value() {
        assert_eq!(
            parse_value("42", false).unwrap(),
            NormalizedValue::Text("42".to_string())
        );
    }

    #[test]
    fn test_parse_numeric_value() {
        assert_eq!(parse_value(" 1.5 ", true).unwrap(), NormalizedValue::Number(1.5));
        assert!(matches!(parse_value("abc", true), Err(CliError::InvalidInput(_))));
    }
}
