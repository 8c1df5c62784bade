//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    println!("{}", config.to_toml()?);

    if args.save {
        config.save(path)?;
        println!(
            "{}",
            formatter.success(&format!("Configuration saved to {}", path.display()))
        );
    }

    Ok(())
}
