//! Wikiflat CLI - Flatten entity dumps into a searchable SQLite table.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wikiflat_cli::commands;
use wikiflat_cli::{Cli, Command, Config, Formatter, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color_enabled = !cli.no_color;
    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Json, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> wikiflat_cli::Result<()> {
    let path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load(&path)?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &config, &formatter)?;
        }
        Command::Lookup(args) => {
            commands::execute_lookup(args, &config, &formatter)?;
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &path, &formatter)?;
        }
    }

    Ok(())
}
