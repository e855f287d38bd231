mod commands;
mod discover;

#[cfg(feature = "watch")]
mod watcher;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pageroute::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pageroute")]
#[command(version, about = "pageroute - route tables from a pages directory", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = pageroute::config::CONFIG_FILE)]
    config: PathBuf,

    /// Log compiler details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the route table once
    Build {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate the route table, then regenerate it whenever pages are added or removed
    #[cfg(feature = "watch")]
    Watch {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the compiled route tree as JSON without writing anything
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Command-line overrides for the `[routing]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory containing page files
    #[arg(long)]
    pages_dir: Option<String>,

    /// Directory the route table is written to
    #[arg(long)]
    output_dir: Option<String>,

    /// File name of the route table
    #[arg(long)]
    output_file: Option<String>,

    /// Page-file extension
    #[arg(short, long)]
    extension: Option<String>,
}

impl SourceArgs {
    /// Applies the flags that were given on top of the loaded config
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(pages_dir) = self.pages_dir {
            config.routing.pages_dir = pages_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.routing.output_dir = Some(output_dir);
        }
        if let Some(output_file) = self.output_file {
            config.routing.output_file = output_file;
        }
        if let Some(extension) = self.extension {
            config.routing.extension = extension;
        }
        config
    }
}

/// Log filter used when `RUST_LOG` is not set
fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Build { source } => {
            commands::build::execute(&source.apply(config))?;
        }
        #[cfg(feature = "watch")]
        Commands::Watch { source } => {
            commands::watch::execute(source.apply(config))?;
        }
        Commands::Inspect { source } => {
            commands::inspect::execute(&source.apply(config))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_source_args_override_config() {
        let cli = Cli::parse_from([
            "pageroute",
            "build",
            "--pages-dir",
            "app/pages",
            "--output-file",
            "router.js",
            "-e",
            "tsx",
        ]);
        let Commands::Build { source } = cli.command else {
            panic!("expected build command");
        };

        let config = source.apply(Config::default());
        assert_eq!(config.routing.pages_dir, "app/pages");
        assert_eq!(config.routing.output_file, "router.js");
        assert_eq!(config.routing.extension, "tsx");
        assert_eq!(config.output_path(), PathBuf::from("app/router.js"));
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(false), "info");
        assert_eq!(default_log_level(true), "debug");
    }

    #[test]
    fn test_source_args_keep_config_values() {
        let mut config = Config::default();
        config.routing.output_dir = Some("dist".to_string());

        let config = SourceArgs::default().apply(config);
        assert_eq!(config.output_dir(), PathBuf::from("dist"));
        assert_eq!(config.routing.pages_dir, "pages");
    }
}
