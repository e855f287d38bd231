use anyhow::Result;
use colored::Colorize;
use pageroute::{compile_routes, Compilation, CompileWarning, Config};

use crate::discover::discover_pages;

/// Compiles the current page set without writing anything
pub fn inspect(config: &Config) -> Result<Compilation> {
    let files = discover_pages(&config.pages_dir(), &config.routing.extension)?;
    Ok(compile_routes(&files, &config.compile_options()))
}

fn warning_line(warning: &CompileWarning) -> String {
    format!("{} {}", "⚠".yellow(), warning)
}

/// Prints the compiled route tree as JSON, then any warnings
///
/// Warnings go to stderr, so stdout stays valid JSON.
pub fn execute(config: &Config) -> Result<()> {
    let compilation = inspect(config)?;

    println!("{}", serde_json::to_string_pretty(&compilation.routes)?);
    for warning in &compilation.warnings {
        eprintln!("{}", warning_line(warning));
    }

    Ok(())
}
