use anyhow::{Context, Result};
use colored::Colorize;
use pageroute::{compile_routes, render_module, Config};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::discover::discover_pages;

/// Outcome of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub output: PathBuf,
    pub pages: usize,
    pub routes: usize,
    pub warnings: usize,
}

/// Discovers pages, compiles them and writes the route table
///
/// The whole tree is rebuilt from the current page set on every call.
pub fn generate(config: &Config) -> Result<Generated> {
    let files = discover_pages(&config.pages_dir(), &config.routing.extension)?;
    let compilation = compile_routes(&files, &config.compile_options());

    let output = config.output_path();
    write_module(&output, &render_module(&compilation.routes))?;

    let generated = Generated {
        output,
        pages: files.len(),
        routes: compilation.route_count(),
        warnings: compilation.warnings.len(),
    };
    info!(
        output = %generated.output.display(),
        pages = generated.pages,
        routes = generated.routes,
        "route table written"
    );
    Ok(generated)
}

/// Writes the rendered module, creating parent directories as needed
pub fn write_module(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write route table: {:?}", path))
}

/// Prints a one-line summary of a generation run
pub fn report(generated: &Generated) {
    println!(
        "{} {} routes from {} pages → {}",
        "✓".green(),
        generated.routes,
        generated.pages,
        generated.output.display().to_string().cyan()
    );
    if generated.warnings > 0 {
        println!(
            "{} {} warning(s), see log output above",
            "⚠".yellow(),
            generated.warnings
        );
    }
}

pub fn execute(config: &Config) -> Result<()> {
    println!("{}", "Generating routes...".green().bold());
    println!("Pages: {}", config.pages_dir().display().to_string().cyan());
    println!();

    let generated = generate(config)?;
    report(&generated);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn config_for(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.routing.pages_dir = dir.path().join("src/pages").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_generate_writes_route_table() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("src/pages");
        touch(&pages, "index.vue");
        touch(&pages, "users.vue");
        touch(&pages, "users/_id.vue");
        touch(&pages, "!draft/page.vue");

        let config = config_for(&dir);
        let generated = generate(&config).unwrap();

        assert_eq!(generated.output, dir.path().join("src/routes.js"));
        assert_eq!(generated.pages, 4);
        assert_eq!(generated.routes, 3);
        assert_eq!(generated.warnings, 0);

        let written = fs::read_to_string(&generated.output).unwrap();
        assert!(written.starts_with("export default [\n"));
        assert!(written.contains("component: () => import(\"./pages/users/_id.vue\")"));
        assert!(written.contains("path: \":id?\""));
        assert!(!written.contains("draft"));
    }

    #[test]
    fn test_generate_rebuilds_from_scratch() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("src/pages");
        touch(&pages, "about.vue");
        touch(&pages, "contact.vue");

        let config = config_for(&dir);
        assert_eq!(generate(&config).unwrap().routes, 2);

        fs::remove_file(pages.join("contact.vue")).unwrap();
        generate(&config).unwrap();

        let written = fs::read_to_string(config.output_path()).unwrap();
        assert!(written.contains("\"/about\""));
        assert!(!written.contains("contact"));
    }

    #[test]
    fn test_write_module_creates_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/router/routes.js");
        write_module(&target, "export default [\n\n]\n").unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "export default [\n\n]\n");
    }
}
