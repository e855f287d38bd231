//! # pageroute
//!
//! Compiles a directory of page files into the nested route table of a
//! client-side router.
//!
//! ## Directory Conventions
//!
//! - Folders become path segments: `users/new.vue` → `/users/new`
//! - `_name` is a dynamic segment: `users/_id.vue` → `/users/:id?`
//! - `index` is the default page of its folder: `users/index.vue` → `/users`
//! - A folder named like a sibling page holds that page's children:
//!   `users.vue` + `users/_id.vue` → `/users` with child `:id?`
//! - A segment starting with `!` soft-deletes the page: `!draft/page.vue`
//! - Extra words in a segment apply mixins: `admin auth/index.vue` merges
//!   the `auth` mixin into the route
//!
//! ## Pipeline
//!
//! file paths → [`path::tokenize`] → [`route::RouteTreeBuilder`] (mixins,
//! implicit nesting, [`route::sort_routes`] after every insert) →
//! [`route::normalize_routes`] → [`RouteNode`] tree → [`render::render_module`]
//!
//! ## Example
//!
//! ```
//! use pageroute::{compile_routes, CompileOptions};
//!
//! let options = CompileOptions::new("src/pages").with_output_dir("src");
//! let compilation = compile_routes(
//!     ["src/pages/index.vue", "src/pages/about.vue", "src/pages/_slug.vue"],
//!     &options,
//! );
//!
//! let paths: Vec<_> = compilation.routes.iter().map(|r| r.path.as_str()).collect();
//! assert_eq!(paths, vec!["/", "/about", "/:slug"]);
//! assert_eq!(compilation.routes[1].component.as_deref(), Some("./pages/about.vue"));
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod mixin;
mod node;
pub mod path;
pub mod render;
pub mod route;

pub use config::Config;
pub use error::CompileWarning;
pub use mixin::MixinSet;
pub use node::{RouteNode, RouteOrigin};
pub use path::{tokenize, PageFile, Tokenized};
pub use render::{render_module, render_routes};
pub use route::{normalize_routes, sort_routes, RouteTreeBuilder};

/// Default page-file extension
pub const DEFAULT_EXTENSION: &str = "vue";

// ============================================================================
// Compiler Entry Point
// ============================================================================

/// In-memory compiler configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Root directory of the page files
    pub pages_dir: PathBuf,
    /// Directory the rendered route table will live in; component
    /// references are relative to it
    pub output_dir: PathBuf,
    /// Page-file extension, without the dot
    pub extension: String,
    /// Mixins available to segments
    pub mixins: MixinSet,
}

impl CompileOptions {
    /// Options for `pages_dir`, writing next to it (into its parent)
    pub fn new(pages_dir: impl Into<PathBuf>) -> Self {
        let pages_dir = pages_dir.into();
        let output_dir = pages_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            pages_dir,
            output_dir,
            extension: DEFAULT_EXTENSION.to_string(),
            mixins: MixinSet::new(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_mixins(mut self, mixins: MixinSet) -> Self {
        self.mixins = mixins;
        self
    }

    /// Tokenizes one page file with these options
    pub fn tokenize(&self, file: &str) -> Tokenized {
        tokenize(
            file,
            &self.pages_dir.to_string_lossy(),
            &self.output_dir.to_string_lossy(),
            &self.extension,
        )
    }
}

/// Result of one compiler run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    /// Normalized top-level routes, in matching order
    pub routes: Vec<RouteNode>,
    /// Non-fatal problems found along the way
    pub warnings: Vec<CompileWarning>,
}

impl Compilation {
    /// Total number of routes in the tree
    pub fn route_count(&self) -> usize {
        self.routes.iter().map(RouteNode::count).sum()
    }
}

/// Compiles page file paths into a normalized route tree
///
/// The result only depends on the set of paths: duplicates are ignored and
/// pages are inserted shallowest first, so a page always exists before the
/// contents of its same-named folder are threaded under it.
pub fn compile_routes<I, S>(files: I, options: &CompileOptions) -> Compilation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut warnings = Vec::new();
    let mut pages: Vec<PageFile> = Vec::new();

    for file in files {
        let file = file.as_ref();
        match options.tokenize(file) {
            Tokenized::Page(page) => pages.push(page),
            Tokenized::Deleted => debug!(file = %file, "soft-deleted page skipped"),
            Tokenized::Empty => {
                warn!(file = %file, "page has no route segments, skipped");
                warnings.push(CompileWarning::EmptyRoute {
                    file: file.to_string(),
                });
            }
        }
    }

    pages.sort_by(|a, b| {
        a.keys
            .len()
            .cmp(&b.keys.len())
            .then_with(|| a.keys.cmp(&b.keys))
            .then_with(|| a.source.cmp(&b.source))
    });
    pages.dedup_by(|a, b| a.source == b.source);

    let mut builder = RouteTreeBuilder::new(&options.mixins);
    for page in pages {
        builder.insert(page);
    }

    let (mut routes, build_warnings) = builder.finish();
    warnings.extend(build_warnings);
    normalize_routes(&mut routes);

    let compilation = Compilation { routes, warnings };
    debug!(
        routes = compilation.route_count(),
        warnings = compilation.warnings.len(),
        "route tree compiled"
    );
    compilation
}
