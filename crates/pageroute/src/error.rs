/// Diagnostics reported while compiling a pages directory
///
/// None of these stop compilation. The affected file is either skipped or
/// compiled the way the directory convention dictates, and the warning is
/// handed back to the caller alongside the routes.
use thiserror::Error;

/// A non-fatal problem found while building the route tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    /// The file produced no route segments once the pages directory and
    /// extension were stripped (e.g. a file named just `.vue`)
    #[error("{file}: no route segments left after stripping the pages directory, skipped")]
    EmptyRoute { file: String },

    /// The file's full route name equals an existing sibling, so it was
    /// nested under that sibling although no folder asked for it
    #[error("{file}: route name `{name}` already exists among its siblings, nested under it")]
    NameCollision { file: String, name: String },

    /// A mixin tried to set a field the compiler owns
    #[error("{file}: mixin `{mixin}` sets reserved field `{field}`, ignored")]
    ReservedMixinField {
        file: String,
        mixin: String,
        field: String,
    },
}

impl CompileWarning {
    /// The page file this warning is about
    pub fn file(&self) -> &str {
        match self {
            CompileWarning::EmptyRoute { file }
            | CompileWarning::NameCollision { file, .. }
            | CompileWarning::ReservedMixinField { file, .. } => file,
        }
    }
}
