/// Page-file path handling
///
/// Turns one page file into the ordered keys the tree builder consumes and
/// computes the component reference written into the route table.
/// All functions are **pure**: same input, same output, no filesystem access.
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

pub mod relative;
pub use relative::{component_ref, relative_path};

/// One page file split into route keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    /// The file path as given by the caller
    pub source: String,
    /// Raw path segments relative to the pages directory, extension removed.
    /// Segments may still carry mixin tokens (`"admin auth"`).
    pub keys: Vec<String>,
    /// Component reference relative to the output directory
    pub component: String,
}

/// Outcome of tokenizing one page file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized {
    /// A regular page
    Page(PageFile),
    /// A segment starts with `!`: the page is soft-deleted
    Deleted,
    /// Nothing left after stripping the root and extension
    Empty,
}

/// Checks if a path uses only forward slashes without empty or `.` segments
///
/// ```
/// use pageroute::path::is_clean_path;
///
/// assert!(is_clean_path("src/pages/about.vue"));
/// assert!(is_clean_path("/abs/pages"));
/// assert!(!is_clean_path("src//pages"));
/// assert!(!is_clean_path("src\\pages"));
/// assert!(!is_clean_path("./src/pages"));
/// assert!(!is_clean_path("src/pages/"));
/// ```
pub fn is_clean_path(path: &str) -> bool {
    !path.contains('\\')
        && !path.contains("//")
        && !path.split('/').any(|segment| segment == ".")
        && (path == "/" || !path.ends_with('/'))
}

/// Normalizes separators in a filesystem path
///
/// Backslashes become `/`, repeated separators collapse and `.` segments
/// disappear. A leading `/` is preserved. Returns `Cow::Borrowed` when the
/// path is already clean.
///
/// ```
/// use pageroute::path::clean_path;
///
/// assert_eq!(clean_path("src//pages///users"), "src/pages/users");
/// assert_eq!(clean_path(".\\src\\pages\\"), "src/pages");
/// assert_eq!(clean_path("/abs/./pages"), "/abs/pages");
/// ```
pub fn clean_path(path: &str) -> Cow<'_, str> {
    if is_clean_path(path) {
        return Cow::Borrowed(path);
    }

    let absolute = path.starts_with('/') || path.starts_with('\\');
    let joined = path
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    match (absolute, joined.is_empty()) {
        (true, _) => Cow::Owned(format!("/{}", joined)),
        (false, true) => Cow::Borrowed(""),
        (false, false) => Cow::Owned(joined),
    }
}

/// Strips `root` from the front of `path` on a segment boundary
///
/// Falls back to the whole path when it does not live under `root`.
fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return path;
    }
    match path.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || root.ends_with('/') => rest,
        _ => path,
    }
}

/// Splits a page file into route keys relative to the pages directory
///
/// Strips the pages directory and the page extension, collapses repeated
/// separators and drops empty segments. A file with any segment starting
/// with `!` is soft-deleted.
///
/// ```
/// use pageroute::path::{tokenize, Tokenized};
///
/// match tokenize("src/pages/users/_id.vue", "src/pages", "src", "vue") {
///     Tokenized::Page(page) => {
///         assert_eq!(page.keys, vec!["users", "_id"]);
///         assert_eq!(page.component, "./pages/users/_id.vue");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
///
/// assert_eq!(tokenize("src/pages/!draft/page.vue", "src/pages", "src", "vue"), Tokenized::Deleted);
/// ```
pub fn tokenize(file: &str, pages_dir: &str, output_dir: &str, extension: &str) -> Tokenized {
    let cleaned_file = clean_path(file);
    let cleaned_root = clean_path(pages_dir);

    let relative = strip_root(&cleaned_file, &cleaned_root);
    let without_ext = strip_extension(relative, extension);

    let keys: Vec<String> = without_ext
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    if keys.iter().any(|key| key.starts_with('!')) {
        return Tokenized::Deleted;
    }
    if keys.is_empty() {
        return Tokenized::Empty;
    }

    Tokenized::Page(PageFile {
        source: file.to_string(),
        keys,
        component: component_ref(Path::new(cleaned_file.as_ref()), Path::new(output_dir)),
    })
}

/// Removes `.<extension>` from the end of a path, if present
fn strip_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        return path;
    }
    path.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(path)
}

/// Drops `.` components so that relative comparisons line up
fn plain_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Joins components back into a path buffer
fn to_path_buf(components: &[Component<'_>]) -> PathBuf {
    components.iter().map(|c| c.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(file: &str) -> Vec<String> {
        match tokenize(file, "src/pages", "src", "vue") {
            Tokenized::Page(page) => page.keys,
            other => panic!("expected a page for {}, got {:?}", file, other),
        }
    }

    #[test]
    fn test_tokenize_strips_root_and_extension() {
        assert_eq!(keys("src/pages/index.vue"), vec!["index"]);
        assert_eq!(keys("src/pages/users/_id.vue"), vec!["users", "_id"]);
    }

    #[test]
    fn test_tokenize_collapses_repeated_separators() {
        assert_eq!(keys("src/pages//users///_id.vue"), vec!["users", "_id"]);
        assert_eq!(keys("src\\pages\\users\\index.vue"), vec!["users", "index"]);
    }

    #[test]
    fn test_tokenize_handles_dot_prefixed_root() {
        match tokenize("./src/pages/about.vue", "src/pages/", "src", "vue") {
            Tokenized::Page(page) => {
                assert_eq!(page.keys, vec!["about"]);
                assert_eq!(page.component, "./pages/about.vue");
                assert_eq!(page.source, "./src/pages/about.vue");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tokenize_keeps_mixin_tokens() {
        assert_eq!(keys("src/pages/admin auth/index.vue"), vec!["admin auth", "index"]);
    }

    #[test]
    fn test_tokenize_soft_delete() {
        assert_eq!(
            tokenize("src/pages/!draft/page.vue", "src/pages", "src", "vue"),
            Tokenized::Deleted
        );
        assert_eq!(
            tokenize("src/pages/blog/!old.vue", "src/pages", "src", "vue"),
            Tokenized::Deleted
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("src/pages/.vue", "src/pages", "src", "vue"), Tokenized::Empty);
        assert_eq!(tokenize("src/pages", "src/pages", "src", "vue"), Tokenized::Empty);
    }

    #[test]
    fn test_strip_root_respects_segment_boundary() {
        assert_eq!(strip_root("src/pages2/a.vue", "src/pages"), "src/pages2/a.vue");
        assert_eq!(strip_root("src/pages/a.vue", "src/pages"), "/a.vue");
        assert_eq!(strip_root("/a.vue", ""), "/a.vue");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("users/index.vue", "vue"), "users/index");
        assert_eq!(strip_extension("users/index.vue", ".vue"), "users/index");
        assert_eq!(strip_extension("users/index.jsx", "vue"), "users/index.jsx");
        assert_eq!(strip_extension("users/indexvue", "vue"), "users/indexvue");
    }

    #[test]
    fn test_clean_path_borrows_clean_input() {
        assert!(matches!(clean_path("src/pages"), Cow::Borrowed("src/pages")));
        assert_eq!(clean_path("//"), "/");
        assert_eq!(clean_path("./"), "");
    }
}
