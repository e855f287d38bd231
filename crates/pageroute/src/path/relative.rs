/// Relative component references
use std::path::{Path, PathBuf};

use super::{plain_components, to_path_buf};

/// Computes the path of `target` as seen from the directory `base`
///
/// Both paths are taken literally (no filesystem access), so they must be
/// either both absolute or both relative to the same directory.
///
/// ```
/// use pageroute::path::relative_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     relative_path(Path::new("src"), Path::new("src/pages/about.vue")),
///     PathBuf::from("pages/about.vue")
/// );
/// assert_eq!(
///     relative_path(Path::new("src/router"), Path::new("src/pages/about.vue")),
///     PathBuf::from("../pages/about.vue")
/// );
/// ```
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base = plain_components(base);
    let target = plain_components(target);

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    relative.push(to_path_buf(&target[common..]));
    relative
}

/// Builds the component reference written into the route table
///
/// Forward slashes only, prefixed with `./` unless it already starts with a
/// relative marker.
///
/// ```
/// use pageroute::path::component_ref;
/// use std::path::Path;
///
/// assert_eq!(component_ref(Path::new("src/pages/a.vue"), Path::new("src")), "./pages/a.vue");
/// assert_eq!(component_ref(Path::new("src/pages/a.vue"), Path::new("src/router")), "../pages/a.vue");
/// ```
pub fn component_ref(file: &Path, output_dir: &Path) -> String {
    let relative = relative_path(output_dir, file)
        .to_string_lossy()
        .replace('\\', "/");

    if relative.starts_with("./") || relative.starts_with("../") {
        relative
    } else {
        format!("./{}", relative)
    }
}
