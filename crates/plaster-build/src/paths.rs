//! Lexical path normalization and root resolution.
//!
//! Nothing in here touches the file system: paths are compared and joined
//! purely by their components, so resolution works for targets that do not
//! exist yet.

use std::path::{Component, Path, PathBuf};

use crate::settings::Containment;

/// Normalize a path lexically.
///
/// Drops `.` segments and folds `name/..` pairs. Leading `..` segments of a
/// relative path are kept; `..` directly under a root is discarded.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => {
                out.push(name);
                depth += 1;
            }
        }
    }

    out
}

/// Whether `candidate` already lives under `root`. Both must be normalized.
pub fn is_rooted(candidate: &Path, root: &Path, containment: Containment) -> bool {
    match containment {
        Containment::Segments => candidate.starts_with(root),
        Containment::StringPrefix => candidate
            .to_string_lossy()
            .starts_with(root.to_string_lossy().as_ref()),
    }
}

/// Resolve `candidate` under `root`.
///
/// A candidate already under the root comes back normalized but otherwise
/// unchanged; anything else is joined onto the root. Absolute candidates lose
/// their root component and `..` segments cannot climb out of the root, so
/// `resolve_under(resolve_under(p, r), r) == resolve_under(p, r)`.
pub fn resolve_under(candidate: &Path, root: &Path, containment: Containment) -> PathBuf {
    let root = normalize(root);
    let candidate = normalize(candidate);

    if is_rooted(&candidate, &root, containment) {
        return candidate;
    }

    let mut resolved = root;
    for component in candidate.components() {
        if let Component::Normal(name) = component {
            resolved.push(name);
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolve(p: &str, root: &str) -> PathBuf {
        resolve_under(Path::new(p), Path::new(root), Containment::Segments)
    }

    #[test]
    fn normalizes_dots() {
        assert_eq!(normalize(Path::new("./src/a/../b/./c.html")), PathBuf::from("src/b/c.html"));
        assert_eq!(normalize(Path::new("../x/y")), PathBuf::from("../x/y"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new(".")), PathBuf::new());
    }

    #[test]
    fn joins_relative_paths() {
        assert_eq!(resolve("index.html", "./src"), PathBuf::from("src/index.html"));
        assert_eq!(resolve("pages/about.html", "/site/src"), PathBuf::from("/site/src/pages/about.html"));
    }

    #[test]
    fn keeps_rooted_paths() {
        assert_eq!(resolve("./src/index.html", "src"), PathBuf::from("src/index.html"));
        assert_eq!(resolve("/site/src/a.html", "/site/src/"), PathBuf::from("/site/src/a.html"));
    }

    #[test]
    fn absolute_outside_root_is_reparented() {
        assert_eq!(resolve("/tmp/a.html", "/site/dist"), PathBuf::from("/site/dist/tmp/a.html"));
    }

    #[test]
    fn parent_segments_cannot_escape() {
        assert_eq!(resolve("../../etc/passwd", "/site/src"), PathBuf::from("/site/src/etc/passwd"));
    }

    #[test]
    fn sibling_with_shared_prefix() {
        let root = Path::new("/src");
        let sibling = Path::new("/src-other/x");

        assert_eq!(
            resolve_under(sibling, root, Containment::Segments),
            PathBuf::from("/src/src-other/x")
        );
        assert_eq!(
            resolve_under(sibling, root, Containment::StringPrefix),
            PathBuf::from("/src-other/x")
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let roots = ["./src", "/site/dist", "src/", ".", "/"];
        let candidates = [
            "index.html",
            "./src/index.html",
            "/abs/file.css",
            "../up/file.js",
            "a/./b/../c.txt",
            "/src-other/x",
            ".",
        ];

        for containment in [Containment::Segments, Containment::StringPrefix] {
            for root in roots {
                let root = Path::new(root);
                for candidate in candidates {
                    let once = resolve_under(Path::new(candidate), root, containment);
                    let twice = resolve_under(&once, root, containment);
                    assert_eq!(once, twice, "candidate {} under {:?}", candidate, root);
                }
            }
        }
    }
}
