//! Nearest instructions-file discovery.
//!
//! Agents should follow the `AGENTS.md` closest to the directory they work in:
//! a package-level file wins over the repository root's. The locator probes the
//! start directory, then its parents, and returns the first regular file found.
//!
//! By default only two parents are probed. [`SearchDepth::Unbounded`] walks all
//! the way to the filesystem root.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};

use agentsmd_shared::{LocateOptions, SearchDepth};

// ---------------------------------------------------------------------------
// Main entry points
// ---------------------------------------------------------------------------

/// Find the nearest `AGENTS.md` at `start_dir`, its parent, or its grandparent.
pub fn locate(start_dir: &Path) -> Option<PathBuf> {
    locate_with(start_dir, &LocateOptions::default())
}

/// Find the nearest instructions file using explicit options.
///
/// Never fails: unreadable or missing directories simply produce no match.
#[instrument(skip(opts), fields(file_name = %opts.file_name, depth = ?opts.depth))]
pub fn locate_with(start_dir: &Path, opts: &LocateOptions) -> Option<PathBuf> {
    for candidate in candidates(start_dir, opts) {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "instructions file found");
            return Some(candidate);
        }
        debug!(path = %candidate.display(), "no file at candidate");
    }

    debug!("no instructions file found");
    None
}

/// The paths probed by [`locate_with`], nearest first.
pub fn candidates(start_dir: &Path, opts: &LocateOptions) -> Vec<PathBuf> {
    let base = resolve_start(start_dir);
    let probe = |dir: &Path| dir.join(&opts.file_name);

    match opts.depth {
        SearchDepth::Bounded(parents) => base
            .ancestors()
            .take(parents.saturating_add(1))
            .map(probe)
            .collect(),
        SearchDepth::Unbounded => base.ancestors().map(probe).collect(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Make the start directory absolute so `ancestors()` can climb above it.
///
/// Works on the path text only: symlinks are not followed, so a linked
/// directory climbs through the parents it was reached by.
fn resolve_start(start_dir: &Path) -> PathBuf {
    let absolute = std::path::absolute(start_dir).unwrap_or_else(|e| {
        debug!(path = %start_dir.display(), error = %e, "cannot make start directory absolute");
        start_dir.to_path_buf()
    });
    normalize_lexically(&absolute)
}

/// Drop `.` components and fold each `..` into its parent.
///
/// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut out, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other),
            }
            out
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Build `<tmp>/a/b/c` and return (tempdir guard, canonical root).
    fn nested_tree() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        fs::create_dir_all(root.join("a/b/c")).expect("create tree");
        (dir, root)
    }

    fn touch(path: &Path) {
        fs::write(path, "# Agents\n").expect("write file");
    }

    #[test]
    fn finds_file_in_start_dir() {
        let (_guard, root) = nested_tree();
        let start = root.join("a/b/c");
        touch(&start.join("AGENTS.md"));

        assert_eq!(locate(&start), Some(start.join("AGENTS.md")));
    }

    #[test]
    fn finds_file_in_grandparent() {
        let (_guard, root) = nested_tree();
        touch(&root.join("a/AGENTS.md"));

        assert_eq!(locate(&root.join("a/b/c")), Some(root.join("a/AGENTS.md")));
    }

    #[test]
    fn nearest_file_wins() {
        let (_guard, root) = nested_tree();
        touch(&root.join("a/AGENTS.md"));
        touch(&root.join("a/b/AGENTS.md"));

        assert_eq!(
            locate(&root.join("a/b/c")),
            Some(root.join("a/b/AGENTS.md"))
        );
    }

    #[test]
    fn bounded_search_stops_at_grandparent() {
        let (_guard, root) = nested_tree();
        touch(&root.join("AGENTS.md"));

        assert_eq!(locate(&root.join("a/b/c")), None);
    }

    #[test]
    fn unbounded_search_reaches_further() {
        let (_guard, root) = nested_tree();
        fs::create_dir_all(root.join("a/b/c/d")).expect("create d");
        touch(&root.join("AGENTS.md"));

        let opts = LocateOptions {
            depth: SearchDepth::Unbounded,
            ..LocateOptions::default()
        };
        assert_eq!(
            locate_with(&root.join("a/b/c/d"), &opts),
            Some(root.join("AGENTS.md"))
        );
        assert_eq!(locate(&root.join("a/b/c/d")), None);
    }

    #[test]
    fn directory_with_file_name_is_skipped() {
        let (_guard, root) = nested_tree();
        fs::create_dir_all(root.join("a/b/c/AGENTS.md")).expect("create dir");
        touch(&root.join("a/b/AGENTS.md"));

        assert_eq!(
            locate(&root.join("a/b/c")),
            Some(root.join("a/b/AGENTS.md"))
        );
    }

    #[test]
    fn custom_file_name() {
        let (_guard, root) = nested_tree();
        touch(&root.join("a/b/AGENTS.md"));
        touch(&root.join("a/b/CLAUDE.md"));

        let opts = LocateOptions {
            file_name: "CLAUDE.md".into(),
            ..LocateOptions::default()
        };
        assert_eq!(
            locate_with(&root.join("a/b/c"), &opts),
            Some(root.join("a/b/CLAUDE.md"))
        );
    }

    #[test]
    fn candidates_in_probe_order() {
        let (_guard, root) = nested_tree();
        let found = candidates(&root.join("a/b/c"), &LocateOptions::default());
        assert_eq!(
            found,
            [
                root.join("a/b/c/AGENTS.md"),
                root.join("a/b/AGENTS.md"),
                root.join("a/AGENTS.md"),
            ]
        );
    }

    #[test]
    fn dot_dot_in_start_dir_is_resolved() {
        let (_guard, root) = nested_tree();
        touch(&root.join("AGENTS.md"));

        // a/b/c/../.. is a, whose parent is root.
        assert_eq!(
            locate(&root.join("a/b/c/../..")),
            Some(root.join("AGENTS.md"))
        );
    }

    #[test]
    fn max_depth_bound_does_not_overflow() {
        let (_guard, root) = nested_tree();
        touch(&root.join("AGENTS.md"));

        let opts = LocateOptions {
            depth: SearchDepth::Bounded(usize::MAX),
            ..LocateOptions::default()
        };
        assert_eq!(locate_with(&root, &opts), Some(root.join("AGENTS.md")));
        assert_eq!(
            locate_with(&root.join("a/b/c"), &opts),
            Some(root.join("AGENTS.md"))
        );
        assert_eq!(
            candidates(&root, &opts).len(),
            root.ancestors().count()
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_start_dir_climbs_link_parents() {
        let (_guard, root) = nested_tree();
        fs::create_dir_all(root.join("proj")).expect("create proj");
        fs::create_dir_all(root.join("real/x/y")).expect("create target");
        touch(&root.join("proj/AGENTS.md"));
        std::os::unix::fs::symlink(root.join("real/x/y"), root.join("proj/link"))
            .expect("create symlink");

        assert_eq!(
            locate(&root.join("proj/link")),
            Some(root.join("proj/AGENTS.md"))
        );
        assert_eq!(
            candidates(&root.join("proj/link/.."), &LocateOptions::default())[0],
            root.join("proj/AGENTS.md")
        );
    }

    #[test]
    fn lexical_normalization() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
    }

    #[test]
    fn missing_start_dir_still_probes_parents() {
        let (_guard, root) = nested_tree();
        touch(&root.join("a/AGENTS.md"));

        assert_eq!(
            locate(&root.join("a/missing")),
            Some(root.join("a/AGENTS.md"))
        );
    }
}
