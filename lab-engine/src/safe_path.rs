//! Path resolution confined to a content root

use crate::error::{LabError, LabResult};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Join `relative` onto `root` and prove the result stays inside it.
///
/// The check runs twice: lexically, before touching the filesystem, and again
/// on the canonical path so that symlinks pointing outside are refused too.
/// A missing file is `NotFound`; anything outside the root is
/// `PathEscapesRoot`.
pub fn safe_join(root: &Path, relative: impl AsRef<Path>) -> LabResult<PathBuf> {
    let relative = relative.as_ref();
    let root = root.canonicalize()?;

    let mut resolved = root.clone();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(LabError::PathEscapesRoot {
                    path: relative.to_path_buf(),
                });
            }
        }
    }

    if !resolved.starts_with(&root) {
        debug!(requested = %relative.display(), resolved = %resolved.display(), "Lexical path escapes root");
        return Err(LabError::PathEscapesRoot { path: resolved });
    }

    let canonical = resolved
        .canonicalize()
        .map_err(|_| LabError::NotFound { path: resolved.clone() })?;

    if !canonical.starts_with(&root) {
        debug!(requested = %relative.display(), canonical = %canonical.display(), "Canonical path escapes root");
        return Err(LabError::PathEscapesRoot { path: canonical });
    }

    Ok(canonical)
}

/// A directory all disclosed files must live under
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    /// Open an existing directory; the stored root is canonical
    pub fn new(root: impl AsRef<Path>) -> LabResult<Self> {
        let root = root.as_ref();
        let canonical = root
            .canonicalize()
            .map_err(|_| LabError::NotFound { path: root.to_path_buf() })?;
        if !canonical.is_dir() {
            return Err(LabError::NotFound { path: canonical });
        }
        Ok(Self { root: canonical })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `safe_join` against this root
    pub fn resolve(&self, relative: impl AsRef<Path>) -> LabResult<PathBuf> {
        safe_join(&self.root, relative)
    }

    /// Resolve, then read as UTF-8 text; the target must be a regular file
    pub fn read_to_string(&self, relative: impl AsRef<Path>) -> LabResult<String> {
        let path = self.resolve(relative)?;
        if !path.is_file() {
            return Err(LabError::NotFound { path });
        }
        Ok(std::fs::read_to_string(path)?)
    }

    pub fn is_available(&self) -> bool {
        self.root.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn content_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vulnerabilities/exec/help")).unwrap();
        fs::write(dir.path().join("vulnerabilities/exec/help/help.html"), "<p>help</p>").unwrap();
        dir
    }

    #[test]
    fn test_resolves_file_inside_root() {
        let dir = content_tree();
        let path = safe_join(dir.path(), "vulnerabilities/exec/help/help.html").unwrap();
        assert!(path.starts_with(dir.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_inner_parent_dirs_are_allowed() {
        let dir = content_tree();
        let path = safe_join(dir.path(), "vulnerabilities/exec/../exec/help/help.html").unwrap();
        assert!(path.ends_with("vulnerabilities/exec/help/help.html"));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let dir = content_tree();
        let err = safe_join(dir.path(), "vulnerabilities/../../../etc/passwd").unwrap_err();
        assert!(matches!(err, LabError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_absolute_path_is_rejected() {
        let dir = content_tree();
        let err = safe_join(dir.path(), "/etc/passwd").unwrap_err();
        assert!(matches!(err, LabError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = content_tree();
        let err = safe_join(dir.path(), "vulnerabilities/nope/help/help.html").unwrap_err();
        assert!(matches!(err, LabError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_is_rejected() {
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let dir = content_tree();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("vulnerabilities/link")).unwrap();

        let err = safe_join(dir.path(), "vulnerabilities/link/secret.txt").unwrap_err();
        assert!(matches!(err, LabError::PathEscapesRoot { .. }));
    }

    #[test]
    fn test_content_root_reads_files_only() {
        let dir = content_tree();
        let root = ContentRoot::new(dir.path()).unwrap();
        assert_eq!(root.read_to_string("vulnerabilities/exec/help/help.html").unwrap(), "<p>help</p>");
        assert!(matches!(
            root.read_to_string("vulnerabilities/exec").unwrap_err(),
            LabError::NotFound { .. }
        ));
    }

    #[test]
    fn test_content_root_requires_directory() {
        let dir = tempdir().unwrap();
        assert!(ContentRoot::new(dir.path().join("missing")).is_err());
    }
}
