//! File-system backed `SourceIndex`
//!
//! Resolves report paths against a project base directory. Only lookups are
//! performed: the tree is never walked. A path resolves when it names a regular
//! file, either relative to the base directory or as an absolute path.

use std::path::{Component, Path, PathBuf};

use depcheck_core::pipeline::SourceIndex;
use depcheck_core::types::FileId;

/// Source index rooted at a project directory.
///
/// File keys are base-relative paths joined with `/`. Files outside the base
/// directory keep their full path as the key.
pub struct FsSourceIndex {
    root: PathBuf,
}

impl FsSourceIndex {
    /// Create an index rooted at `base_dir`.
    ///
    /// The root is canonicalized when possible so that absolute report paths
    /// can be mapped back to base-relative keys.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let root = base_dir
            .canonicalize()
            .unwrap_or_else(|_| base_dir.to_path_buf());
        Self { root }
    }

    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_for(&self, file: &Path) -> String {
        match file.strip_prefix(&self.root) {
            Ok(relative) => relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => file.display().to_string(),
        }
    }
}

impl SourceIndex for FsSourceIndex {
    fn resolve(&self, path: &str) -> Option<FileId> {
        if path.is_empty() {
            return None;
        }
        let candidate = self.root.join(path);
        let file = candidate.canonicalize().ok()?;
        if !file.is_file() {
            return None;
        }
        Some(FileId::new(self.key_for(&file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("should create temp dir");
        std::fs::create_dir_all(dir.path().join("lib")).expect("should create lib dir");
        std::fs::write(dir.path().join("lib").join("a.jar"), b"jar").expect("should write jar");
        std::fs::write(dir.path().join("dependency-check-report.xml"), b"<analysis/>")
            .expect("should write report");
        dir
    }

    #[test]
    fn test_resolves_relative_path() {
        let dir = project();
        let index = FsSourceIndex::new(dir.path());
        assert_eq!(
            index.resolve("dependency-check-report.xml"),
            Some(FileId::new("dependency-check-report.xml"))
        );
        assert_eq!(index.resolve("lib/a.jar"), Some(FileId::new("lib/a.jar")));
    }

    #[test]
    fn test_resolves_absolute_path_inside_root() {
        let dir = project();
        let index = FsSourceIndex::new(dir.path());
        let absolute = index.root().join("lib").join("a.jar");
        assert_eq!(
            index.resolve(&absolute.display().to_string()),
            Some(FileId::new("lib/a.jar"))
        );
    }

    #[test]
    fn test_missing_and_directory_paths_do_not_resolve() {
        let dir = project();
        let index = FsSourceIndex::new(dir.path());
        assert_eq!(index.resolve("lib/missing.jar"), None);
        assert_eq!(index.resolve("lib"), None);
        assert_eq!(index.resolve(""), None);
    }

    #[test]
    fn test_file_outside_root_keeps_full_path() {
        let dir = project();
        let outside = tempfile::NamedTempFile::new().expect("should create temp file");
        let index = FsSourceIndex::new(dir.path());
        let key = index
            .resolve(&outside.path().display().to_string())
            .expect("absolute file should resolve");
        assert!(key.as_str().ends_with(
            outside
                .path()
                .file_name()
                .expect("has file name")
                .to_str()
                .expect("utf-8 name")
        ));
    }
}
