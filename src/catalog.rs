//! The authoritative file list of a project, partitioned by VCS membership.

use std::collections::{BTreeSet, HashSet};

use crate::path;
use crate::types::{FileRef, FileType};

/// Known project files plus the exact set of paths that are not under version control.
///
/// Exclusion is per file: listing `dir/a.png` says nothing about `dir/b.png`.
#[derive(Debug, Clone, Default)]
pub struct FileCatalog {
    /// Files sorted by path, no duplicates.
    files: Vec<FileRef>,
    /// Normalized paths of files outside version control.
    non_vcs: HashSet<String>,
}

impl FileCatalog {
    /// Build a catalog. Files are sorted and deduplicated; exclusion paths are normalized.
    pub fn new<F, N>(files: F, non_vcs: N) -> Self
    where
        F: IntoIterator<Item = FileRef>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let unique: BTreeSet<FileRef> = files.into_iter().collect();
        return Self {
            files: unique.into_iter().collect(),
            non_vcs: non_vcs
                .into_iter()
                .map(|p| return path::normalize(p.as_ref()))
                .collect(),
        };
    }

    /// Convenience constructor from path strings.
    pub fn from_paths(paths: &[&str], non_vcs: &[&str]) -> Self {
        return Self::new(paths.iter().map(|p| return FileRef::new(p)), non_vcs.iter());
    }

    /// Known files whose type is in `file_types`. An empty set selects every file.
    pub fn file_list(&self, file_types: &HashSet<FileType>) -> Vec<FileRef> {
        return self
            .files
            .iter()
            .filter(|f| return file_types.is_empty() || file_types.contains(&f.file_type()))
            .cloned()
            .collect();
    }

    /// All files, sorted by path.
    pub fn files(&self) -> &[FileRef] {
        return &self.files;
    }

    /// Look up a file by path.
    pub fn get(&self, path: &str) -> Option<&FileRef> {
        let normalized = path::normalize(path);
        return self
            .files
            .binary_search_by(|f| return f.path().cmp(normalized.as_str()))
            .ok()
            .and_then(|idx| return self.files.get(idx));
    }

    /// True when the catalog holds no files.
    pub fn is_empty(&self) -> bool {
        return self.files.is_empty();
    }

    /// VCS membership: false only for paths listed in the exclusion set.
    pub fn is_under_vcs(&self, file: &FileRef) -> bool {
        return !self.non_vcs.contains(file.path());
    }

    /// Number of known files.
    pub fn len(&self) -> usize {
        return self.files.len();
    }

    /// Exclusion set, sorted.
    pub fn non_vcs_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.non_vcs.iter().map(String::as_str).collect();
        paths.sort_unstable();
        return paths;
    }
}
