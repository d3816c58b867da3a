//! The project capability consumed by the resolver, its production implementation,
//! and the handle through which refreshed snapshots are published.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::FileCatalog;
use crate::config::Config;
use crate::error::Error;
use crate::fingerprint;
use crate::path;
use crate::scanner;
use crate::types::{FileRef, FileType, Fingerprint};
use crate::vcs::{VcsRoot, VcsRootRegistry};

/// What the resolver needs to know about a project. Hosts supply their own
/// implementation; [`Project`] is the one built from disk.
pub trait ProjectResolver {
    /// Root owning `file`: the most deeply nested repository whose base path prefixes it.
    fn github_repo(&self, file: &FileRef) -> Option<&VcsRoot>;

    /// False when `file` is explicitly excluded from version control.
    fn is_under_vcs(&self, file: &FileRef) -> bool;

    /// Directory the project was opened from.
    fn project_base_path(&self) -> &str;

    /// Known files of the requested types (empty set = all), or `None` while
    /// the file list cannot be produced.
    fn project_file_list(&self, file_types: &HashSet<FileType>) -> Option<Vec<FileRef>>;

    /// Logical project base of the repository owning `file`.
    fn vcs_repo_base_path(&self, file: &FileRef) -> Option<String> {
        return self
            .github_repo(file)
            .map(|root| return root.project_base_path().to_string());
    }

    /// Base path of the repository owning `file`.
    fn vcs_root_base(&self, file: &FileRef) -> Option<String> {
        return self.github_repo(file).map(|root| return root.base_path().to_string());
    }
}

/// Immutable snapshot of a project: base path, repository roots, and file catalog.
#[derive(Debug, Clone)]
pub struct Project {
    /// Normalized project directory.
    base_path: String,
    /// File list; `None` while enumeration has not produced one.
    catalog: Option<FileCatalog>,
    /// Repository roots.
    registry: VcsRootRegistry,
}

impl Project {
    /// Snapshot with a known file list.
    pub fn new(base_path: &str, registry: VcsRootRegistry, catalog: FileCatalog) -> Self {
        return Self {
            base_path: path::normalize(base_path),
            catalog: Some(catalog),
            registry,
        };
    }

    /// Snapshot whose file list is not available yet.
    pub fn unavailable(base_path: &str, registry: VcsRootRegistry) -> Self {
        return Self {
            base_path: path::normalize(base_path),
            catalog: None,
            registry,
        };
    }

    /// Enumerate `root` on disk and build a snapshot.
    ///
    /// Roots come from the config when it declares any, otherwise from the
    /// `.git` entries found under the project.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAProject` if `root` is not a readable directory,
    /// or `Error::Io` if enumeration or root discovery fails.
    pub fn load(root: &Path, config: &Config) -> Result<Self, Error> {
        let canonical = root
            .canonicalize()
            .ok()
            .filter(|p| return p.is_dir())
            .ok_or_else(|| return Error::NotAProject { path: root.to_path_buf() })?;
        let base_path = path::normalize(&canonical.to_string_lossy());

        let roots = if config.roots().is_empty() {
            scanner::discover_roots(&canonical)?
        } else {
            config.vcs_roots(&base_path)
        };

        let files = scanner::enumerate(&canonical, config)?;
        let catalog = FileCatalog::new(
            files.iter().map(|p| return FileRef::new(p)),
            config.non_vcs_paths(&base_path),
        );

        log::info!(
            "loaded {} files and {} roots from {base_path}",
            catalog.len(),
            roots.len()
        );
        return Ok(Self::new(&base_path, VcsRootRegistry::new(roots), catalog));
    }

    /// Project directory.
    pub fn base_path(&self) -> &str {
        return &self.base_path;
    }

    /// File catalog, when available.
    pub const fn catalog(&self) -> Option<&FileCatalog> {
        return self.catalog.as_ref();
    }

    /// Digest of roots, files, and exclusions.
    pub fn fingerprint(&self) -> Fingerprint {
        return fingerprint::fingerprint(self);
    }

    /// Repository roots.
    pub const fn registry(&self) -> &VcsRootRegistry {
        return &self.registry;
    }
}

impl ProjectResolver for Project {
    fn github_repo(&self, file: &FileRef) -> Option<&VcsRoot> {
        return self.registry.root_for(file.path());
    }

    fn is_under_vcs(&self, file: &FileRef) -> bool {
        return self.catalog.as_ref().is_none_or(|c| return c.is_under_vcs(file));
    }

    fn project_base_path(&self) -> &str {
        return &self.base_path;
    }

    fn project_file_list(&self, file_types: &HashSet<FileType>) -> Option<Vec<FileRef>> {
        return self.catalog.as_ref().map(|c| return c.file_list(file_types));
    }
}

/// Shared holder of the current snapshot.
///
/// Readers take an `Arc` and keep it for the whole resolution; a refresh swaps
/// in a new snapshot without touching the one readers hold.
#[derive(Debug)]
pub struct ProjectHandle {
    /// The published snapshot.
    current: RwLock<Arc<Project>>,
}

impl ProjectHandle {
    /// Publish an initial snapshot.
    pub fn new(project: Project) -> Self {
        return Self {
            current: RwLock::new(Arc::new(project)),
        };
    }

    /// Replace the snapshot. Returns `false`, keeping the current snapshot,
    /// when the new one has the same fingerprint.
    pub fn publish(&self, project: Project) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.fingerprint() == project.fingerprint() {
            log::debug!("snapshot unchanged, not republished");
            return false;
        }
        *current = Arc::new(project);
        log::debug!("published new snapshot");
        return true;
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Project> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        return Arc::clone(&current);
    }
}
