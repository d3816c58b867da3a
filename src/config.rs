use std::path::Path;

use crate::error::Error;
use crate::path;
use crate::resolver::ResolveOptions;
use crate::vcs::VcsRoot;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = ".wikiref.toml";

/// Project configuration loaded from `.wikiref.toml`.
/// Include/exclude patterns are path prefixes applied during enumeration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    exclude: Vec<String>,
    include: Vec<String>,
    non_vcs: Vec<String>,
    resolve: ResolveOptions,
    roots: Vec<RootEntry>,
}

/// One `[[roots]]` table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RootEntry {
    /// Checkout directory, relative to the project root or absolute.
    pub base_path: String,
    /// Remote repository URL; empty when the checkout has no remote.
    #[serde(default)]
    pub remote_url: String,
}

/// Raw TOML structure for `.wikiref.toml`.
#[derive(serde::Deserialize)]
struct WikirefTomlConfig {
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    non_vcs: Vec<String>,
    #[serde(default)]
    resolve: ResolveOptions,
    #[serde(default)]
    roots: Vec<RootEntry>,
}

impl Config {
    /// Load config from `.wikiref.toml` in the given root directory.
    /// Returns a default that scans everything if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {CONFIG_FILE} in {}, using defaults", root.display());
                return Ok(Self::default());
            },
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: WikirefTomlConfig = toml::from_str(&content)?;
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            non_vcs: raw.non_vcs,
            resolve: raw.resolve,
            roots: raw.roots,
        });
    }

    /// Non-VCS paths, resolved against `base_path`.
    pub fn non_vcs_paths(&self, base_path: &str) -> Vec<String> {
        return self
            .non_vcs
            .iter()
            .map(|p| return path::join(base_path, p))
            .collect();
    }

    /// Resolution options from the `[resolve]` table.
    pub const fn resolve_options(&self) -> ResolveOptions {
        return self.resolve;
    }

    /// Declared `[[roots]]`, in file order.
    pub fn roots(&self) -> &[RootEntry] {
        return &self.roots;
    }

    /// Check whether a project-relative path should be enumerated.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self
            .exclude
            .iter()
            .any(|p| return relative_path.starts_with(p.as_str()));
    }

    /// Declared roots with base paths resolved against `base_path`.
    pub fn vcs_roots(&self, base_path: &str) -> Vec<VcsRoot> {
        return self
            .roots
            .iter()
            .map(|entry| return VcsRoot::new(&entry.remote_url, &path::join(base_path, &entry.base_path)))
            .collect();
    }
}
