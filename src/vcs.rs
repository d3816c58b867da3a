//! Repository roots and the registry that decides which root owns a path.
//!
//! A project can straddle several repositories: the main checkout and a GitHub
//! wiki cloned inside it (`Project/Project.wiki`). The wiki's base path is a
//! prefix-descendant of the main base path, so lookups must always try the
//! most deeply nested root first.

use crate::path;
use crate::types::FileRef;

/// Suffix that marks a GitHub wiki checkout directory.
const WIKI_DIR_SUFFIX: &str = ".wiki";

/// Branch used when rendering blob URLs for files in a main repository.
const DEFAULT_BRANCH: &str = "master";

/// One version-controlled repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VcsRoot {
    /// Normalized local directory of the checkout, no trailing separator.
    base_path: String,
    /// Remote repository URL, trailing `/` and `.git` removed.
    remote_url: String,
}

impl VcsRoot {
    /// Create a root. The base path is normalized; the remote URL is trimmed.
    pub fn new(remote_url: &str, base_path: &str) -> Self {
        let trimmed = remote_url.trim().trim_end_matches('/');
        let remote_url = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        return Self {
            base_path: path::normalize(base_path),
            remote_url: remote_url.to_string(),
        };
    }

    /// Local checkout directory.
    pub fn base_path(&self) -> &str {
        return &self.base_path;
    }

    /// True when `path` is this root's base path or lies beneath it.
    pub fn contains(&self, path: &str) -> bool {
        return path::is_under(path, &self.base_path);
    }

    /// True for GitHub wiki checkouts (`*.wiki` directories).
    pub fn is_wiki(&self) -> bool {
        return path::file_name(&self.base_path).ends_with(WIKI_DIR_SUFFIX);
    }

    /// Logical project base: the directory holding the wiki checkout for a
    /// wiki root, the base path itself otherwise.
    pub fn project_base_path(&self) -> &str {
        if self.is_wiki() {
            return path::parent(&self.base_path);
        }
        return &self.base_path;
    }

    /// Path of `file` relative to this root, when the root contains it.
    pub fn relative_path<'a>(&self, file: &'a str) -> Option<&'a str> {
        if !self.contains(file) {
            return None;
        }
        let rest = file.get(self.base_path.len()..).unwrap_or("");
        return Some(rest.trim_start_matches(path::SEPARATOR));
    }

    /// Remote repository URL.
    pub fn remote_url(&self) -> &str {
        return &self.remote_url;
    }

    /// GitHub URL at which `file` is published, if this root owns it.
    /// Wiki pages map to `{remote}/wiki/{Page}`, everything else to a blob URL.
    pub fn target_url(&self, file: &FileRef) -> Option<String> {
        if self.remote_url.is_empty() {
            return None;
        }
        let relative = self.relative_path(file.path())?;

        if self.is_wiki() {
            let page = if file.is_markdown() {
                file.name_no_ext().replace(' ', "-")
            } else {
                relative.to_string()
            };
            return Some(format!("{}/wiki/{}", self.remote_url, encode_segments(&page)));
        }

        return Some(format!(
            "{}/blob/{DEFAULT_BRANCH}/{}",
            self.remote_url,
            encode_segments(relative)
        ));
    }
}

/// Percent-encode each path segment, keeping the separators.
fn encode_segments(relative: &str) -> String {
    return relative
        .split(path::SEPARATOR)
        .map(|segment| return urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
}

/// The set of known repository roots, ordered most-nested first.
#[derive(Debug, Clone, Default)]
pub struct VcsRootRegistry {
    /// Roots sorted by base-path length descending, then by base path.
    roots: Vec<VcsRoot>,
}

impl VcsRootRegistry {
    /// Build a registry. Declaration order does not matter: roots are sorted so
    /// that a nested root is always checked before the root that encloses it.
    /// Duplicate base paths keep the first declaration.
    pub fn new(roots: Vec<VcsRoot>) -> Self {
        let mut unique: Vec<VcsRoot> = Vec::with_capacity(roots.len());
        for root in roots {
            if !unique.iter().any(|r| return r.base_path == root.base_path) {
                unique.push(root);
            }
        }
        unique.sort_by(|a, b| {
            return b
                .base_path
                .len()
                .cmp(&a.base_path.len())
                .then_with(|| return a.base_path.cmp(&b.base_path));
        });
        return Self { roots: unique };
    }

    /// The nearest root enclosing `root` itself: the main repository of a wiki.
    pub fn enclosing_root(&self, root: &VcsRoot) -> Option<&VcsRoot> {
        return self
            .roots
            .iter()
            .find(|r| return r.base_path != root.base_path && r.contains(&root.base_path));
    }

    /// True when no roots are registered.
    pub fn is_empty(&self) -> bool {
        return self.roots.is_empty();
    }

    /// Number of registered roots.
    pub fn len(&self) -> usize {
        return self.roots.len();
    }

    /// Owning root of `path`: the most deeply nested root whose base path prefixes it.
    pub fn root_for(&self, path: &str) -> Option<&VcsRoot> {
        let normalized = path::normalize(path);
        let owner = self.roots.iter().find(|root| return root.contains(&normalized));
        log::debug!(
            "root_for {normalized}: {}",
            owner.map_or("<none>", |r| return r.base_path())
        );
        return owner;
    }

    /// Registered roots, most nested first.
    pub fn roots(&self) -> &[VcsRoot] {
        return &self.roots;
    }

    /// Logical project base path of the root owning `file`.
    pub fn vcs_repo_base_path(&self, file: &FileRef) -> Option<&str> {
        return self.root_for(file.path()).map(VcsRoot::project_base_path);
    }

    /// Base path of the root owning `file`.
    pub fn vcs_root_base_path(&self, file: &FileRef) -> Option<&str> {
        return self.root_for(file.path()).map(VcsRoot::base_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOTE: &str = "https://github.com/vsch/MarkdownTest";
    const MAIN: &str = "/Users/vlad/src/MarkdownTest";
    const WIKI: &str = "/Users/vlad/src/MarkdownTest/MarkdownTest.wiki";

    fn registry_main_first() -> VcsRootRegistry {
        return VcsRootRegistry::new(vec![VcsRoot::new(REMOTE, MAIN), VcsRoot::new(REMOTE, WIKI)]);
    }

    #[test]
    fn nested_root_wins_regardless_of_declaration_order() {
        let registry = registry_main_first();
        let owner = registry.root_for(&format!("{WIKI}/Home.md"));
        assert_eq!(owner.map(VcsRoot::base_path), Some(WIKI));
    }

    #[test]
    fn sibling_with_shared_prefix_is_not_owned() {
        let registry = VcsRootRegistry::new(vec![VcsRoot::new(REMOTE, "/a/b")]);
        assert!(registry.root_for("/a/bc/file.md").is_none());
        assert!(registry.root_for("/a/b/file.md").is_some());
    }

    #[test]
    fn unknown_path_has_no_root() {
        assert!(registry_main_first().root_for("/elsewhere/Readme.md").is_none());
    }

    #[test]
    fn derived_base_paths() {
        let registry = registry_main_first();
        let wiki_page = FileRef::new(&format!("{WIKI}/Home.md"));
        assert_eq!(registry.vcs_root_base_path(&wiki_page), Some(WIKI));
        assert_eq!(registry.vcs_repo_base_path(&wiki_page), Some(MAIN));

        let main_file = FileRef::new(&format!("{MAIN}/Readme.md"));
        assert_eq!(registry.vcs_root_base_path(&main_file), Some(MAIN));
        assert_eq!(registry.vcs_repo_base_path(&main_file), Some(MAIN));
    }

    #[test]
    fn enclosing_root_of_wiki_is_main() {
        let registry = registry_main_first();
        let wiki = VcsRoot::new(REMOTE, WIKI);
        assert_eq!(registry.enclosing_root(&wiki).map(VcsRoot::base_path), Some(MAIN));
        let main = VcsRoot::new(REMOTE, MAIN);
        assert!(registry.enclosing_root(&main).is_none());
    }

    #[test]
    fn target_urls() {
        let wiki = VcsRoot::new(&format!("{REMOTE}.git"), WIKI);
        let page = FileRef::new(&format!("{WIKI}/Space In Name.md"));
        assert_eq!(
            wiki.target_url(&page).as_deref(),
            Some("https://github.com/vsch/MarkdownTest/wiki/Space-In-Name")
        );

        let main = VcsRoot::new(REMOTE, MAIN);
        let nested = FileRef::new(&format!("{MAIN}/SubDirectory/NestedFile.md"));
        assert_eq!(
            main.target_url(&nested).as_deref(),
            Some("https://github.com/vsch/MarkdownTest/blob/master/SubDirectory/NestedFile.md")
        );
    }
}
