use std::collections::HashSet;

use crate::error::Error;
use crate::link::{self, Folding};
use crate::path;
use crate::project::ProjectResolver;
use crate::types::{FileRef, FileType};
use crate::vcs::VcsRoot;

/// Knobs that change how link text is compared with file paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Compare names case-sensitively.
    pub case_sensitive: bool,
    /// Never return the file the link is written in.
    pub exclude_source: bool,
    /// Treat spaces and hyphens as the same character.
    pub space_dash_equivalent: bool,
    /// Let a wiki page fall back to its enclosing repository when nothing in the wiki matches.
    pub wiki_fallback: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        return Self {
            case_sensitive: false,
            exclude_source: false,
            space_dash_equivalent: true,
            wiki_fallback: false,
        };
    }
}

impl ResolveOptions {
    /// Folding used for link references.
    const fn link_folding(self) -> Folding {
        return Folding {
            case_sensitive: self.case_sensitive,
            space_dash_equivalent: self.space_dash_equivalent,
        };
    }

    /// Folding used for wiki page references: spaces and hyphens always match.
    const fn wiki_folding(self) -> Folding {
        return Folding {
            case_sensitive: self.case_sensitive,
            space_dash_equivalent: true,
        };
    }
}

/// Which files a resolution was allowed to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The source file belongs to no known repository; the whole catalog was searched.
    Indeterminate,
    /// Candidates were restricted to this repository.
    Root(VcsRoot),
}

/// One candidate target of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Anchor isolated from the link text, if the match needed it removed.
    pub anchor: Option<String>,
    /// The target file.
    pub file: FileRef,
    /// True when the target lives in a wiki repository.
    pub in_wiki: bool,
    /// Link text that reaches the target from the source file.
    pub link_ref: String,
    /// Repository owning the target.
    pub root: Option<VcsRoot>,
    /// False when the target is explicitly excluded from version control.
    pub under_vcs: bool,
}

impl LinkMatch {
    /// GitHub URL of the target, when its repository has a remote.
    pub fn target_url(&self) -> Option<String> {
        return self.root.as_ref().and_then(|root| return root.target_url(&self.file));
    }
}

/// Shape of a resolution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// More than one equally valid candidate.
    Ambiguous,
    /// Nothing matched.
    NoMatch,
    /// Exactly one candidate.
    Unique,
}

/// Result of resolving one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// True when the matches come from the enclosing repository of a wiki.
    pub fell_back: bool,
    /// Link text as given.
    pub link_text: String,
    /// Candidates ordered by path.
    pub matches: Vec<LinkMatch>,
    /// Scope the search ran in.
    pub scope: Scope,
}

impl Resolution {
    /// Empty result for `link_text` searched in the scope of `source_root`.
    fn empty(link_text: &str, source_root: Option<&VcsRoot>) -> Self {
        return Self {
            fell_back: false,
            link_text: link_text.to_string(),
            matches: Vec::new(),
            scope: source_root.map_or(Scope::Indeterminate, |root| return Scope::Root(root.clone())),
        };
    }

    /// Classify the number of matches.
    pub fn outcome(&self) -> Outcome {
        return match self.matches.len() {
            0 => Outcome::NoMatch,
            1 => Outcome::Unique,
            _ => Outcome::Ambiguous,
        };
    }

    /// Target paths in result order.
    pub fn paths(&self) -> Vec<&str> {
        return self.matches.iter().map(|m| return m.file.path()).collect();
    }
}

/// Maps link text written in one file to the files it can refer to.
pub struct LinkResolver<'a, P: ProjectResolver + ?Sized> {
    /// Comparison knobs.
    options: ResolveOptions,
    /// Project snapshot the resolver reads from.
    project: &'a P,
}

impl<'a, P: ProjectResolver + ?Sized> LinkResolver<'a, P> {
    /// Resolver with default options.
    pub fn new(project: &'a P) -> Self {
        return Self::with_options(project, ResolveOptions::default());
    }

    /// Resolver with explicit options.
    pub const fn with_options(project: &'a P, options: ResolveOptions) -> Self {
        return Self { options, project };
    }

    /// Resolve a markdown link target such as `../Readme`, `Page.md#intro`, or `/docs/x.png`.
    ///
    /// The link is interpreted relative to the directory of `from_file`; a leading
    /// `/` makes it relative to the root of the source file's repository. The
    /// literal text is tried first, so file names containing `#` resolve to
    /// themselves; only when nothing matches is a trailing anchor split off.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogUnavailable` if the project cannot produce a file list.
    pub fn resolve(&self, link_text: &str, from_file: &FileRef) -> Result<Resolution, Error> {
        let files = self.file_list(&HashSet::new())?;
        let source_root = self.project.github_repo(from_file);
        let mut resolution = Resolution::empty(link_text, source_root);
        let text = link_text.trim();

        if text.is_empty() {
            return Ok(resolution);
        }
        if let Some(anchor) = text.strip_prefix('#') {
            let link_ref = from_file.file_name().to_string();
            resolution.matches.push(self.build_match(from_file, link_ref, Some(anchor)));
            return Ok(resolution);
        }

        let folding = self.options.link_folding();
        for (pattern, anchor) in literal_then_anchored(text) {
            let target = folding.canonical(&self.link_target(pattern, from_file, source_root));
            let explicit_ext = link::has_explicit_ext(pattern);

            let (found, fell_back) = self.search(&files, from_file, source_root, |file| {
                return folding.canonical(file.path()) == target
                    || (!explicit_ext
                        && file.is_markdown()
                        && file
                            .path_no_ext()
                            .is_some_and(|stem| return folding.canonical(&stem) == target));
            });

            if found.is_empty() {
                continue;
            }
            resolution.fell_back = fell_back;
            resolution.matches = found
                .into_iter()
                .map(|file| {
                    let link_ref = path::relative_to(from_file.dir(), file.path());
                    return self.build_match(file, link_ref, anchor);
                })
                .collect();
            break;
        }

        log::debug!(
            "resolve {text:?} from {from_file}: {} match(es), scope {:?}",
            resolution.matches.len(),
            resolution.scope
        );
        return Ok(resolution);
    }

    /// Resolve a GitHub wiki page reference (`[[Page]]` or `[[Text|Page]]`).
    ///
    /// Wiki pages live in a flat namespace: a page in any subdirectory of the
    /// source's repository is addressable by its name alone. Only markdown
    /// files are candidates and spaces always match hyphens.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogUnavailable` if the project cannot produce a file list.
    pub fn resolve_wiki_ref(&self, page_ref: &str, from_file: &FileRef) -> Result<Resolution, Error> {
        let files = self.file_list(&HashSet::from([FileType::Markdown]))?;
        let source_root = self.project.github_repo(from_file);
        let mut resolution = Resolution::empty(page_ref, source_root);
        let text = link::wiki_link_page(page_ref);

        if text.is_empty() {
            return Ok(resolution);
        }
        if let Some(anchor) = text.strip_prefix('#') {
            let link_ref = from_file.name_no_ext().to_string();
            resolution.matches.push(self.build_match(from_file, link_ref, Some(anchor)));
            return Ok(resolution);
        }

        let folding = self.options.wiki_folding();
        for (pattern, anchor) in literal_then_anchored(text) {
            let name = path::file_name(pattern);
            let parts = path::split_file_name(name);
            let markdown_ext = FileType::from_ext(parts.ext.as_deref()) == FileType::Markdown;
            let wanted = folding.canonical(name);

            let (found, fell_back) = self.search(&files, from_file, source_root, |file| {
                return file.is_markdown()
                    && (file.stem().is_some_and(|stem| return folding.canonical(stem) == wanted)
                        || (markdown_ext && folding.canonical(file.file_name()) == wanted));
            });

            if found.is_empty() {
                continue;
            }
            resolution.fell_back = fell_back;
            resolution.matches = found
                .into_iter()
                .map(|file| return self.build_match(file, file.name_no_ext().to_string(), anchor))
                .collect();
            break;
        }

        log::debug!(
            "resolve wiki page {text:?} from {from_file}: {} match(es)",
            resolution.matches.len()
        );
        return Ok(resolution);
    }

    /// Tag a target with its repository and VCS status.
    fn build_match(&self, file: &FileRef, link_ref: String, anchor: Option<&str>) -> LinkMatch {
        let root = self.project.github_repo(file).cloned();
        return LinkMatch {
            anchor: anchor.map(str::to_string),
            file: file.clone(),
            in_wiki: root.as_ref().is_some_and(VcsRoot::is_wiki),
            link_ref,
            root,
            under_vcs: self.project.is_under_vcs(file),
        };
    }

    /// Repository enclosing `root`, looked up through the capability.
    fn enclosing_root(&self, root: &VcsRoot) -> Option<&'a VcsRoot> {
        let outside = FileRef::new(path::parent(root.base_path()));
        return self
            .project
            .github_repo(&outside)
            .filter(|enclosing| return *enclosing != root);
    }

    /// Fetch the catalog, distinguishing "no files" from "no catalog".
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogUnavailable` when the project has no file list.
    fn file_list(&self, file_types: &HashSet<FileType>) -> Result<Vec<FileRef>, Error> {
        return self.project.project_file_list(file_types).ok_or_else(|| {
            return Error::CatalogUnavailable {
                base_path: self.project.project_base_path().to_string(),
            };
        });
    }

    /// Absolute path a link points at, before any extension inference.
    fn link_target(&self, pattern: &str, from_file: &FileRef, source_root: Option<&VcsRoot>) -> String {
        if let Some(rooted) = pattern.strip_prefix(path::SEPARATOR) {
            let base = source_root.map_or(self.project.project_base_path(), VcsRoot::base_path);
            return path::join(base, rooted);
        }
        return path::join(from_file.dir(), pattern);
    }

    /// Owner test for scoping: `None` scope accepts everything.
    fn owned_by(&self, file: &FileRef, root: Option<&VcsRoot>) -> bool {
        let Some(root) = root else {
            return true;
        };
        return self.project.github_repo(file).is_some_and(|owner| return owner == root);
    }

    /// Run `accept` over the files in the source's scope, then, for a wiki
    /// source with fallback enabled, over its enclosing repository.
    /// Returns the matches sorted by path and whether the fallback produced them.
    fn search<'f>(
        &self,
        files: &'f [FileRef],
        from_file: &FileRef,
        source_root: Option<&VcsRoot>,
        accept: impl Fn(&FileRef) -> bool,
    ) -> (Vec<&'f FileRef>, bool) {
        let pick = |scope: Option<&VcsRoot>| -> Vec<&'f FileRef> {
            let mut found: Vec<&'f FileRef> = files
                .iter()
                .filter(|file| return !(self.options.exclude_source && *file == from_file))
                .filter(|file| return self.owned_by(*file, scope))
                .filter(|file| return accept(*file))
                .collect();
            found.sort_by(|a, b| return a.path().cmp(b.path()));
            found.dedup_by(|a, b| return a.path() == b.path());
            return found;
        };

        let primary = pick(source_root);
        if !primary.is_empty() || !self.options.wiki_fallback {
            return (primary, false);
        }

        let Some(root) = source_root.filter(|r| return r.is_wiki()) else {
            return (primary, false);
        };
        let Some(enclosing) = self.enclosing_root(root) else {
            return (primary, false);
        };
        log::debug!("no match in {}, falling back to {}", root.base_path(), enclosing.base_path());
        return (pick(Some(enclosing)), true);
    }
}

/// The literal text first, then the text with a trailing anchor split off.
fn literal_then_anchored(text: &str) -> Vec<(&str, Option<&str>)> {
    let mut attempts = vec![(text, None)];
    if let Some((head, anchor)) = link::split_anchor(text) {
        attempts.push((head, Some(anchor)));
    }
    return attempts;
}
