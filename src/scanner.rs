use std::borrow::Cow;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::Error;
use crate::link;
use crate::path;
use crate::vcs::VcsRoot;

/// Directory (or worktree file) marking a git checkout.
const GIT_DIR: &str = ".git";

/// How a link was written in the markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[id]: target` reference definition.
    Definition,
    /// `[text](target)` or `![alt](target)`.
    Inline,
    /// `[[Page]]` or `[[Text|Page]]`.
    WikiPage,
}

/// A link found in a markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Syntax the link was written in.
    pub kind: LinkKind,
    /// One-based line number.
    pub line: usize,
    /// Link target, percent-decoded. For wiki links, the text between the brackets.
    pub target: String,
}

/// Compiled link patterns, built once per scan.
pub struct LinkScanner {
    /// `[id]: target` at the start of a line.
    definition: Regex,
    /// `[text](target "title")`, including images.
    inline: Regex,
    /// `[[Page]]`.
    wiki: Regex,
}

impl LinkScanner {
    /// Compile the link patterns.
    ///
    /// # Panics
    ///
    /// Panics if a hardcoded pattern is invalid (compile-time invariant).
    #[allow(clippy::expect_used, reason = "patterns are literals")]
    pub fn new() -> Self {
        return Self {
            definition: Regex::new(r#"^ {0,3}\[[^\]]+\]:\s*(<[^>]*>|\S+)"#).expect("valid regex"),
            inline: Regex::new(r#"\[[^\]]*\]\(\s*(<[^>]*>|[^)\s]+)(?:\s+"[^"]*")?\s*\)"#).expect("valid regex"),
            wiki: Regex::new(r"\[\[([^\[\]]+)\]\]").expect("valid regex"),
        };
    }

    /// Extract every project-local link from markdown content.
    ///
    /// Fenced code blocks are skipped. External URLs and mail links are dropped.
    pub fn extract_links(&self, content: &str) -> Vec<ExtractedLink> {
        let mut links = Vec::new();
        let mut in_fence = false;

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            self.extract_from_line(line, idx.saturating_add(1), &mut links);
        }

        return links;
    }

    /// Extract the links on a single line.
    fn extract_from_line(&self, line: &str, line_no: usize, links: &mut Vec<ExtractedLink>) {
        for cap in self.wiki.captures_iter(line) {
            let body = cap.get(1).map_or("", |m| return m.as_str());
            if !body.trim().is_empty() {
                links.push(ExtractedLink {
                    kind: LinkKind::WikiPage,
                    line: line_no,
                    target: body.to_string(),
                });
            }
        }

        let hrefs = self
            .inline
            .captures_iter(line)
            .map(|cap| return (LinkKind::Inline, cap))
            .chain(self.definition.captures_iter(line).map(|cap| return (LinkKind::Definition, cap)));

        for (kind, cap) in hrefs {
            let raw = cap.get(1).map_or("", |m| return m.as_str());
            if let Some(target) = local_href(raw) {
                links.push(ExtractedLink {
                    kind,
                    line: line_no,
                    target,
                });
            }
        }
    }
}

impl Default for LinkScanner {
    fn default() -> Self {
        return Self::new();
    }
}

/// Clean up a raw href: strip `<...>` and any `?query`, percent-decode, drop external links.
fn local_href(raw: &str) -> Option<String> {
    let unwrapped = raw
        .strip_prefix('<')
        .and_then(|r| return r.strip_suffix('>'))
        .unwrap_or(raw)
        .trim();
    if unwrapped.is_empty() || link::is_external(unwrapped) {
        return None;
    }
    let unwrapped = unwrapped.split_once('?').map_or(unwrapped, |(file, _)| return file);
    let decoded = urlencoding::decode(unwrapped).unwrap_or(Cow::Borrowed(unwrapped));
    return Some(decoded.into_owned());
}

/// Enumerate the files under `root` that the config selects.
/// Paths come back absolute and normalized; `.git` directories are never entered.
///
/// # Errors
///
/// Returns `Error::Io` if a directory cannot be read.
pub fn enumerate(root: &Path, config: &Config) -> Result<Vec<String>, Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| return e.file_name() != GIT_DIR)
    {
        let entry = entry.map_err(|e| return Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_str = path::normalize(&relative.to_string_lossy());
        if !config.should_scan(&relative_str) {
            continue;
        }

        files.push(path::normalize(&entry.path().to_string_lossy()));
    }

    log::debug!("enumerated {} files under {}", files.len(), root.display());
    return Ok(files);
}

/// Find the git checkouts under `root` and read their `origin` remotes.
///
/// Checkouts without an `origin` get an empty remote URL.
///
/// # Errors
///
/// Returns `Error::Io` if a directory or git config cannot be read, or
/// `Error::ParseFailed` if a `.git` file does not point at a git directory.
pub fn discover_roots(root: &Path) -> Result<Vec<VcsRoot>, Error> {
    let mut roots = Vec::new();

    let mut walker = WalkDir::new(root).follow_links(false).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| return Error::Io(e.into()))?;
        if entry.file_name() != GIT_DIR {
            continue;
        }
        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }

        let Some(checkout) = entry.path().parent() else {
            continue;
        };
        let git_dir = resolve_git_dir(entry.path(), checkout)?;
        let remote = read_origin_url(&git_dir.join("config"))?;
        let base_path = path::normalize(&checkout.to_string_lossy());
        log::debug!("discovered repository {base_path} (origin {remote:?})");
        roots.push(VcsRoot::new(remote.as_deref().unwrap_or(""), &base_path));
    }

    return Ok(roots);
}

/// The git directory a `.git` entry stands for: itself, or the target of a
/// `gitdir:` line when it is a file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or `Error::ParseFailed` if
/// it holds no `gitdir:` line.
fn resolve_git_dir(dot_git: &Path, checkout: &Path) -> Result<PathBuf, Error> {
    if dot_git.is_dir() {
        return Ok(dot_git.to_path_buf());
    }
    let content = std::fs::read_to_string(dot_git)?;
    let target = content
        .lines()
        .find_map(|line| return line.strip_prefix("gitdir:"))
        .map(str::trim)
        .ok_or_else(|| {
            return Error::ParseFailed {
                file: dot_git.to_path_buf(),
                reason: "missing `gitdir:` line".to_string(),
            };
        })?;
    return Ok(checkout.join(target));
}

/// Read the `origin` URL from a git config file, if the file and the remote exist.
///
/// # Errors
///
/// Returns `Error::Io` if the file exists but cannot be read.
fn read_origin_url(config_path: &Path) -> Result<Option<String>, Error> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };
    return Ok(origin_url(&content).map(|url| return github_https_url(&url)));
}

/// The `url` of the `[remote "origin"]` section of git config text.
fn origin_url(config: &str) -> Option<String> {
    let mut in_origin = false;
    for line in config.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            let header: String = line.chars().filter(|c| return !c.is_whitespace()).collect();
            in_origin = header == "[remote\"origin\"]";
            continue;
        }
        if !in_origin {
            continue;
        }
        if let Some((key, value)) = line.split_once('=')
            && key.trim() == "url"
        {
            return Some(value.trim().to_string());
        }
    }
    return None;
}

/// Rewrite scp-style GitHub remotes (`git@github.com:o/r.git`) as https URLs.
fn github_https_url(remote: &str) -> String {
    if let Some(rest) = remote.strip_prefix("git@github.com:") {
        return format!("https://github.com/{rest}");
    }
    if let Some(rest) = remote.strip_prefix("ssh://git@github.com/") {
        return format!("https://github.com/{rest}");
    }
    return remote.to_string();
}
