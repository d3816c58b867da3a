//! CLI commands for wikiref: resolve, check, files, roots.

use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use wikiref::config::Config;
use wikiref::error::Error;
use wikiref::link;
use wikiref::path;
use wikiref::project::{Project, ProjectResolver as _};
use wikiref::resolver::{LinkMatch, LinkResolver, Outcome, Resolution, Scope};
use wikiref::scanner::{ExtractedLink, LinkKind, LinkScanner};
use wikiref::types::{FileRef, FileType};

/// Output format shared by `resolve` and `check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document on stdout.
    Json,
    /// Human-readable lines.
    #[default]
    Text,
}

/// Category of a `check` finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum FindingKind {
    /// Several files match.
    Ambiguous,
    /// Nothing matches.
    Broken,
    /// The only match is not under version control.
    NonVcs,
}

impl FindingKind {
    /// Fixed-width label for text output.
    const fn label(self) -> &'static str {
        return match self {
            Self::Ambiguous => "AMBIGUOUS",
            Self::Broken => "BROKEN   ",
            Self::NonVcs => "NON-VCS  ",
        };
    }
}

/// One problem found by `check`.
#[derive(Debug, Clone, Serialize)]
struct Finding {
    /// Candidates, suggestion, or other context.
    detail: Option<String>,
    /// Problem category.
    kind: FindingKind,
    /// Syntax the link was written in.
    link_kind: LinkKind,
    /// One-based line of the link.
    line: usize,
    /// Source file, relative to the project.
    source: String,
    /// Link text as written.
    target: String,
}

/// A markdown file `check` could not read; its links are skipped.
#[derive(Debug, Clone, Serialize)]
struct Unreadable {
    /// Read error as reported by the OS.
    error: String,
    /// Source file, relative to the project.
    source: String,
}

/// JSON shape of a `check` run.
#[derive(Serialize)]
struct CheckReport<'a> {
    /// Number of links examined.
    checked: usize,
    /// Every problem found.
    findings: &'a [Finding],
    /// Files skipped because they could not be read.
    unreadable: &'a [Unreadable],
}

/// JSON shape of one match.
#[derive(Serialize)]
struct MatchJson {
    /// Anchor split off the link, if any.
    anchor: Option<String>,
    /// True when the target is a wiki page.
    in_wiki: bool,
    /// Link text reaching the target from the source file.
    link_ref: String,
    /// Target path relative to the project.
    path: String,
    /// False for files excluded from version control.
    under_vcs: bool,
    /// Published GitHub URL.
    url: Option<String>,
}

/// JSON shape of a `resolve` run.
#[derive(Serialize)]
struct ResolveJson {
    /// True when the matches came from the wiki's enclosing repository.
    fell_back: bool,
    /// Link text as given.
    link: String,
    /// Candidate targets.
    matches: Vec<MatchJson>,
    /// `no_match`, `unique`, or `ambiguous`.
    outcome: &'static str,
    /// Repository searched, relative to the project; `None` when indeterminate.
    scope: Option<String>,
}

/// Load the config and a project snapshot from `root`.
///
/// # Errors
///
/// Returns errors from config loading or project enumeration.
pub fn load_project(root: &Path) -> Result<(Config, Project), Error> {
    let config = Config::load(root)?;
    let project = Project::load(root, &config)?;
    return Ok((config, project));
}

/// Resolve one link written in `from` and print the candidates.
/// Exit code: 0 unique, 1 ambiguous, 2 no match.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `from` does not exist, or errors from
/// project loading and resolution.
pub fn resolve(root: &Path, link_text: &str, from: &Path, wiki: bool, format: OutputFormat) -> Result<ExitCode, Error> {
    let (config, project) = load_project(root)?;
    let source = source_ref(from)?;
    let resolver = LinkResolver::with_options(&project, config.resolve_options());

    let resolution = if wiki {
        resolver.resolve_wiki_ref(link_text, &source)?
    } else {
        resolver.resolve(link_text, &source)?
    };

    match format {
        OutputFormat::Json => print_resolution_json(&project, &resolution),
        OutputFormat::Text => print_resolution_text(&project, &resolution),
    }

    return Ok(match resolution.outcome() {
        Outcome::Ambiguous => ExitCode::from(1),
        Outcome::NoMatch => ExitCode::from(2),
        Outcome::Unique => ExitCode::SUCCESS,
    });
}

/// Check every link in every markdown file of the project.
///
/// # Errors
///
/// Returns errors from project loading, file reading, or resolution.
pub fn check(root: &Path, format: OutputFormat) -> Result<ExitCode, Error> {
    let (config, project) = load_project(root)?;
    return check_project(&config, &project, format);
}

/// Check every link against an already loaded snapshot.
/// Exit code priority: broken (2) > warnings (1) > clean (0). A markdown file
/// that cannot be read is reported as a warning and the run continues.
///
/// # Errors
///
/// Returns `Error::CatalogUnavailable` if the snapshot has no file list.
pub fn check_project(config: &Config, project: &Project, format: OutputFormat) -> Result<ExitCode, Error> {
    let markdown = project
        .project_file_list(&HashSet::from([FileType::Markdown]))
        .ok_or_else(|| {
            return Error::CatalogUnavailable {
                base_path: project.base_path().to_string(),
            };
        })?;

    let scanner = LinkScanner::new();
    let resolver = LinkResolver::with_options(project, config.resolve_options());
    let mut findings: Vec<Finding> = Vec::new();
    let mut unreadable: Vec<Unreadable> = Vec::new();
    let mut checked = 0_usize;

    for source in &markdown {
        let content = match std::fs::read_to_string(source.path()) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("skipping {source}: {e}");
                unreadable.push(Unreadable {
                    error: e.to_string(),
                    source: display_path(project, source.path()),
                });
                continue;
            },
        };
        for extracted in scanner.extract_links(&content) {
            if extracted.target.ends_with(path::SEPARATOR) {
                continue;
            }
            checked = checked.saturating_add(1);
            if let Some(finding) = check_link(&resolver, project, source, &extracted)? {
                findings.push(finding);
            }
        }
    }

    let broken = findings.iter().filter(|f| return f.kind == FindingKind::Broken).count();
    let warnings = findings
        .len()
        .saturating_sub(broken)
        .saturating_add(unreadable.len());

    match format {
        OutputFormat::Json => {
            let report = CheckReport {
                checked,
                findings: &findings,
                unreadable: &unreadable,
            };
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        },
        OutputFormat::Text => print_findings_text(&findings, &unreadable, checked, broken, warnings),
    }

    if broken > 0 {
        return Ok(ExitCode::from(2));
    } else if warnings > 0 {
        return Ok(ExitCode::from(1));
    } else {
        return Ok(ExitCode::SUCCESS);
    }
}

/// Resolve one extracted link and turn a problem into a finding.
///
/// # Errors
///
/// Returns resolution errors.
fn check_link(
    resolver: &LinkResolver<'_, Project>,
    project: &Project,
    source: &FileRef,
    extracted: &ExtractedLink,
) -> Result<Option<Finding>, Error> {
    let resolution = match extracted.kind {
        LinkKind::WikiPage => resolver.resolve_wiki_ref(&extracted.target, source)?,
        LinkKind::Definition | LinkKind::Inline => resolver.resolve(&extracted.target, source)?,
    };

    let (kind, detail) = match resolution.outcome() {
        Outcome::Ambiguous => {
            let candidates: Vec<String> = resolution
                .matches
                .iter()
                .map(|m| return display_path(project, m.file.path()))
                .collect();
            (FindingKind::Ambiguous, Some(candidates.join(", ")))
        },
        Outcome::NoMatch => (FindingKind::Broken, suggest(resolver, source, extracted)?),
        Outcome::Unique => {
            if resolution.matches.iter().all(|m| return m.under_vcs) {
                return Ok(None);
            }
            (FindingKind::NonVcs, None)
        },
    };

    return Ok(Some(Finding {
        detail,
        kind,
        link_kind: extracted.kind,
        line: extracted.line,
        source: display_path(project, source.path()),
        target: extracted.target.clone(),
    }));
}

/// Look for a markdown page with the same name elsewhere in the source's
/// repository and return the link that would reach it.
///
/// # Errors
///
/// Returns resolution errors.
fn suggest(
    resolver: &LinkResolver<'_, Project>,
    source: &FileRef,
    extracted: &ExtractedLink,
) -> Result<Option<String>, Error> {
    if extracted.kind == LinkKind::WikiPage {
        return Ok(None);
    }
    let without_anchor = link::split_anchor(&extracted.target).map_or(extracted.target.as_str(), |(head, _)| return head);
    let name = path::split_file_name(path::file_name(without_anchor)).name_no_ext;
    if name.is_empty() {
        return Ok(None);
    }

    let pages = resolver.resolve_wiki_ref(&name, source)?;
    return Ok(pages
        .matches
        .first()
        .map(|m| return format!("did you mean `{}`?", path::relative_to(source.dir(), m.file.path()))));
}

/// List the known files, optionally restricted to some types.
///
/// # Errors
///
/// Returns errors from project loading.
pub fn files(root: &Path, file_types: &HashSet<FileType>) -> Result<(), Error> {
    let (_, project) = load_project(root)?;
    let listed = project.project_file_list(file_types).ok_or_else(|| {
        return Error::CatalogUnavailable {
            base_path: project.base_path().to_string(),
        };
    })?;

    for file in &listed {
        let marker = if project.is_under_vcs(file) { "" } else { "  (non-vcs)" };
        println!("{}{marker}", display_path(&project, file.path()));
    }
    eprintln!("{} files", listed.len());
    return Ok(());
}

/// Print the repository roots, most nested first.
///
/// # Errors
///
/// Returns errors from project loading.
pub fn roots(root: &Path) -> Result<(), Error> {
    let (_, project) = load_project(root)?;
    if project.registry().is_empty() {
        println!("No repositories found.");
        return Ok(());
    }

    for vcs_root in project.registry().roots() {
        let kind = if vcs_root.is_wiki() { "wiki" } else { "main" };
        let remote = if vcs_root.remote_url().is_empty() {
            "(no remote)"
        } else {
            vcs_root.remote_url()
        };
        println!("{kind}  {}  {remote}", display_path(&project, vcs_root.base_path()));
    }
    return Ok(());
}

/// Canonical `FileRef` for a source path given on the command line.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the path does not exist.
fn source_ref(from: &Path) -> Result<FileRef, Error> {
    let canonical = from.canonicalize().map_err(|_err| {
        return Error::FileNotFound {
            path: from.to_path_buf(),
        };
    })?;
    return Ok(FileRef::new(&canonical.to_string_lossy()));
}

/// Path relative to the project directory, `.` for the directory itself.
fn display_path(project: &Project, file: &str) -> String {
    let relative = path::relative_to(project.base_path(), file);
    if relative.is_empty() {
        return ".".to_string();
    }
    return relative;
}

/// Text rendering of a resolution.
fn print_resolution_text(project: &Project, resolution: &Resolution) {
    if resolution.matches.is_empty() {
        println!("no match for `{}`", resolution.link_text);
        return;
    }
    if resolution.fell_back {
        println!("(no match in the wiki, resolved in the main repository)");
    }
    for m in &resolution.matches {
        let mut flags = Vec::new();
        if m.in_wiki {
            flags.push("wiki");
        }
        if !m.under_vcs {
            flags.push("non-vcs");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        };
        let anchor = m.anchor.as_deref().map(|a| return format!("#{a}")).unwrap_or_default();
        println!("{}{anchor}{flags}", display_path(project, m.file.path()));
        if let Some(url) = m.target_url() {
            println!("    {url}");
        }
    }
}

/// JSON rendering of a resolution.
fn print_resolution_json(project: &Project, resolution: &Resolution) {
    let outcome = match resolution.outcome() {
        Outcome::Ambiguous => "ambiguous",
        Outcome::NoMatch => "no_match",
        Outcome::Unique => "unique",
    };
    let scope = match &resolution.scope {
        Scope::Indeterminate => None,
        Scope::Root(root) => Some(display_path(project, root.base_path())),
    };
    let report = ResolveJson {
        fell_back: resolution.fell_back,
        link: resolution.link_text.clone(),
        matches: resolution.matches.iter().map(|m| return match_json(project, m)).collect(),
        outcome,
        scope,
    };
    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
}

/// JSON shape of one match.
fn match_json(project: &Project, m: &LinkMatch) -> MatchJson {
    return MatchJson {
        anchor: m.anchor.clone(),
        in_wiki: m.in_wiki,
        link_ref: m.link_ref.clone(),
        path: display_path(project, m.file.path()),
        under_vcs: m.under_vcs,
        url: m.target_url(),
    };
}

/// Text rendering of `check` findings plus the summary line.
fn print_findings_text(findings: &[Finding], unreadable: &[Unreadable], checked: usize, broken: usize, warnings: usize) {
    for skipped in unreadable {
        println!("UNREADABLE  {}  ({})", skipped.source, skipped.error);
    }
    for finding in findings {
        let detail = finding.detail.as_deref().map(|d| return format!("  ({d})")).unwrap_or_default();
        println!(
            "{}  {}:{}  {}{detail}",
            finding.kind.label(),
            finding.source,
            finding.line,
            finding.target
        );
    }

    if !findings.is_empty() || !unreadable.is_empty() {
        println!();
    }
    if broken > 0 || warnings > 0 {
        println!("{broken} broken, {warnings} warnings");
    } else {
        println!("All {checked} links resolve");
    }
}
