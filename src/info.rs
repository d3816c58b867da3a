use std::path::Path;

use serde::Serialize;
use wikiref::config::{CONFIG_FILE, Config};
use wikiref::project::Project;

/// Output the wikiref reference document.
pub fn run(root: &Path, json: bool) {
    let state = gather_state(root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

#[derive(Serialize)]
struct CurrentState {
    config_found: bool,
    files: Option<usize>,
    non_vcs: Option<usize>,
    roots: Vec<RootState>,
}

#[derive(Serialize)]
struct RootState {
    base_path: String,
    remote_url: String,
    wiki: bool,
}

fn gather_state(root: &Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();
    let project = Config::load(root)
        .ok()
        .and_then(|config| return Project::load(root, &config).ok());

    let Some(project) = project else {
        return CurrentState {
            config_found,
            files: None,
            non_vcs: None,
            roots: Vec::new(),
        };
    };

    let roots = project
        .registry()
        .roots()
        .iter()
        .map(|r| {
            return RootState {
                base_path: r.base_path().to_string(),
                remote_url: r.remote_url().to_string(),
                wiki: r.is_wiki(),
            };
        })
        .collect();

    return CurrentState {
        config_found,
        files: project.catalog().map(|c| return c.len()),
        non_vcs: project.catalog().map(|c| return c.non_vcs_paths().len()),
        roots,
    };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# wikiref {version}

Resolve markdown links across a repository and its GitHub wiki checkout.

## Link Syntax

    [text](Page)                  extension inferred (.md, .markdown, .mkd)
    [text](Page.md#section)       anchor split off when the literal name fails
    [text](/docs/Page.md)         relative to the repository root
    [[Page Name]]                 wiki page, flat namespace, spaces = hyphens
    [[Link Text|Page Name]]       wiki page with custom text

## Workflow

    wikiref check                       Verify every link (exit 0/1/2)
    wikiref resolve <LINK> --from <MD>  Show what a link resolves to
    wikiref resolve <PAGE> --from <MD> --wiki
    wikiref files [--type markdown]     List known files
    wikiref roots                       List repository roots
    wikiref exclude add|remove <PATH>   Mark files as not under version control
    wikiref watch                       Re-check on every change

## Configuration ({CONFIG_FILE})

    include = [\"docs/\"]                 # only enumerate these paths
    exclude = [\"target/\"]               # skip these paths
    non_vcs = [\"draft.png\"]             # files not under version control

    [[roots]]                           # omit to discover .git checkouts
    base_path = \".\"
    remote_url = \"https://github.com/owner/Project\"

    [[roots]]
    base_path = \"Project.wiki\"
    remote_url = \"https://github.com/owner/Project\"

    [resolve]
    case_sensitive = false
    space_dash_equivalent = true
    wiki_fallback = false             # let wiki pages link into the main repository
    exclude_source = false

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:  {CONFIG_FILE} (found)");
    } else {
        println!("Config:  {CONFIG_FILE} (not found)");
    }

    match (state.files, state.non_vcs) {
        (Some(files), Some(non_vcs)) => println!("Files:   {files} ({non_vcs} not under version control)"),
        _ => println!("Files:   (project could not be loaded)"),
    }

    if state.roots.is_empty() {
        println!("Roots:   (none)");
    } else {
        for root in &state.roots {
            let kind = if root.wiki { "wiki" } else { "main" };
            println!("Root:    {} ({kind}) {}", root.base_path, root.remote_url);
        }
    }
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success / every link resolves to one tracked file |
| 1    | Warnings: ambiguous links or links to non-VCS files |
| 2    | Broken links found / no match |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson<'a> {
    current_state: &'a CurrentState,
    exit_codes: Vec<ExitCodeInfo>,
    markdown_extensions: Vec<&'static str>,
    version: String,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        current_state: state,
        exit_codes: vec![
            ExitCodeInfo {
                code: 0,
                meaning: "Success / every link resolves to one tracked file".to_string(),
            },
            ExitCodeInfo {
                code: 1,
                meaning: "Warnings: ambiguous links or links to non-VCS files".to_string(),
            },
            ExitCodeInfo {
                code: 2,
                meaning: "Broken links found / no match".to_string(),
            },
            ExitCodeInfo {
                code: 3,
                meaning: "Runtime error".to_string(),
            },
        ],
        markdown_extensions: wikiref::types::MARKDOWN_EXTENSIONS.to_vec(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
