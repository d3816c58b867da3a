use wikiref::config::CONFIG_FILE;
use wikiref::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::CatalogUnavailable { base_path } => render_catalog_unavailable(base_path),
        Error::NotAProject { path } => render_not_a_project(&path.display().to_string()),
        Error::TomlDe(err) => render_invalid_config(&err.to_string()),
        Error::UnknownExclusion { path } => render_unknown_exclusion(path),
        Error::FileNotFound { .. } | Error::Io(_) | Error::ParseFailed { .. } | Error::Watch { .. } => {
            render_generic(e)
        },
    };
}

fn render_generic(e: &Error) -> String {
    return match e {
        Error::FileNotFound { path } => format!(
            "\
# Error: File Not Found

`{}` does not exist.

## Fix

Pass the markdown file the link is written in:

    wikiref resolve <LINK> --from path/to/Page.md
",
            path.display()
        ),

        Error::ParseFailed { file, reason } => format!(
            "\
# Error: Parse Failed

Could not parse `{}`: {reason}
",
            file.display()
        ),

        Error::Io(err) => format!(
            "\
# Error: I/O

{err}
"
        ),

        Error::Watch { reason } => format!(
            "\
# Error: Watch Failed

{reason}
"
        ),

        _ => format!(
            "\
# Error

{e}
"
        ),
    };
}

fn render_catalog_unavailable(base_path: &str) -> String {
    return format!(
        "\
# Error: File Catalog Unavailable

The file list of `{base_path}` could not be produced, so links cannot be
resolved yet. This is different from a project with no files.

## Fix

Retry once the project has been enumerated.
"
    );
}

fn render_not_a_project(path: &str) -> String {
    return format!(
        "\
# Error: Not A Project

`{path}` is not a readable directory.

## Fix

Run wikiref from the project directory, or pass it explicitly:

    wikiref --root path/to/project check
"
    );
}

fn render_invalid_config(reason: &str) -> String {
    return format!(
        "\
# Error: Invalid Config

`{CONFIG_FILE}` exists but could not be read:

{reason}

## Fix

Correct the file, or delete it to fall back to defaults.
"
    );
}

fn render_unknown_exclusion(path: &str) -> String {
    return format!(
        "\
# Error: Not Excluded

`{path}` is not listed in `non_vcs` in `{CONFIG_FILE}`.

## Fix

List the current exclusions:

    wikiref exclude list
"
    );
}
