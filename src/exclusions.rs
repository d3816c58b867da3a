//! `exclude` subcommands: edit the `non_vcs` list of `.wikiref.toml` in place.

use std::path::{Path, PathBuf};

use wikiref::config::{CONFIG_FILE, Config};
use wikiref::error::Error;
use wikiref::path;

/// Key of the exclusion array in the config file.
const NON_VCS_KEY: &str = "non_vcs";

// ── CLI commands ──────────────────────────────────────────────────────

/// List the files marked as not under version control.
///
/// # Errors
///
/// Returns errors from config loading.
pub fn cmd_list(root: &Path) -> Result<(), Error> {
    let config = Config::load(root)?;
    let mut excluded = config.non_vcs_paths("");
    if excluded.is_empty() {
        println!("No files excluded from version control.");
        return Ok(());
    }

    excluded.sort();
    for path in excluded {
        println!("{path}");
    }
    return Ok(());
}

/// Mark a file as not under version control.
///
/// # Errors
///
/// Returns errors from config reading or writing.
pub fn cmd_add(root: &Path, file: &str) -> Result<(), Error> {
    let normalized = path::normalize(file);
    if add_to_config(root, &normalized)? {
        println!("Excluded: {normalized}");
    } else {
        println!("Already excluded: {normalized}");
    }
    return Ok(());
}

/// Put a file back under version control.
///
/// # Errors
///
/// Returns `Error::UnknownExclusion` if the file is not listed, or errors
/// from config reading or writing.
pub fn cmd_remove(root: &Path, file: &str) -> Result<(), Error> {
    let normalized = path::normalize(file);
    remove_from_config(root, &normalized)?;
    println!("No longer excluded: {normalized}");
    return Ok(());
}

// ── Config file editing ───────────────────────────────────────────────

/// Parse `.wikiref.toml` into a format-preserving document.
/// Returns an empty document if the file doesn't exist.
///
/// # Errors
///
/// Returns `Error::Io` on read failure or `Error::ParseFailed` on parse failure.
fn read_config_doc(root: &Path) -> Result<(PathBuf, toml_edit::DocumentMut), Error> {
    let config_path = root.join(CONFIG_FILE);
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(Error::Io(e)),
    };

    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        return Error::ParseFailed {
            file: config_path.clone(),
            reason: e.to_string(),
        };
    })?;

    return Ok((config_path, doc));
}

/// The `non_vcs` array, created when missing.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if `non_vcs` exists but is not an array.
fn non_vcs_array<'d>(doc: &'d mut toml_edit::DocumentMut, config_path: &Path) -> Result<&'d mut toml_edit::Array, Error> {
    if !doc.contains_key(NON_VCS_KEY) {
        doc[NON_VCS_KEY] = toml_edit::value(toml_edit::Array::new());
    }
    return doc
        .get_mut(NON_VCS_KEY)
        .and_then(toml_edit::Item::as_array_mut)
        .ok_or_else(|| {
            return Error::ParseFailed {
                file: config_path.to_path_buf(),
                reason: format!("`{NON_VCS_KEY}` must be an array of paths"),
            };
        });
}

/// Append `file` to `non_vcs`. Returns `false` when it is already listed.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the config can't be parsed,
/// or `Error::Io` if writing fails.
fn add_to_config(root: &Path, file: &str) -> Result<bool, Error> {
    let (config_path, mut doc) = read_config_doc(root)?;
    let array = non_vcs_array(&mut doc, &config_path)?;

    if array.iter().any(|v| return v.as_str().is_some_and(|s| return path::normalize(s) == file)) {
        return Ok(false);
    }
    array.push(file);

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(true);
}

/// Remove `file` from `non_vcs`.
///
/// # Errors
///
/// Returns `Error::UnknownExclusion` if the file isn't listed.
fn remove_from_config(root: &Path, file: &str) -> Result<(), Error> {
    let (config_path, mut doc) = read_config_doc(root)?;
    let unknown = || {
        return Error::UnknownExclusion {
            path: file.to_string(),
        };
    };

    let array = doc
        .get_mut(NON_VCS_KEY)
        .and_then(toml_edit::Item::as_array_mut)
        .ok_or_else(unknown)?;
    let position = array
        .iter()
        .position(|v| return v.as_str().is_some_and(|s| return path::normalize(s) == file))
        .ok_or_else(unknown)?;
    array.remove(position);

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(());
}
