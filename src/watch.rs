//! File watcher: runs `check` on startup, then re-enumerates and re-checks on changes.

use std::path::{Component, Path};
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};
use wikiref::error::Error;
use wikiref::project::{Project, ProjectHandle};

use crate::commands::{self, OutputFormat};
use crate::diagnostics;

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// True when an event path lies inside a `.git` directory.
fn inside_git_dir(path: &Path) -> bool {
    return path
        .components()
        .any(|c| return matches!(c, Component::Normal(name) if name == ".git"));
}

/// Create a filesystem watcher that sends events on the given channel.
/// Changes inside `.git` directories are ignored.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(tx: crossbeam_channel::Sender<()>) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
            )
            && !event.paths.iter().all(|p| return inside_git_dir(p))
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::Watch {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Runs an initial check, then watches the project recursively. Each batch
/// of changes reloads the project; the new snapshot is published through a
/// [`ProjectHandle`] and the check runs against whatever is current.
///
/// # Errors
///
/// Returns errors from the initial load or watcher setup.
pub fn run(root: &Path, format: OutputFormat) -> Result<ExitCode, Error> {
    let (config, project) = commands::load_project(root)?;
    let handle = ProjectHandle::new(project);

    eprintln!("watch: initial check");
    let mut last_code = run_check(&config, &handle, format);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;
    watcher.watch(root, RecursiveMode::Recursive).map_err(|e| {
        return Error::Watch {
            reason: format!("cannot watch {}: {e}", root.display()),
        };
    })?;

    eprintln!("watch: monitoring {}, press Ctrl+C to stop", root.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}

        // Config edits change roots and exclusions, so reload both.
        let reloaded = commands::load_project(root);
        let config = match reloaded {
            Ok((config, project)) => {
                refresh(&handle, project);
                config
            },
            Err(e) => {
                diagnostics::print_error(&e);
                continue;
            },
        };

        eprintln!("watch: change detected, re-checking...");
        last_code = run_check(&config, &handle, format);
    }

    return Ok(last_code);
}

/// Publish a reloaded snapshot, logging whether the file set changed.
fn refresh(handle: &ProjectHandle, project: Project) {
    if handle.publish(project) {
        log::info!("project files changed, snapshot republished");
    } else {
        log::debug!("project files unchanged");
    }
}

/// Run check once against the current snapshot. Returns the exit code from check.
fn run_check(config: &wikiref::config::Config, handle: &ProjectHandle, format: OutputFormat) -> ExitCode {
    let snapshot = handle.snapshot();
    return match commands::check_project(config, &snapshot, format) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
