/// Crate-level error types for wikiref diagnostics.
use std::path::PathBuf;

/// Every error names the path or reason it is about, so a diagnostic can be
/// printed without a debugger. An unresolved or ambiguous link is not an
/// error: it is a `Resolution` with zero or several matches.
#[allow(clippy::error_impl_error, reason = "crate-level error type shared by library and binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project's file list cannot be produced yet.
    #[error("file catalog unavailable for project {base_path}")]
    CatalogUnavailable {
        /// Base path of the project whose catalog is missing.
        base_path: String,
    },

    /// A source file named on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The project directory does not exist or is not a directory.
    #[error("not a project directory: {}", path.display())]
    NotAProject {
        /// Directory that was given.
        path: PathBuf,
    },

    /// A file could not be interpreted (git config, config edits).
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// `exclude remove` named a path that is not in the exclusion list.
    #[error("not excluded from version control: `{path}`")]
    UnknownExclusion {
        /// Path as given.
        path: String,
    },

    /// The filesystem watcher could not be started.
    #[error("watch failed: {reason}")]
    Watch {
        /// Description of the failure.
        reason: String,
    },
}
