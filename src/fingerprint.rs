/// Snapshot fingerprinting: a SHA-256 digest of everything resolution depends on.
use sha2::{Digest as _, Sha256};

use crate::project::Project;
use crate::types::Fingerprint;

/// Feed one tagged record into the hasher.
fn feed_record(hasher: &mut Sha256, tag: &str, fields: &[&str]) {
    hasher.update(tag.as_bytes());
    for field in fields {
        hasher.update(b"\t");
        hasher.update(field.as_bytes());
    }
    hasher.update(b"\n");
}

/// Compute the fingerprint of a project snapshot.
///
/// Normalization: one line per root (most nested first), per file (sorted by
/// path), and per exclusion (sorted), then SHA-256 over the joined lines.
/// A snapshot without a catalog hashes a marker line instead of files.
pub fn fingerprint(project: &Project) -> Fingerprint {
    let mut hasher = Sha256::new();
    feed_record(&mut hasher, "base", &[project.base_path()]);

    for root in project.registry().roots() {
        feed_record(&mut hasher, "root", &[root.base_path(), root.remote_url()]);
    }

    match project.catalog() {
        None => feed_record(&mut hasher, "unavailable", &[]),
        Some(catalog) => {
            for file in catalog.files() {
                feed_record(&mut hasher, "file", &[file.path()]);
            }
            for excluded in catalog.non_vcs_paths() {
                feed_record(&mut hasher, "non-vcs", &[excluded]);
            }
        },
    }

    let digest = hasher.finalize();
    return Fingerprint(format!("{digest:x}"));
}
