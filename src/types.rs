/// Core domain types for wikiref: file references, file types, and snapshot fingerprints.
use std::fmt;

use crate::path::{self, AnchorPlacement};

/// Extensions accepted as markdown, in the order they are tried for display.
pub const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mkd"];

/// Extensions classified as images.
const IMAGE_EXTENSIONS: [&str; 7] = ["bmp", "gif", "jpeg", "jpg", "png", "svg", "webp"];

/// One file in the project. Identity is the normalized path string;
/// name, extension, and anchor are derived once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(
    clippy::arbitrary_source_item_ordering,
    reason = "path comes first so the derived Ord sorts by path"
)]
pub struct FileRef {
    /// Normalized absolute path.
    path: String,
    /// Anchor token embedded in the file name.
    anchor: Option<String>,
    /// Which of the anchor shapes the file name uses.
    anchor_placement: AnchorPlacement,
    /// Extension without the dot.
    ext: Option<String>,
    /// File name with the extension removed.
    name_no_ext: String,
}

impl FileRef {
    /// Build a reference from a path string. The path is normalized first.
    pub fn new(path: &str) -> Self {
        let path = path::normalize(path);
        let parts = path::split_file_name(path::file_name(&path));
        return Self {
            anchor: parts.anchor,
            anchor_placement: parts.anchor_placement,
            ext: parts.ext,
            name_no_ext: parts.name_no_ext,
            path,
        };
    }

    /// Anchor token embedded in the file name (`5` for both `x#5.md` and `x.md#5`).
    pub fn anchor(&self) -> Option<&str> {
        return self.anchor.as_deref();
    }

    /// Placement of the embedded anchor.
    pub const fn anchor_placement(&self) -> AnchorPlacement {
        return self.anchor_placement;
    }

    /// Directory containing the file.
    pub fn dir(&self) -> &str {
        return path::parent(&self.path);
    }

    /// Extension without the leading dot.
    pub fn ext(&self) -> Option<&str> {
        return self.ext.as_deref();
    }

    /// Last path segment as written.
    pub fn file_name(&self) -> &str {
        return path::file_name(&self.path);
    }

    /// File type derived from the extension.
    pub fn file_type(&self) -> FileType {
        return FileType::from_ext(self.ext());
    }

    /// True when the extension is one of the markdown extensions.
    pub fn is_markdown(&self) -> bool {
        return self.file_type() == FileType::Markdown;
    }

    /// File name with `.ext` removed.
    pub fn name_no_ext(&self) -> &str {
        return &self.name_no_ext;
    }

    /// Normalized absolute path.
    pub fn path(&self) -> &str {
        return &self.path;
    }

    /// Full path a link may name without writing the extension; see [`Self::stem`].
    pub fn path_no_ext(&self) -> Option<String> {
        let stem = self.stem()?;
        let dir = self.dir();
        if dir.is_empty() {
            return Some(stem.to_string());
        }
        return Some(path::join(dir, stem));
    }

    /// File name a link may use with the extension left off.
    ///
    /// `None` for `name.md#5`: dropping its extension would give `name#5`,
    /// which belongs to `name#5.md`.
    pub fn stem(&self) -> Option<&str> {
        if self.anchor_placement == AnchorPlacement::AfterExtension {
            return None;
        }
        return Some(&self.name_no_ext);
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.path);
    }
}

/// Coarse file classification used to filter the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileType {
    /// Raster or vector image.
    Image,
    /// Markdown document (`.md`, `.markdown`, `.mkd`).
    Markdown,
    /// Anything else.
    Other,
}

impl FileType {
    /// Classify by extension, case-insensitively.
    pub fn from_ext(ext: Option<&str>) -> Self {
        let Some(ext) = ext else {
            return Self::Other;
        };
        let lower = ext.to_ascii_lowercase();
        if MARKDOWN_EXTENSIONS.contains(&lower.as_str()) {
            return Self::Markdown;
        }
        if IMAGE_EXTENSIONS.contains(&lower.as_str()) {
            return Self::Image;
        }
        return Self::Other;
    }
}

/// SHA-256 digest of a project snapshot, 64 lowercase hex chars.
/// Newtype prevents mixing with arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(
    /// The hex-encoded digest.
    pub String,
);
