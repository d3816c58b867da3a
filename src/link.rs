//! Link text handling: anchor isolation, extension detection, and the canonical
//! form names are compared in.

use crate::path;

/// URL schemes that never point into the project.
const EXTERNAL_PREFIXES: [&str; 5] = ["http://", "https://", "ftp://", "mailto:", "file://"];

/// How names are folded before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Folding {
    /// Compare case-sensitively.
    pub case_sensitive: bool,
    /// Treat `' '` and `'-'` as the same character.
    pub space_dash_equivalent: bool,
}

impl Folding {
    /// Canonical comparison form of `text`.
    pub fn canonical(self, text: &str) -> String {
        let folded = if self.case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        };
        if self.space_dash_equivalent {
            return folded.replace(' ', "-");
        }
        return folded;
    }

    /// True when both texts fold to the same canonical form.
    pub fn equivalent(self, a: &str, b: &str) -> bool {
        return self.canonical(a) == self.canonical(b);
    }
}

/// Split a trailing anchor off link text.
///
/// The anchor is the token after the last `#`; it must look like an anchor
/// (`[A-Za-z0-9_-]+`) and the text before it must be non-empty. Callers try
/// the literal text first, so `name#5.md` never reaches this split.
pub fn split_anchor(text: &str) -> Option<(&str, &str)> {
    let (head, anchor) = text.rsplit_once('#')?;
    if head.is_empty() || !path::is_anchor_token(anchor) {
        return None;
    }
    return Some((head, anchor));
}

/// True when the last path segment of `text` carries an explicit extension.
pub fn has_explicit_ext(text: &str) -> bool {
    return path::split_file_name(path::file_name(text)).ext.is_some();
}

/// True for links that leave the project (URLs, mail links).
pub fn is_external(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    return EXTERNAL_PREFIXES.iter().any(|p| return lower.starts_with(p));
}

/// Page name of a GitHub wiki link body: `Page` or `Link Text|Page`.
pub fn wiki_link_page(body: &str) -> &str {
    return body
        .rsplit_once('|')
        .map_or(body, |(_, page)| return page)
        .trim();
}
