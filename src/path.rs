//! Path string normalization shared by the catalog, the root registry, and the resolver.
//!
//! Every path the core compares goes through [`normalize`] first: forward slashes only,
//! no empty or `.` segments, `..` collapsed, no trailing separator.

/// Separator used by every normalized path.
pub const SEPARATOR: char = '/';

/// File name split into the pieces link matching cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    /// Anchor token embedded in the file name, without the `#`.
    pub anchor: Option<String>,
    /// Where the anchor sits relative to the extension.
    pub anchor_placement: AnchorPlacement,
    /// Extension without the leading dot, when the name carries one.
    pub ext: Option<String>,
    /// File name with `.ext` removed. An anchor is kept in place.
    pub name_no_ext: String,
}

/// The two anchor shapes a file name can take, kept apart so that
/// `name#5.md` and `name.md#5` never collapse into one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorPlacement {
    /// `name.md#5`: anchor follows the extension.
    AfterExtension,
    /// `name#5.md`: anchor precedes the extension.
    BeforeExtension,
    /// No anchor in the file name.
    None,
    /// `name#5`: anchor with no extension at all.
    NoExtension,
}

/// Normalize a path string.
///
/// Backslashes become forward slashes, duplicate separators and `.` segments
/// are dropped, `..` pops the previous segment. Leading `..` is preserved on
/// relative paths and discarded above the root of absolute ones.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split(SEPARATOR) {
        push_normalized_segment(&mut segments, segment, absolute);
    }

    let joined = segments.join("/");
    if absolute {
        return format!("/{joined}");
    }
    return joined;
}

/// Handle a single segment during normalization.
fn push_normalized_segment<'a>(segments: &mut Vec<&'a str>, segment: &'a str, absolute: bool) {
    match segment {
        "" | "." => {},
        ".." => {
            let can_pop = matches!(segments.last(), Some(last) if *last != "..");
            if can_pop {
                segments.pop();
            } else if !absolute {
                segments.push(segment);
            }
        },
        other => segments.push(other),
    }
}

/// Return `path` with exactly one trailing separator.
pub fn suffix_with_separator(path: &str) -> String {
    if path.ends_with(SEPARATOR) {
        return path.to_string();
    }
    return format!("{path}{SEPARATOR}");
}

/// Directory-prefix test: `/a/b` contains `/a/b` and `/a/b/c` but not `/a/bc`.
pub fn is_under(path: &str, base: &str) -> bool {
    return suffix_with_separator(path).starts_with(&suffix_with_separator(base));
}

/// Everything before the last separator. `/x` yields `/`, `x` yields the empty string.
pub fn parent(path: &str) -> &str {
    return match path.rsplit_once(SEPARATOR) {
        None => "",
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
    };
}

/// Last segment of the path.
pub fn file_name(path: &str) -> &str {
    return path.rsplit_once(SEPARATOR).map_or(path, |(_, name)| return name);
}

/// Join a relative path onto a base directory and normalize the result.
/// An absolute `rel` replaces the base.
pub fn join(base: &str, rel: &str) -> String {
    if rel.starts_with(SEPARATOR) || base.is_empty() {
        return normalize(rel);
    }
    return normalize(&format!("{base}/{rel}"));
}

/// The link text that reaches `target` from a file living in `from_dir`.
///
/// Both inputs are expected to be normalized absolute paths.
pub fn relative_to(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split(SEPARATOR).filter(|s| return !s.is_empty()).collect();
    let to: Vec<&str> = target.split(SEPARATOR).filter(|s| return !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| return a == b)
        .count();

    let ups = from.len().saturating_sub(common);
    let mut parts: Vec<&str> = std::iter::repeat_n("..", ups).collect();
    parts.extend(to.iter().skip(common));
    return parts.join("/");
}

/// An extension token starts with an ASCII letter and is otherwise alphanumeric,
/// so `Test 4.2` has no extension while `Test.kt` does.
pub fn is_extension_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    return first.is_ascii_alphabetic() && chars.all(|c| return c.is_ascii_alphanumeric());
}

/// Anchor tokens are what a heading slug or a numeric suffix looks like.
pub fn is_anchor_token(token: &str) -> bool {
    return !token.is_empty()
        && token
            .chars()
            .all(|c| return c.is_ascii_alphanumeric() || c == '-' || c == '_');
}

/// Split a file name into stem, extension, and embedded anchor.
pub fn split_file_name(name: &str) -> NameParts {
    if let Some((before, after)) = name.rsplit_once('.')
        && !before.is_empty()
    {
        if let Some((ext, anchor)) = after.split_once('#')
            && is_extension_token(ext)
            && is_anchor_token(anchor)
        {
            return NameParts {
                anchor: Some(anchor.to_string()),
                anchor_placement: AnchorPlacement::AfterExtension,
                ext: Some(ext.to_string()),
                name_no_ext: format!("{before}#{anchor}"),
            };
        }

        if is_extension_token(after) {
            let anchor = trailing_anchor(before).map(str::to_string);
            let anchor_placement = if anchor.is_some() {
                AnchorPlacement::BeforeExtension
            } else {
                AnchorPlacement::None
            };
            return NameParts {
                anchor,
                anchor_placement,
                ext: Some(after.to_string()),
                name_no_ext: before.to_string(),
            };
        }
    }

    let anchor = trailing_anchor(name).map(str::to_string);
    let anchor_placement = if anchor.is_some() {
        AnchorPlacement::NoExtension
    } else {
        AnchorPlacement::None
    };
    return NameParts {
        anchor,
        anchor_placement,
        ext: None,
        name_no_ext: name.to_string(),
    };
}

/// Anchor token after the last `#` of `text`, if the text before it is non-empty.
fn trailing_anchor(text: &str) -> Option<&str> {
    let (head, anchor) = text.rsplit_once('#')?;
    if head.is_empty() || !is_anchor_token(anchor) {
        return None;
    }
    return Some(anchor);
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/a/b/../c", "/a/c")]
    #[case("/a//b/./c/", "/a/b/c")]
    #[case("a\\b\\c", "a/b/c")]
    #[case("../../x", "../../x")]
    #[case("/../x", "/x")]
    #[case("/", "/")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn prefix_needs_a_separator_boundary() {
        assert!(is_under("/a/b", "/a/b"));
        assert!(is_under("/a/b/c.md", "/a/b/"));
        assert!(!is_under("/a/bc/d.md", "/a/b"));
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent("/a/b/c.md"), "/a/b");
        assert_eq!(parent("/c.md"), "/");
        assert_eq!(parent("c.md"), "");
        assert_eq!(file_name("/a/b/Space In Name.md"), "Space In Name.md");
    }

    #[test]
    fn relative_link_between_siblings_and_cousins() {
        assert_eq!(relative_to("/p/wiki", "/p/wiki/Home.md"), "Home.md");
        assert_eq!(relative_to("/p/wiki/Sub", "/p/Readme.md"), "../../Readme.md");
        assert_eq!(relative_to("/p", "/p/Sub/In-Name.md"), "Sub/In-Name.md");
    }

    #[test]
    fn anchor_before_extension() {
        let parts = split_file_name("anchor-in-name#5.md");
        assert_eq!(parts.ext.as_deref(), Some("md"));
        assert_eq!(parts.anchor.as_deref(), Some("5"));
        assert_eq!(parts.anchor_placement, AnchorPlacement::BeforeExtension);
        assert_eq!(parts.name_no_ext, "anchor-in-name#5");
    }

    #[test]
    fn anchor_after_extension() {
        let parts = split_file_name("anchor-in-name.md#5");
        assert_eq!(parts.ext.as_deref(), Some("md"));
        assert_eq!(parts.anchor.as_deref(), Some("5"));
        assert_eq!(parts.anchor_placement, AnchorPlacement::AfterExtension);
    }

    #[test]
    fn numeric_suffix_is_not_an_extension() {
        let parts = split_file_name("Test 4.2");
        assert_eq!(parts.ext, None);
        assert_eq!(parts.name_no_ext, "Test 4.2");
        assert_eq!(split_file_name("Test 4.2.md").name_no_ext, "Test 4.2");
    }

    #[test]
    fn double_extension_keeps_inner_dot() {
        let parts = split_file_name("Test-Name.kt.md");
        assert_eq!(parts.ext.as_deref(), Some("md"));
        assert_eq!(parts.name_no_ext, "Test-Name.kt");
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(split_file_name(".gitignore").ext, None);
    }
}
