//! Deny-list filtering of staged diff text.
//!
//! Binary, media and archive files produce diff noise ("Binary files differ",
//! base85 patches) that is useless to a text model. Each such file is collapsed
//! into a single placeholder line before the diff leaves the process.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Prefix of the per-file header line in `git diff` output.
const FILE_HEADER_PREFIX: &str = "diff --git ";

/// Extensions elided from the diff by default.
pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "tif", "psd", "heic", "avif",
    // video
    "mp4", "mov", "avi", "mkv", "webm", "wmv", "flv", "m4v",
    // audio
    "mp3", "wav", "flac", "ogg", "aac", "m4a", "wma",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "rar", "7z", "jar",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // binaries
    "exe", "dll", "so", "dylib", "bin", "class", "o", "a", "wasm",
];

/// Set of lower-cased file extensions whose diffs are skipped.
#[derive(Debug, Clone)]
pub struct DenyList {
    extensions: HashSet<String>,
}

impl DenyList {
    /// A deny-list that skips nothing.
    pub fn empty() -> Self {
        Self {
            extensions: HashSet::new(),
        }
    }

    /// Add extensions (with or without a leading dot).
    pub fn with_extensions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ext in extra {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if !ext.is_empty() {
                self.extensions.insert(ext);
            }
        }
        self
    }

    /// Whether the file at `path` has a denied extension.
    pub fn is_denied(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.contains(&e.to_ascii_lowercase()))
    }
}

impl Default for DenyList {
    fn default() -> Self {
        DenyList::empty().with_extensions(DEFAULT_DENIED_EXTENSIONS)
    }
}

/// The staged diff after deny-list filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDiff {
    pub text: String,
    /// Paths of files replaced by a placeholder, in diff order.
    pub skipped: Vec<String>,
    has_content: bool,
}

impl FilteredDiff {
    /// True when nothing but placeholders (or whitespace) is left.
    pub fn is_empty(&self) -> bool {
        !self.has_content
    }
}

/// Placeholder line emitted in place of a skipped file.
pub fn placeholder_line(path: &str) -> String {
    format!("[stagecommit] skipped {path} (binary or asset file)\n")
}

/// Filter a unified diff, collapsing denied files into one placeholder line each.
///
/// Lines of allowed files are copied verbatim, including their line endings.
pub fn filter_diff(diff: &str, deny: &DenyList) -> FilteredDiff {
    let mut text = String::with_capacity(diff.len());
    let mut skipped = Vec::new();
    let mut has_content = false;
    let mut skipping = false;

    for line in diff.split_inclusive('\n') {
        if line.starts_with(FILE_HEADER_PREFIX) {
            match header_path(line) {
                Some(path) if deny.is_denied(path) => {
                    debug!("Skipping denied file in diff: {}", path);
                    text.push_str(&placeholder_line(path));
                    skipped.push(path.to_string());
                    skipping = true;
                    continue;
                }
                _ => skipping = false,
            }
        }

        if skipping {
            continue;
        }

        if !line.trim().is_empty() {
            has_content = true;
        }
        text.push_str(line);
    }

    FilteredDiff {
        text,
        skipped,
        has_content,
    }
}

/// Extract the file path from a `diff --git a/<path> b/<path>` header.
///
/// Prefers the `b/` side so renames report their new name. Handles the quoted
/// form git uses for paths with unusual characters.
fn header_path(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(FILE_HEADER_PREFIX)?.trim_end();

    // Unrenamed files print the same path twice, which also covers paths
    // that themselves contain " b/".
    if let Some(path) = same_path_halves(rest) {
        return Some(path);
    }

    if let Some(idx) = rest.rfind(" \"b/") {
        return Some(rest[idx + 4..].trim_end_matches('"'));
    }
    if let Some(idx) = rest.rfind(" b/") {
        return Some(&rest[idx + 3..]);
    }

    rest.strip_prefix("a/")
        .and_then(|r| r.split_whitespace().next())
}

/// Split `a/<path> b/<path>` at its midpoint when both halves name the same path.
fn same_path_halves(rest: &str) -> Option<&str> {
    let (a_side, b_side) = rest.split_at_checked(rest.len().checked_sub(1)? / 2)?;
    let a_path = a_side.strip_prefix("a/")?;
    let b_path = b_side.strip_prefix(" b/")?;
    (a_path == b_path).then_some(b_path)
}
