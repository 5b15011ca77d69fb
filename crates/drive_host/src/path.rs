//! Folder-path navigation for the drive UI.
//!
//! A [`DrivePath`] always starts and ends with `/`; the root is `/`. Splitting on `/` and
//! dropping empty segments yields the breadcrumb chain.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display label for the root folder.
pub const ROOT_FOLDER_LABEL: &str = "My Drive";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
/// Normalized folder path.
pub struct DrivePath(String);

impl DrivePath {
    /// The root folder `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalizes an arbitrary path string.
    ///
    /// Backslashes become `/`, empty and `.` segments are dropped, `..` pops a segment, and the
    /// result gets a leading and trailing slash.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        let replaced = raw.trim().replace('\\', "/");
        for segment in replaced.split('/') {
            match segment.trim() {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        Self::from_segments(segments)
    }

    fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut out = String::from("/");
        for segment in segments {
            out.push_str(segment);
            out.push('/');
        }
        Self(out)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty path segments from the root down.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Descends into `folder_name`.
    ///
    /// The name is trimmed and any embedded `/` splits it into nested segments, so the path stays
    /// normalized. A blank name leaves the path unchanged.
    pub fn enter(&self, folder_name: &str) -> Self {
        let added = folder_name
            .split(['/', '\\'])
            .map(str::trim)
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..");
        Self::from_segments(self.segments().chain(added))
    }

    /// Moves to the parent folder, staying at the root.
    pub fn back(&self) -> Self {
        let mut segments: Vec<&str> = self.segments().collect();
        segments.pop();
        Self::from_segments(segments)
    }

    /// Label of the current folder, or [`ROOT_FOLDER_LABEL`] at the root.
    pub fn folder_name(&self) -> &str {
        self.segments().last().unwrap_or(ROOT_FOLDER_LABEL)
    }

    /// Breadcrumb chain as `(label, path)` pairs starting with the root.
    pub fn breadcrumbs(&self) -> Vec<(String, DrivePath)> {
        let mut crumbs = vec![(ROOT_FOLDER_LABEL.to_string(), Self::root())];
        let mut current = Self::root();
        for segment in self.segments() {
            current = current.enter(segment);
            crumbs.push((segment.to_string(), current.clone()));
        }
        crumbs
    }

    /// Blob-store key of a file named `name` inside this folder.
    pub fn blob_key(&self, name: &str) -> String {
        format!("{}{}", self.0, name)
    }
}

impl Default for DrivePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for DrivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DrivePath {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<DrivePath> for String {
    fn from(value: DrivePath) -> Self {
        value.0
    }
}

impl AsRef<str> for DrivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(path: &DrivePath) {
        let raw = path.as_str();
        assert!(raw.starts_with('/'), "missing leading slash: {raw:?}");
        assert!(raw.ends_with('/'), "missing trailing slash: {raw:?}");
        assert!(!raw.contains("//"), "empty segment in {raw:?}");
    }

    #[test]
    fn parse_normalizes_expected_cases() {
        let cases = [
            ("", "/"),
            ("   ", "/"),
            ("foo/bar", "/foo/bar/"),
            ("/foo//bar/", "/foo/bar/"),
            ("./foo/../bar", "/bar/"),
            ("\\foo\\bar", "/foo/bar/"),
            ("/../../", "/"),
        ];

        for (input, expected) in cases {
            assert_eq!(DrivePath::parse(input).as_str(), expected, "input={input:?}");
        }
    }

    #[test]
    fn enter_then_back_returns_to_root() {
        let docs = DrivePath::root().enter("Documents");
        assert_eq!(docs.as_str(), "/Documents/");
        assert_eq!(docs.back().as_str(), "/");
        assert_eq!(DrivePath::root().back().as_str(), "/");
    }

    #[test]
    fn two_enters_then_back_lands_one_level_above_deepest() {
        let deepest = DrivePath::root().enter("Documents").enter("Invoices");
        assert_eq!(deepest.as_str(), "/Documents/Invoices/");
        assert_eq!(deepest.back().as_str(), "/Documents/");
    }

    #[test]
    fn enter_splits_embedded_slashes_and_ignores_blank_names() {
        let path = DrivePath::root().enter(" a/b ");
        assert_eq!(path.as_str(), "/a/b/");
        assert_eq!(path.enter("").as_str(), "/a/b/");
        assert_eq!(path.enter("  /  ").as_str(), "/a/b/");
        assert_eq!(path.enter("..").as_str(), "/a/b/");
    }

    #[test]
    fn arbitrary_enter_back_sequences_stay_normalized() {
        let names = ["Documents", "", "a/b", "  x ", "//", "Photos", "..", "c"];
        let mut path = DrivePath::root();
        for round in 0..64usize {
            path = if round % 3 == 2 {
                path.back()
            } else {
                path.enter(names[round % names.len()])
            };
            assert_normalized(&path);
        }
        for _ in 0..64 {
            path = path.back();
            assert_normalized(&path);
        }
        assert!(path.is_root());
    }

    #[test]
    fn folder_name_and_breadcrumbs_follow_segments() {
        let root = DrivePath::root();
        assert_eq!(root.folder_name(), ROOT_FOLDER_LABEL);
        assert_eq!(root.breadcrumbs().len(), 1);

        let path = DrivePath::parse("/Documents/Invoices/");
        assert_eq!(path.folder_name(), "Invoices");
        assert_eq!(path.depth(), 2);
        let crumbs = path.breadcrumbs();
        let labels: Vec<&str> = crumbs.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["My Drive", "Documents", "Invoices"]);
        assert_eq!(crumbs[1].1.as_str(), "/Documents/");
        assert_eq!(path.blob_key("a.png"), "/Documents/Invoices/a.png");
    }

    #[test]
    fn serde_uses_plain_string_form() {
        let path = DrivePath::root().enter("Documents");
        let raw = serde_json::to_string(&path).expect("serialize");
        assert_eq!(raw, "\"/Documents/\"");
        let back: DrivePath = serde_json::from_str("\"Documents\"").expect("deserialize");
        assert_eq!(back.as_str(), "/Documents/");
    }
}
