//! Drive entry records shared across host contracts and the runtime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Drive entry kind. Fixed at creation time.
pub enum EntryKind {
    /// File entry backed by a blob.
    File,
    /// Folder entry (metadata only).
    Folder,
}

impl EntryKind {
    /// Returns `true` for folder entries.
    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A file or folder record as stored in the document store.
pub struct DriveEntry {
    /// Store-assigned id, unique across the whole store.
    pub id: String,
    /// Base name of the entry.
    pub name: String,
    /// File or folder kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Normalized parent folder path (always starts and ends with `/`).
    pub path: String,
    /// Download link (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Child entries for locally composed, non-persisted folder trees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<DriveEntry>>,
}

impl DriveEntry {
    /// Returns the blob-store key for this entry (`path` + `name`).
    pub fn blob_key(&self) -> String {
        format!("{}{}", self.path, self.name)
    }

    /// Returns `true` when the entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Lowercased file extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Create payload for a new entry record. The store assigns the id.
pub struct NewEntry {
    /// Base name of the entry.
    pub name: String,
    /// File or folder kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Normalized parent folder path.
    pub path: String,
    /// Download link (files only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NewEntry {
    /// Builds a folder record under `path`.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Folder,
            path: path.into(),
            url: None,
        }
    }

    /// Builds a file record under `path` pointing at `url`.
    pub fn file(name: impl Into<String>, path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            path: path.into(),
            url: Some(url.into()),
        }
    }

    /// Attaches a store-assigned id.
    pub fn into_entry(self, id: String) -> DriveEntry {
        DriveEntry {
            id,
            name: self.name,
            kind: self.kind,
            path: self.path,
            url: self.url,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Exact-match filter used by document-store queries and subscriptions.
pub struct EntryFilter {
    /// Required parent path.
    pub path: String,
    /// Optional required name.
    pub name: Option<String>,
}

impl EntryFilter {
    /// Matches every entry whose parent path equals `path`.
    pub fn in_folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    /// Matches entries with the exact `path` and `name`.
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
        }
    }

    /// Returns `true` when `entry` satisfies the filter.
    pub fn matches(&self, entry: &DriveEntry) -> bool {
        entry.path == self.path
            && self
                .name
                .as_deref()
                .map_or(true, |name| entry.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A local file handle read from the picker or a drop target.
pub struct LocalFile {
    /// File name as reported by the browser.
    pub name: String,
    /// MIME type (may be empty).
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl LocalFile {
    /// Builds a local file from its parts.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
