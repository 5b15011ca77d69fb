use drive_host::{DriveEntry, DrivePath};
use serde::{Deserialize, Serialize};

use crate::local_tree::LocalTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UploadId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Blue,
    Cyan,
    Pink,
}

impl ColorTag {
    const CYCLE: [ColorTag; 3] = [ColorTag::Blue, ColorTag::Cyan, ColorTag::Pink];

    /// Tag for the `index`-th file of a batch.
    pub fn for_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Blue => "upload-bar-blue",
            Self::Cyan => "upload-bar-cyan",
            Self::Pink => "upload-bar-pink",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: UploadId,
    pub file_name: String,
    pub target_path: DrivePath,
    pub progress: u8,
    pub color: ColorTag,
    pub status: UploadStatus,
}

impl UploadTask {
    pub fn new(
        id: UploadId,
        file_name: impl Into<String>,
        target_path: DrivePath,
        index: usize,
    ) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            target_path,
            progress: 0,
            color: ColorTag::for_index(index),
            status: UploadStatus::InProgress,
        }
    }

    /// Moves progress forward. Lower values and updates after settlement are ignored.
    ///
    /// Returns `true` when the stored progress changed.
    pub fn advance(&mut self, percent: u8) -> bool {
        if self.status != UploadStatus::InProgress {
            return false;
        }
        let next = percent.min(100).max(self.progress);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    pub fn complete(&mut self) {
        self.progress = 100;
        self.status = UploadStatus::Completed;
    }

    pub fn fail(&mut self) {
        self.status = UploadStatus::Failed;
    }

    pub fn is_settled(&self) -> bool {
        self.status != UploadStatus::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// A confirmed download. `id` tells its progress apart from earlier runs of the same file.
pub struct DownloadRun {
    pub id: u64,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: i32,
    pub y: i32,
}

/// The one overlay or dialog that may be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Browsing,
    UploadPanel {
        drag_over: bool,
    },
    NewFolderPrompt {
        name: String,
    },
    /// `run` is `None` until the user confirms.
    DownloadPrompt {
        entry: DriveEntry,
        run: Option<DownloadRun>,
    },
    DeleteConfirm {
        entry: DriveEntry,
    },
    ContextMenu {
        position: ScreenPosition,
        target: DriveEntry,
    },
}

impl UiMode {
    pub fn is_browsing(&self) -> bool {
        matches!(self, Self::Browsing)
    }

    pub fn context_target(&self) -> Option<&DriveEntry> {
        match self {
            Self::ContextMenu { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn download_in_progress(&self) -> bool {
        matches!(
            self,
            Self::DownloadPrompt { run: Some(_), .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveState {
    pub path: DrivePath,
    /// Latest subscription snapshot for `path`.
    pub entries: Vec<DriveEntry>,
    /// Simulated uploads, never persisted.
    pub local: LocalTree,
    pub loading: bool,
    pub mode: UiMode,
    pub uploads: Vec<UploadTask>,
    pub toast: Option<Toast>,
    pub next_upload_id: u64,
    pub next_toast_id: u64,
    pub next_download_id: u64,
}

impl Default for DriveState {
    fn default() -> Self {
        Self {
            path: DrivePath::root(),
            entries: Vec::new(),
            local: LocalTree::default(),
            loading: true,
            mode: UiMode::Browsing,
            uploads: Vec::new(),
            toast: None,
            next_upload_id: 1,
            next_toast_id: 1,
            next_download_id: 1,
        }
    }
}

impl DriveState {
    pub fn upload_mut(&mut self, id: UploadId) -> Option<&mut UploadTask> {
        self.uploads.iter_mut().find(|task| task.id == id)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads.iter().any(|task| !task.is_settled())
    }

    /// Mean progress across the current batch, `0` when idle.
    pub fn overall_upload_progress(&self) -> u8 {
        if self.uploads.is_empty() {
            return 0;
        }
        let total: u32 = self.uploads.iter().map(|task| u32::from(task.progress)).sum();
        (total / self.uploads.len() as u32) as u8
    }

    /// The snapshot for `path` followed by the local files filed under it.
    pub fn visible_entries(&self) -> Vec<DriveEntry> {
        let mut visible = self.entries.clone();
        visible.extend(self.local.files_in(&self.path));
        visible
    }

    pub fn has_entry_named(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
            || self
                .local
                .files_in(&self.path)
                .iter()
                .any(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_progress_is_monotonic_and_frozen_after_settling() {
        let mut task = UploadTask::new(UploadId(1), "a.png", DrivePath::root(), 4);
        assert_eq!(task.color, ColorTag::Cyan);

        assert!(task.advance(30));
        assert!(!task.advance(10));
        assert_eq!(task.progress, 30);
        assert!(task.advance(250));
        assert_eq!(task.progress, 100);

        task.fail();
        assert!(!task.advance(100));
        assert!(task.is_settled());
    }

    #[test]
    fn overall_progress_averages_the_batch() {
        let mut state = DriveState::default();
        assert_eq!(state.overall_upload_progress(), 0);
        let mut first = UploadTask::new(UploadId(1), "a", DrivePath::root(), 0);
        first.complete();
        let second = UploadTask::new(UploadId(2), "b", DrivePath::root(), 1);
        state.uploads = vec![first, second];
        assert_eq!(state.overall_upload_progress(), 50);
        assert!(state.is_uploading());
    }
}
