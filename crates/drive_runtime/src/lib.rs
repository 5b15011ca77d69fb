//! Drive runtime: reducer, entry-list subscription, upload/delete/download flows, and the Leptos
//! provider and views that wire them to host services.

pub mod components;
pub mod delete;
pub mod download;
mod effect_executor;
pub mod entry_list;
pub mod error;
pub mod folders;
pub mod host;
pub mod local_tree;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod upload;

pub use components::{use_drive_runtime, DriveProvider, DriveRuntimeContext, DriveShell};
pub use entry_list::EntryListStore;
pub use error::DriveError;
pub use model::*;
pub use reducer::{reduce_drive, DriveAction, ReducerError, RuntimeEffect};
pub use local_tree::LocalTree;
pub use upload::{
    SimulatedUploadBackend, StoreUploadBackend, UploadBackend, UploadEvent, UploadJob,
    UploadedEntry,
};
