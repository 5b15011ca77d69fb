//! Browser (`wasm32`) implementations of [`drive_host`] service contracts.
//!
//! Settings persist in `localStorage`, download links open through `window.open`, and progress
//! timers use `setTimeout`. Entry records and blobs stay in memory until a vendor-backed store is
//! wired in through [`build_host_services`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod delay;
pub mod files;
pub mod settings;
pub mod url_opener;

pub use adapters::{build_host_services, host_strategy_name};
pub use delay::TimeoutDelay;
pub use files::read_file_list;
pub use settings::WebSettingsStore;
pub use url_opener::WebUrlOpener;
