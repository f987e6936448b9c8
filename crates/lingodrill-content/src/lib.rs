//! lingodrill-content — Where learning content comes from.
//!
//! Implements the `ContentSource` and `SessionSink` traits for the Content
//! API over HTTP, for JSON snapshots on disk, and for an in-memory mock,
//! plus the configuration file that points at them.

pub mod api;
pub mod config;
pub mod error;
pub mod file;
pub mod mock;

pub use api::ContentApi;
pub use config::{load_config, load_config_from, LingodrillConfig};
pub use error::ContentError;
pub use file::FileContentSource;
pub use mock::MockContentSource;
