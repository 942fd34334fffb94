//! Configuration loading and persisted client state for Beamcast.
//!
//! This crate owns everything that arrives from disk or the
//! environment before playback starts: the TOML settings file, the
//! JSON source catalog, and the small per-user store that remembers
//! which cast receiver application to launch.

pub mod loader;
pub mod models;
pub mod receiver;
pub mod sources;
pub mod util;

pub use loader::{ConfigLoadError, Settings};
pub use receiver::{ReceiverIdStore, ReceiverStoreError, DEFAULT_RECEIVER_APP_ID};
pub use sources::{CatalogError, SourceCatalog};
pub use util::{parse_bool, parse_bool_var};
