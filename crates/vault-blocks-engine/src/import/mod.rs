//! # Vault Import
//!
//! Consumers of the block engine that turn a vault into entry records.
//!
//! - **`config_note`**: `VaultConfig`, read from a markdown note inside the
//!   vault (entry tag, periodic-note folders, label to id mappings)
//! - **`entry`**: `Importer` walks the configured folders and maps every
//!   tagged block to an `EntryRecord`
//!
//! Unlike the parsing core, this module logs: missing ids and unmapped
//! labels are warnings, not failures.

pub mod config_note;
pub mod entry;
pub mod error;

pub use config_note::{DefMap, PeriodFolders, PointMap, VaultConfig};
pub use entry::{EntryRecord, Importer};
pub use error::ImportError;
