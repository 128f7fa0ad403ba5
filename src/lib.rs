//! conff - a minimal persistent key-value configuration store
//!
//! Configuration lives in one flat, line-oriented text file: a header line
//! declaring the format version, then one line per item. Items hold either
//! text or integer values and are keyed by a digest of their name, so the
//! file never contains the names themselves.
//!
//! ```text
//! @conff:1000
//! $config 2c26b46b68ffc68ff99b453c1d304134 1~3
//! $config fcde2b2edba56bf408601fb721fe9b5c 0~fast
//! ```
//!
//! # Example
//!
//! ```no_run
//! use conff::ConfigStore;
//!
//! # fn main() -> Result<(), conff::StoreError> {
//! let mut store = ConfigStore::new();
//! store.create_and_open("app.cfg")?;
//!
//! store.set_int("retries", 3);
//! store.set_string("mode", "fast");
//! store.save()?;
//!
//! let mut reloaded = ConfigStore::new();
//! reloaded.open("app.cfg")?;
//! assert_eq!(reloaded.get_int("retries"), 3);
//! assert_eq!(reloaded.get_string("mode"), "fast");
//! # Ok(())
//! # }
//! ```
//!
//! Absent items are reported through the [`STR_ERROR`] and [`INT_ERROR`]
//! sentinels rather than an error type. The store assumes single-process
//! access; concurrent writers to the same path are not detected.

mod digest;
mod format;
mod item;
mod store;

pub use item::{Item, Kind};
pub use store::{ConfigStore, StoreError, FORMAT_VERSION, INT_ERROR, STR_ERROR};
