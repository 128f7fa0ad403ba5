//! The configuration store: lifecycle, lookup, and mutation
//!
//! A [`ConfigStore`] owns the path it was opened from, the format version
//! read from the header, and an insertion-ordered table of items. All file
//! handles are scoped to a single `open`/`create_and_open`/`save` call;
//! nothing is held open between calls. Access is single-process by design:
//! two processes saving the same path will race without detection.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::digest::digest;
use crate::format;
use crate::item::{Item, Kind};

/// Current on-disk format version, written by [`ConfigStore::save`] and
/// [`ConfigStore::create_and_open`].
pub const FORMAT_VERSION: i32 = 1000;

/// Sentinel returned by [`ConfigStore::get_int`] when the item is absent or
/// its value is not a non-negative decimal integer.
pub const INT_ERROR: i32 = i32::MAX;

/// Sentinel returned by [`ConfigStore::get_string`] when the item is absent.
pub const STR_ERROR: &str = "_NaN_";

/// Errors from store lifecycle operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid header line: {0:?}")]
    InvalidHeader(String),

    #[error("Store is not bound to a file")]
    NotBound,
}

/// A persistent key-value configuration store backed by one text file.
///
/// Items are keyed by the digest of their name; names themselves are never
/// stored, so the table can resolve a name but not list names back. Getters
/// return the [`STR_ERROR`]/[`INT_ERROR`] sentinels instead of failing.
#[derive(Debug)]
pub struct ConfigStore {
    /// Format version from the loaded file header; -1 when nothing is loaded.
    version: i32,
    /// Path the store is bound to; `None` until a successful open.
    path: Option<PathBuf>,
    /// Item table in insertion order.
    items: Vec<Item>,
}

impl ConfigStore {
    /// Creates an empty, unbound store.
    pub fn new() -> Self {
        Self {
            version: -1,
            path: None,
            items: Vec::new(),
        }
    }

    /// Opens and loads a configuration file.
    ///
    /// Any previously loaded state is cleared first, even when re-opening
    /// the same path. The first non-blank line must be a valid header;
    /// later lines that fail to decode as items are dropped silently. On
    /// failure the store is left empty and unbound.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        self.reset();

        let file = File::open(path).map_err(|source| io_error(path, source))?;
        let reader = BufReader::new(file);

        let mut version = None;
        let mut items = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|source| io_error(path, source))?;
            if line.trim().is_empty() {
                continue;
            }

            if version.is_none() {
                version = Some(
                    format::decode_header(&line)
                        .ok_or_else(|| StoreError::InvalidHeader(line.clone()))?,
                );
                continue;
            }

            if let Some(item) = format::decode_item(&line) {
                items.push(item);
            }
        }

        // A file with no lines at all loads as an empty store with no
        // declared version; only a present-but-malformed header is fatal.
        self.version = version.unwrap_or(-1);
        self.items = items;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Creates (or truncates) a configuration file containing only the
    /// current-version header, then opens it.
    pub fn create_and_open(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();

        {
            let file = File::create(path).map_err(|source| io_error(path, source))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(format::encode_header(FORMAT_VERSION).as_bytes())
                .map_err(|source| io_error(path, source))?;
            writer.flush().map_err(|source| io_error(path, source))?;
        }

        self.open(path)
    }

    /// Writes the header and every item back to the bound path.
    ///
    /// The header always carries [`FORMAT_VERSION`], not the version the
    /// file was loaded with. Content is staged to a sibling temp file and
    /// renamed over the target, so a failed save never leaves a truncated
    /// file behind. Fails when the store is not bound to a path.
    pub fn save(&self) -> Result<(), StoreError> {
        let path = self.path.as_deref().ok_or(StoreError::NotBound)?;

        let mut temp_os = path.as_os_str().to_os_string();
        temp_os.push(".tmp");
        let temp_path = PathBuf::from(temp_os);

        {
            let file =
                File::create(&temp_path).map_err(|source| io_error(&temp_path, source))?;
            let mut writer = BufWriter::new(file);

            writer
                .write_all(format::encode_header(FORMAT_VERSION).as_bytes())
                .map_err(|source| io_error(&temp_path, source))?;

            for item in &self.items {
                if let Some(line) = format::encode_item(item) {
                    writer
                        .write_all(line.as_bytes())
                        .map_err(|source| io_error(&temp_path, source))?;
                }
            }

            writer
                .flush()
                .map_err(|source| io_error(&temp_path, source))?;
        }

        fs::rename(&temp_path, path).map_err(|source| io_error(path, source))?;
        Ok(())
    }

    /// Sets a text item, overwriting any existing item with the same name.
    pub fn set_string(&mut self, name: &str, text: impl Into<String>) {
        self.set_item(name, Kind::Text, text.into());
    }

    /// Sets an integer item, overwriting any existing item with the same
    /// name. The value is stored as its decimal text form.
    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set_item(name, Kind::Integer, value.to_string());
    }

    /// Removes the item with the given name, preserving the order of the
    /// remaining items. Returns false when no such item exists.
    pub fn delete_config(&mut self, name: &str) -> bool {
        match self.find_by_digest(&digest(name)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the stored value for `name` verbatim, regardless of its kind
    /// tag, or [`STR_ERROR`] when absent.
    pub fn get_string(&self, name: &str) -> String {
        match self.find_by_digest(&digest(name)) {
            Some(index) => self.items[index].raw_value.clone(),
            None => STR_ERROR.to_string(),
        }
    }

    /// Returns the stored value for `name` parsed as an integer.
    ///
    /// Returns [`INT_ERROR`] when the item is absent or its value is not a
    /// non-empty run of decimal digits. The kind tag is not consulted: a
    /// text item whose value looks numeric parses successfully.
    pub fn get_int(&self, name: &str) -> i32 {
        let Some(index) = self.find_by_digest(&digest(name)) else {
            return INT_ERROR;
        };

        let raw = &self.items[index].raw_value;
        if !format::is_integer(raw) {
            return INT_ERROR;
        }
        raw.parse().unwrap_or(INT_ERROR)
    }

    /// Returns the number of items in the table.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the format version read from the loaded file, or -1 when no
    /// file is loaded.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Returns the path the store is bound to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Inserts or overwrites the item for `name`. An existing item keeps
    /// its slot; a new one is appended.
    fn set_item(&mut self, name: &str, kind: Kind, raw_value: String) {
        let digest = digest(name);
        match self.find_by_digest(&digest) {
            Some(index) => {
                let item = &mut self.items[index];
                item.kind = kind;
                item.raw_value = raw_value;
            }
            None => self.items.push(Item {
                kind,
                digest,
                raw_value,
            }),
        }
    }

    /// First-match linear scan over the item table.
    fn find_by_digest(&self, digest: &str) -> Option<usize> {
        self.items.iter().position(|item| item.digest == digest)
    }

    /// Clears items, path binding, and version.
    fn reset(&mut self) {
        self.items.clear();
        self.path = None;
        self.version = -1;
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
