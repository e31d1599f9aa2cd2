//! Flat-file store
//!
//! Generic whole-collection persistence: every read loads the full file,
//! every write replaces it.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

use super::format::{decode_collection, encode_collection};

/// A durable, ordered collection of `T` kept in one file
///
/// ## Concurrency:
/// - `file_lock` gives scoped exclusive access to the file for each
///   load or save, so a reader never sees a partially written image
/// - `append_one` is load + push + save and is NOT atomic across the
///   gap; callers doing read-modify-write must serialize themselves
/// - No cross-process locking
pub struct FlatFileStore<T> {
    /// Backing file
    path: PathBuf,

    /// Held for the duration of every file read or write
    file_lock: Mutex<()>,

    _records: PhantomData<fn() -> T>,
}

impl<T> FlatFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a store, creating the file with an empty collection if missing
    ///
    /// An existing file is left untouched, whatever it contains; corruption
    /// is only reported when the collection is loaded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            file_lock: Mutex::new(()),
            _records: PhantomData,
        };

        if !store.path.exists() {
            if let Some(parent) = store.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            store.save_all(&[])?;
            tracing::debug!("Created empty store at {}", store.path.display());
        }

        Ok(store)
    }

    /// Load the full collection
    pub fn load_all(&self) -> Result<Vec<T>> {
        let bytes = {
            let _guard = self.file_lock.lock();
            let mut file = File::open(&self.path)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            bytes
        };

        decode_collection(&bytes)
    }

    /// Replace the full collection
    ///
    /// The file image is built before the lock is taken and written with a
    /// single `write_all`, then synced.
    pub fn save_all(&self, records: &[T]) -> Result<()> {
        let image = encode_collection(records)?;

        let _guard = self.file_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(&image)?;
        file.sync_data()?;

        Ok(())
    }

    /// Append one record (load + push + save)
    pub fn append_one(&self, record: T) -> Result<()> {
        let mut records = self.load_all()?;
        records.push(record);
        self.save_all(&records)
    }

    /// Replace the contents with the empty collection
    pub fn clear(&self) -> Result<()> {
        self.save_all(&[])
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
