//! Squirrel Repository
//!
//! Squirrel CRUD on top of a `FlatFileStore`.
//!
//! ## Responsibilities
//! - Assign ids (1 + max existing id, 1 when empty)
//! - Never hand out an id twice while the repository is alive
//! - Validate forms before any mutation
//! - Serialize read-modify-write spans
//!
//! Records are never cached between calls: every operation re-reads the
//! file. The only state kept in memory is the highest id handed out.

use std::path::Path;

use parking_lot::Mutex;

use crate::error::{Result, SquirrelError};
use crate::model::{Squirrel, SquirrelForm, SquirrelId};
use crate::store::FlatFileStore;

/// Repository of squirrel records
pub struct SquirrelRepository {
    /// Backing flat-file store
    store: FlatFileStore<Squirrel>,

    /// Serializes load → mutate → save spans (create/update/delete/reset)
    /// and guards the highest id handed out so far
    write_lock: Mutex<SquirrelId>,
}

impl SquirrelRepository {
    /// Open (or create) the repository file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = FlatFileStore::open(path)?;
        Ok(Self::with_store(store))
    }

    /// Wrap an already-open store
    pub fn with_store(store: FlatFileStore<Squirrel>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(0),
        }
    }

    /// All squirrels, in storage order
    pub fn list_all(&self) -> Result<Vec<Squirrel>> {
        self.store.load_all()
    }

    /// Look up one squirrel by id
    pub fn get_by_id(&self, id: SquirrelId) -> Result<Squirrel> {
        self.store
            .load_all()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(SquirrelError::NotFound)
    }

    /// Validate the form, assign the next id and persist the new squirrel
    pub fn create(&self, form: SquirrelForm) -> Result<Squirrel> {
        let valid = form.validate()?;

        let mut high_water = self.write_lock.lock();

        let mut squirrels = self.store.load_all()?;
        let id = next_id(&squirrels, *high_water);
        let squirrel = Squirrel {
            id,
            name: valid.name,
            size: valid.size,
        };
        squirrels.push(squirrel.clone());
        self.store.save_all(&squirrels)?;
        *high_water = id;

        tracing::debug!("Created squirrel {}", id);
        Ok(squirrel)
    }

    /// Replace name and size of an existing squirrel
    ///
    /// The form is validated before the id is looked up.
    pub fn update(&self, id: SquirrelId, form: SquirrelForm) -> Result<()> {
        let valid = form.validate()?;

        let _write_guard = self.write_lock.lock();

        let mut squirrels = self.store.load_all()?;
        let squirrel = squirrels
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SquirrelError::NotFound)?;
        squirrel.name = valid.name;
        squirrel.size = valid.size;
        self.store.save_all(&squirrels)?;

        tracing::debug!("Updated squirrel {}", id);
        Ok(())
    }

    /// Remove a squirrel
    pub fn delete_by_id(&self, id: SquirrelId) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        let mut squirrels = self.store.load_all()?;
        let position = squirrels
            .iter()
            .position(|s| s.id == id)
            .ok_or(SquirrelError::NotFound)?;
        squirrels.remove(position);
        self.store.save_all(&squirrels)?;

        tracing::debug!("Deleted squirrel {}", id);
        Ok(())
    }

    /// Number of stored squirrels
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.load_all()?.len())
    }

    /// Whether the repository holds no squirrels
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop every squirrel
    ///
    /// Ids already handed out stay retired.
    pub fn reset(&self) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        self.store.clear()
    }

    /// Path of the backing store file
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

/// 1 + highest id either on disk or already handed out
fn next_id(squirrels: &[Squirrel], high_water: SquirrelId) -> SquirrelId {
    let on_disk = squirrels.iter().map(|s| s.id).max().unwrap_or(0);
    on_disk.max(high_water) + 1
}
