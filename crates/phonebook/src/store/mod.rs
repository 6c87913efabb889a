//! Storage backends for contacts.
//!
//! The directory service only talks to [`ContactStore`]; which backend sits
//! behind it is decided once at startup by [`open`].

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::prelude::*;
use phonebook_core::{Contact, NewContact, StoreError};
use std::path::Path;
use std::sync::Arc;

/// A collection of contacts owned by one backend.
///
/// Each call is atomic on its own; callers composing several calls get no
/// isolation between them. Ids are issued by the store and never reused
/// while the store is alive.
pub trait ContactStore: Send + Sync {
    /// All contacts in insertion order.
    fn all(&self) -> Result<Vec<Contact>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;

    /// The contact with `id`, or `None` if there is none.
    fn find(&self, id: &str) -> Result<Option<Contact>, StoreError>;

    /// Store `contact` under a freshly issued id and return it.
    fn insert(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Overwrite name and number of `id`. `None` if there is no such contact.
    fn replace(&self, id: &str, contact: NewContact) -> Result<Option<Contact>, StoreError>;

    /// Remove `id`. Returns whether a contact was removed.
    fn remove(&self, id: &str) -> Result<bool, StoreError>;
}

/// Which backend to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Process-local list, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

/// Construct the configured backend.
///
/// `seed` only applies to the memory backend; a SQLite file keeps whatever
/// it already holds.
pub fn open(backend: Backend, database: &Path, seed: bool) -> Result<Arc<dyn ContactStore>> {
    let store: Arc<dyn ContactStore> = match backend {
        Backend::Memory if seed => Arc::new(MemoryStore::seeded()),
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Sqlite => Arc::new(
            SqliteStore::open(database)
                .with_context(|| format!("Failed to open database {}", database.display()))?,
        ),
    };

    Ok(store)
}
