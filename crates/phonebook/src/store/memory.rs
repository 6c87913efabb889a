use super::ContactStore;
use phonebook_core::{Contact, NewContact, StoreError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Contacts the service starts with when seeding is enabled.
pub fn sample_contacts() -> Vec<Contact> {
    [
        ("1", "Arto Hellas", "040-123456"),
        ("2", "Ada Lovelace", "39-44-5323523"),
        ("3", "Dan Abramov", "12-43-234345"),
        ("4", "Mary Poppendieck", "39-23-6423122"),
    ]
    .into_iter()
    .map(|(id, name, number)| Contact {
        id: id.to_string(),
        name: name.to_string(),
        number: number.to_string(),
    })
    .collect()
}

/// In-process contact list.
///
/// Ids come from a counter that starts past the largest numeric id it was
/// seeded with. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_contacts(Vec::new())
    }

    /// A store holding [`sample_contacts`].
    pub fn seeded() -> Self {
        Self::with_contacts(sample_contacts())
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let next_id = contacts
            .iter()
            .filter_map(|contact| contact.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        Self {
            contacts: RwLock::new(contacts),
            next_id: AtomicU64::new(next_id),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Contact>>, StoreError> {
        self.contacts
            .read()
            .map_err(|_| StoreError::Unavailable("contact list lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Contact>>, StoreError> {
        self.contacts
            .write()
            .map_err(|_| StoreError::Unavailable("contact list lock poisoned".to_string()))
    }

    /// Next counter value not already used as an id.
    ///
    /// Seeded ids are arbitrary strings, so the counter alone is not enough.
    fn issue_id(&self, contacts: &[Contact]) -> String {
        loop {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
            if !contacts.iter().any(|contact| contact.id == id) {
                return id;
            }
        }
    }
}

impl ContactStore for MemoryStore {
    fn all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn find(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        Ok(self.read()?.iter().find(|contact| contact.id == id).cloned())
    }

    fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let mut contacts = self.write()?;
        let contact = contact.with_id(self.issue_id(&contacts));
        contacts.push(contact.clone());
        Ok(contact)
    }

    fn replace(&self, id: &str, contact: NewContact) -> Result<Option<Contact>, StoreError> {
        let mut contacts = self.write()?;
        let Some(existing) = contacts.iter_mut().find(|existing| existing.id == id) else {
            return Ok(None);
        };

        existing.name = contact.name;
        existing.number = contact.number;

        Ok(Some(existing.clone()))
    }

    fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut contacts = self.write()?;
        let Some(index) = contacts.iter().position(|contact| contact.id == id) else {
            return Ok(false);
        };

        contacts.remove(index);
        Ok(true)
    }
}
