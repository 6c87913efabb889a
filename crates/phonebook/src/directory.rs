//! The contact directory service.
//!
//! Composes the pure rules from `phonebook_core` with a [`ContactStore`].
//! Used by both the HTTP handlers and the `persons` CLI.

use crate::store::ContactStore;
use chrono::{DateTime, Utc};
use phonebook_core::contact::{validate_new_contact, validate_replacement};
use phonebook_core::info::render_info;
use phonebook_core::{Contact, ContactInput, DirectoryError};
use std::sync::Arc;

#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn ContactStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Contact>, DirectoryError> {
        Ok(self.store.all()?)
    }

    pub fn count(&self) -> Result<usize, DirectoryError> {
        Ok(self.store.count()?)
    }

    /// Summary with the live contact count, stamped with `now`.
    pub fn info(&self, now: DateTime<Utc>) -> Result<String, DirectoryError> {
        Ok(render_info(self.count()?, now))
    }

    pub fn get(&self, id: &str) -> Result<Contact, DirectoryError> {
        self.store
            .find(id)?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    pub fn delete(&self, id: &str) -> Result<(), DirectoryError> {
        if self.store.remove(id)? {
            log::debug!("removed contact {id}");
            Ok(())
        } else {
            Err(DirectoryError::NotFound(id.to_string()))
        }
    }

    /// Validate and store a new contact.
    ///
    /// The uniqueness check and the insert are two separate store calls.
    pub fn create(&self, input: &ContactInput) -> Result<Contact, DirectoryError> {
        let contact = validate_new_contact(input, &self.store.all()?)?;

        let contact = self.store.insert(contact)?;
        log::debug!("created contact {} ({})", contact.id, contact.name);
        Ok(contact)
    }

    /// Overwrite name and number of an existing contact.
    ///
    /// An unknown id is reported before the payload is validated. Names are
    /// not checked for uniqueness here.
    pub fn update(&self, id: &str, input: &ContactInput) -> Result<Contact, DirectoryError> {
        let not_found = || DirectoryError::NotFound(id.to_string());

        self.store.find(id)?.ok_or_else(not_found)?;
        let replacement = validate_replacement(input)?;

        let contact = self.store.replace(id, replacement)?.ok_or_else(not_found)?;
        log::debug!("updated contact {}", contact.id);
        Ok(contact)
    }
}
