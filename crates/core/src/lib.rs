//! Core library for phonebook
//!
//! This crate implements the **Functional Core** of the phonebook service,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`phonebook_core`** (this crate): contact rules and rendering with zero I/O
//! - **`phonebook`**: storage backends, the HTTP boundary and the CLI (the Imperative Shell)
//!
//! Everything here is deterministic: validation takes the current contacts as
//! an argument and the info summary takes the clock reading as an argument,
//! so tests need fixture data only.
//!
//! # Module Organization
//!
//! - [`contact`]: the contact model and create/update validation
//! - [`error`]: validation, storage and directory error enums
//! - [`info`]: the human-readable collection summary
//!
//! # Example Usage
//!
//! ```rust
//! use phonebook_core::contact::{validate_new_contact, Contact, ContactInput};
//! use phonebook_core::error::ValidationError;
//!
//! let existing = vec![Contact {
//!     id: "1".to_string(),
//!     name: "Arto Hellas".to_string(),
//!     number: "040-123456".to_string(),
//! }];
//!
//! let input = ContactInput::new("arto hellas", "000");
//! assert_eq!(
//!     validate_new_contact(&input, &existing),
//!     Err(ValidationError::NameTaken)
//! );
//! ```

pub mod contact;
pub mod error;
pub mod info;

pub use contact::{Contact, ContactInput, NewContact};
pub use error::{DirectoryError, StoreError, ValidationError};
