//! SQLite-backed contact store.
//!
//! Contacts live in a single `persons` table. Ids are the table's
//! autoincrement keys rendered as decimal strings, so an id that does not
//! parse as an integer is malformed rather than merely absent.

use super::ContactStore;
use phonebook_core::{Contact, NewContact, StoreError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS persons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0),
    number TEXT NOT NULL CHECK (length(number) > 0)
);
";

/// Contact store persisted in SQLite.
///
/// `rusqlite::Connection` is not `Sync`, so it sits behind a mutex.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let conn = Connection::open(&path).map_err(classify)?;
        Self::initialize(conn, Some(path))
    }

    /// A private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(classify)?;
        Self::initialize(conn, None)
    }

    /// Database file path (`None` for in-memory).
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5)).map_err(classify)?;
        conn.execute_batch(SCHEMA).map_err(classify)?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("database connection lock poisoned".to_string()))
    }
}

/// Parse an external id into the table key.
fn parse_id(id: &str) -> Result<i64, StoreError> {
    id.parse::<i64>()
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

/// Constraint violations are data problems; everything else is a fault.
fn classify(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StoreError::Rejected(message.unwrap_or_else(|| failure.to_string()))
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get::<_, i64>(0)?.to_string(),
        name: row.get(1)?,
        number: row.get(2)?,
    })
}

impl ContactStore for SqliteStore {
    fn all(&self) -> Result<Vec<Contact>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name, number FROM persons ORDER BY id")
            .map_err(classify)?;

        let contacts = stmt
            .query_map([], contact_from_row)
            .map_err(classify)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(classify)?;

        Ok(contacts)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))
            .map_err(classify)?;

        usize::try_from(count).map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn find(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        let key = parse_id(id)?;
        let conn = self.lock()?;

        conn.query_row(
            "SELECT id, name, number FROM persons WHERE id = ?1",
            params![key],
            contact_from_row,
        )
        .optional()
        .map_err(classify)
    }

    fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO persons (name, number) VALUES (?1, ?2)",
            params![contact.name, contact.number],
        )
        .map_err(classify)?;

        Ok(contact.with_id(conn.last_insert_rowid().to_string()))
    }

    fn replace(&self, id: &str, contact: NewContact) -> Result<Option<Contact>, StoreError> {
        let key = parse_id(id)?;
        let conn = self.lock()?;

        let changed = conn
            .execute(
                "UPDATE persons SET name = ?1, number = ?2 WHERE id = ?3",
                params![contact.name, contact.number, key],
            )
            .map_err(classify)?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(contact.with_id(key.to_string())))
    }

    fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let key = parse_id(id)?;
        let conn = self.lock()?;

        let removed = conn
            .execute("DELETE FROM persons WHERE id = ?1", params![key])
            .map_err(classify)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_contact(name: &str, number: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let store = SqliteStore::in_memory().unwrap();
        let contact = store.insert(new_contact("Arto Hellas", "040-123456")).unwrap();

        assert_eq!(contact.id, "1");
        assert_eq!(store.find("1").unwrap(), Some(contact));
    }

    #[test]
    fn test_all_in_insertion_order() {
        let store = SqliteStore::in_memory().unwrap();
        store.insert(new_contact("Arto Hellas", "1")).unwrap();
        store.insert(new_contact("Ada Lovelace", "2")).unwrap();

        let names: Vec<String> = store.all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Arto Hellas", "Ada Lovelace"]);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_malformed_id() {
        let store = SqliteStore::in_memory().unwrap();

        assert_eq!(
            store.find("5c41c90e84d891c15dfa3431"),
            Err(StoreError::MalformedId("5c41c90e84d891c15dfa3431".to_string()))
        );
        assert!(matches!(
            store.remove("abc"),
            Err(StoreError::MalformedId(_))
        ));
        assert!(matches!(
            store.replace("abc", new_contact("A", "1")),
            Err(StoreError::MalformedId(_))
        ));
    }

    #[test]
    fn test_absent_id_is_not_malformed() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.find("77").unwrap(), None);
        assert!(!store.remove("77").unwrap());
        assert_eq!(store.replace("77", new_contact("A", "1")).unwrap(), None);
    }

    #[test]
    fn test_replace_keeps_id() {
        let store = SqliteStore::in_memory().unwrap();
        let first = store.insert(new_contact("Arto Hellas", "1")).unwrap();
        store.insert(new_contact("Ada Lovelace", "2")).unwrap();

        let updated = store
            .replace(&first.id, new_contact("Ada Lovelace", "3"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(store.find(&first.id).unwrap(), Some(updated));
        assert_eq!(store.find("2").unwrap().unwrap().number, "2");
    }

    #[test]
    fn test_remove_then_ids_not_reused() {
        let store = SqliteStore::in_memory().unwrap();
        let first = store.insert(new_contact("A", "1")).unwrap();
        let second = store.insert(new_contact("B", "2")).unwrap();

        assert!(store.remove(&second.id).unwrap());
        let third = store.insert(new_contact("C", "3")).unwrap();

        assert_ne!(third.id, second.id);
        assert_ne!(third.id, first.id);
    }

    #[test]
    fn test_empty_fields_rejected_by_schema() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store.insert(new_contact("", "1")).unwrap_err();

        assert!(matches!(err, StoreError::Rejected(_)), "got {err:?}");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("phonebook.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(new_contact("Dan Abramov", "12-43-234345")).unwrap();
            assert_eq!(store.db_path(), Some(path.as_path()));
        }

        let store = SqliteStore::open(&path).unwrap();
        let contacts = store.all().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Dan Abramov");
    }
}
