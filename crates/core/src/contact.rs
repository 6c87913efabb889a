//! Contact model and the rules that guard it.
//!
//! Pure functions only: callers hand in the request payload and, for
//! creation, the contacts already stored. Nothing here knows where the
//! contacts come from.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A stored phonebook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier issued by the storage layer.
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Request payload for create and update.
///
/// Both fields are optional so a missing field can be reported as such
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl ContactInput {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}

/// A validated contact that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

impl NewContact {
    /// Attach the id issued by the store.
    pub fn with_id(self, id: impl Into<String>) -> Contact {
        Contact {
            id: id.into(),
            name: self.name,
            number: self.number,
        }
    }
}

/// Case-insensitive name comparison used for the uniqueness rule.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Check that both fields are present and non-empty.
///
/// The name is checked before the number; the first failure wins.
pub fn validate_fields(input: &ContactInput) -> Result<NewContact, ValidationError> {
    let name = match input.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ValidationError::NameMissing),
    };

    let number = match input.number.as_deref() {
        Some(number) if !number.is_empty() => number,
        _ => return Err(ValidationError::NumberMissing),
    };

    Ok(NewContact {
        name: name.to_string(),
        number: number.to_string(),
    })
}

/// Reject `contact` if any of `existing` already uses its name (ignoring case).
pub fn ensure_unique_name(
    contact: &NewContact,
    existing: &[Contact],
) -> Result<(), ValidationError> {
    if existing
        .iter()
        .any(|other| same_name(&other.name, &contact.name))
    {
        return Err(ValidationError::NameTaken);
    }

    Ok(())
}

/// Validate a create request against the current collection.
///
/// Order: name present, number present, name unique (ignoring case).
pub fn validate_new_contact(
    input: &ContactInput,
    existing: &[Contact],
) -> Result<NewContact, ValidationError> {
    let contact = validate_fields(input)?;
    ensure_unique_name(&contact, existing)?;
    Ok(contact)
}

/// Validate an update request.
///
/// Only presence is checked. Uniqueness is deliberately not re-checked on
/// update, so an update may give a contact the name of another one.
pub fn validate_replacement(input: &ContactInput) -> Result<NewContact, ValidationError> {
    validate_fields(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arto() -> Contact {
        Contact {
            id: "1".to_string(),
            name: "Arto Hellas".to_string(),
            number: "040-123456".to_string(),
        }
    }

    // ============================================================================
    // validate_new_contact tests
    // ============================================================================

    #[test]
    fn test_validate_new_contact_accepts_unique_name() {
        let input = ContactInput::new("Ada Lovelace", "39-44-5323523");
        let contact = validate_new_contact(&input, &[arto()]).unwrap();

        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.number, "39-44-5323523");
    }

    #[test]
    fn test_validate_new_contact_missing_name() {
        let input = ContactInput {
            name: None,
            number: Some("000".to_string()),
        };
        assert_eq!(
            validate_new_contact(&input, &[]),
            Err(ValidationError::NameMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_empty_name() {
        let input = ContactInput::new("", "000");
        assert_eq!(
            validate_new_contact(&input, &[]),
            Err(ValidationError::NameMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_missing_number() {
        let input = ContactInput {
            name: Some("Ada Lovelace".to_string()),
            number: None,
        };
        assert_eq!(
            validate_new_contact(&input, &[]),
            Err(ValidationError::NumberMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_empty_number() {
        let input = ContactInput::new("Ada Lovelace", "");
        assert_eq!(
            validate_new_contact(&input, &[]),
            Err(ValidationError::NumberMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_name_checked_before_number() {
        let input = ContactInput::default();
        assert_eq!(
            validate_new_contact(&input, &[]),
            Err(ValidationError::NameMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_duplicate_name_any_case() {
        for name in ["Arto Hellas", "arto hellas", "ARTO HELLAS", "aRtO hElLaS"] {
            let input = ContactInput::new(name, "000");
            assert_eq!(
                validate_new_contact(&input, &[arto()]),
                Err(ValidationError::NameTaken),
                "{name} should collide"
            );
        }
    }

    #[test]
    fn test_validate_new_contact_number_checked_before_uniqueness() {
        // Duplicate name, but the number is missing: number error wins
        let input = ContactInput {
            name: Some("Arto Hellas".to_string()),
            number: None,
        };
        assert_eq!(
            validate_new_contact(&input, &[arto()]),
            Err(ValidationError::NumberMissing)
        );
    }

    #[test]
    fn test_validate_new_contact_whitespace_is_not_empty() {
        let input = ContactInput::new(" ", " ");
        assert!(validate_new_contact(&input, &[]).is_ok());
    }

    // ============================================================================
    // validate_replacement tests
    // ============================================================================

    #[test]
    fn test_validate_replacement_allows_existing_name() {
        let input = ContactInput::new("Arto Hellas", "111");
        let contact = validate_replacement(&input).unwrap();
        assert_eq!(contact.name, "Arto Hellas");
        assert_eq!(contact.number, "111");
    }

    #[test]
    fn test_validate_replacement_requires_fields() {
        assert_eq!(
            validate_replacement(&ContactInput::new("", "1")),
            Err(ValidationError::NameMissing)
        );
        assert_eq!(
            validate_replacement(&ContactInput::new("Ada", "")),
            Err(ValidationError::NumberMissing)
        );
    }

    // ============================================================================
    // serialization tests
    // ============================================================================

    #[test]
    fn test_contact_json_shape() {
        let value = serde_json::to_value(arto()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1",
                "name": "Arto Hellas",
                "number": "040-123456"
            })
        );
    }

    #[test]
    fn test_contact_input_tolerates_missing_fields() {
        let input: ContactInput = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Ada"));
        assert_eq!(input.number, None);
    }

    #[test]
    fn test_contact_input_serializes_present_fields_only() {
        let input = ContactInput {
            name: Some("Ada".to_string()),
            number: None,
        };
        assert_eq!(serde_json::to_string(&input).unwrap(), r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_ensure_unique_name_empty_collection() {
        let contact = NewContact {
            name: "Arto Hellas".to_string(),
            number: "1".to_string(),
        };
        assert!(ensure_unique_name(&contact, &[]).is_ok());
        assert_eq!(
            ensure_unique_name(&contact, &[arto()]),
            Err(ValidationError::NameTaken)
        );
    }

    #[test]
    fn test_new_contact_with_id() {
        let contact = NewContact {
            name: "Dan Abramov".to_string(),
            number: "12-43-234345".to_string(),
        }
        .with_id("7");

        assert_eq!(contact.id, "7");
        assert_eq!(contact.name, "Dan Abramov");
    }

    #[test]
    fn test_same_name_ignores_case_only() {
        assert!(same_name("Mary Poppendieck", "mary poppendieck"));
        assert!(!same_name("Mary Poppendieck", "Mary  Poppendieck"));
    }
}
