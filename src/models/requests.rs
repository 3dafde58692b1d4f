//! Request DTOs for the inventory API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::{push_field_error, FieldErrors};
use crate::models::ItemFields;

// Also spelled out in the `#[validate]` attributes on `ItemPayload`.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const BLANK_MESSAGE: &str = "This field may not be blank.";
pub const NEGATIVE_MESSAGE: &str = "Ensure this value is greater than or equal to 0.";
pub const DUPLICATE_NAME_MESSAGE: &str = "item with this name already exists.";

/// Request body for creating (POST /items/) or replacing (PUT /items/{id}/) an item.
///
/// Every field is optional at the serde level so that missing fields are
/// reported per field instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemPayload {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(
        required(message = "This field is required."),
        range(min = 0, message = "Ensure this value is greater than or equal to 0.")
    )]
    pub quantity: Option<i64>,
}

impl ItemPayload {
    /// The name to check for uniqueness, if one was supplied and is non-empty.
    pub fn candidate_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Validates the payload and converts it into writable fields.
    pub fn into_fields(self) -> Result<ItemFields, FieldErrors> {
        if let Err(errors) = self.validate() {
            return Err(field_errors_from(&errors));
        }

        match (self.name, self.quantity) {
            (Some(name), Some(quantity)) => Ok(ItemFields {
                name,
                description: self.description.unwrap_or_default(),
                quantity,
            }),
            (name, _) => {
                let mut errors = FieldErrors::new();
                let field = if name.is_none() { "name" } else { "quantity" };
                push_field_error(&mut errors, field, REQUIRED_MESSAGE);
                Err(errors)
            }
        }
    }
}

/// Flattens validator output into the `{"field": ["message"]}` shape.
fn field_errors_from(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            push_field_error(&mut out, &field, message);
        }
    }
    out
}

/// Request body for POST /token/
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Request body for POST /token/refresh/
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn payload(name: Option<&str>, quantity: Option<i64>) -> ItemPayload {
        ItemPayload {
            name: name.map(str::to_string),
            description: Some("desc".to_string()),
            quantity,
        }
    }

    #[test]
    fn test_item_payload_deserialize() {
        let json = r#"{"name": "New Item", "description": "New Description", "quantity": 5}"#;
        let req: ItemPayload = serde_json::from_str(json).unwrap();
        assert_eq!(req.name.as_deref(), Some("New Item"));
        assert_eq!(req.quantity, Some(5));
    }

    #[test]
    fn test_description_is_optional() {
        let json = r#"{"name": "New Item", "quantity": 5}"#;
        let req: ItemPayload = serde_json::from_str(json).unwrap();
        let fields = req.into_fields().unwrap();
        assert_eq!(fields.description, "");
    }

    #[test]
    fn test_valid_payload_converts() {
        let fields = payload(Some("Widget"), Some(0)).into_fields().unwrap();
        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.quantity, 0);
    }

    #[test]
    fn test_blank_name_and_negative_quantity() {
        let errors = payload(Some(""), Some(-5)).into_fields().unwrap_err();
        assert_eq!(errors["name"], vec![BLANK_MESSAGE.to_string()]);
        assert_eq!(errors["quantity"], vec![NEGATIVE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = ItemPayload::default().into_fields().unwrap_err();
        assert_eq!(errors["name"], vec![REQUIRED_MESSAGE.to_string()]);
        assert_eq!(errors["quantity"], vec![REQUIRED_MESSAGE.to_string()]);
    }

    #[test]
    fn test_validate_attribute_messages_match_constants() {
        let expected = |code: &str| match code {
            "required" => REQUIRED_MESSAGE,
            "length" => BLANK_MESSAGE,
            "range" => NEGATIVE_MESSAGE,
            other => panic!("unexpected validation code {}", other),
        };

        for candidate in [ItemPayload::default(), payload(Some(""), Some(-1))] {
            let errors = candidate.validate().unwrap_err();
            for field_errors in errors.field_errors().values() {
                for err in field_errors.iter() {
                    assert_eq!(err.message.as_deref(), Some(expected(&err.code)));
                }
            }
        }
    }

    #[test]
    fn test_candidate_name_skips_blank() {
        assert_eq!(payload(Some(""), Some(1)).candidate_name(), None);
        assert_eq!(payload(None, Some(1)).candidate_name(), None);
        assert_eq!(payload(Some("x"), Some(1)).candidate_name(), Some("x"));
    }

    #[test]
    fn test_token_request_deserialize() {
        let req: TokenRequest =
            serde_json::from_str(r#"{"username": "testuser", "password": "testpass"}"#).unwrap();
        assert_eq!(req.username, "testuser");
    }

    proptest! {
        #[test]
        fn prop_negative_quantity_always_rejected(
            name in "[a-zA-Z0-9 ]{1,32}",
            quantity in i64::MIN..0
        ) {
            let errors = payload(Some(&name), Some(quantity)).into_fields().unwrap_err();
            prop_assert!(errors.contains_key("quantity"));
            prop_assert!(!errors.contains_key("name"));
        }

        #[test]
        fn prop_nonblank_name_and_nonnegative_quantity_accepted(
            name in "[a-zA-Z0-9 ]{1,32}",
            quantity in 0i64..1_000_000
        ) {
            let fields = payload(Some(&name), Some(quantity)).into_fields().unwrap();
            prop_assert_eq!(fields.name, name);
            prop_assert_eq!(fields.quantity, quantity);
        }
    }
}
