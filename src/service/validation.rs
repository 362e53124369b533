//! Request validation for supplier payloads. Runs before any store call.

use crate::error::{AppError, FieldError};
use crate::model::{NewSupplier, SupplierChanges, SupplierPayload, NAME_MAX_LEN};

pub struct RequestValidator;

impl RequestValidator {
    /// Create requires `name`.
    pub fn new_supplier(payload: SupplierPayload) -> Result<NewSupplier, AppError> {
        match payload.name {
            None => Err(AppError::Validation(vec![FieldError::new("name", "name is required")])),
            Some(name) => {
                validate_name(&name)?;
                Ok(NewSupplier { name })
            }
        }
    }

    /// Update validates only the fields present.
    pub fn changes(payload: SupplierPayload) -> Result<SupplierChanges, AppError> {
        if let Some(name) = &payload.name {
            validate_name(name)?;
        }
        Ok(SupplierChanges { name: payload.name })
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let mut details = Vec::new();
    if name.trim().is_empty() {
        details.push(FieldError::new("name", "name must not be empty"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        details.push(FieldError::new(
            "name",
            format!("name must be at most {} characters", NAME_MAX_LEN),
        ));
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>) -> SupplierPayload {
        SupplierPayload {
            name: name.map(String::from),
        }
    }

    fn details(err: AppError) -> Vec<FieldError> {
        match err {
            AppError::Validation(d) => d,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_requires_name() {
        let d = details(RequestValidator::new_supplier(payload(None)).unwrap_err());
        assert_eq!(d, vec![FieldError::new("name", "name is required")]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let d = details(RequestValidator::new_supplier(payload(Some("   "))).unwrap_err());
        assert_eq!(d[0].field, "name");
    }

    #[test]
    fn name_length_is_counted_in_characters() {
        let exact = "ñ".repeat(NAME_MAX_LEN);
        assert!(RequestValidator::new_supplier(payload(Some(&exact))).is_ok());
        let over = "a".repeat(NAME_MAX_LEN + 1);
        assert!(RequestValidator::new_supplier(payload(Some(&over))).is_err());
    }

    #[test]
    fn name_is_kept_verbatim() {
        let s = RequestValidator::new_supplier(payload(Some(" Acme "))).unwrap();
        assert_eq!(s.name, " Acme ");
    }

    #[test]
    fn update_allows_missing_name() {
        assert_eq!(RequestValidator::changes(payload(None)).unwrap(), SupplierChanges::default());
        assert!(RequestValidator::changes(payload(Some(""))).is_err());
    }
}
