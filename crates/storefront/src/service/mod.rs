pub mod order;
pub mod product;
pub mod user;

use shared::errors::ServiceError;
use uuid::Uuid;
use validator::ValidationErrors;

/// Malformed ids are rejected here, before any store call.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::InvalidId(message.to_string()))
}

/// First failing message in field-name order. Struct-level checks are keyed
/// `__all__` and therefore win over individual fields.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Validation failed".to_string())
}
