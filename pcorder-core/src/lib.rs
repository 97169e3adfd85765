pub mod card;
pub mod customer;
pub mod issuer;

pub use card::Card;
pub use customer::Customer;
pub use issuer::CardIssuer;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Card number already issued: {0}")]
    DuplicateCard(String),
    #[error("Payment rejected: {0}")]
    InvalidPayment(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Trim `value` and reject it when nothing is left.
pub fn require_non_blank(value: &str, what: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}
