//! Request payloads and their validation.

use thiserror::Error;
use validator::ValidationErrors;

pub mod bulk;
pub mod import;
pub mod lead;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid lead id")]
    InvalidLeadId,

    #[error("no leads selected")]
    EmptySelection,

    #[error("too many leads selected: {selected} (limit {limit})")]
    TooManyIds { selected: usize, limit: usize },

    #[error("csv error: {0}")]
    Csv(String),
}
