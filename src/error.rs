use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

pub const DEFAULT_REJECTION_MSG: &str = "Error placing order. Please try again later.";

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("Your cart is empty.")]
    EmptyCart,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please try again later. ({0})")]
    Transport(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not serialize cart: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ComposerError {
    /// Validation failures happen before any network call and leave the cart
    /// untouched.
    pub fn is_validation(&self) -> bool {
        matches!(self, ComposerError::EmptyCart | ComposerError::MissingField(_))
    }
}
