use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RecordId;

/// Validation and lookup failures for record mutations. All variants are
/// recoverable by the user; the `Display` text is the exact status-line
/// message shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RosterError {
    #[error("first name required")]
    EmptyFirstName,
    #[error("last name required")]
    EmptyLastName,
    #[error("duplicate name not allowed")]
    DuplicateName,
    #[error("not found: {id}")]
    NotFound { id: RecordId },
}

impl RosterError {
    pub fn not_found(id: RecordId) -> Self {
        Self::NotFound { id }
    }

    /// The one-line status message surfaced to the user.
    pub fn status_message(&self) -> String {
        self.to_string()
    }
}
