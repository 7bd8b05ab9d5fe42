use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one live record. Assigned from a per-session monotonic
/// counter and never reused within the session, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One person entry. Names are stored trimmed and are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub first: String,
    pub last: String,
}

impl Record {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }
}
