use std::fmt;

use serde::{Deserialize, Serialize};

/// Chat identifier of a registered user. Operators are addressed the same way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecipientId(pub i64);

impl RecipientId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
