use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use pcorder_shared::normalize_key;

use crate::{require_non_blank, CoreResult};

/// A customer identified by first and last name.
///
/// Two customers are the same person when both names match ignoring case,
/// which is what the ledger groups by when ranking customers.
#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    first_name: String,
    last_name: String,
}

impl Customer {
    pub fn new(first_name: &str, last_name: &str) -> CoreResult<Self> {
        Ok(Self {
            first_name: require_non_blank(first_name, "First name")?,
            last_name: require_non_blank(last_name, "Last name")?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive identity used for equality, hashing and grouping.
    pub fn identity_key(&self) -> (String, String) {
        (normalize_key(&self.first_name), normalize_key(&self.last_name))
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
