use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use pcorder_shared::Masked;

use crate::{require_non_blank, CoreError, CoreResult};

/// Number of digits in a card number
pub const CARD_NUMBER_LEN: usize = 8;

/// A payment card used to place orders.
///
/// Cards are immutable once built. Validity is never stored: a card that
/// was valid when issued stops being valid once its expiry passes.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    number: Masked<String>,
    expiry: DateTime<Utc>,
    holder_name: String,
}

impl Card {
    pub fn new(number: &str, expiry: DateTime<Utc>, holder_name: &str) -> CoreResult<Self> {
        if !is_well_formed_number(number) {
            return Err(CoreError::ValidationError(format!(
                "Card number must be exactly {} digits",
                CARD_NUMBER_LEN
            )));
        }
        let holder_name = require_non_blank(holder_name, "Card holder name")?;

        Ok(Self {
            number: Masked::new(number.to_string()),
            expiry,
            holder_name,
        })
    }

    pub fn number(&self) -> &str {
        self.number.expose()
    }

    /// Card number with all but the last four digits hidden
    pub fn masked_number(&self) -> String {
        self.number.tail(4)
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Checks validity against the current time. Not cached.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        is_well_formed_number(self.number.expose())
            && !self.holder_name.trim().is_empty()
            && self.expiry > now
    }
}

fn is_well_formed_number(number: &str) -> bool {
    number.len() == CARD_NUMBER_LEN && number.bytes().all(|b| b.is_ascii_digit())
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.number.expose() == other.number.expose()
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.expose().hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (exp: {})",
            self.masked_number(),
            self.holder_name,
            self.expiry.format("%Y-%m-%d")
        )
    }
}
