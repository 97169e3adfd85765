use serde::{Serialize, Serializer};
use std::fmt;

const MASK: &str = "********";

/// A wrapper for sensitive values (card numbers, holder names) that never
/// prints its contents through `Debug`, `Display` or `Serialize`.
///
/// Use [`Masked::expose`] where the raw value is genuinely needed, such as
/// format validation or registry lookups.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Masked<T>(T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(MASK)
    }
}

impl<T: AsRef<str>> Masked<T> {
    /// Masked form that keeps the last `visible` characters, e.g. `****2222`.
    pub fn tail(&self, visible: usize) -> String {
        mask_tail(self.0.as_ref(), visible)
    }
}

/// Replace everything except the last `visible` characters with `*`.
pub fn mask_tail(value: &str, visible: usize) -> String {
    let total = value.chars().count();
    let hidden = total.saturating_sub(visible);
    let mut out = "*".repeat(hidden);
    out.extend(value.chars().skip(hidden));
    out
}
