use std::cmp::Ordering;

/// Normalized identity key: trimmed and lowercased.
///
/// Every case-insensitive equality, hash and grouping in the workspace goes
/// through this one derivation so they always agree with each other.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive ordering, falling back to ordinal order when two values
/// differ only by case so the result stays total.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
