pub mod keys;
pub mod pii;

pub use keys::{compare_ignore_case, normalize_key};
pub use pii::{mask_tail, Masked};
