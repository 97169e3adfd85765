pub mod ledger;
pub mod models;
pub mod shared;
pub mod summary;

pub use ledger::OrderLedger;
pub use models::{Order, OrderStatus};
pub use shared::SharedLedger;
pub use summary::{LedgerSummary, Ranked};
