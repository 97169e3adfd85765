pub mod app_config;
pub mod logging;
pub mod session;

pub use app_config::Config;
pub use session::{run, SessionOutcome};
