pub mod custom;
pub mod model;

pub use custom::CustomModel;
pub use model::{format_cents, ModelSpec, PcModel, PresetModel};
