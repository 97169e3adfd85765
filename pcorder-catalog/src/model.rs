use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

use pcorder_core::{require_non_blank, CoreError, CoreResult};
use pcorder_shared::normalize_key;

use crate::custom::CustomModel;

/// What the order engine needs to know about any PC model
pub trait ModelSpec {
    fn name(&self) -> &str;

    /// Total price in minor currency units
    fn price_cents(&self) -> i64;

    fn parts(&self) -> &[String];
}

/// A model that can be ordered: either a manufacturer preset or a
/// customer-assembled build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PcModel {
    Preset(PresetModel),
    Custom(CustomModel),
}

impl PcModel {
    pub fn as_preset(&self) -> Option<&PresetModel> {
        match self {
            PcModel::Preset(preset) => Some(preset),
            PcModel::Custom(_) => None,
        }
    }

    pub fn as_custom(&self) -> Option<&CustomModel> {
        match self {
            PcModel::Custom(custom) => Some(custom),
            PcModel::Preset(_) => None,
        }
    }
}

impl ModelSpec for PcModel {
    fn name(&self) -> &str {
        match self {
            PcModel::Preset(m) => m.name(),
            PcModel::Custom(m) => m.name(),
        }
    }

    fn price_cents(&self) -> i64 {
        match self {
            PcModel::Preset(m) => m.price_cents(),
            PcModel::Custom(m) => m.price_cents(),
        }
    }

    fn parts(&self) -> &[String] {
        match self {
            PcModel::Preset(m) => m.parts(),
            PcModel::Custom(m) => m.parts(),
        }
    }
}

impl From<PresetModel> for PcModel {
    fn from(model: PresetModel) -> Self {
        PcModel::Preset(model)
    }
}

impl From<CustomModel> for PcModel {
    fn from(model: CustomModel) -> Self {
        PcModel::Custom(model)
    }
}

impl fmt::Display for PcModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PcModel::Preset(m) => fmt::Display::fmt(m, f),
            PcModel::Custom(m) => fmt::Display::fmt(m, f),
        }
    }
}

/// A fixed configuration supplied by a third-party manufacturer.
///
/// Equality only looks at name and manufacturer (ignoring case); price and
/// parts are not part of a preset's identity.
#[derive(Debug, Clone, Serialize)]
pub struct PresetModel {
    name: String,
    manufacturer: String,
    parts: Vec<String>,
    price_cents: i64,
}

impl PresetModel {
    pub fn new(
        name: &str,
        manufacturer: &str,
        parts: Vec<String>,
        price_cents: i64,
    ) -> CoreResult<Self> {
        let name = require_non_blank(name, "Model name")?;
        let manufacturer = require_non_blank(manufacturer, "Manufacturer")?;

        if parts.is_empty() {
            return Err(CoreError::ValidationError(
                "Parts list must not be empty".to_string(),
            ));
        }
        let parts = parts
            .iter()
            .map(|p| require_non_blank(p, "Part name"))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            name,
            manufacturer,
            parts,
            price_cents,
        })
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Display key used when ranking presets: "<manufacturer> - <name>"
    pub fn catalog_key(&self) -> String {
        format!("{} - {}", self.manufacturer, self.name)
    }

    /// Case-insensitive identity
    pub fn identity_key(&self) -> (String, String) {
        (normalize_key(&self.manufacturer), normalize_key(&self.name))
    }
}

impl ModelSpec for PresetModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn price_cents(&self) -> i64 {
        self.price_cents
    }

    fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl PartialEq for PresetModel {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for PresetModel {}

impl Hash for PresetModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for PresetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) [{}]",
            self.manufacturer,
            self.name,
            format_cents(self.price_cents),
            self.parts.join(", ")
        )
    }
}

/// Render minor units as a decimal amount, e.g. `149999` -> `1499.99`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
