use serde::Serialize;
use std::fmt;

use pcorder_core::{require_non_blank, CoreError, CoreResult};

use crate::model::{format_cents, ModelSpec};

/// A build assembled part by part by a customer.
///
/// The price is a running total: it moves only when a part is added or
/// removed with an explicit part price, and is never recomputed from the
/// parts list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomModel {
    name: String,
    parts: Vec<String>,
    price_cents: i64,
}

impl CustomModel {
    pub fn new(name: &str) -> CoreResult<Self> {
        Ok(Self {
            name: require_non_blank(name, "Model name")?,
            parts: Vec::new(),
            price_cents: 0,
        })
    }

    /// Append a part and add its price to the total
    pub fn add_part(&mut self, part: &str, part_price_cents: i64) -> CoreResult<()> {
        let part = require_non_blank(part, "Part")?;
        let price_cents = adjust_price(self.price_cents.checked_add(part_price_cents))?;
        self.parts.push(part);
        self.price_cents = price_cents;
        Ok(())
    }

    /// Remove the first occurrence of `part`, subtracting its price only when
    /// something was actually removed.
    pub fn remove_part(&mut self, part: &str, part_price_cents: i64) -> CoreResult<bool> {
        let part = require_non_blank(part, "Part")?;
        match self.parts.iter().position(|p| *p == part) {
            Some(index) => {
                let price_cents = adjust_price(self.price_cents.checked_sub(part_price_cents))?;
                self.parts.remove(index);
                self.price_cents = price_cents;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace every part. The price is left as it was.
    pub fn set_parts(&mut self, parts: Vec<String>) -> CoreResult<()> {
        let parts = parts
            .iter()
            .map(|p| require_non_blank(p, "Part name"))
            .collect::<CoreResult<Vec<_>>>()?;
        self.parts = parts;
        Ok(())
    }
}

impl ModelSpec for CustomModel {
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

impl fmt::Display for CustomModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custom Model: {} ({})", self.name, format_cents(self.price_cents))
    }
}

fn adjust_price(total: Option<i64>) -> CoreResult<i64> {
    total.ok_or_else(|| CoreError::ValidationError("price overflow".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_build_is_empty() {
        let build = CustomModel::new("  GamerBuild ").unwrap();
        assert_eq!(build.name(), "GamerBuild");
        assert!(build.parts().is_empty());
        assert_eq!(build.price_cents(), 0);
        assert!(CustomModel::new(" ").is_err());
    }

    #[test]
    fn test_add_part_increases_price() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        build.add_part("AMD Ryzen 9 7950X CPU", 55_000).unwrap();
        build.add_part("NVIDIA RTX 4090 GPU", 180_000).unwrap();
        build.add_part("32GB DDR5 RAM", 25_000).unwrap();

        assert_eq!(build.parts().len(), 3);
        assert_eq!(build.price_cents(), 260_000);
    }

    #[test]
    fn test_remove_part_decreases_price() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        build.add_part("ASUS ROG Motherboard", 40_000).unwrap();
        build.add_part("1TB NVMe SSD", 15_000).unwrap();
        build.add_part("Corsair Liquid Cooler", 20_000).unwrap();

        assert!(build.remove_part("1TB NVMe SSD", 15_000).unwrap());
        assert_eq!(build.parts(), ["ASUS ROG Motherboard", "Corsair Liquid Cooler"]);
        assert_eq!(build.price_cents(), 60_000);

        // Missing part leaves the price alone
        assert!(!build.remove_part("Floppy Drive", 999).unwrap());
        assert_eq!(build.price_cents(), 60_000);
    }

    #[test]
    fn test_remove_only_first_duplicate() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        build.add_part("16GB RAM", 8_000).unwrap();
        build.add_part("16GB RAM", 8_000).unwrap();

        assert!(build.remove_part("16GB RAM", 8_000).unwrap());
        assert_eq!(build.parts(), ["16GB RAM"]);
        assert_eq!(build.price_cents(), 8_000);
    }

    #[test]
    fn test_blank_part_rejected() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        assert!(matches!(build.add_part("", 100), Err(CoreError::ValidationError(_))));
        assert!(matches!(build.remove_part(" ", 50), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_price_overflow_rejected() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        build.add_part("Gold Plated Case", i64::MAX).unwrap();

        assert!(matches!(
            build.add_part("Fan", 1),
            Err(CoreError::ValidationError(msg)) if msg == "price overflow"
        ));
        assert_eq!(build.parts(), ["Gold Plated Case"]);
        assert_eq!(build.price_cents(), i64::MAX);

        let mut build = CustomModel::new("RefundBuild").unwrap();
        build.add_part("Fan", -2).unwrap();
        assert!(matches!(
            build.remove_part("Fan", i64::MAX),
            Err(CoreError::ValidationError(_))
        ));
        assert_eq!(build.parts(), ["Fan"]);
        assert_eq!(build.price_cents(), -2);
    }

    #[test]
    fn test_set_parts_keeps_price() {
        let mut build = CustomModel::new("GamerBuild").unwrap();
        build.add_part("Corsair DDR5 RAM", 18_000).unwrap();

        build
            .set_parts(vec!["NZXT Gaming Case".to_string(), " 850W Power Supply ".to_string()])
            .unwrap();
        assert_eq!(build.parts(), ["NZXT Gaming Case", "850W Power Supply"]);
        assert_eq!(build.price_cents(), 18_000);

        // A bad entry leaves the previous list untouched
        assert!(build.set_parts(vec!["Case".to_string(), "".to_string()]).is_err());
        assert_eq!(build.parts().len(), 2);
    }

    #[test]
    fn test_display_includes_name() {
        let build = CustomModel::new("GamerBuild").unwrap();
        assert!(build.to_string().contains("GamerBuild"));
    }
}
