use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use pcorder_shared::mask_tail;

use crate::card::Card;
use crate::{CoreError, CoreResult};

/// Issues cards and guarantees that no number is handed out twice.
///
/// An issuer is an ordinary value: tests build their own instead of sharing
/// global state. Wrap it in an `Arc` to share it between threads; every
/// operation is serialized through the internal lock.
#[derive(Debug, Default)]
pub struct CardIssuer {
    issued: Mutex<HashSet<String>>,
}

impl CardIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a card and record its number.
    ///
    /// Fails with `DuplicateCard` when the number was already issued, or
    /// with `ValidationError` when the card itself is malformed. Nothing is
    /// recorded on failure.
    pub fn issue(
        &self,
        number: &str,
        expiry: DateTime<Utc>,
        holder_name: &str,
    ) -> CoreResult<Card> {
        let mut issued = self.registry()?;

        if issued.contains(number) {
            tracing::warn!("Rejected duplicate card number {}", mask_tail(number, 4));
            return Err(CoreError::DuplicateCard(mask_tail(number, 4)));
        }

        let card = Card::new(number, expiry, holder_name)?;
        issued.insert(card.number().to_string());

        tracing::info!(
            card = %card.masked_number(),
            total = issued.len(),
            "Issued card"
        );
        Ok(card)
    }

    /// Forget every issued number.
    pub fn reset(&self) -> CoreResult<()> {
        let mut issued = self.registry()?;
        tracing::debug!(cleared = issued.len(), "Card registry reset");
        issued.clear();
        Ok(())
    }

    /// Number of distinct cards issued since construction or the last reset
    pub fn count(&self) -> CoreResult<usize> {
        Ok(self.registry()?.len())
    }

    pub fn is_issued(&self, number: &str) -> CoreResult<bool> {
        Ok(self.registry()?.contains(number))
    }

    fn registry(&self) -> CoreResult<MutexGuard<'_, HashSet<String>>> {
        self.issued
            .lock()
            .map_err(|_| CoreError::Internal("card registry lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn future() -> DateTime<Utc> {
        Utc::now() + Duration::days(730)
    }

    #[test]
    fn test_issue_card() {
        let issuer = CardIssuer::new();
        let card = issuer.issue("12345678", future(), "Nick Davis").unwrap();

        assert_eq!(card.number(), "12345678");
        assert!(card.is_valid());
        assert_eq!(issuer.count().unwrap(), 1);
        assert!(issuer.is_issued("12345678").unwrap());
    }

    #[test]
    fn test_duplicate_number_rejected_until_reset() {
        let issuer = CardIssuer::new();
        issuer.issue("87654321", future(), "Maria Kolesnichenko").unwrap();

        let again = issuer.issue("87654321", future(), "Someone Else");
        assert!(matches!(again, Err(CoreError::DuplicateCard(_))));
        assert_eq!(issuer.count().unwrap(), 1);

        issuer.reset().unwrap();
        assert_eq!(issuer.count().unwrap(), 0);
        assert!(issuer.issue("87654321", future(), "Maria Kolesnichenko").is_ok());
    }

    #[test]
    fn test_count_tracks_distinct_numbers() {
        let issuer = CardIssuer::new();
        issuer.issue("11112222", future(), "Kamisato Ayaka").unwrap();
        issuer.issue("33334444", future(), "Raiden Ei").unwrap();
        let _ = issuer.issue("11112222", future(), "Kamisato Ayaka");

        assert_eq!(issuer.count().unwrap(), 2);
    }

    #[test]
    fn test_invalid_card_not_recorded() {
        let issuer = CardIssuer::new();
        let result = issuer.issue("1234", future(), "Nick Davis");

        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(issuer.count().unwrap(), 0);
        assert!(!issuer.is_issued("1234").unwrap());
    }

    #[test]
    fn test_expired_card_can_still_be_issued() {
        // Issuance checks format and uniqueness only; expiry is checked at payment
        let issuer = CardIssuer::new();
        let card = issuer
            .issue("55556666", Utc::now() - Duration::days(1), "Yae Miko")
            .unwrap();
        assert!(!card.is_valid());
    }

    #[test]
    fn test_separate_issuers_are_isolated() {
        let a = CardIssuer::new();
        let b = CardIssuer::new();
        a.issue("99998888", future(), "Yae Miko").unwrap();
        assert!(b.issue("99998888", future(), "Yae Miko").is_ok());
    }

    #[test]
    fn test_concurrent_issue_of_same_number() {
        let issuer = Arc::new(CardIssuer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let issuer = Arc::clone(&issuer);
                std::thread::spawn(move || issuer.issue("13579246", future(), "Nick Davis").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(issuer.count().unwrap(), 1);
    }
}
