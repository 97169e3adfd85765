use anyhow::{bail, Context};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use pcorder_catalog::{CustomModel, PcModel, PresetModel};
use pcorder_core::{Card, CardIssuer, CoreError, Customer};
use pcorder_order::{LedgerSummary, SharedLedger};
use pcorder_shared::{mask_tail, normalize_key};

use crate::app_config::{CardConfig, CatalogConfig, Config, SessionStep, StepAction};

/// Result of replaying a configured session
#[derive(Debug, Serialize)]
pub struct SessionOutcome {
    pub cards_issued: usize,
    pub rejected_orders: usize,
    pub summary: LedgerSummary,
}

/// Models available to a session, looked up by case-insensitive name
pub type Catalog = HashMap<String, Arc<PcModel>>;

pub fn build_catalog(config: &CatalogConfig) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::new();

    for preset in &config.presets {
        let model = PresetModel::new(
            &preset.name,
            &preset.manufacturer,
            preset.parts.clone(),
            preset.price_cents,
        )
        .with_context(|| format!("Invalid preset model '{}'", preset.name))?;
        insert_model(&mut catalog, &preset.name, model.into())?;
    }

    for build in &config.custom_builds {
        let mut model = CustomModel::new(&build.name)
            .with_context(|| format!("Invalid custom build '{}'", build.name))?;
        for part in &build.parts {
            model
                .add_part(&part.name, part.price_cents)
                .with_context(|| format!("Invalid part in custom build '{}'", build.name))?;
        }
        insert_model(&mut catalog, &build.name, model.into())?;
    }

    Ok(catalog)
}

fn insert_model(catalog: &mut Catalog, name: &str, model: PcModel) -> anyhow::Result<()> {
    let key = normalize_key(name);
    if catalog.contains_key(&key) {
        bail!("Duplicate model name in catalog: '{}'", name);
    }
    catalog.insert(key, Arc::new(model));
    Ok(())
}

pub fn issue_cards(
    issuer: &CardIssuer,
    cards: &[CardConfig],
) -> anyhow::Result<HashMap<String, Card>> {
    let mut issued = HashMap::new();
    for entry in cards {
        let card = issuer
            .issue(&entry.number, entry.expires_at, &entry.holder_name)
            .with_context(|| format!("Could not issue card {}", mask_tail(&entry.number, 4)))?;
        issued.insert(card.number().to_string(), card);
    }
    Ok(issued)
}

/// Place every step's order against `ledger`.
///
/// Orders refused for payment are logged and skipped; any other problem
/// aborts the replay. Returns how many orders were refused.
pub async fn replay(
    ledger: &SharedLedger,
    cards: &HashMap<String, Card>,
    catalog: &Catalog,
    steps: &[SessionStep],
) -> anyhow::Result<usize> {
    let mut rejected = 0;

    for (index, step) in steps.iter().enumerate() {
        let customer = Customer::new(&step.first_name, &step.last_name)
            .with_context(|| format!("Session step {}: invalid customer", index + 1))?;
        let Some(card) = cards.get(&step.card) else {
            bail!(
                "Session step {}: card {} was not issued",
                index + 1,
                mask_tail(&step.card, 4)
            );
        };
        let Some(model) = catalog.get(&normalize_key(&step.model)) else {
            bail!("Session step {}: unknown model '{}'", index + 1, step.model);
        };

        let order = match ledger.place_order(customer, Arc::clone(model), card).await {
            Ok(order) => order,
            Err(CoreError::InvalidPayment(reason)) => {
                tracing::warn!(step = index + 1, "Order refused: {}", reason);
                rejected += 1;
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Session step {} failed", index + 1));
            }
        };

        match step.action {
            StepAction::Fulfil => {
                ledger.fulfil(&order.id).await;
            }
            StepAction::Cancel => {
                ledger.cancel(&order.id).await;
            }
            StepAction::Hold => {}
        }
    }

    Ok(rejected)
}

/// Issue cards, build the catalog and replay the session from `config`.
pub async fn run(config: &Config) -> anyhow::Result<SessionOutcome> {
    let issuer = CardIssuer::new();
    let cards = issue_cards(&issuer, &config.cards)?;
    let catalog = build_catalog(&config.catalog)?;

    tracing::info!(
        cards = cards.len(),
        models = catalog.len(),
        steps = config.session.len(),
        "Replaying session"
    );

    let ledger = SharedLedger::default();
    let rejected_orders = replay(&ledger, &cards, &catalog, &config.session).await?;

    Ok(SessionOutcome {
        cards_issued: issuer.count()?,
        rejected_orders,
        summary: ledger.summary().await,
    })
}
