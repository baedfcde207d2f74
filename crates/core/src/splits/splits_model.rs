//! Split preview rows and the submission payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdjustedLot, LotValidation, SplitRatio};

/// One editable row of a split preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreviewRow {
    pub lot: AdjustedLot,
    /// Quantity produced by the ratio, kept so a hand edit can be undone.
    pub computed_quantity: Decimal,
    pub computed_price: Decimal,
    pub validation: LotValidation,
    pub edited: bool,
}

impl SplitPreviewRow {
    pub fn new(lot: AdjustedLot, validation: LotValidation) -> Self {
        SplitPreviewRow {
            computed_quantity: lot.new_quantity,
            computed_price: lot.new_price,
            lot,
            validation,
            edited: false,
        }
    }
}

/// Adjusted values for one lot, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLotUpdate {
    pub lot_id: String,
    pub new_quantity: Decimal,
    pub new_price: Decimal,
}

/// Payload handed to the submission sink when a split is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSubmission {
    /// Idempotency key for the backend.
    pub id: Uuid,
    pub account_id: String,
    pub security_id: String,
    pub numerator: u64,
    pub denominator: u64,
    pub lots: Vec<SplitLotUpdate>,
    pub created_at: DateTime<Utc>,
}

impl SplitSubmission {
    pub fn new(
        account_id: String,
        security_id: String,
        ratio: &SplitRatio,
        rows: &[SplitPreviewRow],
    ) -> Self {
        SplitSubmission {
            id: Uuid::new_v4(),
            account_id,
            security_id,
            numerator: ratio.numerator(),
            denominator: ratio.denominator(),
            lots: rows
                .iter()
                .map(|row| SplitLotUpdate {
                    lot_id: row.lot.lot_id.clone(),
                    new_quantity: row.lot.new_quantity,
                    new_price: row.lot.new_price,
                })
                .collect(),
            created_at: Utc::now(),
        }
    }
}
