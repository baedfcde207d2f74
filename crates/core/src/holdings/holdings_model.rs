//! Holding lot domain models.

use chrono::{DateTime, NaiveDate};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// One tax/accounting lot of a security position.
///
/// Invariant: `quantity > 0` and `price >= 0`. Lots are only built through
/// [`HoldingLot::new`] or ingestion, so the split calculator never re-checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingLot {
    /// Opaque identifier, round-tripped to the submission sink.
    pub id: String,
    pub security_id: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    /// Units held in this lot.
    pub quantity: Decimal,
    /// Cost basis per unit.
    pub price: Decimal,
}

impl HoldingLot {
    pub fn new(id: impl Into<String>, quantity: Decimal, price: Decimal) -> Result<Self> {
        let id = id.into();
        validate_lot_fields(&id, quantity, price)?;
        Ok(HoldingLot {
            id,
            security_id: None,
            acquisition_date: None,
            quantity,
            price,
        })
    }

    /// Total position value of the lot, `None` if it overflows.
    pub fn value(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.price)
    }
}

fn validate_lot_fields(id: &str, quantity: Decimal, price: Decimal) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingField("id".to_string()).into());
    }
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Lot {} has non-positive quantity {}",
            id, quantity
        ))
        .into());
    }
    if price < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Lot {} has negative price {}",
            id, price
        ))
        .into());
    }
    if quantity.checked_mul(price).is_none() {
        return Err(ValidationError::InvalidInput(format!(
            "Lot {} value {} × {} is too large to represent",
            id, quantity, price
        ))
        .into());
    }
    Ok(())
}

/// Lot record as returned by the backend API.
///
/// Numeric fields may arrive as JSON numbers, numeric strings or null, and the
/// id may be a string or a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHoldingLot {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub security_id: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

fn parse_decimal_value(value: &str) -> std::result::Result<Decimal, String> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
}

fn required_decimal(value: Option<&Value>, field: &str) -> Result<Decimal> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField(field.to_string()).into())
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ValidationError::MissingField(field.to_string()).into())
        }
        Some(Value::String(s)) => parse_decimal_value(s),
        Some(Value::Number(n)) => parse_decimal_value(&n.to_string()),
        Some(other) => Err(format!("Unsupported value type: {}", other)),
    };
    parsed.map_err(|e| {
        Error::Validation(ValidationError::InvalidInput(format!("{}: {}", field, e)))
    })
}

fn required_id(value: Option<&Value>) -> Result<String> {
    let id = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if id.is_empty() {
        return Err(ValidationError::MissingField("id".to_string()).into());
    }
    Ok(id)
}

fn parse_acquisition_date(raw: Option<&str>, lot_id: &str) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            warn!(
                "Ignoring unparseable acquisition date '{}' on lot {}",
                raw, lot_id
            );
            None
        })
}

impl TryFrom<RawHoldingLot> for HoldingLot {
    type Error = Error;

    fn try_from(raw: RawHoldingLot) -> Result<Self> {
        let id = required_id(raw.id.as_ref())?;
        let quantity = required_decimal(raw.quantity.as_ref(), "quantity")?;
        let price = required_decimal(raw.price.as_ref(), "price")?;
        validate_lot_fields(&id, quantity, price)?;

        let acquisition_date = parse_acquisition_date(raw.acquisition_date.as_deref(), &id);
        Ok(HoldingLot {
            id,
            security_id: raw.security_id.filter(|s| !s.trim().is_empty()),
            acquisition_date,
            quantity,
            price,
        })
    }
}

/// Validates a batch of API records, failing on the first invalid one.
pub fn ingest_lots(raw_lots: Vec<RawHoldingLot>) -> Result<Vec<HoldingLot>> {
    raw_lots
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            HoldingLot::try_from(raw).map_err(|e| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Lot record #{}: {}",
                    index + 1,
                    e
                )))
            })
        })
        .collect()
}
