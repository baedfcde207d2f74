//! Holdings module - holding lots and the ingestion boundary for lot records.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::{ingest_lots, HoldingLot, RawHoldingLot};
pub use holdings_traits::HoldingLotSourceTrait;
