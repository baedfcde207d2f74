use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::RawHoldingLot;

/// Source of holding lots for a security held in an account.
///
/// Implemented by the REST client (or a local store). Records come back
/// loosely typed and are validated with [`crate::holdings::ingest_lots`]
/// before they reach the split calculator.
#[async_trait]
pub trait HoldingLotSourceTrait: Send + Sync {
    async fn get_lots(&self, account_id: &str, security_id: &str) -> Result<Vec<RawHoldingLot>>;
}
