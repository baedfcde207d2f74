//! Splits module - ratio parsing, lot adjustment, value-conservation checks
//! and the preview/submit workflow.

mod conservation;
mod lot_adjuster;
mod split_ratio;
mod split_session;
mod splits_errors;
mod splits_model;
mod splits_service;
mod splits_traits;

pub use conservation::{has_errors, validate_lot, ConservationSummary, LotValidation};
pub use lot_adjuster::{adjust_lot, adjust_lots, AdjustedLot};
pub use split_ratio::{parse_split_ratio, RatioParseOutcome, SplitKind, SplitRatio};
pub use split_session::{SplitSession, SplitSessionState};
pub use splits_errors::{RatioError, SplitError};
pub use splits_model::{SplitLotUpdate, SplitPreviewRow, SplitSubmission};
pub use splits_service::SplitService;
pub use splits_traits::{SplitServiceTrait, SplitSubmissionSinkTrait};

#[cfg(test)]
mod conservation_tests;
#[cfg(test)]
mod lot_adjuster_tests;
