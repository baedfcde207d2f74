//! Interactive split workflow for one selected security.
//!
//! ```text
//! Idle -> LotsLoaded -> PreviewComputed -> Submitting
//!            ^              |    ^            |
//!            +--- reset ----+    +-- failure -+
//!            +------------- success ----------+
//! ```
//!
//! The session owns no global state and performs no I/O; fetching lots and
//! sending the submission belong to the caller (see `SplitService`).

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    adjust_lots, has_errors, parse_split_ratio, validate_lot, ConservationSummary, LotValidation,
    RatioError, SplitError, SplitPreviewRow, SplitRatio, SplitSubmission,
};
use crate::holdings::HoldingLot;
use crate::settings::SplitSettings;

type SessionResult<T> = std::result::Result<T, SplitError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitSessionState {
    /// No lots loaded for a selected security.
    Idle,
    LotsLoaded,
    /// Adjusted lots are shown and editable.
    PreviewComputed,
    /// A submission is in flight.
    Submitting,
}

impl fmt::Display for SplitSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SplitSessionState::Idle => "idle",
            SplitSessionState::LotsLoaded => "lots are loaded",
            SplitSessionState::PreviewComputed => "a preview is shown",
            SplitSessionState::Submitting => "submitting",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct SplitSession {
    settings: SplitSettings,
    state: SplitSessionState,
    account_id: Option<String>,
    security_id: Option<String>,
    lots: Vec<HoldingLot>,
    ratio: Option<SplitRatio>,
    ratio_error: Option<RatioError>,
    rows: Vec<SplitPreviewRow>,
    last_error: Option<String>,
}

impl SplitSession {
    pub fn new(settings: SplitSettings) -> Self {
        SplitSession {
            settings,
            state: SplitSessionState::Idle,
            account_id: None,
            security_id: None,
            lots: Vec::new(),
            ratio: None,
            ratio_error: None,
            rows: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> SplitSessionState {
        self.state
    }

    pub fn settings(&self) -> &SplitSettings {
        &self.settings
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub fn security_id(&self) -> Option<&str> {
        self.security_id.as_deref()
    }

    pub fn lots(&self) -> &[HoldingLot] {
        &self.lots
    }

    pub fn ratio(&self) -> Option<&SplitRatio> {
        self.ratio.as_ref()
    }

    /// Field-level error from the last ratio entry, if it failed to parse.
    pub fn ratio_error(&self) -> Option<RatioError> {
        self.ratio_error
    }

    pub fn rows(&self) -> &[SplitPreviewRow] {
        &self.rows
    }

    /// Error from the last failed submission, kept for display.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True iff any preview row fails the value check.
    pub fn has_errors(&self) -> bool {
        has_errors(self.rows.iter().map(|row| &row.validation))
    }

    pub fn summary(&self) -> ConservationSummary {
        let lots: Vec<_> = self.rows.iter().map(|row| row.lot.clone()).collect();
        ConservationSummary::from_lots(&lots, &self.settings)
    }

    /// Replaces the settings and re-validates any preview rows against them.
    pub fn set_settings(&mut self, settings: SplitSettings) {
        self.settings = settings;
        self.revalidate_all();
    }

    /// Selects a security, discarding lots and any preview.
    pub fn select_security(
        &mut self,
        account_id: impl Into<String>,
        security_id: impl Into<String>,
    ) -> SessionResult<()> {
        self.ensure_not(SplitSessionState::Submitting, "select a security")?;
        self.account_id = Some(account_id.into());
        self.security_id = Some(security_id.into());
        self.lots.clear();
        self.clear_preview();
        self.last_error = None;
        self.transition(SplitSessionState::Idle);
        Ok(())
    }

    /// Installs the lots fetched for the selected security.
    ///
    /// Reloading while a preview is shown discards the preview.
    pub fn load_lots(&mut self, lots: Vec<HoldingLot>) -> SessionResult<()> {
        self.ensure_not(SplitSessionState::Submitting, "load lots")?;
        if self.security_id.is_none() {
            return Err(SplitError::invalid_transition(self.state, "load lots"));
        }
        self.lots = lots;
        self.clear_preview();
        self.transition(SplitSessionState::LotsLoaded);
        Ok(())
    }

    /// Parses the ratio and computes the preview.
    ///
    /// A parse failure keeps the session in `LotsLoaded` and is also kept in
    /// [`SplitSession::ratio_error`].
    pub fn enter_ratio(&mut self, input: &str) -> SessionResult<&[SplitPreviewRow]> {
        self.ensure(SplitSessionState::LotsLoaded, "enter a ratio")?;

        let ratio = match parse_split_ratio(input) {
            Ok(ratio) => ratio,
            Err(e) => {
                debug!("Rejected split ratio '{}': {}", input, e);
                self.ratio_error = Some(e);
                return Err(e.into());
            }
        };
        self.ratio_error = None;

        if self.lots.is_empty() {
            return Err(SplitError::NoLots(
                self.security_id.clone().unwrap_or_default(),
            ));
        }

        let adjusted = adjust_lots(&self.lots, &ratio).map_err(|e| {
            warn!("Cannot preview split {} for {:?}: {}", ratio, self.security_id, e);
            e
        })?;
        self.rows = adjusted
            .into_iter()
            .map(|lot| {
                let validation = validate_lot(&lot, &self.settings);
                SplitPreviewRow::new(lot, validation)
            })
            .collect();
        self.ratio = Some(ratio);
        self.last_error = None;
        self.transition(SplitSessionState::PreviewComputed);
        Ok(&self.rows)
    }

    /// Hand-edits a row's new quantity and/or price and re-validates it.
    ///
    /// A quantity that is not positive or a negative price is refused and
    /// leaves the row unchanged.
    pub fn edit_row(
        &mut self,
        index: usize,
        new_quantity: Option<Decimal>,
        new_price: Option<Decimal>,
    ) -> SessionResult<&LotValidation> {
        self.ensure(SplitSessionState::PreviewComputed, "edit a row")?;
        if let Some(quantity) = new_quantity.filter(|q| *q <= Decimal::ZERO) {
            return Err(SplitError::InvalidEdit {
                index,
                message: format!("quantity must be positive, got {}", quantity),
            });
        }
        if let Some(price) = new_price.filter(|p| *p < Decimal::ZERO) {
            return Err(SplitError::InvalidEdit {
                index,
                message: format!("price must not be negative, got {}", price),
            });
        }
        let settings = self.settings.clone();
        let row = self.row_mut(index)?;

        if let Some(quantity) = new_quantity {
            row.lot.new_quantity = quantity;
        }
        if let Some(price) = new_price {
            row.lot.new_price = price;
        }
        row.edited = row.lot.new_quantity != row.computed_quantity
            || row.lot.new_price != row.computed_price;
        row.validation = validate_lot(&row.lot, &settings);
        Ok(&row.validation)
    }

    /// Puts a row back to the values computed from the ratio.
    pub fn restore_row(&mut self, index: usize) -> SessionResult<&LotValidation> {
        self.ensure(SplitSessionState::PreviewComputed, "restore a row")?;
        let settings = self.settings.clone();
        let row = self.row_mut(index)?;

        row.lot.new_quantity = row.computed_quantity;
        row.lot.new_price = row.computed_price;
        row.edited = false;
        row.validation = validate_lot(&row.lot, &settings);
        Ok(&row.validation)
    }

    /// Discards the preview and re-enables ratio entry.
    pub fn reset(&mut self) -> SessionResult<()> {
        self.ensure(SplitSessionState::PreviewComputed, "reset the preview")?;
        self.clear_preview();
        self.last_error = None;
        self.transition(SplitSessionState::LotsLoaded);
        Ok(())
    }

    /// Moves to `Submitting` and returns the payload to send.
    ///
    /// Refused while any row fails the value check.
    pub fn begin_submit(&mut self) -> SessionResult<SplitSubmission> {
        self.ensure(SplitSessionState::PreviewComputed, "submit")?;

        let invalid_rows: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.validation.is_valid)
            .map(|(index, _)| index)
            .collect();
        if !invalid_rows.is_empty() {
            warn!(
                "Blocked split submission for {:?}: rows {:?} fail the value check",
                self.security_id, invalid_rows
            );
            return Err(SplitError::SubmissionBlocked { invalid_rows });
        }

        let (Some(account_id), Some(security_id), Some(ratio)) =
            (self.account_id.clone(), self.security_id.clone(), self.ratio)
        else {
            return Err(SplitError::invalid_transition(self.state, "submit"));
        };

        let submission = SplitSubmission::new(account_id, security_id, &ratio, &self.rows);
        self.last_error = None;
        self.transition(SplitSessionState::Submitting);
        Ok(submission)
    }

    /// Records a successful submission with the re-fetched lots.
    pub fn complete_submit(&mut self, refreshed_lots: Vec<HoldingLot>) -> SessionResult<()> {
        self.ensure(SplitSessionState::Submitting, "complete a submission")?;
        self.lots = refreshed_lots;
        self.clear_preview();
        self.transition(SplitSessionState::LotsLoaded);
        Ok(())
    }

    /// Records a failed submission. The preview is kept so the user can retry.
    pub fn fail_submit(&mut self, message: impl Into<String>) -> SessionResult<()> {
        self.ensure(SplitSessionState::Submitting, "fail a submission")?;
        self.last_error = Some(message.into());
        self.transition(SplitSessionState::PreviewComputed);
        Ok(())
    }

    pub(crate) fn note_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    fn ensure(&self, expected: SplitSessionState, action: &'static str) -> SessionResult<()> {
        if self.state != expected {
            return Err(SplitError::invalid_transition(self.state, action));
        }
        Ok(())
    }

    fn ensure_not(&self, forbidden: SplitSessionState, action: &'static str) -> SessionResult<()> {
        if self.state == forbidden {
            return Err(SplitError::invalid_transition(self.state, action));
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> SessionResult<&mut SplitPreviewRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(SplitError::RowOutOfRange { index, len })
    }

    fn revalidate_all(&mut self) {
        for row in self.rows.iter_mut() {
            row.validation = validate_lot(&row.lot, &self.settings);
        }
    }

    fn clear_preview(&mut self) {
        self.rows.clear();
        self.ratio = None;
        self.ratio_error = None;
    }

    fn transition(&mut self, next: SplitSessionState) {
        if self.state != next {
            debug!(
                "Split session for {:?}: {:?} -> {:?}",
                self.security_id, self.state, next
            );
        }
        self.state = next;
    }
}
