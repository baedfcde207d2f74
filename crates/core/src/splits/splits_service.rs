use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::{SplitError, SplitServiceTrait, SplitSession, SplitSubmission, SplitSubmissionSinkTrait};
use crate::errors::Result;
use crate::holdings::{ingest_lots, HoldingLot, HoldingLotSourceTrait};
use crate::settings::SettingsServiceTrait;

/// Service for previewing and applying stock splits.
pub struct SplitService {
    lot_source: Arc<dyn HoldingLotSourceTrait>,
    submission_sink: Arc<dyn SplitSubmissionSinkTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
}

impl SplitService {
    pub fn new(
        lot_source: Arc<dyn HoldingLotSourceTrait>,
        submission_sink: Arc<dyn SplitSubmissionSinkTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            lot_source,
            submission_sink,
            settings_service,
        }
    }

    async fn fetch_lots(&self, account_id: &str, security_id: &str) -> Result<Vec<HoldingLot>> {
        let raw_lots = self.lot_source.get_lots(account_id, security_id).await?;
        let lots = ingest_lots(raw_lots)?;
        debug!(
            "Fetched {} lots for security {} in account {}",
            lots.len(),
            security_id,
            account_id
        );
        Ok(lots)
    }
}

#[async_trait]
impl SplitServiceTrait for SplitService {
    fn new_session(&self) -> Result<SplitSession> {
        let settings = self.settings_service.get_split_settings()?;
        Ok(SplitSession::new(settings))
    }

    async fn load_lots(
        &self,
        session: &mut SplitSession,
        account_id: &str,
        security_id: &str,
    ) -> Result<usize> {
        session.select_security(account_id, security_id)?;
        let lots = self.fetch_lots(account_id, security_id).await?;
        let count = lots.len();
        session.load_lots(lots)?;
        Ok(count)
    }

    async fn submit(&self, session: &mut SplitSession) -> Result<SplitSubmission> {
        let submission = session.begin_submit()?;

        if let Err(e) = self.submission_sink.submit_split(&submission).await {
            warn!(
                "Split submission {} for security {} failed: {}",
                submission.id, submission.security_id, e
            );
            let message = e.to_string();
            session.fail_submit(message.clone())?;
            return Err(SplitError::SubmissionFailed(message).into());
        }

        info!(
            "Applied {}:{} split to {} lots of security {}",
            submission.numerator,
            submission.denominator,
            submission.lots.len(),
            submission.security_id
        );

        match self
            .fetch_lots(&submission.account_id, &submission.security_id)
            .await
        {
            Ok(lots) => session.complete_submit(lots)?,
            Err(e) => {
                warn!(
                    "Split {} applied but reloading lots for {} failed: {}",
                    submission.id, submission.security_id, e
                );
                session.complete_submit(Vec::new())?;
                session.note_error(format!("Split applied, but reloading lots failed: {}", e));
            }
        }

        Ok(submission)
    }
}
