use async_trait::async_trait;

use super::{SplitSession, SplitSubmission};
use crate::errors::Result;

/// Receives an applied split. Implemented by the REST client.
#[async_trait]
pub trait SplitSubmissionSinkTrait: Send + Sync {
    async fn submit_split(&self, submission: &SplitSubmission) -> Result<()>;
}

/// Drives a [`SplitSession`] against the lot source and submission sink.
#[async_trait]
pub trait SplitServiceTrait: Send + Sync {
    /// Starts a session using the currently configured split settings.
    fn new_session(&self) -> Result<SplitSession>;

    /// Selects a security and loads its lots. Returns the number of lots loaded.
    async fn load_lots(
        &self,
        session: &mut SplitSession,
        account_id: &str,
        security_id: &str,
    ) -> Result<usize>;

    /// Submits the current preview and reloads lots on success.
    async fn submit(&self, session: &mut SplitSession) -> Result<SplitSubmission>;
}
