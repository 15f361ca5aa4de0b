// src/application/commands/notifications/dispatch.rs
use super::NotificationCommandService;
use crate::application::error::ApplicationResult;
use chrono::{DateTime, Utc};

const DISPATCH_BATCH: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: u32,
    pub delivered: u32,
    pub failed: u32,
}

impl NotificationCommandService {
    /// Claims and delivers pending notifications whose schedule has passed.
    /// Individual delivery failures are logged and counted, not returned.
    pub async fn dispatch_due(&self, now: DateTime<Utc>) -> ApplicationResult<DispatchSummary> {
        let due = self.repo.claim_due(now, DISPATCH_BATCH).await?;
        let mut summary = DispatchSummary::default();

        for mut notification in due {
            summary.attempted += 1;
            match self.deliver_and_mark(&mut notification).await {
                Ok(()) => summary.delivered += 1,
                Err(err) => {
                    summary.failed += 1;
                    tracing::warn!(
                        notification_id = %notification.id,
                        error = %err,
                        "scheduled notification delivery failed"
                    );
                }
            }
        }

        if summary.attempted > 0 {
            tracing::info!(
                attempted = summary.attempted,
                delivered = summary.delivered,
                failed = summary.failed,
                "scheduled notification dispatch finished"
            );
        }
        Ok(summary)
    }
}
