use super::AuditQueryService;
use crate::{
    application::{dto::ChainVerificationDto, error::ApplicationResult},
    domain::audit::ChainVerifier,
};

impl AuditQueryService {
    /// Walks the whole chain in insertion order, `batch_size` entries at a
    /// time, and reports the first break if there is one.
    pub async fn verify_chain(&self) -> ApplicationResult<ChainVerificationDto> {
        let mut verifier = ChainVerifier::new();
        let mut after_id = None;

        'scan: loop {
            let batch = self.repo.scan_from(after_id, self.batch_size).await?;
            let Some(last) = batch.last() else {
                break;
            };
            after_id = Some(last.id);
            let exhausted = (batch.len() as u32) < self.batch_size;

            for entry in &batch {
                if !verifier.feed(entry)? {
                    break 'scan;
                }
            }
            if exhausted {
                break;
            }
        }

        let report = verifier.finish();
        match &report.first_break {
            None => tracing::info!(
                entries_checked = report.entries_checked,
                "audit chain verified"
            ),
            Some(brk) => tracing::warn!(
                entries_checked = report.entries_checked,
                position = brk.position,
                entry_id = brk.entry_id,
                kind = brk.kind.as_str(),
                "audit chain broken"
            ),
        }
        Ok(report.into())
    }
}
