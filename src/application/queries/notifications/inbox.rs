use super::NotificationQueryService;
use crate::application::{
    dto::{Actor, NotificationDto, UnreadCountDto},
    error::ApplicationResult,
};

pub struct ListNotificationsQuery {
    pub unread_only: bool,
    pub limit: u32,
}

fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 50;
    const MAX_LIMIT: u32 = 200;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

impl NotificationQueryService {
    /// The caller's own notifications, newest first.
    pub async fn list_for_recipient(
        &self,
        actor: &Actor,
        query: ListNotificationsQuery,
    ) -> ApplicationResult<Vec<NotificationDto>> {
        let items = self
            .repo
            .list_for_recipient(&actor.id, query.unread_only, normalize_limit(query.limit))
            .await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn unread_count(&self, actor: &Actor) -> ApplicationResult<UnreadCountDto> {
        let count = self.repo.count_unread(&actor.id).await?;
        Ok(UnreadCountDto { count })
    }
}
