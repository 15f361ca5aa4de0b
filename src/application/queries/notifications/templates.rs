use super::NotificationQueryService;
use crate::{application::dto::NotificationTemplateDto, domain::notification::TemplateKind};

impl NotificationQueryService {
    pub fn list_templates(&self) -> Vec<NotificationTemplateDto> {
        TemplateKind::ALL.into_iter().map(Into::into).collect()
    }
}
