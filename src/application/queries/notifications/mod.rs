mod inbox;
mod service;
mod templates;

pub use inbox::ListNotificationsQuery;
pub use service::NotificationQueryService;
