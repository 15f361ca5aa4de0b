pub mod actor;
pub mod audit;
pub mod notifications;
pub mod pagination;

pub use actor::Actor;
pub use audit::{AuditLogDto, ChainBreakDto, ChainVerificationDto};
pub use notifications::{NotificationDto, NotificationTemplateDto, UnreadCountDto};
pub use pagination::CursorPage;
