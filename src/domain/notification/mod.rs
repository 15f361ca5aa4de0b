// src/domain/notification/mod.rs
pub mod entity;
pub mod repository;
pub mod template;

pub use entity::{DeliveryChannel, Notification, NotificationPriority, NotificationStatus};
pub use repository::NotificationRepository;
pub use template::{NotificationTemplate, RenderedContent, TemplateKind};
