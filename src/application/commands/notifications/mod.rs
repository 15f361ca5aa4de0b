// src/application/commands/notifications/mod.rs
mod create;
mod dispatch;
mod dispatcher;
mod read;
mod service;

pub use create::{CreateNotificationCommand, NotificationOptions};
pub use dispatch::DispatchSummary;
pub use dispatcher::NotificationDispatcher;
pub use read::MarkNotificationReadCommand;
pub use service::NotificationCommandService;
