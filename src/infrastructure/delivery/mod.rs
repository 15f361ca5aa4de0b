mod email;
mod in_app;
mod sms;

pub use email::LoggingEmailSender;
pub use in_app::InAppSender;
pub use sms::LoggingSmsSender;

use crate::application::ports::delivery::NotificationSender;
use std::sync::Arc;

/// One sender per delivery channel.
pub fn default_senders() -> Vec<Arc<dyn NotificationSender>> {
    vec![
        Arc::new(InAppSender),
        Arc::new(LoggingEmailSender),
        Arc::new(LoggingSmsSender),
    ]
}
