// src/application/ports/mod.rs
pub mod delivery;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ClockPort = dyn time::Clock;
pub type NotificationSenderPort = dyn delivery::NotificationSender;
