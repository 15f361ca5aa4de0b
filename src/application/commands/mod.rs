pub mod audit;
pub mod notifications;
