pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod resilience;
pub mod services;

pub use error::ApplicationResult;
