// src/domain/mod.rs
pub mod audit;
pub mod errors;
pub mod notification;
