pub mod database;
pub mod delivery;
pub mod repositories;
pub mod storage;
pub mod time;
