pub mod app_config;
pub mod database;
pub mod hotel_repo;
pub mod booking_repo;
pub mod revenue_repo;
pub mod memory_repo;

pub use database::DbClient;
pub use memory_repo::InMemoryStore;
