pub mod cache;
pub mod consumer;
pub mod customer_repo;
pub mod models;
pub mod order_repo;
pub mod queue;
