pub mod config;
pub mod hard_request_store;

pub use hard_request_store::{HardRequestStore, HttpHardRequestStore};
