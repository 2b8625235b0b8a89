pub mod store_service;
pub mod sync_service;
