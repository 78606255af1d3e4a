pub mod apod_service;
pub mod record_store;
pub mod token_service;
