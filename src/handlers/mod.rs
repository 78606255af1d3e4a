pub mod apod_handlers;
pub mod auth_handlers;
pub mod health_handlers;
