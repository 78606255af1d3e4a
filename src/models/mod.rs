//! Data models for the APOD service.
//!
//! Records are opaque JSON objects keyed by `date`; the login bodies are the
//! only fixed-shape types exchanged over HTTP.

pub mod auth;
pub mod record;
