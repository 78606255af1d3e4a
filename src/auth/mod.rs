//! Token verification and role-based gating for the mutating routes.

pub mod gate;
pub mod middleware;
