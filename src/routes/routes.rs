//! Defines routes for the APOD collection and login.
//!
//! ## Structure
//! - **Public endpoints**
//!   - `GET    /`        — welcome text
//!   - `GET    /healthz` — liveness
//!   - `GET    /readyz`  — readiness (store can be loaded)
//!   - `POST   /login`   — issue a bearer token
//!
//! - **Authenticated reads**
//!   - `GET    /apod`              — list all records
//!   - `GET    /apod/date/{date}`  — first record with `date`
//!   - `GET    /apod/liked`        — records with `liked == true`
//!
//! - **Authenticated, `admin` role only**
//!   - `POST   /apod`               — append a record
//!   - `PUT    /apod/date/{date}`   — shallow-merge update
//!   - `DELETE /apod/date/{date}`   — remove a record
//!   - `PUT    /apod/like/{date}`   — toggle `liked`
//!   - `PUT    /apod/unlike/{date}` — force `liked = false`

use crate::{
    auth::{
        gate::WRITE_ROLES,
        middleware::{authenticate, require_roles},
    },
    handlers::{
        apod_handlers::{
            create_apod, delete_apod, get_apod, like_apod, list_apods, list_liked, unlike_apod,
            update_apod,
        },
        auth_handlers::login,
        health_handlers::{healthz, readyz, welcome},
    },
    services::{apod_service::ApodService, token_service::TokenService},
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub apod: ApodService,
    pub tokens: Arc<TokenService>,
}

/// Build the complete router with `state` attached.
///
/// Role checks are layered inside token verification, so a request without a
/// valid token is rejected before its role is looked at, and neither
/// rejection reaches a handler.
pub fn routes(state: AppState) -> Router {
    let reads = Router::new()
        .route("/apod", get(list_apods))
        .route("/apod/date/{date}", get(get_apod))
        .route("/apod/liked", get(list_liked));

    let writes = Router::new()
        .route("/apod", post(create_apod))
        .route("/apod/date/{date}", put(update_apod).delete(delete_apod))
        .route("/apod/like/{date}", put(like_apod))
        .route("/apod/unlike/{date}", put(unlike_apod))
        .route_layer(middleware::from_fn(require_roles(WRITE_ROLES)));

    let protected = reads
        .merge(writes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/", get(welcome))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/login", post(login))
        .merge(protected)
        .with_state(state)
}
