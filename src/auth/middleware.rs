//! Axum middleware wrapping the token service and the role gate.

use crate::{
    errors::AppError,
    routes::routes::AppState,
    services::token_service::{Claims, bearer_token},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use tracing::warn;

use super::gate::authorize;

/// Verify the bearer token and stash its [`Claims`] in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = state.tokens.verify(bearer_token(header)).inspect_err(|err| {
        warn!(
            "rejected credentials for {} {}: {}",
            request.method(),
            request.uri().path(),
            err
        )
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

type GateFuture = Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>>;

/// Build a middleware admitting only requests whose claims hold one of `allowed`.
///
/// Must run after [`authenticate`]; a request without claims is forbidden.
pub fn require_roles(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> GateFuture + Clone + Send + Sync + 'static {
    move |request: Request, next: Next| -> GateFuture {
        Box::pin(async move {
            if let Err(err) = authorize(request.extensions().get::<Claims>(), allowed) {
                warn!(
                    "denied {} {}: {}",
                    request.method(),
                    request.uri().path(),
                    err
                );
                return Err(AppError::from(err));
            }
            Ok(next.run(request).await)
        })
    }
}
