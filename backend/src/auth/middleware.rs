//! Guard middleware for the protected routes.
//!
//! Guards run in order ahead of the handler body: the token guard resolves
//! the caller's identity from the bearer credential, the ownership guard
//! compares that identity against the requested user id. Each guard either
//! forwards the request or produces a terminal response.

use crate::auth::models::IdQuery;
use crate::state::AppState;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Query, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Bearer-token verification guard.
///
/// Verifies the `Authorization` header through the injected token service and
/// attaches the resolved claims to the request for downstream guards and
/// handlers.
pub async fn require_token(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..];

    match state.tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(error) => {
            tracing::info!("Rejected bearer token: {}", error);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Ownership guard.
///
/// When the request names a user through the `id` query parameter, that id
/// must match the authenticated subject. Requests without an id (logout)
/// pass; the handler's own presence check decides what happens next.
pub async fn require_owner(
    Query(query): Query<IdQuery>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if let Some(id) = &query.id {
        if !id.is_empty() && id != &claims.sub {
            tracing::info!("User {} denied access to {}", claims.sub, id);
            return Err(StatusCode::FORBIDDEN);
        }
    }

    Ok(next.run(request).await)
}
