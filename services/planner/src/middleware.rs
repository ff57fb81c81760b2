//! Session middleware for bearer-token authentication

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::PlannerError};

/// Username of the authenticated caller, injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Session middleware
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, PlannerError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(PlannerError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(PlannerError::Unauthorized)?;

    // Resolve the session to a username
    let username = state
        .sessions
        .username_for(token)
        .await
        .ok_or(PlannerError::Unauthorized)?;

    // Insert the caller into the request extensions
    req.extensions_mut().insert(CurrentUser(username));

    // Call the next service
    let response = next.run(req).await;

    Ok(response)
}
