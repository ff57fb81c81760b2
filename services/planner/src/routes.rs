//! Planner service routes

use std::collections::BTreeMap;

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    AppState,
    error::PlannerError,
    middleware::{CurrentUser, session_middleware},
    models::Weekday,
    validation,
};

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for session creation
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
}

/// Request for note creation
#[derive(Deserialize)]
pub struct NoteRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// Request carrying the raw schedule text for all seven weekdays
///
/// Weekdays left out of the payload are treated as empty days: submitting
/// this request always replaces the whole week.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ScheduleRequest {
    pub sunday: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
}

impl ScheduleRequest {
    fn into_days(self) -> BTreeMap<Weekday, String> {
        BTreeMap::from([
            (Weekday::Sunday, self.sunday),
            (Weekday::Monday, self.monday),
            (Weekday::Tuesday, self.tuesday),
            (Weekday::Wednesday, self.wednesday),
            (Weekday::Thursday, self.thursday),
            (Weekday::Friday, self.friday),
            (Weekday::Saturday, self.saturday),
        ])
    }
}

/// Create the router for the planner service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/api/day/:date", get(resolve_day))
        .route("/api/note", post(add_note))
        .route("/api/schedule", put(set_schedule))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "planner-service"
    }))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, PlannerError> {
    let username = payload.username.trim();
    let password = payload.password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(PlannerError::MissingFields);
    }
    validation::validate_username(username).map_err(PlannerError::Validation)?;
    validation::validate_password(password).map_err(PlannerError::Validation)?;

    let record = state.accounts.register(username, password).await?;
    let token = state.sessions.create_session(&record.username).await;

    let response = SessionResponse {
        token,
        username: record.username,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, PlannerError> {
    info!("Login attempt for user: {}", payload.username);

    let record = state
        .accounts
        .verify_credentials(payload.username.trim(), &payload.password)
        .await?;
    let token = state.sessions.create_session(&record.username).await;

    let response = SessionResponse {
        token,
        username: record.username,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Logout endpoint
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, PlannerError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(PlannerError::Unauthorized)?;

    state.sessions.delete_session(token).await;

    Ok(Json(json!({"message": "Logged out successfully"})))
}

/// Resolve everything that happens on one calendar date
pub async fn resolve_day(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, PlannerError> {
    let day = state.accounts.resolve_day(&username, &date).await?;
    Ok(Json(day))
}

/// Append a note for one calendar date
pub async fn add_note(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Json(payload): Json<NoteRequest>,
) -> Result<impl IntoResponse, PlannerError> {
    // An empty date field means "today", same as an absent one
    let date = payload.date.as_deref().filter(|s| !s.is_empty());

    let note = state.accounts.add_note(&username, date, &payload.text).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replace the caller's weekly schedule
pub async fn set_schedule(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<impl IntoResponse, PlannerError> {
    let record = state
        .accounts
        .set_weekly_schedule(&username, &payload.into_days())
        .await?;

    Ok(Json(json!({
        "message": "Schedule saved",
        "username": record.username,
    })))
}
