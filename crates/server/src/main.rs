// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use clap::Parser;
use room_book_api::{
    ApiError, handlers,
    handlers::BookingDeps,
    request_response::{
        AutoCheckoutSummary, BookingView, HistoryEntryView, ModifyBookingRequest,
        ModifyBookingResponse, ServiceActionRequest, SubmitBookingRequest, SubmitBookingResponse,
        TransitionRequest, TransitionResponse,
    },
    verify_scheduler_token,
};
use room_book_connectors::{
    CalendarService, ConsoleEmailService, EmailService, RestCalendarService, SmtpEmailService,
};
use room_book_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Room Book Server - HTTP server for the Room Booking System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL of the calendar service
    #[arg(long, default_value = "http://localhost:8008")]
    calendar_url: String,

    /// SMTP server hostname. If not provided, notifications go to the log.
    #[arg(long)]
    smtp_server: Option<String>,

    /// SMTP server port
    #[arg(long, default_value_t = 587)]
    smtp_port: u16,

    /// SMTP username
    #[arg(long, default_value = "")]
    smtp_username: String,

    /// SMTP password
    #[arg(long, default_value = "")]
    smtp_password: String,

    /// From address for notification emails
    #[arg(long, default_value = "bookings@university.edu")]
    smtp_from: String,

    /// Bearer token expected on scheduled-job requests. Falls back to the
    /// `ROOM_BOOK_SCHEDULER_TOKEN` environment variable.
    #[arg(long)]
    scheduler_token: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The adapter layer's shared dependencies.
    deps: Arc<BookingDeps>,
    /// The secret gating the scheduled-job endpoint, if configured.
    scheduler_token: Option<String>,
}

/// Query parameters for the auto-checkout sweep.
#[derive(Debug, Deserialize)]
struct AutoCheckoutQuery {
    /// When true the sweep reports candidates without mutating anything.
    #[serde(default)]
    dry_run: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Extracts the bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Handler for POST `/bookings`.
async fn handle_submit_booking(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<Json<SubmitBookingResponse>, HttpError> {
    info!(
        tenant = %req.tenant,
        requester = %req.requester_email,
        rooms = req.selected_rooms.len(),
        "Handling booking submission"
    );
    let response: SubmitBookingResponse = handlers::submit_booking(&state.deps, &req).await?;
    info!(
        booking_id = response.booking_id,
        calendar_event_id = %response.calendar_event_id,
        status = %response.status,
        "Booking submitted"
    );
    Ok(Json(response))
}

/// Handler for GET `/bookings/{calendar_event_id}`.
async fn handle_get_booking(
    AxumState(state): AxumState<AppState>,
    Path(calendar_event_id): Path<String>,
) -> Result<Json<BookingView>, HttpError> {
    let view: BookingView = handlers::get_booking(&state.deps, &calendar_event_id).await?;
    Ok(Json(view))
}

/// Handler for GET `/bookings/{calendar_event_id}/history`.
async fn handle_get_history(
    AxumState(state): AxumState<AppState>,
    Path(calendar_event_id): Path<String>,
) -> Result<Json<Vec<HistoryEntryView>>, HttpError> {
    let entries: Vec<HistoryEntryView> =
        handlers::get_history(&state.deps, &calendar_event_id).await?;
    Ok(Json(entries))
}

/// Handler for POST `/bookings/transition`.
async fn handle_transition(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        calendar_event_id = %req.calendar_event_id,
        event_type = %req.event_type,
        actor = %req.email,
        "Handling transition request"
    );
    let response: TransitionResponse = handlers::transition_booking(&state.deps, &req).await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/service-action`.
async fn handle_service_action(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ServiceActionRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        calendar_event_id = %req.calendar_event_id,
        service_type = %req.service_type,
        action = %req.action,
        actor = %req.email,
        "Handling service action request"
    );
    let response: TransitionResponse = handlers::service_action(&state.deps, &req).await?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{calendar_event_id}/modify`.
async fn handle_modify_booking(
    AxumState(state): AxumState<AppState>,
    Path(calendar_event_id): Path<String>,
    Json(mut req): Json<ModifyBookingRequest>,
) -> Result<Json<ModifyBookingResponse>, HttpError> {
    req.calendar_event_id = calendar_event_id;
    info!(
        calendar_event_id = %req.calendar_event_id,
        modified_by = %req.modified_by,
        "Handling modification request"
    );
    let response: ModifyBookingResponse = handlers::modify_booking(&state.deps, &req).await?;
    Ok(Json(response))
}

/// Handler for POST `/jobs/auto-checkout`.
async fn handle_auto_checkout(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<AutoCheckoutQuery>,
    headers: HeaderMap,
) -> Result<Json<AutoCheckoutSummary>, HttpError> {
    let Some(expected) = state.scheduler_token.as_deref() else {
        return Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("scheduler token is not configured"),
        });
    };
    verify_scheduler_token(expected, bearer_token(&headers))?;

    let summary: AutoCheckoutSummary =
        handlers::run_auto_checkout(&state.deps, Utc::now(), query.dry_run).await?;
    Ok(Json(summary))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/bookings", post(handle_submit_booking))
        .route("/bookings/transition", post(handle_transition))
        .route("/bookings/service-action", post(handle_service_action))
        .route("/bookings/{calendar_event_id}", get(handle_get_booking))
        .route(
            "/bookings/{calendar_event_id}/history",
            get(handle_get_history),
        )
        .route(
            "/bookings/{calendar_event_id}/modify",
            post(handle_modify_booking),
        )
        .route("/jobs/auto-checkout", post(handle_auto_checkout))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Room Book Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let calendar: Arc<dyn CalendarService> =
        Arc::new(RestCalendarService::new(&args.calendar_url)?);
    let email: Arc<dyn EmailService> = if let Some(smtp_server) = &args.smtp_server {
        info!("Sending notifications via SMTP at: {}", smtp_server);
        Arc::new(SmtpEmailService::new(
            smtp_server,
            args.smtp_port,
            &args.smtp_username,
            &args.smtp_password,
            &args.smtp_from,
        ))
    } else {
        info!("No SMTP server configured; notifications go to the log");
        Arc::new(ConsoleEmailService)
    };

    let scheduler_token: Option<String> = args
        .scheduler_token
        .or_else(|| std::env::var("ROOM_BOOK_SCHEDULER_TOKEN").ok());
    if scheduler_token.is_none() {
        info!("No scheduler token configured; the auto-checkout endpoint is disabled");
    }

    let app_state: AppState = AppState {
        deps: Arc::new(BookingDeps::new(
            Arc::new(Mutex::new(persistence)),
            calendar,
            email,
        )),
        scheduler_token,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
