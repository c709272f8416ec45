use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::OpenApi;

use super::{
    dto::{ActuationDto, SensorDataDto, SensorDataRequest, SettingsDto, SettingsRequest},
    errors::AppError,
    AppState,
};
use crate::settings::UpsertOutcome;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GraphParams {
    pub size: Option<u32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Create the settings on first call, replace them afterwards.
#[utoipa::path(
    put,
    path = "/settings",
    request_body = SettingsRequest,
    responses(
        (status = 201, description = "Settings created", body = SettingsDto),
        (status = 200, description = "Settings replaced", body = SettingsDto),
        (status = 400, description = "Malformed user_light or light_duration"),
        (status = 422, description = "user_light given without light_duration"),
        (status = 502, description = "Sunset lookup failed"),
        (status = 504, description = "Sunset lookup timed out"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "settings"
)]
pub async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsRequest>,
) -> Result<(StatusCode, Json<SettingsDto>), AppError> {
    let (settings, outcome) = state.settings().upsert(body.into()).await?;

    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(settings.into())))
}

/// Sensor readings in the order they were stored, optionally only the first `size`.
#[utoipa::path(
    get,
    path = "/graph",
    params(
        ("size" = Option<u32>, Query, description = "Return at most this many readings"),
    ),
    responses(
        (status = 200, description = "Sensor readings", body = Vec<SensorDataDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_graph(
    State(state): State<AppState>,
    Query(params): Query<GraphParams>,
) -> Result<Json<Vec<SensorDataDto>>, AppError> {
    let rows = state.sensors().list(params.size).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Store a reading, stamped with the server's current time of day.
#[utoipa::path(
    post,
    path = "/sensorData",
    request_body = SensorDataRequest,
    responses(
        (status = 201, description = "Reading stored", body = SensorDataDto),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn post_sensor_data(
    State(state): State<AppState>,
    Json(body): Json<SensorDataRequest>,
) -> Result<(StatusCode, Json<SensorDataDto>), AppError> {
    let reading = state.sensors().create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// Fan and light state for the device, derived from the latest reading.
#[utoipa::path(
    get,
    path = "/sensorData",
    responses(
        (status = 200, description = "Actuation state", body = ActuationDto),
        (status = 404, description = "No reading or no settings stored yet"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "sensors"
)]
pub async fn get_actuation(State(state): State<AppState>) -> Result<Json<ActuationDto>, AppError> {
    let actuation = state.control().evaluate().await?;
    Ok(Json(actuation.into()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI document
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(put_settings, get_graph, post_sensor_data, get_actuation, health),
    components(schemas(
        SettingsRequest,
        SettingsDto,
        SensorDataRequest,
        SensorDataDto,
        ActuationDto
    )),
    tags(
        (name = "settings", description = "User preference endpoints"),
        (name = "sensors",  description = "Sensor reading and actuation endpoints"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Smart Hub Backend API",
        version = "0.1.0",
        description = "REST API for smart hub settings and sensor data"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
