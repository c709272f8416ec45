pub mod dto;
pub mod errors;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

use crate::{
    control::ControlService, sensors::SensorService, settings::SettingsService,
    sunset::SharedSunsetSource,
};

/// Everything a handler needs, built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub sunset: SharedSunsetSource,
}

impl AppState {
    pub fn new(pool: PgPool, sunset: SharedSunsetSource) -> Self {
        Self { pool, sunset }
    }

    pub fn settings(&self) -> SettingsService {
        SettingsService::new(self.pool.clone(), self.sunset.clone())
    }

    pub fn sensors(&self) -> SensorService {
        SensorService::new(self.pool.clone())
    }

    pub fn control(&self) -> ControlService {
        ControlService::new(self.sensors(), self.settings())
    }
}

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/settings", put(handlers::put_settings))
        .route("/graph", get(handlers::get_graph))
        .route(
            "/sensorData",
            get(handlers::get_actuation).post(handlers::post_sensor_data),
        )
        .with_state(state)
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
}

/// [`router`] wrapped with request tracing and a CORS policy that admits
/// only `allowed_origin`, with credentials.
pub fn app(state: AppState, allowed_origin: &str) -> Result<Router> {
    Ok(router(state)
        .layer(cors_layer(allowed_origin)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("invalid CORS origin: {allowed_origin:?}"))?;

    // Wildcards are not allowed together with credentials, so methods and
    // headers are mirrored from the preflight request instead.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
