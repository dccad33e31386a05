//! HTTP API for cube scanning
//!
//! Endpoints:
//! - POST /solve - Detect cube state (JSON image paths or multipart upload)
//! - POST /repair - Rebalance a raw 54-char state
//! - GET /health - Health check

use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{CubeAssembler, FaceImages, GlobalStateRepair, ImageSource};
use crate::types::{ColorSymbol, CubeState, GlobalRepairReport, ScanConfig, ScanError, ScanReport};

/// App state
pub struct AppState {
    pub assembler: CubeAssembler,
}

/// JSON solve request: face label → image path
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub images: HashMap<String, PathBuf>,
}

/// Repair request
#[derive(Debug, Deserialize)]
pub struct RepairRequest {
    pub cube_state: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Keep the extractor's own status (e.g. 413 when the body limit is hit)
    fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        let status = match err {
            ScanError::MissingInput(_) | ScanError::InvalidSymbol(_) | ScanError::EmptySymbol => {
                StatusCode::BAD_REQUEST
            }
            ScanError::Image { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ScanError::InvariantViolation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Create the API router
pub fn create_router(config: ScanConfig) -> Router {
    let upload_limit = config.upload_limit;
    let state = Arc::new(AppState {
        assembler: CubeAssembler::new(config),
    });

    Router::new()
        .route("/health", get(health))
        .route("/solve", post(solve))
        .route("/repair", post(repair))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Detect the cube state from six face images
async fn solve(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ScanReport>, ApiError> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.starts_with("application/json"));

    let images = if is_json {
        images_from_json(request).await?
    } else {
        images_from_multipart(request).await?
    };

    // fail fast, before spending a blocking thread
    if let Some(face) = images.first_missing() {
        return Err(ScanError::MissingInput(face).into());
    }

    let report = tokio::task::spawn_blocking(move || state.assembler.assemble(&images))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        })??;

    Ok(Json(report))
}

/// Rebalance a raw state string
async fn repair(Json(req): Json<RepairRequest>) -> Result<Json<GlobalRepairReport>, ApiError> {
    let state: CubeState = req
        .cube_state
        .parse()
        .map_err(|e: ScanError| ApiError::bad_request(e.to_string()))?;
    let report = GlobalStateRepair::new().repair_state(&state)?;
    Ok(Json(report))
}

async fn images_from_json(request: Request) -> Result<FaceImages, ApiError> {
    let Json(body) = Json::<SolveRequest>::from_request(request, &())
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;

    let mut images = FaceImages::new();
    for (label, path) in body.images {
        match label.parse::<ColorSymbol>() {
            Ok(face) => images.insert(face, ImageSource::Path(path)),
            Err(_) => debug!(label = %label, "ignoring unknown face label"),
        }
    }
    Ok(images)
}

async fn images_from_multipart(request: Request) -> Result<FaceImages, ApiError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;

    let mut images = FaceImages::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?
    {
        let label = field.name().unwrap_or_default().to_string();
        let Ok(face) = label.parse::<ColorSymbol>() else {
            debug!(label = %label, "ignoring unknown multipart field");
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;
        if !bytes.is_empty() {
            images.insert(face, ImageSource::Bytes(bytes.to_vec()));
        }
    }
    Ok(images)
}

/// Run the API server
pub async fn run_server(addr: &str, config: ScanConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("cubescan API running on {}", addr);
    info!("  POST /solve   - Detect cube state (JSON paths or multipart U,R,F,D,L,B)");
    info!("  POST /repair  - Rebalance a 54-char state");
    info!("  GET  /health  - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
