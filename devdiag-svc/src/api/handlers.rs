//! HTTP request handlers

use crate::error::Error;
use crate::remotecfg::Param;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::Event,
    response::Sse,
    Json,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Serialize)]
pub struct AvDecoderStatusResponse {
    #[serde(rename = "avDecoderStatus")]
    av_decoder_status: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurationRequest {
    names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigurationResponse {
    #[serde(rename = "paramList")]
    param_list: Vec<Param>,
}

#[derive(Debug, Serialize)]
pub struct MilestonesResponse {
    milestones: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogMilestoneRequest {
    marker: String,
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<StatusResponse>) {
    (
        status,
        Json(StatusResponse {
            status: message.into(),
        }),
    )
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "devdiag-svc".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// AV Decoder Status
// ============================================================================

/// GET /api/v1/avdecoderstatus - Last committed decoder activity level
pub async fn get_av_decoder_status(
    State(state): State<AppState>,
) -> Json<AvDecoderStatusResponse> {
    Json(AvDecoderStatusResponse {
        av_decoder_status: state.tracker.current_status().to_string(),
    })
}

// ============================================================================
// Configuration Retrieval
// ============================================================================

/// POST /api/v1/configuration - Fetch parameter values from the local
/// configuration endpoint
pub async fn get_configuration(
    State(state): State<AppState>,
    Json(request): Json<ConfigurationRequest>,
) -> Result<Json<ConfigurationResponse>, (StatusCode, Json<StatusResponse>)> {
    match state.config_client.get_configuration(&request.names).await {
        Ok(param_list) => Ok(Json(ConfigurationResponse { param_list })),
        Err(e) => {
            error!("Configuration retrieval failed: {}", e);
            Err(error_response(
                StatusCode::BAD_GATEWAY,
                "configuration retrieval failed",
            ))
        }
    }
}

// ============================================================================
// Milestones
// ============================================================================

/// GET /api/v1/milestones - All milestone entries, oldest first
pub async fn get_milestones(
    State(state): State<AppState>,
) -> Result<Json<MilestonesResponse>, (StatusCode, Json<StatusResponse>)> {
    match state.milestones.read() {
        Ok(milestones) => Ok(Json(MilestonesResponse { milestones })),
        Err(Error::MilestonesNotFound(path)) => {
            error!("Milestone log not found: {}", path.display());
            Err(error_response(
                StatusCode::NOT_FOUND,
                "milestone log not found",
            ))
        }
        Err(e) => {
            error!("Milestone read failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "milestone read failed",
            ))
        }
    }
}

/// POST /api/v1/milestones - Append one marker
pub async fn log_milestone(
    State(state): State<AppState>,
    Json(request): Json<LogMilestoneRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<StatusResponse>)> {
    match state.milestones.append(&request.marker) {
        Ok(()) => Ok(Json(StatusResponse {
            status: "ok".to_string(),
        })),
        Err(Error::EmptyMarker) => Err(error_response(
            StatusCode::BAD_REQUEST,
            "marker must not be empty",
        )),
        Err(e) => {
            error!("Milestone append failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "milestone append failed",
            ))
        }
    }
}

// ============================================================================
// SSE Events
// ============================================================================

/// GET /api/v1/events - SSE stream of diagnostic events
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.broadcaster.handle_sse_connection()
}
