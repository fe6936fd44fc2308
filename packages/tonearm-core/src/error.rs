//! Centralized error types for the Tonearm core library.
//!
//! This module provides a unified error handling system that:
//! - Defines structured error types using `thiserror`
//! - Maps errors to appropriate HTTP status codes
//! - Implements `IntoResponse` for automatic JSON error responses

use std::collections::BTreeSet;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::bluos::gateway::GatewayError;
use crate::services::topology_plan::DeviceFailure;

/// Application-wide error type for the Tonearm server.
#[derive(Debug, Error)]
pub enum TonearmError {
    /// Requested speaker name is not in the configured zone.
    #[error("Unknown speaker: {name}")]
    UnknownDevice { name: String, valid: Vec<String> },

    /// A player could not be reached or refused the request.
    #[error("Device unreachable: {0}")]
    Transport(String),

    /// A player answered with a body that could not be parsed.
    #[error("Malformed device response: {0}")]
    Protocol(String),

    /// The ungroup pass that precedes regrouping did not complete.
    #[error("Ungroup failed on {} device(s)", failed_devices(.0))]
    UngroupFailed(Vec<DeviceFailure>),

    /// Server configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TonearmError {
    /// Returns a machine-readable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownDevice { .. } => "unknown_device",
            Self::Transport(_) => "device_unreachable",
            Self::Protocol(_) => "device_protocol_error",
            Self::UngroupFailed(_) => "ungroup_failed",
            Self::Configuration(_) => "configuration_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownDevice { .. } => StatusCode::BAD_REQUEST,
            Self::Transport(_) | Self::Protocol(_) | Self::UngroupFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Number of distinct hosts among `failures`; one player can fail several calls.
fn failed_devices(failures: &[DeviceFailure]) -> usize {
    failures
        .iter()
        .map(|f| f.host.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Convenient Result alias for application-wide operations.
pub type TonearmResult<T> = Result<T, TonearmError>;

/// JSON response body for error responses.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failures: Option<Vec<DeviceFailure>>,
}

impl IntoResponse for TonearmError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();
        let (valid, failures) = match self {
            Self::UnknownDevice { valid, .. } => (Some(valid), None),
            Self::UngroupFailed(failures) => (None, Some(failures)),
            _ => (None, None),
        };
        let body = ErrorResponse {
            error: code,
            message,
            status: status.as_u16(),
            valid,
            failures,
        };
        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for TonearmError {
    fn from(err: GatewayError) -> Self {
        if err.is_protocol() {
            Self::Protocol(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
