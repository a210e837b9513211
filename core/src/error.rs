//! Error taxonomy surfaced by the executor.
//!
//! # Design
//! Every failed call produces exactly one `NetworkError`. The label, numeric
//! code, HTTP status and description follow the conventions the app's UI
//! already displays, so they are kept as plain fields; `kind` records which
//! branch of the classifier produced the error so callers can match on it
//! without comparing strings.

use serde::Deserialize;
use thiserror::Error;

pub const LABEL_INVALID: &str = "Invalid";
pub const LABEL_UNKNOWN: &str = "Unknown Error";
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Fallback code when a server error body carries no numeric status.
const DEFAULT_SERVER_CODE: i64 = 201;
/// HTTP status reported for failures that never produced a real response.
const NO_RESPONSE_STATUS: u16 = 300;

/// Which stage of a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The connectivity gate reported no connection; nothing was sent.
    Connectivity,
    /// The transport failed or returned no body.
    Transport,
    /// A 200 response whose body did not match the expected payload.
    Decode,
    /// The server returned 401.
    Unauthorized,
    /// Any other status with a decodable error body.
    ServerReported,
    /// Any other status with an undecodable body.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{label} ({code}): {description}")]
pub struct NetworkError {
    pub kind: ErrorKind,
    pub label: String,
    pub code: i64,
    pub http_status: Option<u16>,
    pub description: String,
}

impl NetworkError {
    fn invalid(kind: ErrorKind, http_status: u16, description: &str) -> Self {
        Self {
            kind,
            label: LABEL_INVALID.to_string(),
            code: 1,
            http_status: Some(http_status),
            description: description.to_string(),
        }
    }

    pub fn connectivity() -> Self {
        Self::invalid(ErrorKind::Connectivity, NO_RESPONSE_STATUS, "connection unavailable")
    }

    pub fn transport() -> Self {
        Self::invalid(ErrorKind::Transport, NO_RESPONSE_STATUS, UNKNOWN_ERROR)
    }

    pub fn decode() -> Self {
        Self::invalid(ErrorKind::Decode, NO_RESPONSE_STATUS, UNKNOWN_ERROR)
    }

    pub fn unauthorized() -> Self {
        Self::invalid(ErrorKind::Unauthorized, 401, "access token expired")
    }

    pub fn server_reported(http_status: u16, body: ErrorResponse) -> Self {
        let status = body.status.unwrap_or_default();
        Self {
            kind: ErrorKind::ServerReported,
            label: LABEL_UNKNOWN.to_string(),
            code: status.status.unwrap_or(DEFAULT_SERVER_CODE),
            http_status: Some(http_status),
            description: status.msg.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        }
    }

    pub fn unknown(http_status: u16) -> Self {
        Self::invalid(ErrorKind::Unknown, http_status, UNKNOWN_ERROR)
    }
}

/// Error body the API sends with non-success statuses. Every field is
/// optional; a body missing all of them still decodes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ErrorStatus {
    pub status: Option<i64>,
    pub msg: Option<String>,
}
