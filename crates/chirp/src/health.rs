//! Store liveness reporting.
//!
//! [`HealthReporter::check`] never fails and never retries: every problem
//! reaching the store is folded into a [`HealthStatus`] for the caller to act on.

use std::time::Duration;

use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::database::Database;

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            available: true,
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            available: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone)]
pub struct HealthReporter {
    db: Database,
    timeout: Duration,
}

impl HealthReporter {
    pub fn new(db: Database, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Issues one round trip against the store, bounded by the probe timeout.
    pub async fn check(&self) -> HealthStatus {
        match tokio::time::timeout(self.timeout, self.db.ping()).await {
            Ok(Ok(())) => HealthStatus::up(),
            Ok(Err(e)) => {
                warn!("Health probe failed: {e}");
                HealthStatus::down(e.to_string())
            }
            Err(_) => {
                warn!("Health probe timed out after {:?}", self.timeout);
                HealthStatus::down(format!(
                    "database ping timed out after {}ms",
                    self.timeout.as_millis()
                ))
            }
        }
    }
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> Response {
        if self.available {
            return (StatusCode::OK, Json(json!({ "ok": true, "db": "up" }))).into_response();
        }
        let error = self
            .error
            .unwrap_or_else(|| "database unavailable".to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "db": "down", "error": error })),
        )
            .into_response()
    }
}

/// `GET /healthz`
pub async fn health_check(Extension(reporter): Extension<HealthReporter>) -> HealthStatus {
    reporter.check().await
}
