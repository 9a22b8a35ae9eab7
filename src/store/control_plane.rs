//! Control-plane clients that serve captured or fixed responses.

use super::ControlPlaneClient;
use crate::error::{ControlPlaneErrorKind, FabricDriftError, Result};
use crate::model::ControlPlaneResponse;
use crate::parsers::parse_control_plane_response;
use std::path::PathBuf;

/// Serves one fixed response. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticControlPlaneClient {
    response: Option<ControlPlaneResponse>,
}

impl StaticControlPlaneClient {
    #[must_use]
    pub const fn new(response: ControlPlaneResponse) -> Self {
        Self {
            response: Some(response),
        }
    }

    /// A client whose control plane cannot be reached.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self { response: None }
    }
}

impl ControlPlaneClient for StaticControlPlaneClient {
    fn fetch_status(&self) -> Result<ControlPlaneResponse> {
        self.response.clone().ok_or_else(|| {
            FabricDriftError::control_plane(
                "fetching status",
                ControlPlaneErrorKind::Unreachable("no response configured".to_string()),
            )
        })
    }
}

/// Reads a response captured to a JSON or YAML file (e.g. `kubectl get -o json`).
///
/// `api_timeout_ms` is recorded for parity with networked clients; reading a
/// local file does not time out.
#[derive(Debug, Clone)]
pub struct FileControlPlaneClient {
    path: PathBuf,
    api_timeout_ms: u64,
}

impl FileControlPlaneClient {
    pub fn new(path: impl Into<PathBuf>, api_timeout_ms: u64) -> Self {
        Self {
            path: path.into(),
            api_timeout_ms,
        }
    }

    #[must_use]
    pub const fn api_timeout_ms(&self) -> u64 {
        self.api_timeout_ms
    }
}

impl ControlPlaneClient for FileControlPlaneClient {
    fn fetch_status(&self) -> Result<ControlPlaneResponse> {
        tracing::debug!(
            path = %self.path.display(),
            timeout_ms = self.api_timeout_ms,
            "fetching captured control plane status"
        );
        parse_control_plane_response(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_client_round_trip() {
        let client = StaticControlPlaneClient::new(ControlPlaneResponse::default());
        assert_eq!(
            client.fetch_status().expect("response"),
            ControlPlaneResponse::default()
        );
    }

    #[test]
    fn test_unreachable_client_errors() {
        let err = StaticControlPlaneClient::unreachable()
            .fetch_status()
            .unwrap_err();
        assert!(matches!(
            err,
            FabricDriftError::ControlPlane {
                source: ControlPlaneErrorKind::Unreachable(_),
                ..
            }
        ));
    }

    #[test]
    fn test_file_client_missing_file() {
        let client = FileControlPlaneClient::new("/nonexistent/status.json", 5000);
        assert_eq!(client.api_timeout_ms(), 5000);
        assert!(client.fetch_status().is_err());
    }
}
