//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Representation requested by a listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Atom,
}

/// `?format=` parameter accepted by listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FormatParams {
    #[serde(default)]
    pub format: ResponseFormat,
}
