use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the pack tooling core.
/// Every module returns `Result<T, PackError>`.
#[derive(Debug, Error)]
pub enum PackError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mod platform request failed for {url}: HTTP {status}")]
    Api { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed mod platform response: {0}")]
    Response(String),

    // ── Loaders ─────────────────────────────────────────
    #[error("Unknown mod loader: {0}")]
    InvalidLoader(String),

    // ── Export ──────────────────────────────────────────
    #[error("Failed to walk export tree: {0}")]
    Walk(String),

    #[error("Export aborted by the user")]
    Aborted,

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type PackResult<T> = Result<T, PackError>;

impl From<walkdir::Error> for PackError {
    fn from(err: walkdir::Error) -> Self {
        match err.path() {
            Some(path) => PackError::Walk(format!("{:?}: {}", path, err)),
            None => PackError::Walk(err.to_string()),
        }
    }
}

// Errors are surfaced verbatim to the UI layer as plain strings.
impl serde::Serialize for PackError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
