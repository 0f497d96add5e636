//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any store is opened.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Ensure the data directory exists and warn when the static client bundle is missing.
/// Returns the data directory path for the caller to open stores in.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<PathBuf> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend bundle directory not found; only the JSON API will be served");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;

    let meta = tokio::fs::metadata(data_dir).await?;
    if meta.permissions().readonly() {
        return Err(anyhow::anyhow!("data directory {data_dir} is read-only"));
    }
    info!(%data_dir, "data directory ready");
    Ok(Path::new(data_dir).to_path_buf())
}
