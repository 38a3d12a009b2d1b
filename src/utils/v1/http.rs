//! Small HTTP helpers for probing services and fetching files.

use crate::utils::v1::error::Result;
use crate::utils::v1::validation::validate_url;
use std::path::Path;
use std::time::Duration;

fn client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// GET a URL and return the response body as text. Non-2xx statuses are
/// errors.
pub async fn http_get_text(url: &str, timeout: Duration) -> Result<String> {
    validate_url("url", url)?;
    tracing::debug!("Making HTTP request to: {}", url);
    let response = client(timeout)?.get(url).send().await?;
    tracing::debug!("HTTP response status: {}", response.status());
    Ok(response.error_for_status()?.text().await?)
}

/// GET a URL and parse the response body as JSON.
pub async fn http_get_json(url: &str, timeout: Duration) -> Result<serde_json::Value> {
    validate_url("url", url)?;
    tracing::debug!("Making HTTP request to: {}", url);
    let response = client(timeout)?.get(url).send().await?;
    tracing::debug!("HTTP response status: {}", response.status());
    Ok(response.error_for_status()?.json().await?)
}

/// Download a URL to a local file, creating parent directories as needed.
/// Returns the number of bytes written.
pub async fn download_file(url: &str, dest: &Path, timeout: Duration) -> Result<u64> {
    validate_url("url", url)?;
    tracing::debug!("Downloading {} to {}", url, dest.display());
    let response = client(timeout)?.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &bytes).await?;

    tracing::debug!("Wrote {} bytes to {}", bytes.len(), dest.display());
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::v1::error::OpsError;

    #[tokio::test]
    async fn test_rejects_invalid_url_before_sending() {
        let result = http_get_text("not-a-url", Duration::from_secs(5)).await;
        assert!(matches!(result, Err(OpsError::InvalidConfigValue { .. })));
    }
}
