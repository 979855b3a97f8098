//! Download raw definition files for registered services.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::registry::Definition;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("fail to download definition. status={status} url={url}")]
    Status { url: String, status: u16 },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result of downloading one definition.
#[derive(Debug)]
pub struct Downloaded {
    pub id: String,
    pub result: Result<PathBuf, DownloadError>,
}

/// Path a definition is saved to: `<destination>/<id>.json`.
pub fn definition_path(destination: &Path, definition: &Definition) -> PathBuf {
    destination.join(format!("{}.json", definition.id))
}

/// Download every definition into `destination`, which must exist.
///
/// A definition that fails leaves no file behind.
pub fn download_all(
    definitions: &[Definition],
    destination: &Path,
) -> Result<Vec<Downloaded>, DownloadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("gas-dts/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(DownloadError::Client)?;

    Ok(definitions
        .par_iter()
        .map(|definition| {
            info!("Download the definition of {}", definition.id);
            Downloaded {
                id: definition.id.clone(),
                result: download_one(&client, definition, destination),
            }
        })
        .collect())
}

fn download_one(
    client: &reqwest::blocking::Client,
    definition: &Definition,
    destination: &Path,
) -> Result<PathBuf, DownloadError> {
    let url = definition.url.as_str();
    debug!(url, "requesting definition");
    let response = client
        .get(url)
        .send()
        .map_err(|source| DownloadError::Request {
            url: url.to_string(),
            source,
        })?;

    check_status(url, response.status())?;

    let body = response.bytes().map_err(|source| DownloadError::Request {
        url: url.to_string(),
        source,
    })?;

    save(destination, definition, &body)
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<(), DownloadError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DownloadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Write a downloaded body to [`definition_path`], removing any partial file.
fn save(destination: &Path, definition: &Definition, body: &[u8]) -> Result<PathBuf, DownloadError> {
    let path = definition_path(destination, definition);
    if let Err(source) = fs::write(&path, body) {
        let _ = fs::remove_file(&path);
        return Err(DownloadError::Write { path, source });
    }
    debug!(path = %path.display(), bytes = body.len(), "saved definition");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn definition_path_uses_id() {
        let registry = Registry::builtin();
        let drive = registry.find("Drive").unwrap();
        assert_eq!(
            definition_path(Path::new("definitions"), drive),
            PathBuf::from("definitions/Drive.json")
        );
    }

    fn nowhere(url: &str) -> Definition {
        Definition {
            id: "Nowhere".to_string(),
            inner_name: None,
            abbreviated_name: None,
            url: url.to_string(),
        }
    }

    #[test]
    fn non_success_status_is_an_error() {
        let url = "https://example.com/definition";
        assert!(check_status(url, reqwest::StatusCode::OK).is_ok());

        let err = check_status(url, reqwest::StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, DownloadError::Status { status: 404, .. }));
        assert_eq!(
            err.to_string(),
            "fail to download definition. status=404 url=https://example.com/definition"
        );
    }

    #[test]
    fn save_writes_body_to_definition_path() {
        let dir = tempfile::tempdir().unwrap();
        let definition = nowhere("https://example.com/definition");
        let path = save(dir.path(), &definition, b"{\"1\": {}}").unwrap();
        assert_eq!(path, dir.path().join("Nowhere.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"1\": {}}");
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let definition = nowhere("https://example.com/definition");
        let err = save(&missing, &definition, b"{}").unwrap_err();
        assert!(matches!(err, DownloadError::Write { ref path, .. } if path == &missing.join("Nowhere.json")));
        assert!(!definition_path(&missing, &definition).exists());
    }

    #[test]
    #[ignore = "opens a local socket"]
    fn unreachable_host_reports_request_error() {
        let dir = tempfile::tempdir().unwrap();
        // Port 9 (discard) on localhost is normally closed.
        let definition = nowhere("http://127.0.0.1:9/definition");
        let results = download_all(std::slice::from_ref(&definition), dir.path()).unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].result,
            Err(DownloadError::Request { .. })
        ));
        assert!(!definition_path(dir.path(), &definition).exists());
    }
}
