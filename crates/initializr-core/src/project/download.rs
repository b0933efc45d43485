//! Project download from the Initializr service
//!
//! File outputs are streamed into a `.part` file that is renamed once the
//! whole body has arrived, so an interrupted download never leaves a file
//! that looks complete. Archives to extract are buffered, unpacked into a
//! staging directory, and only moved into the project directory once every
//! entry has been written and checked.

use super::request::{Output, ProjectRequest};
use crate::product::ProductConfig;
use crate::service;
use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;
use zip::ZipArchive;

/// What ended up on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Archive(PathBuf),
    Extracted { dir: PathBuf, files: usize },
    Descriptor(PathBuf),
}

/// Downloads generated projects from the service
pub struct ProjectFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl ProjectFetcher {
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: service::http_client(user_agent),
        }
    }

    /// Create a fetcher from a product config, honouring the URL override env var
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url = service::service_url(config, None)?;
        Ok(Self::new(url, config.user_agent()))
    }

    /// Full download URL for a request
    pub fn request_url(&self, request: &ProjectRequest) -> Result<Url> {
        let endpoint = request.endpoint();
        let mut url = service::build_url(&self.base_url, endpoint.path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("type", endpoint.project_type);
            for (key, value) in &request.params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Download the project described by `request` into `dir`
    pub async fn download(&self, request: &ProjectRequest, dir: &Path) -> Result<Written> {
        let url = self.request_url(request)?;
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Failed to download project from {}: HTTP {}{}",
                url,
                status,
                service_message(&body)
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            );
        }

        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        match request.output() {
            Output::Extract => {
                let mut body = Vec::new();
                while let Some(chunk) = response
                    .chunk()
                    .await
                    .context("Download interrupted")?
                {
                    body.extend_from_slice(&chunk);
                }
                let files = extract_archive(&body, dir)?;
                Ok(Written::Extracted {
                    dir: dir.to_path_buf(),
                    files,
                })
            }
            Output::Archive { file_name } => {
                let path = dir.join(file_name);
                stream_to_file(&mut response, &path).await?;
                Ok(Written::Archive(path))
            }
            Output::Descriptor { file_name } => {
                let path = dir.join(file_name);
                stream_to_file(&mut response, &path).await?;
                Ok(Written::Descriptor(path))
            }
        }
    }
}

/// Stream the body into `<path>.part`, then move it into place
async fn stream_to_file(response: &mut reqwest::Response, path: &Path) -> Result<()> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let result = async {
        let mut file = fs::File::create(&part)
            .await
            .with_context(|| format!("Failed to create {}", part.display()))?;
        while let Some(chunk) = response.chunk().await.context("Download interrupted")? {
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write {}", part.display()))?;
        }
        file.flush().await?;
        drop(file);
        fs::rename(&part, path)
            .await
            .with_context(|| format!("Failed to move download to {}", path.display()))
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&part).await;
    }
    result
}

/// Unpack a zip archive into `dir`, returning the number of files
fn extract_archive(bytes: &[u8], dir: &Path) -> Result<usize> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Downloaded archive is not a valid zip")?;
    let files = archive
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .count();

    // Dropped (and removed) on any error below
    let staging = tempfile::Builder::new()
        .prefix(".extract-")
        .tempdir_in(dir)
        .with_context(|| format!("Failed to create staging directory in {}", dir.display()))?;
    archive
        .extract(staging.path())
        .with_context(|| format!("Failed to extract project into {}", dir.display()))?;

    move_tree(staging.path(), dir)?;
    Ok(files)
}

/// Move every entry of `from` into `to`, merging into existing directories
fn move_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in std::fs::read_dir(from)
        .with_context(|| format!("Failed to read {}", from.display()))?
    {
        let entry = entry?;
        let source = entry.path();
        let target = to.join(entry.file_name());

        if entry.file_type()?.is_dir() && target.is_dir() {
            move_tree(&source, &target)?;
        } else {
            std::fs::rename(&source, &target)
                .with_context(|| format!("Failed to move {} into place", target.display()))?;
        }
    }
    Ok(())
}

/// The `message` field of an Initializr error body, if any
fn service_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
