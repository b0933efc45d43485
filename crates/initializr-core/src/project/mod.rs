//! Project download and post-download build
//!
//! This module provides:
//! - `ProjectRequest`, the download request built from collected answers
//! - `ProjectFetcher`, which picks one of the four service endpoints and
//!   writes or extracts the response
//! - `BuildRunner`, invoked once after a successful extraction

pub mod build;
pub mod download;
pub mod request;

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

pub use build::{wrapper_command, BuildOutcome, BuildRunner, WrapperBuild};
pub use download::{ProjectFetcher, Written};
pub use request::{Endpoint, Format, Output, ProjectRequest, RequestError, Toolchain};

/// Pause between extraction and the wrapper build
pub const BUILD_DELAY: Duration = Duration::from_millis(500);

/// Result of a full generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub written: Written,
    /// Set when the extracted project was built
    pub build: Option<BuildOutcome>,
}

/// Download the project, then build it when it was extracted
pub async fn generate<R: BuildRunner>(
    fetcher: &ProjectFetcher,
    request: &ProjectRequest,
    dir: &Path,
    runner: Option<&R>,
    delay: Duration,
) -> Result<Generated> {
    let written = fetcher.download(request, dir).await?;

    let build = match runner {
        Some(runner) => build_if_extracted(&written, request, runner, delay).await?,
        None => None,
    };

    Ok(Generated { written, build })
}

/// Run the wrapper build once, after `delay`, if the project was extracted
pub async fn build_if_extracted<R: BuildRunner>(
    written: &Written,
    request: &ProjectRequest,
    runner: &R,
    delay: Duration,
) -> Result<Option<BuildOutcome>> {
    match written {
        Written::Extracted { dir, .. } if request.extract => {
            // Extracted files are not always visible to the wrapper right away
            tokio::time::sleep(delay).await;
            Ok(Some(runner.run(dir, request.toolchain).await?))
        }
        _ => Ok(None),
    }
}
