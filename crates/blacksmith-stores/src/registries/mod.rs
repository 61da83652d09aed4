//! Upload clients

pub mod forge;
pub mod nexus;

pub use forge::ForgeRegistry;
pub use nexus::NexusRepository;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::blocking::{RequestBuilder, Response};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// `Authorization` value for HTTP basic auth
pub(crate) fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", username, password)))
}

/// Split `author-module` (or `author/module`) into its parts
pub(crate) fn split_module_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(['-', '/']) {
        Some((author, module)) => (Some(author), module),
        None => (None, name),
    }
}

/// Send once; any non-2xx status becomes `UploadFailed` with the response body
pub(crate) fn send_checked(request: RequestBuilder, url: &str) -> Result<Response> {
    let start = std::time::Instant::now();
    let response = request.send()?;
    let status = response.status();

    debug!(
        url,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "upload response"
    );

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(StoreError::UploadFailed {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    info!(url, status = status.as_u16(), "upload accepted");
    Ok(response)
}
