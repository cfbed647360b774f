use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::TransportError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}

/// Send `request` and return the body of a 2xx response.
pub(crate) async fn send_checked(
    request: RequestBuilder,
    endpoint: &'static str,
) -> Result<String, TransportError> {
    let res = request
        .send()
        .await
        .map_err(|source| TransportError::Request { endpoint, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| TransportError::Request { endpoint, source })?;

    if !status.is_success() {
        return Err(TransportError::Status {
            endpoint,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    endpoint: &'static str,
) -> Result<T, TransportError> {
    let body = send_checked(request, endpoint).await?;
    serde_json::from_str(&body).map_err(|source| TransportError::Decode { endpoint, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
