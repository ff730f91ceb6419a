//! Console HTTP transport.
//!
//! The console signals outcomes through redirects, so redirects are data
//! here: they are captured (status + `Location`) and never followed. One
//! network round trip per call, no retries — a failed call surfaces
//! immediately and the caller decides.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};

use crate::error::{Error, Result};
use crate::types::SessionCookie;
use crate::utils::log_sanitizer::{excerpt, redact_form};

/// 默认连接超时（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One console page response, with redirect and cookie headers surfaced
/// as data.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Location` header of a redirect, verbatim, when present.
    pub location: Option<String>,
    /// Raw `Set-Cookie` header values, in response order.
    pub set_cookies: Vec<String>,
    /// Response body text.
    pub body: String,
}

impl PageResponse {
    /// Whether the console answered with a redirect.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Fetches console pages. The one seam between the operations and the
/// network; tests drive the operations through a scripted implementation.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Perform one GET or POST against the console.
    ///
    /// `form` is URL-form-encoded into a POST body; `cookie` is attached as
    /// a `Cookie` header when present. Methods other than GET and POST fail
    /// with [`Error::UnsupportedMethod`] before any network traffic.
    async fn fetch(
        &self,
        method: Method,
        url: &str,
        form: Option<&[(String, String)]>,
        cookie: Option<&SessionCookie>,
    ) -> Result<PageResponse>;
}

/// Production [`PageFetcher`] backed by reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with redirects disabled and default timeouts.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder()
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        method: Method,
        url: &str,
        form: Option<&[(String, String)]>,
        cookie: Option<&SessionCookie>,
    ) -> Result<PageResponse> {
        let mut request = if method == Method::GET {
            self.client.get(url)
        } else if method == Method::POST {
            self.client.post(url)
        } else {
            return Err(Error::UnsupportedMethod {
                method: method.to_string(),
            });
        };

        log::debug!("[freedns] {method} {url}");

        if let Some(form) = form {
            log::debug!("[freedns] form: {}", redact_form(form));
            request = request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .form(form);
        }
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie.header_value());
        }

        let response = request.send().await.map_err(|e| Error::NetworkError {
            detail: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        let body = response.text().await.map_err(|e| Error::NetworkError {
            detail: format!("failed to read response body: {e}"),
        })?;

        log::debug!("[freedns] response status {status}");
        log::debug!("[freedns] response body: {}", excerpt(&body));

        Ok(PageResponse {
            status,
            location,
            set_cookies,
            body,
        })
    }
}
