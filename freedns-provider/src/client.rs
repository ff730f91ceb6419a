//! Console operations.
//!
//! One [`FreednsClient`] drives one account's lifecycle: login, domain
//! selection, then record operations against the selected domain. All
//! state (session cookie, selected domain id) lives on the client behind
//! exclusive ownership; operations take `&mut self`, so concurrent use
//! without external serialization does not compile.

use std::sync::Arc;

use reqwest::Method;
use url::Url;

use crate::error::{Error, Result};
use crate::html::entities;
use crate::scrape::{domain, form_errors, listing};
use crate::transport::{HttpFetcher, PageFetcher, PageResponse};
use crate::types::{Credentials, NewRecord, RecordMatch, RecordType, SaveOutcome, SessionCookie};

const LOGIN_URL: &str = "https://freedns.afraid.org/zc.php?step=2";
const LOGOUT_URL: &str = "https://freedns.afraid.org/logout/";
const DOMAIN_LIST_URL: &str = "https://freedns.afraid.org/domain/";
const SAVE_RECORD_URL: &str = "https://freedns.afraid.org/subdomain/save.php?step=2";
const RECORD_LIST_URL: &str = "https://freedns.afraid.org/subdomain/?limit=";
const RECORD_EDIT_URL: &str = "https://freedns.afraid.org/subdomain/edit.php?data_id=";
const DELETE_RECORD_URL: &str = "https://freedns.afraid.org/subdomain/delete2.php?data_id[]=";

/// Base for resolving redirect targets, relative or absolute.
const CONSOLE_BASE: &str = "https://freedns.afraid.org/";

/// Redirects landing here mean the console bounced us back to login.
const LOGIN_PAGE_PATH: &str = "/zc.php";

/// The session cookie the console issues on successful login.
const AUTH_COOKIE_NAME: &str = "dns_cookie";

/// Body marker on a failed login.
const INVALID_LOGIN_MARKER: &str = "Invalid UserID/Pass";

/// Body marker when the submitted record duplicates an existing one.
const DUPLICATE_MARKER: &str = "already have another already existent";

/// Resolve a redirect `Location` (relative or absolute) to its path.
fn location_path(location: &str) -> Option<String> {
    let base = Url::parse(CONSOLE_BASE).ok()?;
    base.join(location).ok().map(|u| u.path().to_string())
}

/// Client for one freedns.afraid.org account.
pub struct FreednsClient {
    fetcher: Arc<dyn PageFetcher>,
    cookie: Option<SessionCookie>,
    domain_id: Option<String>,
}

impl FreednsClient {
    /// Client backed by the default reqwest transport.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    /// Client backed by a custom [`PageFetcher`].
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            cookie: None,
            domain_id: None,
        }
    }

    /// Whether a session cookie is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// The selected domain's internal id, once [`select_domain`](Self::select_domain)
    /// has succeeded.
    #[must_use]
    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    /// Log in and capture the session cookie.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let form = vec![
            ("username".to_string(), credentials.username.clone()),
            ("password".to_string(), credentials.password.clone()),
            ("submit".to_string(), "Login".to_string()),
            ("action".to_string(), "auth".to_string()),
        ];

        let response = self
            .fetcher
            .fetch(Method::POST, LOGIN_URL, Some(&form), None)
            .await?;

        if response.body.contains(INVALID_LOGIN_MARKER) {
            return Err(Error::InvalidCredentials);
        }

        let cookie = response
            .set_cookies
            .iter()
            .filter_map(|header| SessionCookie::parse(header))
            .find(|cookie| cookie.name == AUTH_COOKIE_NAME)
            .ok_or_else(|| Error::UnknownRemote {
                detail: format!("login response carried no {AUTH_COOKIE_NAME}"),
            })?;

        log::debug!("[freedns] login succeeded, {AUTH_COOKIE_NAME} captured");
        self.cookie = Some(cookie);
        Ok(())
    }

    /// Log out. The local cookie is cleared regardless of what the console
    /// answers; only a transport failure is an error. No-op when already
    /// logged out.
    pub async fn logout(&mut self) -> Result<()> {
        let Some(cookie) = self.cookie.take() else {
            return Ok(());
        };
        self.fetcher
            .fetch(Method::GET, LOGOUT_URL, None, Some(&cookie))
            .await?;
        Ok(())
    }

    /// Resolve `domain` to its internal id on the domain listing page and
    /// select it for subsequent record operations. Selecting a new domain
    /// overwrites the previous selection.
    pub async fn select_domain(&mut self, domain: &str) -> Result<()> {
        let Some(cookie) = self.cookie.as_ref() else {
            return Err(Error::NotAuthenticated);
        };

        let response = self
            .fetcher
            .fetch(Method::GET, DOMAIN_LIST_URL, None, Some(cookie))
            .await?;
        if response.is_redirect() {
            // the listing requires a live cookie; a bounce means ours was rejected
            return Err(Error::SessionExpired);
        }

        self.domain_id = None;
        match domain::domain_id(&response.body, domain) {
            Some(id) => {
                self.domain_id = Some(id);
                Ok(())
            }
            None => Err(Error::DomainNotFound {
                domain: domain.to_string(),
            }),
        }
    }

    /// Submit a new record through the save form.
    ///
    /// A duplicate of an existing record is reported as
    /// [`SaveOutcome::AlreadyExists`], which is success: the target DNS
    /// state is already satisfied.
    pub async fn add_record(&mut self, record: &NewRecord) -> Result<SaveOutcome> {
        let Some(domain_id) = self.domain_id.as_ref() else {
            return Err(Error::NoDomainSelected);
        };
        if let Some(ttl) = record.ttl {
            // the save form carries no TTL field
            log::debug!("[freedns] ttl hint {ttl} not sent, the console manages TTLs itself");
        }

        let mut form = vec![
            ("type".to_string(), record.record_type.as_str().to_string()),
            ("domain_id".to_string(), domain_id.clone()),
            ("subdomain".to_string(), record.subdomain.clone()),
            ("address".to_string(), record.address.clone()),
            ("send".to_string(), "Save!".to_string()),
        ];
        if record.wildcard {
            form.push(("wildcard".to_string(), "1".to_string()));
        }

        let response = self
            .fetcher
            .fetch(Method::POST, SAVE_RECORD_URL, Some(&form), self.cookie.as_ref())
            .await?;

        if !response.is_redirect() {
            if response.body.contains(DUPLICATE_MARKER) {
                log::info!("[freedns] record already exists");
                return Ok(SaveOutcome::AlreadyExists);
            }
            let messages = form_errors::extract(&response.body);
            if messages.is_empty() {
                return Err(Error::UnknownRemote {
                    detail: "no recognizable error markup while submitting record".to_string(),
                });
            }
            return Err(Error::ValidationErrors { messages });
        }

        if Self::redirected_to_login(&response) {
            log::debug!("[freedns] add_record bounced to login, cookie expired");
            return Err(Error::SessionExpired);
        }
        Ok(SaveOutcome::Created)
    }

    /// Locate a record by (subdomain, type, address) on the listing page.
    ///
    /// An exact value match wins immediately. Rows whose displayed value is
    /// truncated are disambiguated by fetching each candidate's edit page
    /// in listing order — one at a time — and checking it for the
    /// entity-escaped address. A failed candidate fetch is skipped, not
    /// fatal.
    pub async fn find_record(
        &mut self,
        subdomain: &str,
        record_type: RecordType,
        address: &str,
    ) -> Result<RecordMatch> {
        let Some(domain_id) = self.domain_id.as_ref() else {
            return Err(Error::NoDomainSelected);
        };

        let url = format!("{RECORD_LIST_URL}{}", urlencoding::encode(domain_id));
        let response = self
            .fetcher
            .fetch(Method::GET, &url, None, self.cookie.as_ref())
            .await?;
        if response.is_redirect() {
            return Err(Error::SessionExpired);
        }

        let scan = listing::scan(&response.body, subdomain, record_type.as_str(), address);
        if let Some(hit) = scan.exact {
            return Ok(RecordMatch {
                id: hit.id,
                record_type,
                subdomain: subdomain.to_string(),
                value: hit.value,
            });
        }

        // deep search: the listing showed only a prefix, the edit page has
        // the full value in entity-escaped form
        let escaped = entities::escape(address);
        for candidate in scan.candidates {
            log::debug!("[freedns] deep searching record {}", candidate.id);
            let url = format!("{RECORD_EDIT_URL}{}", urlencoding::encode(&candidate.id));
            let edit_page = match self
                .fetcher
                .fetch(Method::GET, &url, None, self.cookie.as_ref())
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    log::warn!(
                        "[freedns] deep search fetch for record {} failed, skipping: {e}",
                        candidate.id
                    );
                    continue;
                }
            };
            if edit_page.body.contains(&escaped) {
                return Ok(RecordMatch {
                    id: candidate.id,
                    record_type,
                    subdomain: subdomain.to_string(),
                    value: candidate.value,
                });
            }
        }

        Err(Error::RecordNotFound {
            subdomain: subdomain.to_string(),
            record_type: record_type.as_str().to_string(),
        })
    }

    /// Delete a record by its internal id.
    pub async fn delete_record(&mut self, record_id: &str) -> Result<()> {
        if self.domain_id.is_none() {
            return Err(Error::NoDomainSelected);
        }

        let url = format!(
            "{DELETE_RECORD_URL}{}&submit=delete%20selected",
            urlencoding::encode(record_id)
        );
        let response = self
            .fetcher
            .fetch(Method::GET, &url, None, self.cookie.as_ref())
            .await?;

        if !response.is_redirect() {
            return Err(Error::UnexpectedStatus {
                status: response.status,
            });
        }
        if Self::redirected_to_login(&response) {
            return Err(Error::SessionExpired);
        }
        Ok(())
    }

    /// Whether a redirect response points at the console's login page.
    fn redirected_to_login(response: &PageResponse) -> bool {
        response
            .location
            .as_deref()
            .and_then(location_path)
            .is_some_and(|path| path.starts_with(LOGIN_PAGE_PATH))
    }
}

impl Default for FreednsClient {
    fn default() -> Self {
        Self::new()
    }
}
