use serde::{Deserialize, Serialize};

/// Unified error type for all console operations.
///
/// The console reports outcomes through page content and redirects rather
/// than status codes, so most variants describe what the scraped response
/// looked like. All variants are serializable for structured error reporting.
///
/// # Recovery
///
/// Nothing is retried or recovered locally. In particular a
/// [`SessionExpired`](Self::SessionExpired) from any operation must be
/// handled by the caller, typically by re-running login and domain selection
/// and then repeating the original call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum Error {
    /// The console rejected the username/password pair at login.
    InvalidCredentials,

    /// An operation that needs a session cookie was called before login.
    ///
    /// Raised locally, before any network call.
    NotAuthenticated,

    /// A record operation was called before a domain was selected.
    ///
    /// Raised locally, before any network call.
    NoDomainSelected,

    /// The console redirected to its login page, meaning the session cookie
    /// was rejected or has expired.
    SessionExpired,

    /// The requested domain did not appear on the domain listing page.
    DomainNotFound {
        /// Domain name that was looked up.
        domain: String,
    },

    /// No listing row (nor deep-search candidate) matched the query.
    RecordNotFound {
        /// Subdomain label that was queried.
        subdomain: String,
        /// Record type that was queried, as the console displays it.
        record_type: String,
    },

    /// The console rejected a record submission with one or more validation
    /// messages scraped from the response page, in page order.
    ValidationErrors {
        /// Human-readable messages, as rendered by the console.
        messages: Vec<String>,
    },

    /// A method other than GET or POST was requested.
    ///
    /// Raised before any network call.
    UnsupportedMethod {
        /// The rejected method.
        method: String,
    },

    /// The console answered with a status code the operation cannot
    /// interpret (e.g. a non-redirect reply to a delete).
    UnexpectedStatus {
        /// The observed HTTP status code.
        status: u16,
    },

    /// A network-level failure (connect, timeout, body read).
    NetworkError {
        /// Error details from the transport.
        detail: String,
    },

    /// The console answered with a page this crate cannot make sense of.
    ///
    /// This is the catch-all for responses carrying neither a recognized
    /// success shape nor recognizable error markup.
    UnknownRemote {
        /// What was being attempted when the page defied interpretation.
        detail: String,
    },
}

impl Error {
    /// 是否为预期行为（用户输入、资源不存在、会话过期等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::NotAuthenticated
                | Self::NoDomainSelected
                | Self::SessionExpired
                | Self::DomainNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::ValidationErrors { .. }
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "[freedns] Invalid username or password")
            }
            Self::NotAuthenticated => {
                write!(f, "[freedns] Not logged in")
            }
            Self::NoDomainSelected => {
                write!(f, "[freedns] No domain selected")
            }
            Self::SessionExpired => {
                write!(f, "[freedns] Session cookie rejected, maybe expired")
            }
            Self::DomainNotFound { domain } => {
                write!(f, "[freedns] Domain '{domain}' not found on the domain listing page")
            }
            Self::RecordNotFound {
                subdomain,
                record_type,
            } => {
                write!(f, "[freedns] No {record_type} record '{subdomain}' with the requested value")
            }
            Self::ValidationErrors { messages } => {
                write!(f, "[freedns] {}", messages.join(", "))
            }
            Self::UnsupportedMethod { method } => {
                write!(f, "[freedns] Method '{method}' is not supported")
            }
            Self::UnexpectedStatus { status } => {
                write!(f, "[freedns] Unexpected HTTP {status} from remote")
            }
            Self::NetworkError { detail } => {
                write!(f, "[freedns] Network error: {detail}")
            }
            Self::UnknownRemote { detail } => {
                write!(f, "[freedns] Unknown error from remote: {detail}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Display ----

    #[test]
    fn display_invalid_credentials() {
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "[freedns] Invalid username or password"
        );
    }

    #[test]
    fn display_not_authenticated() {
        assert_eq!(Error::NotAuthenticated.to_string(), "[freedns] Not logged in");
    }

    #[test]
    fn display_no_domain_selected() {
        assert_eq!(
            Error::NoDomainSelected.to_string(),
            "[freedns] No domain selected"
        );
    }

    #[test]
    fn display_session_expired() {
        assert_eq!(
            Error::SessionExpired.to_string(),
            "[freedns] Session cookie rejected, maybe expired"
        );
    }

    #[test]
    fn display_domain_not_found() {
        let e = Error::DomainNotFound {
            domain: "example.com".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[freedns] Domain 'example.com' not found on the domain listing page"
        );
    }

    #[test]
    fn display_record_not_found() {
        let e = Error::RecordNotFound {
            subdomain: "_acme-challenge".to_string(),
            record_type: "TXT".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[freedns] No TXT record '_acme-challenge' with the requested value"
        );
    }

    #[test]
    fn display_validation_errors_joined_in_order() {
        let e = Error::ValidationErrors {
            messages: vec![
                "Type is required".to_string(),
                "Address is required".to_string(),
                "Invalid subdomain".to_string(),
            ],
        };
        assert_eq!(
            e.to_string(),
            "[freedns] Type is required, Address is required, Invalid subdomain"
        );
    }

    #[test]
    fn display_unsupported_method() {
        let e = Error::UnsupportedMethod {
            method: "PUT".to_string(),
        };
        assert_eq!(e.to_string(), "[freedns] Method 'PUT' is not supported");
    }

    #[test]
    fn display_unexpected_status() {
        let e = Error::UnexpectedStatus { status: 200 };
        assert_eq!(e.to_string(), "[freedns] Unexpected HTTP 200 from remote");
    }

    #[test]
    fn display_network_error() {
        let e = Error::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[freedns] Network error: connection refused");
    }

    #[test]
    fn display_unknown_remote() {
        let e = Error::UnknownRemote {
            detail: "no error markup in response".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[freedns] Unknown error from remote: no error markup in response"
        );
    }

    // ---- is_expected ----

    #[test]
    fn expected_variants() {
        assert!(Error::InvalidCredentials.is_expected());
        assert!(Error::NotAuthenticated.is_expected());
        assert!(Error::NoDomainSelected.is_expected());
        assert!(Error::SessionExpired.is_expected());
        assert!(
            Error::DomainNotFound {
                domain: "x.com".into(),
            }
            .is_expected()
        );
        assert!(
            Error::RecordNotFound {
                subdomain: "www".into(),
                record_type: "A".into(),
            }
            .is_expected()
        );
        assert!(
            Error::ValidationErrors {
                messages: vec!["Invalid subdomain".into()],
            }
            .is_expected()
        );
    }

    #[test]
    fn unexpected_variants() {
        assert!(
            !Error::UnsupportedMethod {
                method: "PUT".into(),
            }
            .is_expected()
        );
        assert!(!Error::UnexpectedStatus { status: 500 }.is_expected());
        assert!(
            !Error::NetworkError {
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !Error::UnknownRemote {
                detail: "x".into(),
            }
            .is_expected()
        );
    }

    // ---- serde ----

    #[test]
    fn serialize_json_tagged() {
        let e = Error::ValidationErrors {
            messages: vec!["Invalid subdomain".to_string()],
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"ValidationErrors\""));
        assert!(json.contains("Invalid subdomain"));
    }

    #[test]
    fn deserialize_all_variants() {
        let variants: Vec<Error> = vec![
            Error::InvalidCredentials,
            Error::NotAuthenticated,
            Error::NoDomainSelected,
            Error::SessionExpired,
            Error::DomainNotFound {
                domain: "x.com".into(),
            },
            Error::RecordNotFound {
                subdomain: "www".into(),
                record_type: "A".into(),
            },
            Error::ValidationErrors {
                messages: vec!["bad".into()],
            },
            Error::UnsupportedMethod {
                method: "PUT".into(),
            },
            Error::UnexpectedStatus { status: 404 },
            Error::NetworkError {
                detail: "down".into(),
            },
            Error::UnknownRemote {
                detail: "odd page".into(),
            },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: Error = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), v.to_string());
        }
    }
}
