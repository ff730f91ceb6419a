//! # freedns-provider
//!
//! DNS record management for [freedns.afraid.org](https://freedns.afraid.org)
//! by driving its web console, which exposes no formal API. Every operation
//! submits the console's HTML forms and interprets the server-rendered
//! response — status, redirect target, and page markup — through
//! single-pass token scans.
//!
//! ## How it works
//!
//! | Operation | Request | Outcome signal |
//! |-----------|---------|----------------|
//! | login | POST login form | `dns_cookie` in `Set-Cookie` |
//! | select domain | GET domain listing | domain id scraped from the management anchor |
//! | add record | POST save form | redirect = saved; page markup = validation errors |
//! | find record | GET record listing | row scan, plus per-candidate deep search for truncated values |
//! | delete record | GET delete endpoint | redirect = deleted |
//!
//! Redirects are never followed: a bounce to the login page is how the
//! console says a session cookie expired, so redirect targets are data.
//!
//! ## TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use freedns_provider::{Credentials, FreednsClient, NewRecord, RecordType, registrable_domain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = FreednsClient::new();
//!
//!     // 1. Log in and pick the zone's registrable domain
//!     client
//!         .login(&Credentials {
//!             username: "user".to_string(),
//!             password: "secret".to_string(),
//!         })
//!         .await?;
//!     client
//!         .select_domain(&registrable_domain("_acme-challenge.example.com"))
//!         .await?;
//!
//!     // 2. Create a TXT record
//!     let outcome = client
//!         .add_record(&NewRecord {
//!             record_type: RecordType::Txt,
//!             subdomain: "_acme-challenge".to_string(),
//!             address: "\"validation-token\"".to_string(),
//!             wildcard: false,
//!             ttl: None,
//!         })
//!         .await?;
//!     println!("saved: {outcome:?}");
//!
//!     // 3. Locate it again and clean up
//!     let found = client
//!         .find_record("_acme-challenge", RecordType::Txt, "\"validation-token\"")
//!         .await?;
//!     client.delete_record(&found.id).await?;
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Error). The console reports
//! most failures through page content, so the variants describe what the
//! scraped response looked like:
//!
//! - [`Error::SessionExpired`] — the console bounced to its login page;
//!   re-run login and domain selection, then retry
//! - [`Error::ValidationErrors`] — the save form was rejected, with the
//!   console's messages in page order
//! - [`Error::NoDomainSelected`] / [`Error::NotAuthenticated`] — a
//!   precondition failed locally, before any network traffic
//!
//! Nothing is retried automatically, and a duplicate record on create is
//! not an error: it surfaces as [`SaveOutcome::AlreadyExists`], keeping
//! repeated creates idempotent.
//!
//! ## Session model
//!
//! A [`FreednsClient`] owns one account's session state exclusively and is
//! strictly sequential: one HTTP round trip per call (the deep search adds
//! one per ambiguous candidate, in order), no caching, no background work.

mod client;
mod error;
mod html;
mod scrape;
mod transport;
mod types;
mod utils;

// Re-export the client
pub use client::FreednsClient;

// Re-export error types
pub use error::{Error, Result};

// Re-export the transport seam (custom fetchers plug in here)
pub use transport::{HttpFetcher, PageFetcher, PageResponse};

// Re-export types
pub use types::{
    Credentials, NewRecord, RecordMatch, RecordType, SaveOutcome, SessionCookie,
    registrable_domain,
};
