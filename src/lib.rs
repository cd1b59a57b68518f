// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Mustekala - Ergonomic HTTP Client Layer
//!
//! A convenience layer over an HTTP transport: per-client cookie
//! persistence, typed request bodies that drive their own content type,
//! default header injection, and a small fluent surface. Connection
//! handling, TLS and redirects stay in the transport; this crate is the
//! configuration-merge and header/body pipeline on top.
//!
//! ## Features
//!
//! - Cookie jar per client: responses fill it, requests drain it
//! - Typed bodies: JSON, text, bytes, urlencoded and multipart forms
//! - Per-call overrides shallow-merged onto stored defaults
//! - Response decoding by declared type: JSON, text or raw bytes
//! - Request peek: see the headers that actually went out
//! - Swappable transport seam for testing
//!
//! ## Example
//!
//! ```rust,no_run
//! use mustekala::{Client, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!
//!     let response = client
//!         .post(
//!             "https://api.example.com/login",
//!             serde_json::json!({"user": "arvo"}),
//!             RequestOptions::new(),
//!         )
//!         .await?;
//!     assert!(response.is_success());
//!
//!     // the session cookie from the login response rides along
//!     let profile = client
//!         .get("https://api.example.com/me", RequestOptions::new())
//!         .await?;
//!     println!("{}", profile.body.text_lossy());
//!
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod response;
pub mod transport;

// Re-exports for convenience

pub use body::{Body, MultipartForm, UrlEncodedForm};
pub use client::Client;
pub use config::{ClientConfig, ClientOptions, RequestOptions, ResponseType};
pub use cookie::{Cookie, CookieJar};
pub use error::{Error, Result};
pub use response::{RequestPeek, Response, ResponseBody};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

use lazy_static::lazy_static;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
}

lazy_static! {
    // Process-wide default client behind the free functions. Built on
    // first use, lives for the process, never reset. Construction
    // failure here has nowhere to propagate, so it panics.
    static ref DEFAULT_CLIENT: Client =
        Client::new().expect("failed to build default HTTP client");
}

/// GET via the process-wide default client
///
/// First use builds the shared client; panics if its transport cannot
/// be built. Use [`Client::new`] for a fallible construction path.
pub async fn get(url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
    DEFAULT_CLIENT.get(url, options).await
}

/// POST via the process-wide default client
///
/// First use builds the shared client; panics if its transport cannot
/// be built.
pub async fn post(
    url: impl AsRef<str>,
    body: impl Into<Body>,
    options: RequestOptions,
) -> Result<Response> {
    DEFAULT_CLIENT.post(url, body, options).await
}

/// PUT via the process-wide default client
///
/// First use builds the shared client; panics if its transport cannot
/// be built.
pub async fn put(
    url: impl AsRef<str>,
    body: impl Into<Body>,
    options: RequestOptions,
) -> Result<Response> {
    DEFAULT_CLIENT.put(url, body, options).await
}

/// DELETE via the process-wide default client
///
/// First use builds the shared client; panics if its transport cannot
/// be built.
pub async fn delete(url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
    DEFAULT_CLIENT.delete(url, options).await
}

/// Build a standalone client from the default configuration overlaid
/// with `options`. The new client gets its own empty cookie jar; it
/// shares nothing with the default client.
///
/// First use builds the shared client; panics if its transport cannot
/// be built.
pub fn create(options: ClientOptions) -> Result<Client> {
    DEFAULT_CLIENT.create(options)
}

/// Mustekala version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_create_standalone_client() {
        let client = create(ClientOptions::new().cookie_store(false)).unwrap();
        assert!(!client.config().cookie_store);
        assert!(client.cookie_jar().is_empty());
    }
}
