// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client with cookie persistence and typed bodies
//!
//! Each call runs one linear pipeline: merge the per-call overrides onto
//! the stored defaults, inject cookies, encode the body, inject the user
//! agent, dispatch to the transport, capture response cookies, then
//! decode the body per the merged response type. Nothing is retried and
//! no failure is downgraded.

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE, USER_AGENT};
use reqwest::Method;

use crate::body::Body;
use crate::config::{ClientConfig, ClientOptions, RequestOptions};
use crate::cookie::CookieJar;
use crate::error::{Error, Result};
use crate::response::Response;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};

/// HTTP client: stored defaults plus an owned cookie jar
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    jar: CookieJar,
}

impl Client {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom defaults
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over an explicit transport collaborator
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            jar: CookieJar::new(),
        }
    }

    /// The stored defaults
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// This client's cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Derive a new client: current defaults overlaid with `options`,
    /// fresh empty cookie jar. Cookies never carry over; each client owns
    /// its jar.
    pub fn create(&self, options: ClientOptions) -> Result<Client> {
        Self::with_config(self.config.overlay(&options))
    }

    /// Execute a request built from per-call overrides merged onto the
    /// stored defaults
    pub async fn request(&self, options: RequestOptions) -> Result<Response> {
        let mut resolved = self.config.resolve(options)?;

        if resolved.cookie_store {
            if let Some(header) = self.jar.header_value(&resolved.url) {
                let value = HeaderValue::from_str(&header)
                    .map_err(|e| Error::cookie(format!("unsendable cookie header: {}", e)))?;
                resolved.headers.insert(COOKIE, value);
            }
        }

        let mut body_bytes = None;
        if let Some(body) = resolved.body.take() {
            let encoded = body.encode()?;
            if let Some(content_type) = encoded.content_type {
                // an explicit caller content-type wins over the encoder's choice
                if !resolved.headers.contains_key(CONTENT_TYPE) {
                    let value = HeaderValue::from_str(&content_type)
                        .map_err(|e| Error::encode(e.to_string()))?;
                    resolved.headers.insert(CONTENT_TYPE, value);
                }
            }
            body_bytes = Some(encoded.bytes);
        }

        if let Some(ref ua) = resolved.user_agent {
            let value = HeaderValue::from_str(ua)
                .map_err(|e| Error::config(format!("invalid user agent: {}", e)))?;
            resolved.headers.insert(USER_AGENT, value);
        }

        tracing::debug!(method = %resolved.method, url = %resolved.url, "dispatching request");
        let raw = self
            .transport
            .send(TransportRequest {
                method: resolved.method,
                url: resolved.url,
                headers: resolved.headers.clone(),
                body: body_bytes,
                timeout: resolved.timeout,
            })
            .await?;
        tracing::debug!(status = %raw.status, url = %raw.url, "response received");

        if resolved.cookie_store {
            for value in raw.headers.get_all(SET_COOKIE) {
                if let Ok(header) = value.to_str() {
                    self.jar.store_header(header, &raw.url);
                }
            }
        }

        Response::from_transport(raw, resolved.headers, resolved.response_type)
    }

    /// GET shorthand
    pub async fn get(&self, url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(with_target(options, Method::GET, url.as_ref()))
            .await
    }

    /// POST shorthand with a body
    pub async fn post(
        &self,
        url: impl AsRef<str>,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Result<Response> {
        let mut options = with_target(options, Method::POST, url.as_ref());
        options.body = Some(body.into());
        self.request(options).await
    }

    /// PUT shorthand with a body
    pub async fn put(
        &self,
        url: impl AsRef<str>,
        body: impl Into<Body>,
        options: RequestOptions,
    ) -> Result<Response> {
        let mut options = with_target(options, Method::PUT, url.as_ref());
        options.body = Some(body.into());
        self.request(options).await
    }

    /// DELETE shorthand
    pub async fn delete(&self, url: impl AsRef<str>, options: RequestOptions) -> Result<Response> {
        self.request(with_target(options, Method::DELETE, url.as_ref()))
            .await
    }
}

/// Pin the method; the positional URL fills in only when the overrides
/// carry none of their own.
fn with_target(mut options: RequestOptions, method: Method, url: &str) -> RequestOptions {
    options.method = Some(method);
    if options.url.is_none() {
        options.url = Some(url.to_string());
    }
    options
}
