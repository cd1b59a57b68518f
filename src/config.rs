// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration and per-call overrides
//!
//! A [`Client`](crate::Client) stores one [`ClientConfig`] for its lifetime.
//! Each request computes a fresh merged view by overlaying the per-call
//! [`RequestOptions`] onto the stored defaults; the defaults are never
//! mutated by a request. Merging is shallow: an override replaces the
//! default wholesale, except `headers`, which is merged one level deep
//! (override entries inserted over the default map, entry by entry).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::body::Body;
use crate::error::{Error, Result};
use crate::DEFAULT_USER_AGENT;

/// Decoding mode for response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Parse the body as JSON
    Json,
    /// Decode the body as a UTF-8 string
    #[default]
    Text,
    /// Leave the body as raw bytes
    Buffer,
}

/// Client-level defaults, fixed at construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Consult and fill the cookie jar on each request
    pub cookie_store: bool,
    /// User agent injected into every request (None disables injection)
    pub user_agent: Option<String>,
    /// Default response body decoding
    pub response_type: ResponseType,
    /// Default headers sent with every request
    pub headers: HeaderMap,
    /// Default request timeout
    pub timeout: Option<Duration>,
    /// Maximum redirects the transport follows
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cookie_store: true,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            response_type: ResponseType::Text,
            headers: HeaderMap::new(),
            timeout: Some(Duration::from_secs(30)),
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Overlay client-level options onto these defaults, producing the
    /// configuration for a derived client. Override wins on collision;
    /// headers are merged one level deep.
    pub fn overlay(&self, options: &ClientOptions) -> ClientConfig {
        let mut config = self.clone();
        if let Some(cookie_store) = options.cookie_store {
            config.cookie_store = cookie_store;
        }
        if let Some(ref ua) = options.user_agent {
            config.user_agent = Some(ua.clone());
        }
        if let Some(response_type) = options.response_type {
            config.response_type = response_type;
        }
        if let Some(ref headers) = options.headers {
            merge_headers(&mut config.headers, headers);
        }
        if let Some(timeout) = options.timeout {
            config.timeout = Some(timeout);
        }
        if let Some(max_redirects) = options.max_redirects {
            config.max_redirects = max_redirects;
        }
        if let Some(accept) = options.accept_invalid_certs {
            config.accept_invalid_certs = accept;
        }
        if let Some(ref proxy) = options.proxy {
            config.proxy = Some(proxy.clone());
        }
        config
    }

    /// Merge per-call options onto these defaults into the fully resolved
    /// request handed to the pipeline.
    pub(crate) fn resolve(&self, options: RequestOptions) -> Result<ResolvedRequest> {
        let url_str = options
            .url
            .ok_or_else(|| Error::config("request URL not set"))?;
        let url = Url::parse(&url_str)?;

        let mut headers = self.headers.clone();
        if let Some(ref overrides) = options.headers {
            merge_headers(&mut headers, overrides);
        }

        Ok(ResolvedRequest {
            method: options.method.unwrap_or(Method::GET),
            url,
            headers,
            body: options.body,
            timeout: options.timeout.or(self.timeout),
            cookie_store: options.cookie_store.unwrap_or(self.cookie_store),
            user_agent: options.user_agent.or_else(|| self.user_agent.clone()),
            response_type: options.response_type.unwrap_or(self.response_type),
        })
    }
}

/// Partial overlay for deriving a new client via `create`
///
/// Only client-level fields appear here; `url`, `method` and `body` are
/// request-scoped and have no meaning as stored defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub cookie_store: Option<bool>,
    pub user_agent: Option<String>,
    pub response_type: Option<ResponseType>,
    pub headers: Option<HeaderMap>,
    pub timeout: Option<Duration>,
    pub max_redirects: Option<usize>,
    pub accept_invalid_certs: Option<bool>,
    pub proxy: Option<String>,
}

impl ClientOptions {
    /// Create empty options (inherit everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the cookie jar
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = Some(enabled);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the default response decoding
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Add a default header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let headers = self.headers.get_or_insert_with(HeaderMap::new);
        insert_header(headers, name.as_ref(), value.as_ref());
        self
    }

    /// Set the default timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Accept invalid certificates (dangerous!)
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Set the proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Per-call overrides onto a client's stored defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub url: Option<String>,
    pub headers: Option<HeaderMap>,
    pub body: Option<Body>,
    pub timeout: Option<Duration>,
    pub cookie_store: Option<bool>,
    pub user_agent: Option<String>,
    pub response_type: Option<ResponseType>,
}

impl RequestOptions {
    /// Create empty options (inherit everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let headers = self.headers.get_or_insert_with(HeaderMap::new);
        insert_header(headers, name.as_ref(), value.as_ref());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body from any serializable value
    pub fn json<T: serde::Serialize>(mut self, data: &T) -> Result<Self> {
        self.body = Some(Body::json(data)?);
        Ok(self)
    }

    /// Set the timeout for this call
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable the cookie jar for this call
    pub fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = Some(enabled);
        self
    }

    /// Override the user agent for this call
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the response decoding for this call
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }
}

/// A request with every default applied, ready for the pipeline
#[derive(Debug)]
pub(crate) struct ResolvedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Body>,
    pub timeout: Option<Duration>,
    pub cookie_store: bool,
    pub user_agent: Option<String>,
    pub response_type: ResponseType,
}

/// One-level-deep header merge: override entries replace default entries
/// by name, untouched defaults survive. All values of a multi-valued
/// override name are carried over.
fn merge_headers(base: &mut HeaderMap, overrides: &HeaderMap) {
    for name in overrides.keys() {
        let mut values = overrides.get_all(name).iter().cloned();
        if let Some(first) = values.next() {
            base.insert(name.clone(), first);
            for value in values {
                base.append(name.clone(), value);
            }
        }
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    if let (Ok(name), Ok(value)) = (
        HeaderName::try_from(name),
        HeaderValue::try_from(value),
    ) {
        headers.insert(name, value);
    }
}
