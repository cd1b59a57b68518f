// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport collaborator seam
//!
//! The client hands a fully resolved request to a [`Transport`] and gets
//! back status, headers and body bytes. Everything below that line -
//! connections, TLS, redirects - belongs to the transport. The default
//! implementation is reqwest-backed; tests swap in recording mocks.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// A fully resolved request, ready for the wire
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Final headers, cookie and user-agent injection already applied
    pub headers: HeaderMap,
    /// Encoded body bytes
    pub body: Option<Bytes>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

/// The transport's raw answer
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as bytes
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
}

/// The external component that performs the network call
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call. Errors come back unmodified; this layer never
    /// retries or suppresses them.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Default reqwest-backed transport
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the client-level configuration. reqwest's
    /// own cookie store stays off; the jar lives in the client layer.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::config(format!("invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds_from_default_config() {
        assert!(ReqwestTransport::new(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_transport_rejects_bad_proxy() {
        let config = ClientConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..ClientConfig::default()
        };
        let err = ReqwestTransport::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
