// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types
//!
//! The transport's raw answer reshaped for callers: the body is decoded
//! per the effective response type, and a peek at the request headers
//! actually sent rides along for introspection.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ResponseType;
use crate::error::{Error, Result};
use crate::transport::TransportResponse;

/// HTTP response with a decoded body
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body, decoded per the effective response type
    pub body: ResponseBody,
    /// Final URL (after redirects)
    pub url: Url,
    /// The request headers actually sent
    pub request: RequestPeek,
}

/// Introspection view of the dispatched request
#[derive(Debug, Clone)]
pub struct RequestPeek {
    /// Final headers after cookie, content-type and user-agent injection
    pub headers: HeaderMap,
}

/// A response body in its decoded form. The variant always matches the
/// response type the request resolved to.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// Parsed JSON value
    Json(serde_json::Value),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Bytes),
}

impl ResponseBody {
    /// Decode raw transport bytes per the requested type. Parse and UTF-8
    /// failures surface as decode errors.
    pub(crate) fn decode(bytes: Bytes, kind: ResponseType) -> Result<Self> {
        match kind {
            ResponseType::Json => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::decode(e.to_string()))?;
                Ok(ResponseBody::Json(value))
            }
            ResponseType::Text => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| Error::decode(e.to_string()))?;
                Ok(ResponseBody::Text(text))
            }
            ResponseType::Buffer => Ok(ResponseBody::Bytes(bytes)),
        }
    }

    /// JSON value, if decoded as JSON
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Text, if decoded as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Raw bytes, if left undecoded
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Best-effort string form of any variant
    pub fn text_lossy(&self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

impl Response {
    /// Reshape a transport response: decode the body and attach the peek.
    pub(crate) fn from_transport(
        raw: TransportResponse,
        sent_headers: HeaderMap,
        response_type: ResponseType,
    ) -> Result<Self> {
        Ok(Self {
            status: raw.status,
            headers: raw.headers,
            body: ResponseBody::decode(raw.body, response_type)?,
            url: raw.url,
            request: RequestPeek {
                headers: sent_headers,
            },
        })
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get a response header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the response content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Deserialize the body into a concrete type, whatever variant it
    /// was decoded into
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let result = match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone()),
            ResponseBody::Text(text) => serde_json::from_str(text),
            ResponseBody::Bytes(bytes) => serde_json::from_slice(bytes),
        };
        result.map_err(|e| Error::decode(e.to_string()))
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json() {
        let body = ResponseBody::decode(Bytes::from(r#"{"ok":true}"#), ResponseType::Json).unwrap();
        assert_eq!(body.as_json().unwrap()["ok"], true);
    }

    #[test]
    fn test_decode_text() {
        let body = ResponseBody::decode(Bytes::from("hei"), ResponseType::Text).unwrap();
        assert_eq!(body.as_text(), Some("hei"));
    }

    #[test]
    fn test_decode_buffer_untouched() {
        let body = ResponseBody::decode(Bytes::from(vec![0xff, 0x00]), ResponseType::Buffer).unwrap();
        assert_eq!(&body.as_bytes().unwrap()[..], &[0xff, 0x00]);
    }

    #[test]
    fn test_decode_invalid_json_fails() {
        let err = ResponseBody::decode(Bytes::from("not json"), ResponseType::Json).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        let err = ResponseBody::decode(Bytes::from(vec![0xff, 0xfe]), ResponseType::Text).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_response_predicates() {
        let raw = TransportResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from("ok"),
            url: Url::parse("http://example.test/").unwrap(),
        };
        let response =
            Response::from_transport(raw, HeaderMap::new(), ResponseType::Text).unwrap();
        assert!(response.is_success());
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body.as_text(), Some("ok"));
    }
}
