// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Typed request bodies
//!
//! The body variant is declared once at the call boundary and drives both
//! the wire encoding and the content type. Strings and raw bytes pass
//! through untouched with no content-type inference.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use crate::error::{Error, Result};

/// Tagged union over the supported request body kinds
#[derive(Debug, Clone)]
pub enum Body {
    /// Structured data, serialized as JSON
    Json(serde_json::Value),
    /// Plain string, sent as-is
    Text(String),
    /// Raw bytes, sent as-is
    Bytes(Bytes),
    /// URL-encoded form
    Form(UrlEncodedForm),
    /// Multipart form
    Multipart(MultipartForm),
}

/// A body after encoding: wire bytes plus the content type the encoder
/// chose (None for pass-through variants).
#[derive(Debug)]
pub(crate) struct EncodedBody {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Body {
    /// Build a JSON body from any serializable value
    pub fn json<T: Serialize>(data: &T) -> Result<Self> {
        let value = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
        Ok(Body::Json(value))
    }

    /// Encode into wire bytes and the matching content type
    pub(crate) fn encode(self) -> Result<EncodedBody> {
        match self {
            Body::Json(value) => {
                let bytes =
                    serde_json::to_vec(&value).map_err(|e| Error::encode(e.to_string()))?;
                Ok(EncodedBody {
                    content_type: Some("application/json".to_string()),
                    bytes: Bytes::from(bytes),
                })
            }
            Body::Text(text) => Ok(EncodedBody {
                content_type: None,
                bytes: Bytes::from(text),
            }),
            Body::Bytes(bytes) => Ok(EncodedBody {
                content_type: None,
                bytes,
            }),
            Body::Form(form) => Ok(EncodedBody {
                content_type: Some("application/x-www-form-urlencoded".to_string()),
                bytes: Bytes::from(form.encode()),
            }),
            Body::Multipart(form) => {
                let content_type = form.content_type();
                Ok(EncodedBody {
                    content_type: Some(content_type),
                    bytes: form.encode(),
                })
            }
        }
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}

impl From<UrlEncodedForm> for Body {
    fn from(form: UrlEncodedForm) -> Self {
        Body::Form(form)
    }
}

impl From<MultipartForm> for Body {
    fn from(form: MultipartForm) -> Self {
        Body::Multipart(form)
    }
}

/// An `application/x-www-form-urlencoded` body
#[derive(Debug, Clone, Default)]
pub struct UrlEncodedForm {
    pairs: Vec<(String, String)>,
}

impl UrlEncodedForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style)
    pub fn pair(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Add a field in place
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the form has no fields
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as a `k=v&k=v` string with percent-escaped fields
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_escape(k), form_escape(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A `multipart/form-data` body
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone)]
struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Create an empty form with a fresh boundary
    pub fn new() -> Self {
        Self {
            boundary: make_boundary(),
            parts: Vec::new(),
        }
    }

    /// Add a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        });
        self
    }

    /// Add a file field with an explicit content type
    pub fn part(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        });
        self
    }

    /// The boundary separating parts on the wire
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the form has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The full content-type header value, boundary included
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Serialize all parts into the wire format
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");
            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name.as_bytes());
            buf.put_slice(b"\"");
            if let Some(ref filename) = part.filename {
                buf.put_slice(b"; filename=\"");
                buf.put_slice(filename.as_bytes());
                buf.put_slice(b"\"");
            }
            buf.put_slice(b"\r\n");
            if let Some(ref content_type) = part.content_type {
                buf.put_slice(b"Content-Type: ");
                buf.put_slice(content_type.as_bytes());
                buf.put_slice(b"\r\n");
            }
            buf.put_slice(b"\r\n");
            buf.put_slice(&part.data);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");
        buf.freeze()
    }
}

static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique-enough boundary: wall clock plus a process-wide counter.
fn make_boundary() -> String {
    let seq = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    format!("----mustekala-{:x}-{:x}", nanos, seq)
}

/// Percent-escape a form field per the urlencoded serialization rules
fn form_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encoding() {
        let form = UrlEncodedForm::new()
            .pair("name", "arvo meri")
            .pair("q", "a&b=c");
        assert_eq!(form.encode(), "name=arvo+meri&q=a%26b%3Dc");
    }

    #[test]
    fn test_form_encoding_unicode() {
        let form = UrlEncodedForm::new().pair("city", "Häme");
        assert_eq!(form.encode(), "city=H%C3%A4me");
    }

    #[test]
    fn test_json_body_encoding() {
        let body = Body::Json(serde_json::json!({"a": 1}));
        let encoded = body.encode().unwrap();
        assert_eq!(encoded.content_type.as_deref(), Some("application/json"));
        assert_eq!(&encoded.bytes[..], br#"{"a":1}"#);
    }

    #[test]
    fn test_text_and_bytes_pass_through() {
        let encoded = Body::from("raw text").encode().unwrap();
        assert_eq!(encoded.content_type, None);
        assert_eq!(&encoded.bytes[..], b"raw text");

        let encoded = Body::from(vec![0u8, 1, 2]).encode().unwrap();
        assert_eq!(encoded.content_type, None);
        assert_eq!(&encoded.bytes[..], &[0u8, 1, 2]);
    }

    #[test]
    fn test_multipart_encoding() {
        let form = MultipartForm::new()
            .text("field", "value")
            .part("file", "data.bin", "application/octet-stream", vec![1u8, 2]);
        let boundary = form.boundary().to_string();
        let content_type = form.content_type();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let bytes = form.encode();
        let wire = String::from_utf8_lossy(&bytes);
        assert!(wire.contains(&format!("--{}\r\n", boundary)));
        assert!(wire.contains("Content-Disposition: form-data; name=\"field\""));
        assert!(wire.contains("Content-Disposition: form-data; name=\"file\"; filename=\"data.bin\""));
        assert!(wire.contains("Content-Type: application/octet-stream"));
        assert!(wire.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn test_multipart_boundaries_unique() {
        assert_ne!(MultipartForm::new().boundary(), MultipartForm::new().boundary());
    }
}
