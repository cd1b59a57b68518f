// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Mustekala
//!
//! One error enum for the whole request pipeline. Failures are never
//! retried or downgraded here; every variant surfaces to the immediate
//! caller of the request methods.

use thiserror::Error;

/// Result type alias for Mustekala operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Mustekala
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection, TLS, protocol)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request body could not be encoded
    #[error("body encoding failed: {0}")]
    Encode(String),

    /// Response body could not be decoded as the requested type
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// Cookie handling error
    #[error("cookie error: {0}")]
    Cookie(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a body encoding error
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Error::Encode(msg.into())
    }

    /// Create a response decoding error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a cookie error
    pub fn cookie<S: Into<String>>(msg: S) -> Self {
        Error::Cookie(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a decode failure
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// HTTP status code, if the transport attached one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
