// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-client cookie jar
//!
//! Every client owns exactly one jar for its lifetime; derived clients get
//! a fresh empty one. Matching covers domain, path, secure flag and
//! expiry. All operations are synchronous; the map shards are the only
//! guard against interleaving from concurrent requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl Cookie {
    /// Create a session cookie scoped to a domain
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
        }
    }

    /// Parse a Set-Cookie header value, defaulting the domain and path to
    /// the request URL. Returns None on malformed input.
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut segments = header.split(';');
        let (name, value) = segments.next()?.trim().split_once('=')?;
        if name.trim().is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(
            name.trim(),
            value.trim(),
            url.host_str().unwrap_or_default(),
        );
        for segment in segments {
            cookie.apply_attribute(segment.trim());
        }
        Some(cookie)
    }

    fn apply_attribute(&mut self, segment: &str) {
        match segment.split_once('=') {
            Some((attr, val)) => {
                let val = val.trim();
                if attr.trim().eq_ignore_ascii_case("domain") {
                    self.domain = val.trim_start_matches('.').to_string();
                } else if attr.trim().eq_ignore_ascii_case("path") {
                    self.path = val.to_string();
                } else if attr.trim().eq_ignore_ascii_case("expires") {
                    if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                        self.expires = Some(dt.with_timezone(&Utc));
                    }
                } else if attr.trim().eq_ignore_ascii_case("max-age") {
                    if let Ok(secs) = val.parse::<i64>() {
                        self.expires = Some(Utc::now() + chrono::Duration::seconds(secs));
                    }
                }
            }
            None => {
                if segment.eq_ignore_ascii_case("secure") {
                    self.secure = true;
                } else if segment.eq_ignore_ascii_case("httponly") {
                    self.http_only = true;
                }
            }
        }
    }

    /// Check if the cookie is past its expiry
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check whether this cookie should be sent to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        if self.is_expired() {
            return false;
        }
        if self.secure && url.scheme() != "https" {
            return false;
        }
        if !path_matches(&self.path, url.path()) {
            return false;
        }
        domain_matches(&self.domain, url.host_str().unwrap_or_default())
    }

    /// `name=value` pair for the request cookie header
    pub fn to_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Request path matches the cookie path exactly or below a `/` boundary,
/// so `/app` covers `/app/x` but never `/apple`
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    if !request_path.starts_with(cookie_path) {
        return false;
    }
    cookie_path.ends_with('/') || request_path.as_bytes()[cookie_path.len()] == b'/'
}

/// Host matches the cookie domain exactly or as a subdomain
fn domain_matches(domain: &str, host: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    let domain = domain.trim_start_matches('.');
    host == domain || (host.ends_with(domain) && host[..host.len() - domain.len()].ends_with('.'))
}

/// Thread-safe cookie storage keyed by domain
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    entries: Arc<DashMap<String, Vec<Cookie>>>,
}

impl CookieJar {
    /// Create a new empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie, replacing any existing one with the same name and path
    pub fn store(&self, cookie: Cookie) {
        let mut slot = self.entries.entry(cookie.domain.clone()).or_default();
        slot.retain(|c| c.name != cookie.name || c.path != cookie.path);
        slot.push(cookie);
    }

    /// Store from a raw Set-Cookie header, keyed by the request URL.
    /// Malformed headers are dropped.
    pub fn store_header(&self, header: &str, url: &Url) {
        match Cookie::parse(header, url) {
            Some(cookie) => self.store(cookie),
            None => tracing::debug!(header, "dropping malformed set-cookie header"),
        }
    }

    /// All cookies that match the URL, expired ones pruned
    pub fn cookies_for(&self, url: &Url) -> Vec<Cookie> {
        self.prune_expired();
        let mut found = Vec::new();
        for entry in self.entries.iter() {
            found.extend(entry.value().iter().filter(|c| c.matches(url)).cloned());
        }
        found
    }

    /// Request cookie header value for a URL: pairs joined with `"; "`,
    /// None when nothing matches
    pub fn header_value(&self, url: &Url) -> Option<String> {
        let cookies = self.cookies_for(url);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(Cookie::to_pair)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Remove all cookies
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove all cookies for one domain
    pub fn clear_domain(&self, domain: &str) {
        self.entries.remove(domain);
    }

    /// Total cookie count
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.value().len()).sum()
    }

    /// Check if the jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export the jar as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let all: Vec<Cookie> = self
            .entries
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        serde_json::to_string(&all)
    }

    /// Rebuild a jar from a JSON export
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.store(cookie);
        }
        Ok(jar)
    }

    fn prune_expired(&self) {
        for mut entry in self.entries.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }
}
