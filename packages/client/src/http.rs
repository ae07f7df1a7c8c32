//! Transport-level request and response values.

use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods used against the Pluggy API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    GET,
    POST,
    PATCH,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PATCH => http::Method::PATCH,
        }
    }
}

/// A fully resolved HTTP request
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL
    pub url: String,

    pub headers: HashMap<String, String>,

    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn with_body(mut self, body: impl Serialize) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,

    pub status_text: String,

    pub headers: HashMap<String, String>,

    /// Body parsed as JSON, `null` if empty or not JSON
    pub body: serde_json::Value,

    pub body_text: Option<String>,
}

impl HttpResponse {
    /// Build a response from a status code and JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        let status_text = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        let body_text = body.to_string();
        Self {
            status,
            status_text,
            headers: HashMap::new(),
            body,
            body_text: Some(body_text),
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}
