//! HTTP transport abstraction for the API client
//!
//! Every backend call goes through the [`HttpClient`] trait as a fully
//! described [`HttpRequest`]. This keeps request encoding (JSON, url-encoded
//! form, multipart) inspectable and lets tests swap the network for an
//! in-memory backend or a mock.
//!
//! The default implementation wraps reqwest.
//!
//! # Example Usage:
//! ```ignore
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! // In production code
//! let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new()?);
//!
//! // In tests, any implementation of the trait will do
//! let http: Arc<dyn HttpClient> = Arc::new(FakeBackend::new());
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::Error;

pub const DEFAULT_USER_AGENT: &str = concat!("AutoStylist-Client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Head => write!(f, "HEAD"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// The `file` part of a multipart upload.
#[derive(Clone, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    },
}

impl RequestBody {
    /// Text field value by name, for form and multipart bodies.
    pub fn field(&self, name: &str) -> Option<&str> {
        let fields = match self {
            RequestBody::Form(fields) => fields,
            RequestBody::Multipart { fields, .. } => fields,
            _ => return None,
        };
        fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![],
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A generic trait for sending HTTP requests.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for failures to get a response at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_options(None, DEFAULT_USER_AGENT)
    }

    /// No timeout is applied unless one is given.
    pub fn with_options(timeout: Option<Duration>, user_agent: &str) -> Result<Self, Error> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(user_agent);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| Error::transport(format!("Failed to build reqwest client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Head => self.client.head(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart { fields, file } => {
                let mut form = reqwest::multipart::Form::new();
                for (key, value) in fields {
                    form = form.text(key, value);
                }
                if let Some(f) = file {
                    let part = reqwest::multipart::Part::bytes(f.bytes)
                        .file_name(f.file_name)
                        .mime_str(&f.content_type)
                        .map_err(|e| Error::validation(format!("Bad content type {}: {e}", f.content_type)))?;
                    form = form.part(f.field, part);
                }
                builder.multipart(form)
            }
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::transport(format!("{method} {url} => request failed: {e}")))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::transport(format!("{method} {url} => reading body failed: {e}")))?;

        debug!("{method} {url} => HTTP {status} ({} bytes)", text.len());
        Ok(HttpResponse::new(status, text))
    }
}
