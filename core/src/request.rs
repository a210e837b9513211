//! Declarative description of a single API call.

use std::collections::HashMap;

use crate::http::HttpMethod;

/// How the descriptor's path is attached to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Base URL text followed by the path, verbatim.
    Direct,
    /// Path resolved against the base URL as a relative reference.
    #[default]
    Composed,
}

/// How parameters are serialised into the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    UrlEncoded,
    #[default]
    Json,
}

/// Whether the stored access token is attached to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Required,
    Never,
}

/// An immutable description of one HTTP call, resolved into an
/// `HttpRequest` by `RequestBuilder`.
///
/// If both raw body bytes and parameters are set, the raw bytes win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    path_mode: PathMode,
    path: String,
    parameters: HashMap<String, String>,
    raw_body: Option<Vec<u8>>,
    encoding: EncodingMode,
    authorization: Authorization,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, authorization: Authorization) -> Self {
        Self {
            method,
            path_mode: PathMode::default(),
            path: String::new(),
            parameters: HashMap::new(),
            raw_body: None,
            encoding: EncodingMode::default(),
            authorization,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_path_mode(mut self, mode: PathMode) -> Self {
        self.path_mode = mode;
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingMode) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_parameters<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_raw_body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.raw_body = Some(bytes.into());
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn raw_body(&self) -> Option<&[u8]> {
        self.raw_body.as_deref()
    }

    pub fn encoding(&self) -> EncodingMode {
        self.encoding
    }

    pub fn authorization(&self) -> Authorization {
        self.authorization
    }
}
