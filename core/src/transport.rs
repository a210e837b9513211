//! The I/O seam: executes an `HttpRequest` and returns an `HttpResponse`.

use thiserror::Error;

use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Io(String),
}

/// Performs the network round-trip for one request.
///
/// Implementations must return non-2xx responses as `Ok` so the executor can
/// classify them by status.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // ureq's own status handling is disabled so 4xx/5xx come back as data.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(request.timeout))
            .build()
            .new_agent();

        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_deref();

        let response = match request.method {
            HttpMethod::Get => send_without_body(with_headers(agent.get(url), headers), body),
            HttpMethod::Delete => send_without_body(with_headers(agent.delete(url), headers), body),
            HttpMethod::Head => send_without_body(with_headers(agent.head(url), headers), body),
            HttpMethod::Post => send_with_body(with_headers(agent.post(url), headers), body),
            HttpMethod::Put => send_with_body(with_headers(agent.put(url), headers), body),
            HttpMethod::Patch => send_with_body(with_headers(agent.patch(url), headers), body),
        };

        let mut response = response.map_err(map_ureq_error)?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }

        let body = response.body_mut().read_to_vec().map_err(map_ureq_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body: Some(body),
        })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &Headers) -> ureq::RequestBuilder<B> {
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    builder
}

/// GET, DELETE and HEAD normally go out bodiless; a built body is still sent
/// so it matches the `Content-Type` the builder advertised.
fn send_without_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithoutBody>,
    body: Option<&[u8]>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.force_send_body().send(bytes),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&[u8]>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        other => TransportError::Io(other.to_string()),
    }
}
