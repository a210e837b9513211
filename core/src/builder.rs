//! Resolves a `RequestDescriptor` into a transport-ready `HttpRequest`.
//!
//! # Design
//! `RequestBuilder` holds only the client configuration and an injected
//! settings store, and carries no mutable state between calls. `build` never
//! fails: a path that cannot be resolved against the base URL falls back to
//! plain concatenation, and a JSON body that cannot be serialised is left
//! out.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::encoding::form_urlencode;
use crate::http::{Headers, HttpRequest};
use crate::request::{Authorization, EncodingMode, PathMode, RequestDescriptor};
use crate::settings::{SettingsStore, TOKEN_KEY};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

#[derive(Clone)]
pub struct RequestBuilder {
    config: ClientConfig,
    settings: Arc<dyn SettingsStore>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder {
    pub fn new(config: ClientConfig, settings: Arc<dyn SettingsStore>) -> Self {
        Self { config, settings }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build(&self, descriptor: &RequestDescriptor) -> HttpRequest {
        let url = self.resolve_url(descriptor);

        let mut headers = Headers::new();
        headers.insert("Content-Type", CONTENT_TYPE_JSON);
        headers.insert("Cache-Control", "no-cache");

        let body = match (descriptor.raw_body(), descriptor.parameters()) {
            (Some(raw), _) => Some(raw.to_vec()),
            (None, params) if params.is_empty() => None,
            (None, params) => match descriptor.encoding() {
                EncodingMode::UrlEncoded => {
                    headers.insert("Content-Type", CONTENT_TYPE_FORM);
                    Some(form_urlencode(params).into_bytes())
                }
                EncodingMode::Json => json_body(params),
            },
        };

        if descriptor.authorization() == Authorization::Required {
            match self.settings.string(TOKEN_KEY) {
                Some(token) => headers.insert("Authorization", format!("bearer {token}")),
                None => debug!(url = %url, "no stored token, sending without authorization"),
            }
        }

        HttpRequest {
            method: descriptor.method(),
            url,
            headers,
            body,
            timeout: self.config.timeout(),
        }
    }

    fn resolve_url(&self, descriptor: &RequestDescriptor) -> String {
        let base = self.config.base_url();
        let direct = format!("{}{}", base.as_str(), descriptor.path());
        match descriptor.path_mode() {
            PathMode::Direct => direct,
            // Query items are not taken from the descriptor; parameters only
            // ever travel in the body.
            PathMode::Composed => match base.join(descriptor.path().trim_start_matches('/')) {
                Ok(url) => url.into(),
                Err(e) => {
                    warn!(path = descriptor.path(), error = %e, "path does not resolve against base URL");
                    direct
                }
            },
        }
    }
}

fn json_body(params: &HashMap<String, String>) -> Option<Vec<u8>> {
    match serde_json::to_vec(params) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(error = %e, "dropping request body that failed to serialize");
            None
        }
    }
}
