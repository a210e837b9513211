//! Request executor for the gallery API.
//!
//! # Overview
//! A `RequestDescriptor` declares one call. `RequestBuilder` resolves it into
//! an `HttpRequest` (URL, headers, body, timeout) without any I/O, a
//! `Transport` performs the round-trip, and `executor::classify` maps the
//! outcome onto the decoded payload or a `NetworkError`.
//!
//! # Design
//! - The token store, connectivity check and transport are injected traits,
//!   so nothing reads process-wide state.
//! - `Executor::execute` delivers exactly one completion per call on a single
//!   serial `CompletionQueue`; `Executor::fetch` is the blocking equivalent.
//! - Every failure, including transport and decode failures, surfaces as a
//!   `NetworkError`.

pub mod builder;
pub mod completion;
pub mod config;
pub mod connectivity;
pub mod encoding;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod http;
pub mod request;
pub mod settings;
pub mod transport;
pub mod types;

pub use builder::RequestBuilder;
pub use completion::CompletionQueue;
pub use config::{ClientConfig, ConfigError};
pub use connectivity::{AlwaysConnected, ConnectivityGate};
pub use encoding::{form_urlencode, percent_encode};
pub use error::{ErrorKind, ErrorResponse, NetworkError};
pub use executor::{classify, Executor};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use request::{Authorization, EncodingMode, PathMode, RequestDescriptor};
pub use settings::{MemorySettings, SettingsStore, TOKEN_KEY};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{Beer, Rating};
