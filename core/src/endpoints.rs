//! Descriptors for the endpoints the gallery app calls.

use crate::http::HttpMethod;
use crate::request::{Authorization, RequestDescriptor};

/// `GET beers/ale`, answered with a list of `Beer`.
pub fn ale_beers() -> RequestDescriptor {
    RequestDescriptor::new(HttpMethod::Get, Authorization::Never).with_path("beers/ale")
}
