//! Form-style percent encoding for request parameters.
//!
//! `url::form_urlencoded::byte_serialize` leaves exactly `0-9 A-Z a-z - . _ *`
//! untouched, percent-encodes every other UTF-8 byte, and writes spaces as
//! `+`, which is the encoding the remote API expects for form bodies.

use std::collections::HashMap;

use url::form_urlencoded::byte_serialize;

/// Percent-encode a single key or value. Spaces become `+`.
pub fn percent_encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

/// Encode `params` as `k1=v1&k2=v2`. Pair order follows the map's iteration
/// order and must not be relied upon.
pub fn form_urlencode(params: &HashMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
