//! Payload types returned by the sample beer API.
//!
//! These mirror the mock-server's fixtures but are defined independently;
//! the integration tests catch schema drift between the two crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Beer {
    pub price: String,
    pub name: String,
    pub rating: Rating,
    pub image: String,
    pub id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub reviews: i64,
}
