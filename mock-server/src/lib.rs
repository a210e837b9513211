use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

/// Token `/session` accepts, sent as `Authorization: bearer secret`.
pub const SESSION_TOKEN: &str = "secret";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Beer {
    pub price: String,
    pub name: String,
    pub rating: Rating,
    pub image: String,
    pub id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub reviews: i64,
}

/// What `/echo` saw on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub cache_control: Option<String>,
    pub body: String,
}

pub fn ale_beers() -> Vec<Beer> {
    vec![
        Beer {
            price: "$16.99".to_string(),
            name: "Founders All Day IPA".to_string(),
            rating: Rating {
                average: 4.411243509154233,
                reviews: 453,
            },
            image: "https://images.example.com/all-day-ipa.png".to_string(),
            id: 1,
        },
        Beer {
            price: "$13.99".to_string(),
            name: "Blue Moon Belgian White".to_string(),
            rating: Rating {
                average: 3.8,
                reviews: 91,
            },
            image: "https://images.example.com/blue-moon.png".to_string(),
            id: 2,
        },
    ]
}

pub fn app() -> Router {
    Router::new()
        .route("/beers/ale", get(list_ale))
        .route("/session", get(session))
        .route("/echo", any(echo))
        .route("/fail/{status}", any(fail))
        .route("/broken/{status}", any(broken))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_ale() -> Json<Vec<Beer>> {
    Json(ale_beers())
}

async fn session(headers: HeaderMap) -> Result<Json<serde_json::Value>, StatusCode> {
    let expected = format!("bearer {SESSION_TOKEN}");
    match header_value(&headers, header::AUTHORIZATION) {
        Some(value) if value == expected => Ok(Json(json!({ "user": "gallery" }))),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        authorization: header_value(&headers, header::AUTHORIZATION),
        cache_control: header_value(&headers, header::CACHE_CONTROL),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn fail(Path(status): Path<u16>) -> impl IntoResponse {
    let body = json!({
        "message": "failure",
        "status": { "status": 77, "msg": "boom" },
    });
    (status_code(status), Json(body))
}

async fn broken(Path(status): Path<u16>) -> impl IntoResponse {
    (status_code(status), "internal error")
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
