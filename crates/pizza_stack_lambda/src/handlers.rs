//! Route dispatch for the two demo API routes.
//!
//! Events arrive in either the REST API shape (`httpMethod`/`path`) or the
//! HTTP API v2 shape (`requestContext.http.method`/`rawPath`); both are
//! accepted. Anything that is not `GET /slice/health` or `POST /toppings`
//! falls through to a 404 payload.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::counter::ToppingsCounter;

/// Response shape expected by API Gateway Lambda-proxy integrations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn handle_event(event: &Value, counter: &dyn ToppingsCounter) -> ApiGatewayResponse {
    let method = request_method(event);
    let path = request_path(event);

    if method == "GET" && path.ends_with("/slice/health") {
        return json_response(
            200,
            json!({
                "pizza": "margherita",
                "message": "oven is hot, slice is healthy!",
            }),
        );
    }

    if method == "POST" && path.ends_with("/toppings") {
        return match counter.increment() {
            Ok(count) => json_response(
                200,
                json!({
                    "pizza": "margherita",
                    "toppings": count,
                    "message": "your slice is hot and ready!",
                }),
            ),
            Err(message) => json_response(
                502,
                json!({
                    "error": "counter_unavailable",
                    "message": message,
                }),
            ),
        };
    }

    json_response(404, json!({ "error": "pizza not found", "path": path }))
}

fn request_method(event: &Value) -> String {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| {
            event
                .pointer("/requestContext/http/method")
                .and_then(Value::as_str)
        })
        .unwrap_or("")
        .to_ascii_uppercase()
}

fn request_path(event: &Value) -> String {
    event
        .get("path")
        .and_then(Value::as_str)
        .or_else(|| event.get("rawPath").and_then(Value::as_str))
        .unwrap_or("")
        .to_string()
}

fn json_response(status_code: u16, body: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Headers": "*",
            "Access-Control-Allow-Methods": "GET,POST,OPTIONS",
        }),
        body: body.to_string(),
    }
}
