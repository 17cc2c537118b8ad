//! Rewrites axum's plain-text JSON extractor rejections (400/422) into the
//! [`ApiResponse`] error envelope.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Request body fields accepted by the API, used to point at the bad one.
const KNOWN_FIELDS: [&str; 2] = ["code", "language"];

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .find(|key| msg.contains(&format!("`{key}`")))
        .map(|key| key.to_string())
}

fn hint_from_serde_msg(msg: &str) -> Option<String> {
    if msg.contains("missing field") {
        Some("Send a JSON object with the required field, e.g. { \"code\": \"...\" }.".into())
    } else if msg.contains("expected a string") || msg.contains("invalid type") {
        Some("This field must be a JSON string.".into())
    } else if msg.contains("Content-Type") {
        Some("Set the `Content-Type: application/json` header.".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts
        .headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        return v.to_string();
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    // Only 400/422 are rewritten.
    if !(status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;

    // Handler errors already carry the envelope.
    if is_json(&parts) {
        return Response::from_parts(parts, bytes.into());
    }

    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(%req_id, %status, "rewriting extractor rejection");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: hint_from_serde_msg(&original),
    };

    let envelope = ApiResponse::<()>::error(
        if status == StatusCode::BAD_REQUEST {
            "BAD_REQUEST"
        } else {
            "UNPROCESSABLE_ENTITY"
        },
        original.trim(),
        vec![detail],
    );

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_field_from_serde_message() {
        let msg = "Failed to deserialize the JSON body into the target type: missing field `code` at line 1 column 2";
        assert_eq!(guess_path_from_serde_msg(msg).as_deref(), Some("code"));
        assert!(hint_from_serde_msg(msg).is_some());
        assert_eq!(guess_path_from_serde_msg("EOF while parsing"), None);
    }
}
