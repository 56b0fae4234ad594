//! Response normalization.
//!
//! # Responsibilities
//! - Project every upstream record down to `{id, name}`
//! - Map upstream failures to status codes with an empty body
//!
//! # Design Decisions
//! - The projected list is built per call and returned; nothing is kept
//! - A record missing `id` or `name` keeps whatever it has
//! - Anything but an array of objects is the upstream's fault (502)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::upstream::ProxyError;

/// One record as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

/// Project an upstream list to `{id, name}` records, preserving order.
pub fn normalize(value: Value) -> Result<Vec<UpstreamItem>, ProxyError> {
    let Value::Array(records) = value else {
        return Err(ProxyError::Shape("expected a JSON array"));
    };

    records
        .into_iter()
        .map(|record| match record {
            Value::Object(mut fields) => Ok(UpstreamItem {
                id: fields.remove("id"),
                name: fields.remove("name"),
            }),
            _ => Err(ProxyError::Shape("expected an array of objects")),
        })
        .collect()
}

/// Status for an error code; anything that cannot end a response becomes 500.
pub fn error_status(code: u16) -> StatusCode {
    match StatusCode::from_u16(code) {
        Ok(status) if (200..=599).contains(&code) => status,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn an upstream result into the outbound response.
pub fn respond(result: Result<Value, ProxyError>) -> Response {
    match result.and_then(normalize) {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            if matches!(e, ProxyError::Shape(_)) {
                tracing::warn!(error = %e, "Upstream body rejected");
            }
            error_status(e.code()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;
    use serde_json::json;

    async fn body_string(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_extra_fields_dropped_in_order() {
        let items = normalize(json!([
            {"id": 1, "name": "SP", "extra": "x"},
            {"id": 2, "name": "RJ"}
        ]))
        .unwrap();

        assert_eq!(
            serde_json::to_string(&items).unwrap(),
            r#"[{"id":1,"name":"SP"},{"id":2,"name":"RJ"}]"#
        );
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let items = normalize(json!([{"name": "MG", "uf": "MG"}, {"id": 3}, {}])).unwrap();
        assert_eq!(
            serde_json::to_string(&items).unwrap(),
            r#"[{"name":"MG"},{"id":3},{}]"#
        );
    }

    #[test]
    fn test_non_array_is_shape_error() {
        for value in [json!({"id": 1}), json!("states"), json!(42), json!(null)] {
            let err = normalize(value).unwrap_err();
            assert!(matches!(err, ProxyError::Shape(_)));
            assert_eq!(err.code(), 502);
        }
    }

    #[test]
    fn test_non_object_element_is_shape_error() {
        let err = normalize(json!([{"id": 1, "name": "SP"}, [2, "RJ"]])).unwrap_err();
        assert!(matches!(err, ProxyError::Shape(_)));
    }

    #[test]
    fn test_error_status_clamps_invalid_codes() {
        assert_eq!(error_status(404), StatusCode::NOT_FOUND);
        assert_eq!(error_status(503), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_status(204), StatusCode::NO_CONTENT);
        assert_eq!(error_status(101), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_status(700), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_status(0), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_respond_success() {
        let res = respond(Ok(json!([{"id": 1, "name": "SP", "extra": "x"}])));

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_string(res).await, r#"[{"id":1,"name":"SP"}]"#);
    }

    #[tokio::test]
    async fn test_respond_empty_list() {
        let res = respond(Ok(json!([])));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "[]");
    }

    #[tokio::test]
    async fn test_respond_error_has_empty_body() {
        let res = respond(Err(ProxyError::Status(404)));
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(res).await, "");

        let res = respond(Ok(json!({"error": "nope"})));
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_string(res).await, "");
    }
}
