use crate::errors::ErrorCause;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use serde_json::{Value, json};

/// Copies the [`ErrorCause`] of a failed response into its JSON body as
/// `details.cause`.
///
/// Install only in development; production clients get the generic message.
pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(ErrorCause(cause)) = response.extensions().get::<ErrorCause>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to buffer error body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut payload: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    if let Value::Object(map) = &mut payload {
        match map.get_mut("details") {
            Some(Value::Object(details)) => {
                details.insert("cause".to_string(), Value::String(cause));
            }
            _ => {
                map.insert("details".to_string(), json!({ "cause": cause }));
            }
        }
    }

    let rendered = match serde_json::to_vec(&payload) {
        Ok(rendered) => rendered,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::{Router, middleware, response::IntoResponse, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn failing() -> Response {
        AppError::InternalServerError("pool timed out".into()).into_response()
    }

    async fn missing() -> Response {
        AppError::NotFound("gone".into()).into_response()
    }

    fn app() -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/missing", get(missing))
            .layer(middleware::from_fn(expose_error_details))
    }

    async fn call(path: &str) -> Value {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn adds_cause_to_internal_errors() {
        let body = call("/fail").await;
        assert_eq!(body["error"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["details"]["cause"], "pool timed out");
    }

    #[tokio::test]
    async fn leaves_client_errors_alone() {
        let body = call("/missing").await;
        assert_eq!(body["error"], "NOT_FOUND");
        assert!(body.get("details").is_none());
    }
}
