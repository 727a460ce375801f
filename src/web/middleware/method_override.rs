//! `_method` override for HTML forms.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Form or query parameter naming the method to dispatch as.
pub const OVERRIDE_PARAM: &str = "_method";

/// Upper bound on the form body buffered to look for the override.
const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// Rewrites `POST` requests carrying `_method=PUT|PATCH|DELETE` into that method.
///
/// The override is read from the query string first, then from an
/// `application/x-www-form-urlencoded` body. The body is buffered and handed on
/// unchanged. Any other override value is ignored.
///
/// Has to wrap the router rather than sit inside it, because the route is
/// chosen from the method:
///
/// ```rust,ignore
/// use axum::middleware;
/// use tower::Layer;
///
/// let app = middleware::from_fn(method_override::layer).layer(router);
/// ```
///
/// # Errors
///
/// Returns `400 Bad Request` if the form body cannot be read.
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    if req.method() != Method::POST {
        return Ok(next.run(req).await);
    }

    if let Some(method) = req.uri().query().and_then(|q| find_override(q.as_bytes())) {
        return Ok(next.run(with_method(req, method)).await);
    }

    if !is_form(&req) {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| AppError::bad_request(format!("Failed to read request body: {e}")))?;

    let method = find_override(&bytes);
    let req = Request::from_parts(parts, Body::from(bytes));

    Ok(match method {
        Some(method) => next.run(with_method(req, method)).await,
        None => next.run(req).await,
    })
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.split(';')
                .next()
                .is_some_and(|essence| {
                    essence
                        .trim()
                        .eq_ignore_ascii_case("application/x-www-form-urlencoded")
                })
        })
}

fn find_override(encoded: &[u8]) -> Option<Method> {
    url::form_urlencoded::parse(encoded)
        .filter(|(key, _)| key == OVERRIDE_PARAM)
        .find_map(|(_, value)| parse_method(&value))
}

fn parse_method(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

fn with_method(mut req: Request, method: Method) -> Request {
    tracing::debug!(from = %req.method(), to = %method, uri = %req.uri(), "Method overridden");
    *req.method_mut() = method;
    req
}
