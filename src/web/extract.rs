//! Request body extractor accepting HTML form posts and JSON.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Deserializes the body from `application/x-www-form-urlencoded` or
/// `application/json`.
///
/// Form keys use bracket nesting the way HTML forms submit them, so
/// `listing[title]=Cabin` reads the same as `{"listing": {"title": "Cabin"}}`.
/// A body-less request without a content type reads as an empty object.
/// Any other content type is rejected with 400.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(mime_essence);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let value = match content_type.as_deref() {
            Some("application/json") => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))?,
            Some(ct) if ct.ends_with("+json") => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))?,
            Some("application/x-www-form-urlencoded") => form_to_value(&bytes),
            None if bytes.is_empty() => Value::Object(Map::new()),
            Some(other) => {
                return Err(AppError::bad_request(format!(
                    "Unsupported content type: {other}"
                )));
            }
            None => return Err(AppError::bad_request("Missing content type")),
        };

        serde_json::from_value(value)
            .map(FormOrJson)
            .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}")))
    }
}

/// `text/html; charset=utf-8` -> `text/html`
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Builds a nested JSON object from urlencoded pairs.
///
/// `a[b][c]=v` becomes `{"a": {"b": {"c": "v"}}}`. Keys without brackets stay
/// flat, and malformed bracket keys are used verbatim. When a key repeats, the
/// last value wins.
pub fn form_to_value(body: &[u8]) -> Value {
    let mut root = Map::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        let path = key_path(&key);
        insert_path(&mut root, &path, Value::String(value.into_owned()));
    }

    Value::Object(root)
}

fn key_path(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };

    let (head, mut rest) = key.split_at(open);
    if head.is_empty() {
        return vec![key.to_string()];
    }

    let mut path = vec![head.to_string()];
    while !rest.is_empty() {
        let Some(close) = rest.find(']') else {
            return vec![key.to_string()];
        };
        if !rest.starts_with('[') || close == 1 {
            return vec![key.to_string()];
        }
        path.push(rest[1..close].to_string());
        rest = &rest[close + 1..];
    }

    path
}

fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        map.insert(first.clone(), value);
        return;
    }

    let entry = map
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    #[test]
    fn test_form_to_value_nests_brackets() {
        let value = form_to_value(
            b"listing%5Btitle%5D=Sea+View&listing%5Bprice%5D=1200&_method=PUT",
        );

        assert_eq!(
            value,
            json!({
                "listing": {"title": "Sea View", "price": "1200"},
                "_method": "PUT"
            })
        );
    }

    #[test]
    fn test_form_to_value_deep_and_malformed_keys() {
        let value = form_to_value(b"a[b][c]=1&broken[key=2&[x]=3&empty[]=4");

        assert_eq!(
            value,
            json!({
                "a": {"b": {"c": "1"}},
                "broken[key": "2",
                "[x]": "3",
                "empty[]": "4"
            })
        );
    }

    #[test]
    fn test_form_to_value_last_value_wins() {
        let value = form_to_value(b"review[rating]=2&review[rating]=5");
        assert_eq!(value, json!({"review": {"rating": "5"}}));
    }

    #[test]
    fn test_mime_essence() {
        assert_eq!(
            mime_essence("Application/JSON; charset=utf-8"),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_rejects_unknown_content_type() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("hello"))
            .unwrap();

        let result = FormOrJson::<Value>::from_request(req, &()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_empty_body_without_content_type() {
        let req = Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();

        let FormOrJson(value) = FormOrJson::<Value>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(value, json!({}));
    }
}
