use reqwest::blocking::{Client, Response};
use serde_json::Value;
use thiserror::Error;

pub const BASE_URL: &str = "https://api.clockify.me/api/v1";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{message} ({code})")]
    Service { message: String, code: String },
    #[error("HTTP request error: {status} ({error})")]
    Http { status: String, error: String },
    #[error("Clockify API error: {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Clone)]
pub struct Session {
    client: Client,
    api_key: String,
}

impl Session {
    pub fn new(api_key: &str) -> Self {
        let client = Client::builder()
            .user_agent("clockify-cli")
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key: api_key.to_string(),
        }
    }

    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let response = self.send(path, params)?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().unwrap_or_default();
            return Err(classify(status, &body));
        }
        response
            .json::<Value>()
            .map_err(|err| ApiError::Parse(err.to_string()))
    }

    /// Like `get`, but a 404 response resolves to `Ok(None)` instead of an
    /// error. Used for by-id lookups where the resource may have been deleted.
    pub fn get_optional(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = self.send(path, &[])?;
        let status = response.status().as_u16();
        if status == 404 {
            return Ok(None);
        }
        if status != 200 {
            let body = response.text().unwrap_or_default();
            return Err(classify(status, &body));
        }
        response
            .json::<Value>()
            .map(Some)
            .map_err(|err| ApiError::Parse(err.to_string()))
    }

    /// Quiet probe: returns the raw status code without classifying the body.
    pub fn get_status(&self, path: &str) -> Result<u16, ApiError> {
        let response = self.send(path, &[])?;
        Ok(response.status().as_u16())
    }

    fn send(&self, path: &str, params: &[(&str, &str)]) -> Result<Response, ApiError> {
        let mut url = format!("{BASE_URL}{path}");
        if !params.is_empty() {
            url.push('?');
            url.push_str(&encode_query(params)?);
        }
        self.client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-type", "application/x-www-form-urlencoded")
            .header("Connection", "keep-alive")
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))
    }
}

pub fn validate_key(key: &str) -> Result<bool, ApiError> {
    let session = Session::new(key);
    Ok(session.get_status("/workspaces")? != 401)
}

// The service's query parameter names use hyphens where callers write
// underscores; every underscore in the encoded query string is rewritten.
fn encode_query(params: &[(&str, &str)]) -> Result<String, ApiError> {
    let url = reqwest::Url::parse_with_params(BASE_URL, params)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    Ok(url.query().unwrap_or_default().replace('_', "-"))
}

fn classify(status: u16, body: &str) -> ApiError {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return ApiError::Status(status);
    };
    if let (Some(message), Some(code)) = (json.get("message"), json.get("code")) {
        return ApiError::Service {
            message: field_text(message),
            code: field_text(code),
        };
    }
    if let (Some(error), Some(error_status)) = (json.get("error"), json.get("status")) {
        return ApiError::Http {
            status: field_text(error_status),
            error: field_text(error),
        };
    }
    ApiError::Status(status)
}

fn field_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_query_rewrites_underscores() {
        let encoded = encode_query(&[("task_name", "X")]).unwrap();
        assert_eq!(encoded, "task-name=X");
    }

    #[test]
    fn encode_query_rewrites_every_underscore() {
        let encoded = encode_query(&[("page_size", "50"), ("sort_order", "asc")]).unwrap();
        assert_eq!(encoded, "page-size=50&sort-order=asc");
    }

    #[test]
    fn encode_query_escapes_values() {
        let encoded = encode_query(&[("name", "a b")]).unwrap();
        assert_eq!(encoded, "name=a+b");
    }

    #[test]
    fn classify_service_error() {
        let err = classify(400, r#"{"message": "Workspace not found", "code": 501}"#);
        assert_eq!(
            err,
            ApiError::Service {
                message: "Workspace not found".to_string(),
                code: "501".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Workspace not found (501)");
    }

    #[test]
    fn classify_prefers_service_shape_over_http_shape() {
        let body = r#"{"message": "m", "code": 1, "error": "e", "status": 502}"#;
        assert!(matches!(classify(500, body), ApiError::Service { .. }));
    }

    #[test]
    fn classify_http_request_error() {
        let err = classify(502, r#"{"error": "bad gateway", "status": 502}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: "502".to_string(),
                error: "bad gateway".to_string(),
            }
        );
        assert_eq!(err.to_string(), "HTTP request error: 502 (bad gateway)");
    }

    #[test]
    fn classify_unrecognized_body_falls_back_to_status() {
        assert_eq!(classify(500, "<html>oops</html>"), ApiError::Status(500));
        assert_eq!(classify(503, r#"{"detail": "nope"}"#), ApiError::Status(503));
        assert_eq!(classify(503, ""), ApiError::Status(503));
    }
}
