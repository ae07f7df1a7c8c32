//! HTTP execution seam.
//!
//! [`PluggyClient`](crate::PluggyClient) builds [`HttpRequest`]s and hands
//! them to an [`HttpExecutor`]. Production code uses [`ReqwestExecutor`];
//! unit tests swap in `mock::MockExecutor` to avoid the network.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single HTTP request.
///
/// Returns `Err` only when no HTTP response was obtained. Any status code,
/// including 4xx and 5xx, is an `Ok` response.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Blocking executor backed by `reqwest`.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            headers.insert(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }

        let mut req_builder = self.client.request(method, &request.url).headers(headers);
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().map_err(transport)?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut resp_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        let body_text = response.text().map_err(transport)?;
        let body = serde_json::from_str(&body_text).unwrap_or(serde_json::Value::Null);

        Ok(HttpResponse {
            status,
            status_text,
            headers: resp_headers,
            body,
            body_text: Some(body_text),
        })
    }
}

fn transport(error: reqwest::Error) -> Error {
    Error::Transport {
        message: error.to_string(),
    }
}

impl<T: HttpExecutor + ?Sized> HttpExecutor for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        (**self).execute(request)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockExecutor;
    use super::*;
    use crate::http::Method;
    use serde_json::json;

    #[test]
    fn mock_returns_queued_responses_in_order() {
        let executor = MockExecutor::new()
            .with_response(
                Method::GET,
                "http://pluggy.test/items/1",
                HttpResponse::json(200, json!({"status": "UPDATING"})),
            )
            .with_response(
                Method::GET,
                "http://pluggy.test/items/1",
                HttpResponse::json(200, json!({"status": "UPDATED"})),
            );

        let request = HttpRequest::get("http://pluggy.test/items/1");
        assert_eq!(
            executor.execute(&request).unwrap().body["status"],
            "UPDATING"
        );
        assert_eq!(executor.execute(&request).unwrap().body["status"], "UPDATED");
        // Last response repeats
        assert_eq!(executor.execute(&request).unwrap().body["status"], "UPDATED");
    }

    #[test]
    fn mock_matches_on_method() {
        let executor = MockExecutor::new().with_response(
            Method::PATCH,
            "http://pluggy.test/items/1",
            HttpResponse::json(200, json!({})),
        );

        let get = executor
            .execute(&HttpRequest::get("http://pluggy.test/items/1"))
            .unwrap();
        assert_eq!(get.status, 404);

        let patch = executor
            .execute(&HttpRequest::patch("http://pluggy.test/items/1"))
            .unwrap();
        assert_eq!(patch.status, 200);
    }

    #[test]
    fn mock_fails_when_configured() {
        let executor = MockExecutor::new().fail_with("Network error");
        let result = executor.execute(&HttpRequest::get("http://pluggy.test/items"));
        assert!(matches!(result, Err(Error::Transport { ref message }) if message == "Network error"));
    }

    #[test]
    fn mock_records_requests() {
        let executor = MockExecutor::new();
        executor
            .execute(&HttpRequest::post("http://pluggy.test/items"))
            .unwrap();
        executor
            .execute(&HttpRequest::get("http://pluggy.test/items/1"))
            .unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].method, Method::POST);
        assert_eq!(recorded[1].url, "http://pluggy.test/items/1");
    }

    #[test]
    fn arc_executor_delegates() {
        let executor = std::sync::Arc::new(MockExecutor::new().fail_with("down"));
        assert!(executor
            .execute(&HttpRequest::get("http://pluggy.test/items"))
            .is_err());
    }

    #[test]
    fn reqwest_connection_failure_is_transport() {
        // Bind and release a port so nothing is listening on it.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let executor = ReqwestExecutor::new(Duration::from_secs(2)).unwrap();
        let result = executor.execute(&HttpRequest::get(format!("http://127.0.0.1:{}/items", port)));
        assert!(matches!(result, Err(Error::Transport { .. })), "got {:?}", result);
    }

    #[test]
    fn reqwest_executor_creation() {
        let executor = ReqwestExecutor::new(Duration::from_secs(10));
        assert!(executor.is_ok());
    }
}
