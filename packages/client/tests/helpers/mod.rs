//! Scripted stand-in for the Pluggy Items API.
//!
//! Items start `UPDATING`, stay there for a fixed number of `GET`s, then
//! settle on an outcome derived from connector and credentials. `PATCH` is
//! only accepted while the Item is `UPDATED`, and puts it back to
//! `UPDATING`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use pluggy_client::{ClientConfig, PluggyClient};

pub const API_KEY: &str = "test-api-key";

struct FakeItem {
    id: String,
    connector_id: i64,
    status: &'static str,
    outcome: &'static str,
    remaining_polls: u32,
    webhook_url: Option<String>,
    client_user_id: Option<String>,
}

impl FakeItem {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "connector": {"id": self.connector_id, "name": "Pluggy Bank"},
            "status": self.status,
            "webhookUrl": self.webhook_url,
            "clientUserId": self.client_user_id,
            "createdAt": "2020-06-01T12:00:00.000Z",
        })
    }
}

#[derive(Clone)]
pub struct FakePluggy {
    items: Arc<Mutex<HashMap<String, FakeItem>>>,
    polls_before_outcome: u32,
}

impl FakePluggy {
    pub fn new(polls_before_outcome: u32) -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
            polls_before_outcome,
        }
    }

    /// Start a mock server answering every `/items` route with this fake.
    pub async fn start(self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(path_regex(r"^/items(/[^/]+)?$"))
            .respond_with(self)
            .mount(&server)
            .await;
        server
    }

    fn error(code: u16, message: &str) -> ResponseTemplate {
        ResponseTemplate::new(code).set_body_json(json!({"code": code, "message": message}))
    }

    fn outcome(connector_id: i64, parameters: &Value) -> &'static str {
        let user = parameters["user"].as_str().unwrap_or_default();
        let password = parameters["password"].as_str().unwrap_or_default();
        if user != "user-ok" || password != "password-ok" {
            return "LOGIN_ERROR";
        }
        match connector_id {
            1 if parameters.get("token").is_some() => "UPDATED",
            1 | 3 => "WAITING_USER_INPUT",
            _ => "UPDATED",
        }
    }

    fn create(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return Self::error(400, "Invalid JSON body"),
        };
        let connector_id = match body["connectorId"].as_i64() {
            Some(id @ (0 | 1 | 3)) => id,
            _ => return Self::error(400, "Connector not found"),
        };

        let item = FakeItem {
            id: uuid::Uuid::new_v4().to_string(),
            connector_id,
            status: "UPDATING",
            outcome: Self::outcome(connector_id, &body["parameters"]),
            remaining_polls: self.polls_before_outcome,
            webhook_url: body["webhookUrl"].as_str().map(str::to_string),
            client_user_id: body["clientUserId"].as_str().map(str::to_string),
        };
        let response = item.to_json();
        self.items.lock().unwrap().insert(item.id.clone(), item);
        ResponseTemplate::new(200).set_body_json(response)
    }

    fn get(&self, id: &str) -> ResponseTemplate {
        let mut items = self.items.lock().unwrap();
        let Some(item) = items.get_mut(id) else {
            return Self::error(404, "Item not found");
        };
        if item.remaining_polls > 0 {
            item.remaining_polls -= 1;
        } else {
            item.status = item.outcome;
        }
        ResponseTemplate::new(200).set_body_json(item.to_json())
    }

    fn update(&self, id: &str, request: &Request) -> ResponseTemplate {
        let mut items = self.items.lock().unwrap();
        let Some(item) = items.get_mut(id) else {
            return Self::error(404, "Item not found");
        };
        if item.status != "UPDATED" {
            return Self::error(400, "Item is still being updated, wait until it finishes");
        }
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return Self::error(400, "Invalid JSON body"),
        };

        if let Some(url) = body["webhookUrl"].as_str() {
            item.webhook_url = Some(url.to_string());
        }
        if let Some(user) = body["clientUserId"].as_str() {
            item.client_user_id = Some(user.to_string());
        }
        item.status = "UPDATING";
        item.outcome = "UPDATED";
        item.remaining_polls = self.polls_before_outcome;
        ResponseTemplate::new(200).set_body_json(item.to_json())
    }
}

impl Respond for FakePluggy {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let api_key = request
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok());
        if api_key != Some(API_KEY) {
            return Self::error(403, "Missing or invalid API key");
        }

        let segments: Vec<&str> = request
            .url
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["items"]) => self.create(request),
            ("GET", ["items", id]) => self.get(id),
            ("PATCH", ["items", id]) => self.update(id, request),
            _ => Self::error(405, "Method not allowed"),
        }
    }
}

pub fn client_for(uri: &str) -> PluggyClient {
    PluggyClient::new(&ClientConfig::new(uri).with_api_key(API_KEY)).unwrap()
}
