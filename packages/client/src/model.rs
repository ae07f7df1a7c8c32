//! Request and response bodies for the Items API.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::status::{ItemStatus, UpdateGate};

/// Connector credentials, kept in insertion order.
///
/// Serializes as a JSON object whose keys appear in the order they were
/// added, so identical builders always produce identical request bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersMap {
    entries: Vec<(String, String)>,
}

impl ParametersMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a map with a single entry.
    pub fn map(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().with(key, value)
    }

    /// Add an entry, replacing the value in place if the key exists.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParametersMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParametersMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParametersVisitor;

        impl<'de> Visitor<'de> for ParametersVisitor {
            type Value = ParametersMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of string parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut parameters = ParametersMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    parameters.insert(key, value);
                }
                Ok(parameters)
            }
        }

        deserializer.deserialize_map(ParametersVisitor)
    }
}

/// Connector summary embedded in an Item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemConnector {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Execution error reported on an Item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemError {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// An Item: one attempt to connect to an institution through a connector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    pub status: ItemStatus,

    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<ItemConnector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<i64>,

    #[serde(default, skip_serializing_if = "ParametersMap::is_empty")]
    pub parameters: ParametersMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl Item {
    /// Connector id, from either `connectorId` or `connector.id`.
    pub fn connector_id(&self) -> Option<i64> {
        self.connector_id
            .or_else(|| self.connector.as_ref().map(|c| c.id))
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finish_status()
    }

    pub fn update_gate(&self) -> UpdateGate {
        self.status.update_gate()
    }
}

/// Error body returned with an unsuccessful response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code={}, message='{}'", self.code, self.message)
    }
}

/// Body of `POST /items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub connector_id: i64,
    pub parameters: ParametersMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_id: Option<String>,
}

impl CreateItemRequest {
    pub fn new(connector_id: i64, parameters: ParametersMap) -> Self {
        Self {
            connector_id,
            parameters,
            webhook_url: None,
            client_user_id: None,
        }
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    pub fn with_client_user_id(mut self, client_user_id: impl Into<String>) -> Self {
        self.client_user_id = Some(client_user_id.into());
        self
    }
}

/// Body of `PATCH /items/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_id: Option<String>,
}

impl UpdateItemRequest {
    pub fn builder() -> UpdateItemRequestBuilder {
        UpdateItemRequestBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_none() && self.webhook_url.is_none() && self.client_user_id.is_none()
    }
}

#[derive(Debug, Default)]
pub struct UpdateItemRequestBuilder {
    request: UpdateItemRequest,
}

impl UpdateItemRequestBuilder {
    pub fn parameters(mut self, parameters: ParametersMap) -> Self {
        self.request.parameters = Some(parameters);
        self
    }

    pub fn webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.request.webhook_url = Some(webhook_url.into());
        self
    }

    pub fn client_user_id(mut self, client_user_id: impl Into<String>) -> Self {
        self.request.client_user_id = Some(client_user_id.into());
        self
    }

    pub fn build(self) -> UpdateItemRequest {
        self.request
    }
}
