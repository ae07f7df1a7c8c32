//! Blocking client for the Items endpoints.

use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use pluggy_poll::{poll_until, PollError, PollOptions};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::http::{HttpRequest, HttpResponse};
use crate::model::{CreateItemRequest, ErrorResponse, Item, UpdateItemRequest};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Outcome of a call that reached the server.
///
/// Successful responses carry a decoded body. Unsuccessful ones carry no
/// body; their error payload is available through
/// [`ApiResponse::error_body`].
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    body: Option<T>,
    raw: HttpResponse,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    fn from_http(raw: HttpResponse) -> Result<Self, Error> {
        let body = if raw.is_success() {
            Some(serde_json::from_value(raw.body.clone())?)
        } else {
            None
        };
        Ok(Self { body, raw })
    }
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        self.raw.status
    }

    pub fn is_successful(&self) -> bool {
        self.raw.is_success()
    }

    /// Decoded body; `None` for unsuccessful responses.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn raw(&self) -> &HttpResponse {
        &self.raw
    }

    /// The structured error payload. Always `None` for successful responses.
    pub fn error_body(&self) -> Option<ErrorResponse> {
        if self.is_successful() {
            return None;
        }
        serde_json::from_value(self.raw.body.clone()).ok()
    }

    /// The body, or an [`Error::Api`] built from the error payload.
    ///
    /// When the payload is not a `{code, message}` object the HTTP status
    /// and reason phrase are used instead.
    pub fn into_result(self) -> Result<T, Error> {
        let error = self.error_body();
        match self.body {
            Some(body) => Ok(body),
            None => Err(match error {
                Some(error) => error.into(),
                None => Error::Api {
                    code: i32::from(self.raw.status),
                    message: self.raw.status_text,
                },
            }),
        }
    }
}

/// Typed access to `/items`.
pub struct PluggyClient<X = ReqwestExecutor> {
    executor: X,
    base_url: Url,
    api_key: Option<String>,
}

impl<X> std::fmt::Debug for PluggyClient<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluggyClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key_set", &self.api_key.is_some())
            .finish()
    }
}

impl PluggyClient<ReqwestExecutor> {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let executor = ReqwestExecutor::new(config.timeout)?;
        Self::with_executor(config, executor)
    }

    /// Client configured from `PLUGGY_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(&ClientConfig::from_env()?)
    }
}

impl<X: HttpExecutor> PluggyClient<X> {
    pub fn with_executor(config: &ClientConfig, executor: X) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            executor,
            base_url: config.parsed_base_url()?,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /items`. Starts an asynchronous connector execution.
    pub fn create_item(&self, request: &CreateItemRequest) -> Result<ApiResponse<Item>, Error> {
        let url = self.endpoint(&["items"])?;
        let response: ApiResponse<Item> = self.send(HttpRequest::post(url).with_body(request)?)?;
        if let Some(item) = response.body() {
            info!(
                item_id = %item.id,
                connector_id = request.connector_id,
                status = %item.status,
                "created item"
            );
        }
        Ok(response)
    }

    /// `GET /items/{id}`
    pub fn get_item(&self, id: &str) -> Result<ApiResponse<Item>, Error> {
        let url = self.endpoint(&["items", id])?;
        self.send(HttpRequest::get(url))
    }

    /// `PATCH /items/{id}`. Rejected with 400 unless the Item is `UPDATED`.
    pub fn update_item(
        &self,
        id: &str,
        request: &UpdateItemRequest,
    ) -> Result<ApiResponse<Item>, Error> {
        let url = self.endpoint(&["items", id])?;
        self.send(HttpRequest::patch(url).with_body(request)?)
    }

    /// The error payload of an unsuccessful response.
    pub fn parse_error<T>(&self, response: &ApiResponse<T>) -> Option<ErrorResponse> {
        response.error_body()
    }

    /// Poll `GET /items/{id}` until `predicate` accepts the Item.
    ///
    /// An unsuccessful fetch ends the poll with [`PollError::Probe`] holding
    /// an [`Error::Api`].
    pub fn poll_item<P>(
        &self,
        id: &str,
        predicate: P,
        options: &PollOptions,
    ) -> Result<Item, PollError<Item, Error>>
    where
        P: FnMut(&Item) -> bool,
    {
        poll_until(
            || -> Result<Item, Error> {
                let item = self.get_item(id)?.into_result()?;
                debug!(item_id = %item.id, status = %item.status, "polled item");
                Ok(item)
            },
            predicate,
            options,
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Result<String, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                message: format!("'{}' cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn send<T: DeserializeOwned>(&self, mut request: HttpRequest) -> Result<ApiResponse<T>, Error> {
        if let Some(key) = &self.api_key {
            request = request.with_header(API_KEY_HEADER, key);
        }

        let response = self.executor.execute(&request)?;
        debug!(
            method = ?request.method,
            url = %request.url,
            status = response.status,
            "pluggy request"
        );
        ApiResponse::from_http(response)
    }
}
