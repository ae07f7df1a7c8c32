//! # pluggy-client
//!
//! Typed bindings for the Pluggy Items API and the Item lifecycle rules
//! callers need to sequence their requests.
//!
//! Creating an Item starts an asynchronous connector execution on the
//! server. Callers poll the Item until it reaches the status they need, and
//! only then issue further operations:
//!
//! ```ignore
//! use pluggy_client::{ClientConfig, ItemStatus, PluggyClient, UpdateItemRequest};
//! use pluggy_client::fixtures;
//!
//! let client = PluggyClient::new(&ClientConfig::from_env()?)?;
//! let item = fixtures::create_pluggy_bank_item(&client)?;
//!
//! // Updates are rejected with 400 until the Item is UPDATED
//! fixtures::wait_for_status(&client, &item.id, ItemStatus::Updated,
//!     &fixtures::default_poll_options())?;
//!
//! let request = UpdateItemRequest::builder().webhook_url("localhost:3000").build();
//! let updated = client.update_item(&item.id, &request)?.into_result()?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod http;
pub mod model;
pub mod status;

pub use client::{ApiResponse, PluggyClient};
pub use config::ClientConfig;
pub use error::Error;
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use model::{
    CreateItemRequest, ErrorResponse, Item, ItemConnector, ItemError, ParametersMap,
    UpdateItemRequest, UpdateItemRequestBuilder,
};
pub use status::{is_finish_status, ItemStatus, UpdateGate, FINISH_STATUSES};

pub use pluggy_poll::{CancelToken, PollError, PollOptions, TimeoutError};
