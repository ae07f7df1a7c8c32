//! Item fixtures for integration tests.
//!
//! These helpers only build requests and call the client. They return
//! `Result` and leave assertions to the caller.

use std::time::Duration;

use tracing::info;

use pluggy_poll::{PollError, PollOptions};

use crate::client::PluggyClient;
use crate::error::Error;
use crate::executor::HttpExecutor;
use crate::model::{CreateItemRequest, Item, ParametersMap};
use crate::status::ItemStatus;

/// A UUID that doesn't belong to any existing Item.
pub const NON_EXISTING_ITEM_ID: &str = "ab9f7a00-7d45-458b-b288-4923e18a9e69";

pub const PLUGGY_BANK_CONNECTOR_ID: i64 = 0;
pub const PLUGGY_BANK_CONNECTOR_WITH_MFA_ID: i64 = 1;
pub const PLUGGY_BANK_CONNECTOR_WITH_SECOND_STEP_MFA_ID: i64 = 3;

pub const FIXTURE_WEBHOOK_URL: &str = "https://webhookUrl.pluggy.ai";
pub const FIXTURE_CLIENT_USER_ID: &str = "clientUserId";

/// Interval and budget for waiting on a sandbox execution.
pub const ITEM_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const ITEM_POLL_TIMEOUT: Duration = Duration::from_millis(45_000);

pub fn default_poll_options() -> PollOptions {
    PollOptions::new(ITEM_POLL_INTERVAL, ITEM_POLL_TIMEOUT)
}

/// Well-formed parameters the sandbox rejects at login.
pub fn invalid_credentials() -> ParametersMap {
    ParametersMap::map("user", "user-bad").with("password", "password-bad")
}

/// Credentials the sandbox accepts.
pub fn valid_credentials() -> ParametersMap {
    ParametersMap::map("user", "user-ok").with("password", "password-ok")
}

/// Valid credentials plus a first-step MFA token.
pub fn valid_mfa_credentials() -> ParametersMap {
    valid_credentials().with("token", "123456")
}

pub fn create_item_request(connector_id: i64, parameters: ParametersMap) -> CreateItemRequest {
    CreateItemRequest::new(connector_id, parameters)
        .with_webhook_url(FIXTURE_WEBHOOK_URL)
        .with_client_user_id(FIXTURE_CLIENT_USER_ID)
}

/// Create an Item for `connector_id` with invalid credentials.
pub fn create_item<X: HttpExecutor>(
    client: &PluggyClient<X>,
    connector_id: i64,
) -> Result<Item, Error> {
    create_item_with_parameters(client, connector_id, invalid_credentials())
}

/// Create an Item, turning an unsuccessful response into [`Error::Api`].
pub fn create_item_with_parameters<X: HttpExecutor>(
    client: &PluggyClient<X>,
    connector_id: i64,
    parameters: ParametersMap,
) -> Result<Item, Error> {
    info!(connector_id, "creating item execution");
    let item = client
        .create_item(&create_item_request(connector_id, parameters))?
        .into_result()?;
    info!(item_id = %item.id, connector_id, "created item execution");
    Ok(item)
}

pub fn create_pluggy_bank_item<X: HttpExecutor>(client: &PluggyClient<X>) -> Result<Item, Error> {
    create_item_with_parameters(client, PLUGGY_BANK_CONNECTOR_ID, valid_credentials())
}

pub fn create_pluggy_bank_mfa_item<X: HttpExecutor>(
    client: &PluggyClient<X>,
) -> Result<Item, Error> {
    create_item_with_parameters(
        client,
        PLUGGY_BANK_CONNECTOR_WITH_MFA_ID,
        valid_mfa_credentials(),
    )
}

pub fn create_pluggy_bank_mfa_second_step_item<X: HttpExecutor>(
    client: &PluggyClient<X>,
) -> Result<Item, Error> {
    create_item_with_parameters(
        client,
        PLUGGY_BANK_CONNECTOR_WITH_SECOND_STEP_MFA_ID,
        valid_credentials(),
    )
}

/// Fetch an Item, failing with [`Error::Api`] if the server refuses.
pub fn get_item_status<X: HttpExecutor>(
    client: &PluggyClient<X>,
    item_id: &str,
) -> Result<Item, Error> {
    client.get_item(item_id)?.into_result()
}

/// Poll until the Item reports exactly `status`.
pub fn wait_for_status<X: HttpExecutor>(
    client: &PluggyClient<X>,
    item_id: &str,
    status: ItemStatus,
    options: &PollOptions,
) -> Result<Item, PollError<Item, Error>> {
    client.poll_item(item_id, |item| item.status == status, options)
}

/// Poll until the Item's execution reaches a finish status.
pub fn wait_for_finish<X: HttpExecutor>(
    client: &PluggyClient<X>,
    item_id: &str,
    options: &PollOptions,
) -> Result<Item, PollError<Item, Error>> {
    client.poll_item(item_id, Item::is_finished, options)
}
