//! Item lifecycle.
//!
//! An Item's status moves on the server while its connector executes:
//!
//! ```text
//! create ──> CREATING/UPDATING ──┬──> UPDATED ──(update)──> UPDATING ...
//!                                ├──> WAITING_USER_INPUT
//!                                └──> FINISHED | OUTDATED | LOGIN_ERROR
//! ```
//!
//! Two questions are answered here: has the execution stopped
//! ([`ItemStatus::is_finish_status`]), and will the server accept an update
//! ([`UpdateGate`]).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of an Item as reported by the API.
///
/// Statuses this crate does not know deserialize to [`ItemStatus::Unknown`]
/// and are treated as still running.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    Creating,
    Updating,
    Updated,
    WaitingUserInput,
    LoginError,
    Outdated,
    Finished,
    Unknown(String),
}

/// Statuses that mean the initiating execution stopped running.
pub const FINISH_STATUSES: [ItemStatus; 3] = [
    ItemStatus::Finished,
    ItemStatus::Outdated,
    ItemStatus::LoginError,
];

impl ItemStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ItemStatus::Creating => "CREATING",
            ItemStatus::Updating => "UPDATING",
            ItemStatus::Updated => "UPDATED",
            ItemStatus::WaitingUserInput => "WAITING_USER_INPUT",
            ItemStatus::LoginError => "LOGIN_ERROR",
            ItemStatus::Outdated => "OUTDATED",
            ItemStatus::Finished => "FINISHED",
            ItemStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_finish_status(&self) -> bool {
        matches!(
            self,
            ItemStatus::Finished | ItemStatus::Outdated | ItemStatus::LoginError
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ItemStatus::Unknown(_))
    }

    pub fn update_gate(&self) -> UpdateGate {
        UpdateGate::for_status(self)
    }
}

/// Classify a raw status string.
pub fn is_finish_status(status: &str) -> bool {
    ItemStatus::from(status).is_finish_status()
}

impl From<&str> for ItemStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "CREATING" => ItemStatus::Creating,
            "UPDATING" => ItemStatus::Updating,
            "UPDATED" => ItemStatus::Updated,
            "WAITING_USER_INPUT" => ItemStatus::WaitingUserInput,
            "LOGIN_ERROR" => ItemStatus::LoginError,
            "OUTDATED" => ItemStatus::Outdated,
            "FINISHED" => ItemStatus::Finished,
            other => ItemStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ItemStatus {
    fn from(raw: String) -> Self {
        match ItemStatus::from(raw.as_str()) {
            ItemStatus::Unknown(_) => ItemStatus::Unknown(raw),
            known => known,
        }
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ItemStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ItemStatus::from(s))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the server will accept an update for an Item.
///
/// Only `UPDATED` opens the gate. Updates sent in any other status are
/// rejected with HTTP 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateGate {
    NotReady,
    ReadyForUpdate,
}

impl UpdateGate {
    pub fn for_status(status: &ItemStatus) -> Self {
        match status {
            ItemStatus::Updated => UpdateGate::ReadyForUpdate,
            _ => UpdateGate::NotReady,
        }
    }

    pub fn is_open(self) -> bool {
        self == UpdateGate::ReadyForUpdate
    }
}
