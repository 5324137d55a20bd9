//! The `error` module defines the error types returned by the hub.
//!
//! Structural failures (identity collisions, unknown identities, a closed hub)
//! are reported through [`HubError`]. A payload dropped because a subscriber's
//! queue is full is never an error; it only shows up in the drop counters.

use thiserror::Error;

use crate::broker::topic::SubscriberId;

/// Errors returned by the hub's structural operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("subscriber {0} is already subscribed")]
    AlreadySubscribed(SubscriberId),

    #[error("subscriber {0} is not subscribed")]
    NotSubscribed(SubscriberId),

    #[error("hub is closed")]
    HubClosed,
}

/// Errors returned by a non-blocking receive on a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryRecvError {
    #[error("no messages available")]
    Empty,

    #[error("subscription is closed")]
    Closed,
}

impl From<tokio::sync::mpsc::error::TryRecvError> for TryRecvError {
    fn from(err: tokio::sync::mpsc::error::TryRecvError) -> Self {
        match err {
            tokio::sync::mpsc::error::TryRecvError::Empty => TryRecvError::Empty,
            tokio::sync::mpsc::error::TryRecvError::Disconnected => TryRecvError::Closed,
        }
    }
}

pub type HubResult<T> = Result<T, HubError>;
