//! The `broker` module holds the hub and the pieces it is made of.
//!
//! - `topic`: subscriber identities and the topic → subscribers index.
//! - `subscriber`: a subscriber record and the consumer's queue handle.
//! - `registry`: the identity → subscriber store.
//! - `message`: the item delivered through a queue.
//! - `engine`: the `Hub` composing all of the above behind one lock.

pub mod engine;
pub mod message;
pub mod registry;
pub mod subscriber;
pub mod topic;

pub use engine::{Hub, HubState, HubStats};
pub use message::Message;
pub use subscriber::Subscription;
pub use topic::SubscriberId;
