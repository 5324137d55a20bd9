//! # TopicHub
//!
//! `topichub` is a process-local, topic-based publish/subscribe hub. Producers
//! publish a payload to a named topic and every subscriber currently
//! registered on that topic receives it in its own bounded queue.
//!
//! Delivery is best-effort: a subscriber whose queue is full misses the
//! payload, and the publisher is never blocked or failed by a slow consumer.
//! Turning connections into subscribers and queued messages into wire frames
//! is left to the transport layer that embeds the hub.
//!
//! ## Core Modules
//!
//! - `broker`: the `Hub`, its subscriber registry, topic index and queues.
//! - `config`: loading hub and logging settings from files and environment.
//! - `utils`: error types and logging bootstrap.
//!
//! ```rust
//! use topichub::{Hub, SubscriberId};
//!
//! let hub = Hub::new();
//! let mut sub = hub.subscribe("conn-1", ["news"]).unwrap();
//! hub.publish("news", "hello").unwrap();
//! assert_eq!(sub.try_recv().unwrap().payload, "hello");
//! hub.unsubscribe(&SubscriberId::from("conn-1")).unwrap();
//! ```

pub mod broker;
pub mod config;
pub mod utils;

pub use broker::{Hub, HubState, HubStats, Message, SubscriberId, Subscription};
pub use utils::error::{HubError, HubResult, TryRecvError};
