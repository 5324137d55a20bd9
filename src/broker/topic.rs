use std::collections::{HashMap, HashSet};
use std::fmt;

/// Opaque identity of a subscriber.
///
/// Supplied by the transport layer (a connection id, a session token) or
/// generated with [`SubscriberId::generate`]. Nothing here assumes that a
/// network address is unique, so callers should not key on one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Wraps a caller-supplied identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random identity.
    pub fn generate() -> Self {
        Self(format!("sub-{}", uuid::Uuid::new_v4()))
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SubscriberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reverse index from topic name to the subscribers interested in it.
///
/// A topic with no subscribers is never kept around: removing the last
/// subscriber of a topic removes the topic entry itself.
#[derive(Debug, Default)]
pub struct TopicIndex {
    topics: HashMap<String, HashSet<SubscriberId>>,
}

impl TopicIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    /// Adds `id` under `topic`, creating the topic entry if needed.
    /// If the subscriber is already listed, it has no effect.
    pub fn insert(&mut self, topic: &str, id: SubscriberId) {
        self.topics.entry(topic.to_string()).or_default().insert(id);
    }

    /// Removes `id` from `topic` and prunes the entry if it became empty.
    pub fn remove(&mut self, topic: &str, id: &SubscriberId) {
        if let Some(subscribers) = self.topics.get_mut(topic) {
            subscribers.remove(id);
            if subscribers.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Subscribers listed under `topic`, or `None` if nobody is.
    pub fn subscribers(&self, topic: &str) -> Option<&HashSet<SubscriberId>> {
        self.topics.get(topic)
    }

    /// Whether `id` is listed under `topic`.
    pub fn contains(&self, topic: &str, id: &SubscriberId) -> bool {
        self.topics
            .get(topic)
            .is_some_and(|subscribers| subscribers.contains(id))
    }

    /// Whether `topic` has an entry. Entries are never empty.
    pub fn contains_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Number of topics with at least one subscriber.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether no topic has a subscriber.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Iterates over `(topic, subscribers)` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashSet<SubscriberId>)> {
        self.topics.iter()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}
