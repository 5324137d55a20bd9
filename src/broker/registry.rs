use std::collections::{HashMap, HashSet};

use crate::broker::subscriber::Subscriber;
use crate::broker::topic::SubscriberId;
use crate::utils::error::{HubError, HubResult};

/// Identity-keyed store of live subscribers. Owns every [`Subscriber`]
/// record, and with it every delivery queue's sending half.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: HashMap<SubscriberId, Subscriber>,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }

    /// Stores a subscriber under its identity. The caller checks with
    /// [`SubscriberRegistry::contains`] first; identities are never merged.
    pub fn insert(&mut self, subscriber: Subscriber) {
        debug_assert!(!self.subscribers.contains_key(&subscriber.id));
        self.subscribers.insert(subscriber.id.clone(), subscriber);
    }

    /// Removes and returns the subscriber record for `id`.
    pub fn deregister(&mut self, id: &SubscriberId) -> HubResult<Subscriber> {
        self.subscribers
            .remove(id)
            .ok_or_else(|| HubError::NotSubscribed(id.clone()))
    }

    /// Copy of the topic set `id` registered with.
    pub fn topics(&self, id: &SubscriberId) -> HubResult<HashSet<String>> {
        self.subscribers
            .get(id)
            .map(|subscriber| subscriber.topics.clone())
            .ok_or_else(|| HubError::NotSubscribed(id.clone()))
    }

    /// Looks up a live subscriber.
    pub fn get(&self, id: &SubscriberId) -> Option<&Subscriber> {
        self.subscribers.get(id)
    }

    /// Whether `id` is currently registered.
    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.subscribers.contains_key(id)
    }

    /// Number of live subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no subscriber is registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Iterates over live subscribers in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Subscriber> {
        self.subscribers.values()
    }

    /// Removes every subscriber, handing the records to the caller.
    pub fn drain(&mut self) -> impl Iterator<Item = Subscriber> + '_ {
        self.subscribers.drain().map(|(_, subscriber)| subscriber)
    }
}
