//! Hub engine
//!
//! This module contains the in-process hub responsible for:
//! - registering subscribers and their delivery queues
//! - keeping the topic index in step with the subscriber registry
//! - fanning published payloads out to every subscriber of a topic
//! - closing every queue on shutdown
//!
//! Concurrency and usage notes:
//! - Registry, topic index and hub state live behind one read/write lock.
//!   Subscribe, Unsubscribe and Shutdown take it exclusively; Publish takes it
//!   shared, so publishers run in parallel with each other.
//! - Publish never waits on a consumer. Each queue has its own
//!   synchronization and a full queue drops the new payload for that
//!   subscriber only.
//! - Because Publish holds the shared lock for the whole fan-out and closing
//!   a queue needs the exclusive lock, a payload is never enqueued into a
//!   queue that has been closed.
//! - Share a hub between tasks with `Arc<Hub>`; every method takes `&self`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use crate::broker::message::Message;
use crate::broker::registry::SubscriberRegistry;
use crate::broker::subscriber::{Delivery, Subscriber, Subscription};
use crate::broker::topic::{SubscriberId, TopicIndex};
use crate::config::HubSettings;
use crate::utils::error::{HubError, HubResult};

/// Lifecycle of a hub. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubState {
    Running,
    ShuttingDown,
    Closed,
}

/// Point-in-time copy of the hub's delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Accepted publish calls, including those for topics nobody listens to.
    pub published: u64,
    /// Messages placed in a subscriber queue.
    pub delivered: u64,
    /// Messages dropped because a queue was full or its consumer went away.
    pub dropped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    published: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug)]
struct HubInner {
    state: HubState,
    registry: SubscriberRegistry,
    index: TopicIndex,
}

impl HubInner {
    fn ensure_running(&self) -> HubResult<()> {
        match self.state {
            HubState::Running => Ok(()),
            HubState::ShuttingDown | HubState::Closed => Err(HubError::HubClosed),
        }
    }

    /// Indexes `id` under each of `topics`, then registers it with a fresh
    /// queue. Nothing is touched if `id` is already live.
    fn attach(
        &mut self,
        id: SubscriberId,
        topics: HashSet<String>,
        capacity: usize,
    ) -> HubResult<Subscription> {
        if self.registry.contains(&id) {
            return Err(HubError::AlreadySubscribed(id));
        }
        for topic in &topics {
            self.index.insert(topic, id.clone());
        }
        let (subscriber, subscription) = Subscriber::new(id, topics, capacity);
        self.registry.insert(subscriber);
        Ok(subscription)
    }

    fn detach(&mut self, id: &SubscriberId) -> HubResult<Subscriber> {
        let mut subscriber = self.registry.deregister(id)?;
        for topic in &subscriber.topics {
            self.index.remove(topic, id);
        }
        subscriber.close();
        Ok(subscriber)
    }

    fn close_all(&mut self) -> usize {
        self.index.clear();
        let mut closed = 0;
        for mut subscriber in self.registry.drain() {
            subscriber.close();
            closed += 1;
        }
        closed
    }
}

/// Topic-based broadcast hub.
///
/// Owns the subscriber registry and the topic index as one consistency
/// domain. A subscriber `s` is listed under topic `t` exactly when `s` is
/// registered and `t` is one of its topics.
#[derive(Debug)]
pub struct Hub {
    inner: RwLock<HubInner>,
    capacity: usize,
    counters: Counters,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

impl Hub {
    /// Queue capacity used when none is configured.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a hub with [`Hub::DEFAULT_CAPACITY`] slots per queue.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a hub whose subscriber queues hold `capacity` messages.
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HubInner {
                state: HubState::Running,
                registry: SubscriberRegistry::new(),
                index: TopicIndex::new(),
            }),
            capacity: capacity.max(1),
            counters: Counters::default(),
        }
    }

    /// Creates a hub sized from the `[hub]` configuration section.
    pub fn from_settings(settings: &HubSettings) -> Self {
        Self::with_capacity(settings.queue_capacity)
    }

    /// Registers `id` on `topics` and returns the handle to its queue.
    ///
    /// Fails with [`HubError::AlreadySubscribed`] if `id` is live already; the
    /// existing subscription is left untouched.
    pub fn subscribe<I, S>(&self, id: impl Into<SubscriberId>, topics: I) -> HubResult<Subscription>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let topics: HashSet<String> = topics.into_iter().map(Into::into).collect();

        let topic_count = topics.len();

        let mut inner = self.inner.write();
        inner.ensure_running()?;
        let subscription = inner.attach(id, topics, self.capacity)?;

        debug!("{} subscribed to {} topic(s)", subscription.id(), topic_count);
        Ok(subscription)
    }

    /// Removes `id` from every topic and closes its queue. The consumer still
    /// drains what was buffered before seeing end-of-stream.
    pub fn unsubscribe(&self, id: &SubscriberId) -> HubResult<()> {
        let mut inner = self.inner.write();
        inner.ensure_running()?;
        let subscriber = inner.detach(id)?;

        debug!(
            "{} unsubscribed ({} message(s) dropped over its lifetime)",
            id,
            subscriber.dropped()
        );
        Ok(())
    }

    /// Topic set `id` registered with.
    pub fn topics(&self, id: &SubscriberId) -> HubResult<HashSet<String>> {
        let inner = self.inner.read();
        inner.ensure_running()?;
        inner.registry.topics(id)
    }

    /// Fans `payload` out to every subscriber of `topic` and returns how many
    /// queues accepted it.
    ///
    /// Publishing to a topic without subscribers succeeds with zero
    /// deliveries. A subscriber whose queue is full simply misses this
    /// payload; that is counted in [`Hub::stats`] and never reported as an
    /// error. The only error is [`HubError::HubClosed`].
    pub fn publish(&self, topic: &str, payload: impl Into<String>) -> HubResult<usize> {
        let inner = self.inner.read();
        inner.ensure_running()?;
        self.counters.published.fetch_add(1, Ordering::Relaxed);

        let Some(subscribers) = inner.index.subscribers(topic) else {
            trace!("Topic '{}' has no subscribers", topic);
            return Ok(0);
        };

        let msg = Message::new(topic, payload);
        let mut delivered = 0;
        let mut dropped = 0;

        for sub_id in subscribers {
            let Some(subscriber) = inner.registry.get(sub_id) else {
                continue;
            };
            match subscriber.try_enqueue(&msg) {
                Delivery::Enqueued => {
                    trace!("Delivered {} on '{}' to {}", msg.message_id, topic, sub_id);
                    delivered += 1;
                }
                Delivery::Full => {
                    trace!("Queue full for {}, dropping {}", sub_id, msg.message_id);
                    dropped += 1;
                }
                Delivery::Abandoned => {
                    warn!("{} no longer reads its queue, dropping {}", sub_id, msg.message_id);
                    dropped += 1;
                }
                Delivery::Closed => {}
            }
        }

        self.counters
            .delivered
            .fetch_add(delivered as u64, Ordering::Relaxed);
        self.counters.dropped.fetch_add(dropped, Ordering::Relaxed);
        Ok(delivered)
    }

    /// Closes every queue and empties both indexes. Every later call to
    /// subscribe, unsubscribe, topics or publish fails with
    /// [`HubError::HubClosed`]. Calling it again is a no-op.
    pub fn shutdown(&self) -> HubResult<()> {
        let mut inner = self.inner.write();
        if inner.state == HubState::Closed {
            return Ok(());
        }

        inner.state = HubState::ShuttingDown;
        let closed = inner.close_all();
        inner.state = HubState::Closed;

        info!("Hub shut down, closed {} subscriber queue(s)", closed);
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HubState {
        self.inner.read().state
    }

    /// Whether [`Hub::shutdown`] has completed.
    pub fn is_closed(&self) -> bool {
        self.state() == HubState::Closed
    }

    /// Capacity of every subscriber queue created by this hub.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.read().registry.len()
    }

    /// Number of topics with at least one subscriber.
    pub fn topic_count(&self) -> usize {
        self.inner.read().index.len()
    }

    /// Whether `id` is a live subscriber.
    pub fn is_subscribed(&self, id: &SubscriberId) -> bool {
        self.inner.read().registry.contains(id)
    }

    /// Subscribers currently listed under `topic`, sorted by identity.
    pub fn subscribers_of(&self, topic: &str) -> Vec<SubscriberId> {
        let inner = self.inner.read();
        let mut ids: Vec<SubscriberId> = inner
            .index
            .subscribers(topic)
            .map(|subscribers| subscribers.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Messages dropped so far for a live subscriber.
    pub fn dropped(&self, id: &SubscriberId) -> Option<u64> {
        self.inner.read().registry.get(id).map(Subscriber::dropped)
    }

    /// Snapshot of the hub-wide delivery counters.
    pub fn stats(&self) -> HubStats {
        HubStats {
            published: self.counters.published.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }

    /// Checks both directions of the registry/index relation.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let inner = self.inner.read();

        let index_backed = inner.index.iter().all(|(topic, ids)| {
            !ids.is_empty()
                && ids.iter().all(|id| {
                    inner
                        .registry
                        .get(id)
                        .is_some_and(|s| !s.is_closed() && s.topics.contains(topic))
                })
        });

        let registry_backed = inner.registry.iter().all(|subscriber| {
            subscriber
                .topics
                .iter()
                .all(|topic| inner.index.contains(topic, &subscriber.id))
        });

        index_backed && registry_backed
    }
}
