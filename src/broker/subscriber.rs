use std::collections::HashSet;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::broker::message::Message;
use crate::broker::topic::SubscriberId;
use crate::utils::error::TryRecvError;

/// Outcome of a single non-blocking enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The message was placed in the queue.
    Enqueued,
    /// The queue was at capacity; the message was dropped.
    Full,
    /// The consumer dropped its [`Subscription`]; the message was dropped.
    Abandoned,
    /// The queue was already closed. The hub never enqueues in this state.
    Closed,
}

/// One registered consumer: its identity, its topic set and the sending half
/// of its bounded delivery queue.
///
/// The queue is owned by this record. Dropping the sender (see
/// [`Subscriber::close`]) is what the consumer observes as end-of-stream once
/// it has drained whatever was already buffered.
#[derive(Debug)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub topics: HashSet<String>,
    sender: Option<mpsc::Sender<Message>>,
    dropped: AtomicU64,
}

impl Subscriber {
    /// Creates a subscriber with a fresh queue of `capacity` slots and returns
    /// it together with the consumer's handle on that queue.
    pub fn new(id: SubscriberId, topics: HashSet<String>, capacity: usize) -> (Self, Subscription) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let subscriber = Self {
            id: id.clone(),
            topics,
            sender: Some(sender),
            dropped: AtomicU64::new(0),
        };
        (subscriber, Subscription { id, receiver })
    }

    /// Attempts to enqueue without waiting. A full or abandoned queue drops
    /// the message and bumps this subscriber's drop counter.
    pub fn try_enqueue(&self, msg: &Message) -> Delivery {
        let Some(sender) = self.sender.as_ref() else {
            return Delivery::Closed;
        };
        match sender.try_send(msg.clone()) {
            Ok(()) => Delivery::Enqueued,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Delivery::Full
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Delivery::Abandoned
            }
        }
    }

    /// Closes the queue. Already buffered messages stay readable.
    pub fn close(&mut self) {
        self.sender.take();
    }

    /// Whether [`Subscriber::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.sender.is_none()
    }

    /// Number of messages dropped for this subscriber so far.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// The consumer's read-only handle on a subscriber's delivery queue.
///
/// Messages come out in the order they were enqueued. Once the subscriber is
/// unsubscribed or the hub shuts down, the remaining buffered messages are
/// still returned, followed by end-of-stream (`None`).
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<Message>,
}

impl Subscription {
    /// Identity this queue was registered under.
    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    /// Waits for the next message. Returns `None` once the queue is closed
    /// and drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    /// Blocking variant of [`Subscription::recv`] for threads outside the
    /// async runtime. Panics if called from within an async context.
    pub fn blocking_recv(&mut self) -> Option<Message> {
        self.receiver.blocking_recv()
    }

    /// Takes the next message if one is already queued.
    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.receiver.try_recv().map_err(Into::into)
    }

    /// Number of messages currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no message is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        self.receiver.poll_recv(cx)
    }
}
