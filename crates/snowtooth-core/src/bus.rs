//! In-process publish/subscribe for status change notifications.
//!
//! # Architecture
//!
//! The bus keeps a registry of open subscriber streams per [`Topic`].
//! Every [`Subscription`] owns the receiving half of its own mpsc queue;
//! the registry holds the sending half. [`NotificationBus::publish`]
//! walks the topic's set synchronously and enqueues a clone of the
//! payload for each subscriber without awaiting, so a publisher is never
//! delayed by a slow listener.
//!
//! Delivery is best-effort and at-most-once. There is no replay: a
//! subscriber registered after a publish never sees that payload. Order
//! on one topic is FIFO per subscriber.
//!
//! Dropping a [`Subscription`] removes it from the registry. Queues are
//! unbounded by default; with a `subscriber_capacity` configured, a
//! subscriber whose queue is full at publish time is disconnected and its
//! stream ends after draining what it already holds.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

use futures::Stream;
use snowtooth_types::Topic;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifier of one open subscriber stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum Outbox<P> {
    Unbounded(mpsc::UnboundedSender<P>),
    Bounded(mpsc::Sender<P>),
}

enum Inbox<P> {
    Unbounded(mpsc::UnboundedReceiver<P>),
    Bounded(mpsc::Receiver<P>),
}

enum Delivery {
    Delivered,
    Closed,
    Full,
}

impl<P> Outbox<P> {
    fn deliver(&self, payload: P) -> Delivery {
        match self {
            Self::Unbounded(tx) => match tx.send(payload) {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Closed,
            },
            Self::Bounded(tx) => match tx.try_send(payload) {
                Ok(()) => Delivery::Delivered,
                Err(TrySendError::Full(_)) => Delivery::Full,
                Err(TrySendError::Closed(_)) => Delivery::Closed,
            },
        }
    }
}

struct Slot<P> {
    id: SubscriberId,
    outbox: Outbox<P>,
}

type Registry<P> = Mutex<HashMap<Topic, Vec<Slot<P>>>>;

fn lock<P>(registry: &Registry<P>) -> MutexGuard<'_, HashMap<Topic, Vec<Slot<P>>>> {
    // A panic while holding the lock cannot leave a slot half-written.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Topic-scoped fan-out of payloads to live subscriber streams.
pub struct NotificationBus<P> {
    registry: Arc<Registry<P>>,
    subscriber_capacity: Option<usize>,
}

impl<P> Clone for NotificationBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            subscriber_capacity: self.subscriber_capacity,
        }
    }
}

impl<P> core::fmt::Debug for NotificationBus<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscriber_capacity", &self.subscriber_capacity)
            .finish_non_exhaustive()
    }
}

impl<P: Clone> NotificationBus<P> {
    /// Create a bus.
    ///
    /// `None` gives every subscriber an unbounded queue. `Some(n)` bounds
    /// each queue at `n` payloads (minimum 1) and disconnects subscribers
    /// that fall that far behind.
    pub fn new(subscriber_capacity: Option<usize>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
            subscriber_capacity: subscriber_capacity.map(|n| n.max(1)),
        }
    }

    /// Create a bus with unbounded subscriber queues.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Deliver `payload` to every subscriber currently registered on `topic`.
    ///
    /// Returns the number of subscribers the payload was enqueued for.
    /// Returns 0 when nobody is listening (this is not an error).
    pub fn publish(&self, topic: Topic, payload: &P) -> usize {
        let mut registry = lock(&*self.registry);
        let Some(slots) = registry.get_mut(&topic) else {
            debug!(%topic, delivered = 0, "published with no subscribers");
            return 0;
        };

        slots.retain(|slot| match slot.outbox.deliver(payload.clone()) {
            Delivery::Delivered => true,
            Delivery::Closed => {
                debug!(%topic, subscriber = %slot.id, "pruning closed subscriber");
                false
            }
            Delivery::Full => {
                warn!(%topic, subscriber = %slot.id, "subscriber queue full, disconnecting");
                false
            }
        });

        let delivered = slots.len();
        if slots.is_empty() {
            registry.remove(&topic);
        }
        debug!(%topic, delivered, "published");
        delivered
    }

    /// Open a new independent stream of payloads published on `topic`.
    ///
    /// The stream only sees payloads published after this call returns.
    pub fn subscribe(&self, topic: Topic) -> Subscription<P> {
        let id = SubscriberId::new();
        let (outbox, inbox) = match self.subscriber_capacity {
            Some(capacity) => {
                let (tx, rx) = mpsc::channel(capacity);
                (Outbox::Bounded(tx), Inbox::Bounded(rx))
            }
            None => {
                let (tx, rx) = mpsc::unbounded_channel();
                (Outbox::Unbounded(tx), Inbox::Unbounded(rx))
            }
        };

        lock(&*self.registry)
            .entry(topic)
            .or_default()
            .push(Slot { id, outbox });
        debug!(%topic, subscriber = %id, "subscriber registered");

        Subscription {
            id,
            topic,
            inbox,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Number of open streams on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        lock(&*self.registry).get(&topic).map_or(0, Vec::len)
    }
}

/// One open stream of payloads from a [`NotificationBus`].
///
/// Implements [`Stream`]; the stream suspends between payloads and ends
/// only if the bus is dropped or disconnects this subscriber. Dropping
/// the subscription deregisters it.
pub struct Subscription<P> {
    id: SubscriberId,
    topic: Topic,
    inbox: Inbox<P>,
    registry: Weak<Registry<P>>,
}

impl<P> Subscription<P> {
    /// This stream's identifier.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// The topic this stream listens on.
    pub const fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next payload. `None` means the stream has ended.
    pub async fn recv(&mut self) -> Option<P> {
        match &mut self.inbox {
            Inbox::Unbounded(rx) => rx.recv().await,
            Inbox::Bounded(rx) => rx.recv().await,
        }
    }

    /// Take the next payload if one is already queued.
    pub fn try_next(&mut self) -> Option<P> {
        match &mut self.inbox {
            Inbox::Unbounded(rx) => rx.try_recv().ok(),
            Inbox::Bounded(rx) => rx.try_recv().ok(),
        }
    }
}

// No field is structurally pinned.
impl<P> Unpin for Subscription<P> {}

impl<P> Stream for Subscription<P> {
    type Item = P;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<P>> {
        match &mut self.get_mut().inbox {
            Inbox::Unbounded(rx) => rx.poll_recv(cx),
            Inbox::Bounded(rx) => rx.poll_recv(cx),
        }
    }
}

impl<P> Drop for Subscription<P> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = lock(&*registry);
        if let Some(slots) = registry.get_mut(&self.topic) {
            slots.retain(|slot| slot.id != self.id);
            if slots.is_empty() {
                registry.remove(&self.topic);
            }
        }
        debug!(topic = %self.topic, subscriber = %self.id, "subscriber deregistered");
    }
}

impl<P> core::fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}
