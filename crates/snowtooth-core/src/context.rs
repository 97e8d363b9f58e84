//! The explicit resort context shared by every request handler.
//!
//! [`ResortContext`] is constructed once at startup and passed by
//! [`Arc`](std::sync::Arc) into handlers. It owns both collections
//! behind a single [`RwLock`] and the notification bus. Queries take the
//! read lock; a status mutation takes the write lock for the field update
//! and the publish, so notifications leave in the same order mutations
//! are applied.

use snowtooth_types::{StatusChange, Topic};
use tokio::sync::RwLock;
use tracing::info;

use crate::bus::{NotificationBus, Subscription};
use crate::config::NotificationConfig;
use crate::dataset::Dataset;
use crate::error::ResortError;
use crate::store::Resort;

/// Shared state for queries, mutations, and subscriptions.
#[derive(Debug)]
pub struct ResortContext {
    pub(crate) resort: RwLock<Resort>,
    pub(crate) bus: NotificationBus<StatusChange>,
}

impl ResortContext {
    /// Wrap an already-built [`Resort`].
    pub fn new(resort: Resort, notifications: &NotificationConfig) -> Self {
        Self {
            resort: RwLock::new(resort),
            bus: NotificationBus::new(notifications.subscriber_capacity),
        }
    }

    /// Validate `dataset` and build a context from it.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::DuplicateId`] if either collection repeats
    /// an id.
    pub fn from_dataset(
        dataset: Dataset,
        notifications: &NotificationConfig,
    ) -> Result<Self, ResortError> {
        let resort = dataset.into_resort()?;
        info!(
            lifts = resort.lifts().len(),
            trails = resort.trails().len(),
            subscriber_capacity = ?notifications.subscriber_capacity,
            "resort context initialized"
        );
        Ok(Self::new(resort, notifications))
    }

    /// Open a live stream of status changes on `topic`.
    pub fn subscribe(&self, topic: Topic) -> Subscription<StatusChange> {
        self.bus.subscribe(topic)
    }

    /// Open a live stream of lift status changes (`liftStatusChange`).
    pub fn subscribe_lift_changes(&self) -> Subscription<StatusChange> {
        self.subscribe(Topic::LiftStatusChange)
    }

    /// Open a live stream of trail status changes (`trailStatusChange`).
    pub fn subscribe_trail_changes(&self) -> Subscription<StatusChange> {
        self.subscribe(Topic::TrailStatusChange)
    }

    /// Number of open subscriber streams on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.bus.subscriber_count(topic)
    }
}
