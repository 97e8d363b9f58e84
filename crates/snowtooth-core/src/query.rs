//! Read-only queries over the resort.
//!
//! Every query takes the context's read lock for the duration of one
//! call, so each answer is a consistent point-in-time view. Lookups by
//! unknown id return `None` instead of failing. Cross-referenced fields
//! are resolved only by the dedicated `*_access` queries, never during a
//! list read.

use snowtooth_types::{Collection, Lift, Status, Trail};

use crate::context::ResortContext;
use crate::resolver;

/// Per-status counts for both collections, taken from one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Lift counts in [`Status::ALL`] order.
    pub lifts: [usize; 3],
    /// Trail counts in [`Status::ALL`] order.
    pub trails: [usize; 3],
}

impl StatusCounts {
    /// Every `(collection, status, count)` triple, lifts first.
    pub fn iter(&self) -> impl Iterator<Item = (Collection, Status, usize)> {
        let lifts = Status::ALL
            .into_iter()
            .zip(self.lifts)
            .map(|(status, n)| (Collection::Lifts, status, n));
        let trails = Status::ALL
            .into_iter()
            .zip(self.trails)
            .map(|(status, n)| (Collection::Trails, status, n));
        lifts.chain(trails)
    }
}

impl ResortContext {
    /// `allLifts(status?)`: every lift, or those matching `status`, in
    /// dataset order.
    pub async fn all_lifts(&self, status: Option<Status>) -> Vec<Lift> {
        self.resort.read().await.lifts().select(status)
    }

    /// `allTrails(status?)`: every trail, or those matching `status`, in
    /// dataset order.
    pub async fn all_trails(&self, status: Option<Status>) -> Vec<Trail> {
        self.resort.read().await.trails().select(status)
    }

    /// `lift(id)`: the lift with this id, if any.
    pub async fn lift(&self, id: &str) -> Option<Lift> {
        self.resort.read().await.lifts().get(id).cloned()
    }

    /// `trail(id)`: the trail with this id, if any.
    pub async fn trail(&self, id: &str) -> Option<Trail> {
        self.resort.read().await.trails().get(id).cloned()
    }

    /// `liftCount(status?)`.
    pub async fn lift_count(&self, status: Option<Status>) -> usize {
        self.resort.read().await.lifts().count(status)
    }

    /// `trailCount(status?)`.
    pub async fn trail_count(&self, status: Option<Status>) -> usize {
        self.resort.read().await.trails().count(status)
    }

    /// Count every status in both collections under one read lock.
    pub async fn status_counts(&self) -> StatusCounts {
        let resort = self.resort.read().await;
        StatusCounts {
            lifts: Status::ALL.map(|status| resort.lifts().count(Some(status))),
            trails: Status::ALL.map(|status| resort.trails().count(Some(status))),
        }
    }

    /// Resolve `lift.trailAccess` against the current trail collection.
    pub async fn trail_access(&self, lift: &Lift) -> Vec<Trail> {
        resolver::trail_access(lift, self.resort.read().await.trails())
    }

    /// Resolve `trail.liftAccess` against the current lift collection.
    pub async fn lift_access(&self, trail: &Trail) -> Vec<Lift> {
        resolver::lift_access(trail, self.resort.read().await.lifts())
    }

    /// Look up a lift and resolve its trails under one read lock.
    pub async fn lift_with_trail_access(&self, id: &str) -> Option<(Lift, Vec<Trail>)> {
        let resort = self.resort.read().await;
        let lift = resort.lifts().get(id)?;
        let trails = resolver::trail_access(lift, resort.trails());
        Some((lift.clone(), trails))
    }

    /// Look up a trail and resolve its lifts under one read lock.
    pub async fn trail_with_lift_access(&self, id: &str) -> Option<(Trail, Vec<Lift>)> {
        let resort = self.resort.read().await;
        let trail = resort.trails().get(id)?;
        let lifts = resolver::lift_access(trail, resort.lifts());
        Some((trail.clone(), lifts))
    }
}
