//! Status mutations.
//!
//! The only runtime write in the system: change one entity's status,
//! then publish the updated entity on the collection's topic. Unknown
//! ids fail with [`ResortError::NotFound`] and leave the store untouched.
//! Publishing happens before the call returns, so a caller holding the
//! updated entity knows the event has already been handed to the bus.
//! Repeating a mutation with the same status is a state no-op but still
//! publishes.

use snowtooth_types::{Collection, Entity, Lift, Status, StatusChange, Trail};
use tracing::{info, warn};

use crate::context::ResortContext;
use crate::error::ResortError;
use crate::store::EntityStore;

/// Parse a boundary-layer status string.
///
/// # Errors
///
/// Returns [`ResortError::InvalidStatus`] unless `raw` is exactly
/// `OPEN`, `HOLD`, or `CLOSED`.
pub fn parse_status(raw: &str) -> Result<Status, ResortError> {
    raw.parse::<Status>()
        .map_err(|err| ResortError::InvalidStatus(err.value))
}

impl ResortContext {
    /// `setLiftStatus`: set a lift's status and notify lift subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::NotFound`] if no lift has this id.
    pub async fn set_lift_status(&self, id: &str, status: Status) -> Result<Lift, ResortError> {
        let mut resort = self.resort.write().await;
        let lift = apply_status(resort.lifts_mut(), id, status)?;
        self.publish(StatusChange::Lift(lift.clone()));
        Ok(lift)
    }

    /// `setTrailStatus`: set a trail's status and notify trail subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::NotFound`] if no trail has this id.
    pub async fn set_trail_status(&self, id: &str, status: Status) -> Result<Trail, ResortError> {
        let mut resort = self.resort.write().await;
        let trail = apply_status(resort.trails_mut(), id, status)?;
        self.publish(StatusChange::Trail(trail.clone()));
        Ok(trail)
    }

    /// Collection-generic form of the two mutations above.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::NotFound`] if the id is unknown in `collection`.
    pub async fn set_status(
        &self,
        collection: Collection,
        id: &str,
        status: Status,
    ) -> Result<StatusChange, ResortError> {
        match collection {
            Collection::Lifts => self.set_lift_status(id, status).await.map(StatusChange::Lift),
            Collection::Trails => self
                .set_trail_status(id, status)
                .await
                .map(StatusChange::Trail),
        }
    }

    fn publish(&self, change: StatusChange) {
        let topic = change.topic();
        let delivered = self.bus.publish(topic, &change);
        info!(
            %topic,
            id = change.entity_id(),
            status = %change.status(),
            delivered,
            "status change published"
        );
    }
}

fn apply_status<E: Entity>(
    store: &mut EntityStore<E>,
    id: &str,
    status: Status,
) -> Result<E, ResortError> {
    let collection = E::COLLECTION;
    let Some(entity) = store.get_mut(id) else {
        warn!(%collection, id, "status update for unknown id");
        return Err(ResortError::not_found(collection, id));
    };

    let previous = entity.status();
    entity.set_status(status);
    info!(
        %collection,
        id,
        from = %previous,
        to = %status,
        "status updated"
    );
    Ok(entity.clone())
}
