//! In-memory entity collections.
//!
//! An [`EntityStore`] keeps its entities in insertion order and indexes
//! them by id. [`Resort`] bundles the lift and trail stores; it is the
//! value guarded by the context's lock. Only the mutation service gets
//! mutable access, and only to the `status` field.

use std::collections::BTreeMap;

use snowtooth_types::{Entity, Lift, Status, Trail};

use crate::error::ResortError;

/// One ordered collection of entities, indexed by id.
#[derive(Debug, Clone)]
pub struct EntityStore<E> {
    entries: Vec<E>,
    index: BTreeMap<String, usize>,
}

impl<E: Entity> EntityStore<E> {
    /// Build a store from entities in their stored order.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::DuplicateId`] if two entities share an id.
    pub fn new(entries: Vec<E>) -> Result<Self, ResortError> {
        let mut index = BTreeMap::new();
        for (position, entity) in entries.iter().enumerate() {
            if index.insert(entity.id().to_owned(), position).is_some() {
                return Err(ResortError::DuplicateId {
                    collection: E::COLLECTION,
                    id: entity.id().to_owned(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Every entity, in insertion order.
    pub fn all(&self) -> &[E] {
        &self.entries
    }

    /// Look up an entity by id.
    pub fn get(&self, id: &str) -> Option<&E> {
        self.index
            .get(id)
            .and_then(|&position| self.entries.get(position))
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut E> {
        let position = *self.index.get(id)?;
        self.entries.get_mut(position)
    }

    /// Entities whose status equals `status`, in insertion order.
    pub fn filter_by_status(&self, status: Status) -> impl Iterator<Item = &E> {
        self.entries
            .iter()
            .filter(move |entity| entity.status() == status)
    }

    /// Entities matching an optional status filter. `None` returns all.
    pub fn select(&self, status: Option<Status>) -> Vec<E> {
        match status {
            Some(status) => self.filter_by_status(status).cloned().collect(),
            None => self.entries.clone(),
        }
    }

    /// Number of entities matching an optional status filter.
    pub fn count(&self, status: Option<Status>) -> usize {
        status.map_or(self.entries.len(), |status| {
            self.filter_by_status(status).count()
        })
    }

    /// Number of entities in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

/// Both entity collections of the resort.
#[derive(Debug, Clone, Default)]
pub struct Resort {
    lifts: EntityStore<Lift>,
    trails: EntityStore<Trail>,
}

impl Resort {
    /// Bundle two already-validated stores.
    pub const fn new(lifts: EntityStore<Lift>, trails: EntityStore<Trail>) -> Self {
        Self { lifts, trails }
    }

    /// The lift collection.
    pub const fn lifts(&self) -> &EntityStore<Lift> {
        &self.lifts
    }

    /// The trail collection.
    pub const fn trails(&self) -> &EntityStore<Trail> {
        &self.trails
    }

    pub(crate) const fn lifts_mut(&mut self) -> &mut EntityStore<Lift> {
        &mut self.lifts
    }

    pub(crate) const fn trails_mut(&mut self) -> &mut EntityStore<Trail> {
        &mut self.trails
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use snowtooth_types::{LiftId, TrailId};

    use super::*;

    pub(crate) fn lift(id: &str, status: Status, trails: &[&str]) -> Lift {
        Lift {
            id: LiftId::new(id),
            name: id.to_uppercase(),
            status,
            capacity: 4,
            night: None,
            elevation: 7000,
            trails: trails.iter().map(|t| TrailId::new(*t)).collect(),
        }
    }

    pub(crate) fn trail(id: &str, status: Status, lifts: &[&str]) -> Trail {
        Trail {
            id: TrailId::new(id),
            name: id.to_uppercase(),
            status,
            capacity: 50,
            night: Some(false),
            elevation: 6500,
            lifts: lifts.iter().map(|l| LiftId::new(*l)).collect(),
        }
    }

    fn sample_lifts() -> EntityStore<Lift> {
        EntityStore::new(vec![
            lift("astra-express", Status::Open, &[]),
            lift("jazz-cat", Status::Closed, &[]),
            lift("panorama", Status::Open, &[]),
            lift("summit", Status::Hold, &[]),
        ])
        .unwrap()
    }

    #[test]
    fn get_returns_every_stored_entity() {
        let store = sample_lifts();
        assert_eq!(store.len(), 4);
        for entity in store.all() {
            assert_eq!(store.get(entity.id()), Some(entity));
        }
        assert!(store.get("gondola").is_none());
    }

    #[test]
    fn filter_preserves_insertion_order() {
        let store = sample_lifts();
        let open: Vec<&str> = store
            .filter_by_status(Status::Open)
            .map(Entity::id)
            .collect();
        assert_eq!(open, ["astra-express", "panorama"]);

        for status in Status::ALL {
            let expected: Vec<&Lift> = store.all().iter().filter(|l| l.status == status).collect();
            let actual: Vec<&Lift> = store.filter_by_status(status).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn select_without_filter_returns_everything() {
        let store = sample_lifts();
        assert_eq!(store.select(None).len(), 4);
        assert_eq!(store.select(Some(Status::Hold)).len(), 1);
        assert_eq!(store.count(Some(Status::Open)), 2);
        assert_eq!(store.count(None), 4);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = EntityStore::new(vec![
            lift("summit", Status::Open, &[]),
            lift("summit", Status::Closed, &[]),
        ]);
        assert!(matches!(
            result,
            Err(ResortError::DuplicateId { ref id, .. }) if id == "summit"
        ));
    }
}
