//! Cross-reference resolution between the two collections.
//!
//! A lift carries the ids of the trails it serves and a trail carries the
//! ids of the lifts that reach it. Resolution keeps the order of the id
//! list and skips ids that do not exist in the target collection, so a
//! stale reference never fails a read.

use snowtooth_types::{Entity, Lift, Trail};
use tracing::{debug, warn};

use crate::store::{EntityStore, Resort};

/// Resolve the trails reachable from `lift` (its `trailAccess` field).
pub fn trail_access(lift: &Lift, trails: &EntityStore<Trail>) -> Vec<Trail> {
    resolve(lift, &lift.trails, trails)
}

/// Resolve the lifts that serve `trail` (its `liftAccess` field).
pub fn lift_access(trail: &Trail, lifts: &EntityStore<Lift>) -> Vec<Lift> {
    resolve(trail, &trail.lifts, lifts)
}

fn resolve<S, I, T>(source: &S, ids: &[I], target: &EntityStore<T>) -> Vec<T>
where
    S: Entity,
    I: AsRef<str>,
    T: Entity,
{
    ids.iter()
        .filter_map(|id| {
            let id: &str = id.as_ref();
            let found = target.get(id).cloned();
            if found.is_none() {
                debug!(
                    source = S::COLLECTION.entity_name(),
                    source_id = source.id(),
                    missing = id,
                    "skipping dangling cross-reference"
                );
            }
            found
        })
        .collect()
}

/// A reference from one entity to an id missing from the other collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Display form of the referring entity, e.g. `lift panorama`.
    pub source: String,
    /// The id that could not be resolved.
    pub missing: String,
}

/// Report every cross-reference in `resort` that points at an unknown id.
///
/// Used at load time for diagnostics; dangling references are tolerated.
pub fn dangling_references(resort: &Resort) -> Vec<DanglingReference> {
    let from_lifts = resort.lifts().all().iter().flat_map(|lift| {
        lift.trails
            .iter()
            .filter(|id| resort.trails().get(id.as_str()).is_none())
            .map(move |id| DanglingReference {
                source: format!("lift {}", lift.id),
                missing: id.to_string(),
            })
    });
    let from_trails = resort.trails().all().iter().flat_map(|trail| {
        trail
            .lifts
            .iter()
            .filter(|id| resort.lifts().get(id.as_str()).is_none())
            .map(move |id| DanglingReference {
                source: format!("trail {}", trail.id),
                missing: id.to_string(),
            })
    });

    let dangling: Vec<DanglingReference> = from_lifts.chain(from_trails).collect();
    for reference in &dangling {
        warn!(
            source = %reference.source,
            missing = %reference.missing,
            "dataset contains a dangling cross-reference"
        );
    }
    dangling
}
