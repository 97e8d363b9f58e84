//! Entity structs for the Snowtooth resort.
//!
//! Lifts and trails share one shape: identity, display name, status,
//! capacity, an optional night-operation flag, elevation, and a list of
//! ids pointing into the *other* collection. The id list is a lookup-only
//! relation; neither collection owns entries of the other.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Collection, Status, Topic};
use crate::ids::{LiftId, TrailId};

// ---------------------------------------------------------------------------
// Entity trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every record held in an entity collection.
pub trait Entity: Clone {
    /// The collection this entity type lives in.
    const COLLECTION: Collection;

    /// The entity's identifier as a string slice.
    fn id(&self) -> &str;

    /// The entity's current status.
    fn status(&self) -> Status;

    /// Overwrite the entity's status. Only the mutation service calls this.
    fn set_status(&mut self, status: Status);
}

// ---------------------------------------------------------------------------
// Lift
// ---------------------------------------------------------------------------

/// A chairlift, gondola, or rope tow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "bindings/")]
pub struct Lift {
    /// Unique lift identifier.
    pub id: LiftId,
    /// Display name.
    pub name: String,
    /// Current operating status.
    pub status: Status,
    /// Riders per chair or cabin.
    pub capacity: u32,
    /// Whether the lift runs for night skiing, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub night: Option<bool>,
    /// Top-station elevation in feet.
    pub elevation: u32,
    /// Trails reachable from this lift.
    #[serde(default)]
    pub trails: Vec<TrailId>,
}

impl Entity for Lift {
    const COLLECTION: Collection = Collection::Lifts;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

// ---------------------------------------------------------------------------
// Trail
// ---------------------------------------------------------------------------

/// A groomed run or glade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "bindings/")]
pub struct Trail {
    /// Unique trail identifier.
    pub id: TrailId,
    /// Display name.
    pub name: String,
    /// Current operating status.
    pub status: Status,
    /// Skiers the trail comfortably holds at once.
    pub capacity: u32,
    /// Whether the trail is lit for night skiing, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub night: Option<bool>,
    /// Trailhead elevation in feet.
    pub elevation: u32,
    /// Lifts that serve this trail.
    #[serde(default)]
    pub lifts: Vec<LiftId>,
}

impl Entity for Trail {
    const COLLECTION: Collection = Collection::Trails;

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn status(&self) -> Status {
        self.status
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

// ---------------------------------------------------------------------------
// StatusChange
// ---------------------------------------------------------------------------

/// Payload published on the notification bus after a status mutation.
///
/// Carries the full updated entity. Serializes as the bare entity so
/// subscribers see `{ "id": ..., "status": ..., ... }`. Outbound only;
/// the bare shape does not say which collection it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum StatusChange {
    /// A lift changed status.
    Lift(Lift),
    /// A trail changed status.
    Trail(Trail),
}

impl StatusChange {
    /// The topic this change is published on.
    pub const fn topic(&self) -> Topic {
        match self {
            Self::Lift(_) => Topic::LiftStatusChange,
            Self::Trail(_) => Topic::TrailStatusChange,
        }
    }

    /// The status carried by the updated entity.
    pub const fn status(&self) -> Status {
        match self {
            Self::Lift(lift) => lift.status,
            Self::Trail(trail) => trail.status,
        }
    }

    /// The identifier of the updated entity.
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Lift(lift) => lift.id.as_str(),
            Self::Trail(trail) => trail.id.as_str(),
        }
    }
}

impl From<Lift> for StatusChange {
    fn from(lift: Lift) -> Self {
        Self::Lift(lift)
    }
}

impl From<Trail> for StatusChange {
    fn from(trail: Trail) -> Self {
        Self::Trail(trail)
    }
}
