//! Enumeration types for the Snowtooth resort.
//!
//! [`Status`] is the only mutable property of a lift or trail.
//! [`Collection`] names one of the two entity collections and [`Topic`]
//! names the notification channel each collection publishes on.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed (e.g. `"status"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Operating status shared by lifts and trails.
///
/// Serialized as `OPEN`, `HOLD`, or `CLOSED`. No other value can be
/// represented, so an entity can never hold an out-of-domain status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Status {
    /// Running and accepting skiers.
    Open,
    /// Temporarily stopped (wind, maintenance, grooming).
    Hold,
    /// Not operating.
    Closed,
}

impl Status {
    /// Every status in declaration order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Hold, Self::Closed];

    /// The wire spelling of this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Hold => "HOLD",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    /// Parse the exact wire spelling. Lowercase input is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "HOLD" => Ok(Self::Hold),
            "CLOSED" => Ok(Self::Closed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// One of the two entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Collection {
    /// The lift collection.
    Lifts,
    /// The trail collection.
    Trails,
}

impl Collection {
    /// Singular noun used in log fields and error messages.
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::Lifts => "lift",
            Self::Trails => "trail",
        }
    }

    /// The notification topic status changes in this collection publish on.
    pub const fn topic(self) -> Topic {
        match self {
            Self::Lifts => Topic::LiftStatusChange,
            Self::Trails => Topic::TrailStatusChange,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_name())
    }
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// A named notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum Topic {
    /// `lift-status-change`: one event per successful lift status mutation.
    LiftStatusChange,
    /// `trail-status-change`: one event per successful trail status mutation.
    TrailStatusChange,
}

impl Topic {
    /// Every topic in declaration order.
    pub const ALL: [Self; 2] = [Self::LiftStatusChange, Self::TrailStatusChange];

    /// The wire name of this topic.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiftStatusChange => "lift-status-change",
            Self::TrailStatusChange => "trail-status-change",
        }
    }

    /// The collection whose mutations publish on this topic.
    pub const fn collection(self) -> Collection {
        match self {
            Self::LiftStatusChange => Collection::Lifts,
            Self::TrailStatusChange => Collection::Trails,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "topic",
                value: s.to_owned(),
            })
    }
}
