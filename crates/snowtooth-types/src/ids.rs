//! Type-safe identifier wrappers around [`String`].
//!
//! Lift and trail identifiers are human-readable slugs taken from the
//! initial dataset (e.g. `"panorama"`). Each collection has its own
//! newtype so a trail id can never be looked up in the lift collection
//! by accident.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a lift within the lift collection.
    LiftId
}

define_id! {
    /// Unique identifier for a trail within the trail collection.
    TrailId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_serializes_as_bare_string() {
        let id = LiftId::new("panorama");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"panorama\""));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = TrailId::from("blue-bird");
        assert_eq!(id.to_string(), "blue-bird");
        assert_eq!(id.as_str(), "blue-bird");
    }
}
