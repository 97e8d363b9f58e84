//! Shared type definitions for the Snowtooth resort service.
//!
//! This crate is the single source of truth for the types that flow
//! between the core, the API layer, and clients. Types defined here are
//! exported to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for lift and trail identifiers
//! - [`enums`] -- Status, collection, and topic enumerations
//! - [`structs`] -- The `Lift` and `Trail` entities and the change payload

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Collection, ParseEnumError, Status, Topic};
pub use ids::{LiftId, TrailId};
pub use structs::{Entity, Lift, StatusChange, Trail};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::LiftId::export_all();
        let _ = crate::ids::TrailId::export_all();

        // Enums
        let _ = crate::enums::Status::export_all();
        let _ = crate::enums::Collection::export_all();
        let _ = crate::enums::Topic::export_all();

        // Structs
        let _ = crate::structs::Lift::export_all();
        let _ = crate::structs::Trail::export_all();
        let _ = crate::structs::StatusChange::export_all();
    }
}
