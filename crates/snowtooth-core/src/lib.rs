//! Core of the Snowtooth lift and trail status service.
//!
//! This crate owns the status-update-and-notify pathway: a mutation
//! changes one entity's status and fans the updated entity out to every
//! live subscriber, while queries give consistent point-in-time reads of
//! both collections, including cross-referenced lookups.
//!
//! # Modules
//!
//! - [`store`] -- Ordered in-memory collections indexed by id.
//! - [`resolver`] -- Lift/trail cross-reference resolution.
//! - [`bus`] -- Topic-scoped publish/subscribe with per-subscriber queues.
//! - [`mutation`] -- `setLiftStatus` / `setTrailStatus`.
//! - [`query`] -- `allLifts`, `lift`, `allTrails`, `trail`, counts, and
//!   cross-reference reads.
//! - [`context`] -- [`ResortContext`], the single shared state object.
//! - [`dataset`] -- Initial dataset loading from JSON.
//! - [`config`] -- Configuration loading from `snowtooth-config.yaml`.
//!
//! [`ResortContext`]: context::ResortContext

pub mod bus;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod mutation;
pub mod query;
pub mod resolver;
pub mod store;

pub use bus::{NotificationBus, SubscriberId, Subscription};
pub use config::{ConfigError, SnowtoothConfig};
pub use context::ResortContext;
pub use dataset::Dataset;
pub use error::ResortError;
pub use mutation::parse_status;
pub use query::StatusCounts;
pub use store::{EntityStore, Resort};
