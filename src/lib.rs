//! OpenVox PuppetDB types
//!
//! Immutable value types for the entities a PuppetDB inventory service
//! returns: nodes, facts, resources, reports, events, catalogs and catalog
//! edges. Each type is built from an already-decoded PuppetDB record, parses
//! its timestamps once, and exposes a short and a tagged display form.

pub mod config;
pub mod models;
pub mod query;
pub mod services;
pub mod utils;

pub use config::InspectConfig;
pub use models::{
    Catalog, Deactivation, Displayable, Edge, Event, EventCounts, EventItem, Fact, Node,
    NodeStatus, Report, Resource,
};
pub use query::{Query, QueryBuilder};
pub use utils::{decode_records, json_to_datetime, TypesError, TypesResult};
