//! Services derived from PuppetDB data

pub mod node_status;

pub use node_status::{NodeStatusResolver, StatusResolution};
