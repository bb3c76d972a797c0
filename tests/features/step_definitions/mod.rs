//! Step definitions for Cucumber scenarios

pub mod catalog_steps;
