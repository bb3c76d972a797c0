//! Event data model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::Displayable;
use crate::utils::error::{TypesError, TypesResult};
use crate::utils::time::parse_timestamp;

/// An event as returned by `/pdb/query/v4/events`
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub certname: String,
    pub status: String,
    pub timestamp: String,
    /// Hash of the report the event belongs to
    pub report: String,
    pub resource_title: String,
    pub resource_type: String,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_value: Option<serde_json::Value>,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
}

/// The resource an event applied to
#[derive(Debug, Clone, PartialEq)]
pub struct EventItem {
    pub title: String,
    pub type_: String,
    pub property: Option<String>,
    pub message: Option<String>,
    pub old: Option<serde_json::Value>,
    pub new: Option<serde_json::Value>,
}

/// One resource-level outcome within a report
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub node: String,
    /// `success`, `failure`, `noop` or `skipped`
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Hash of the owning report
    pub hash_: String,
    pub item: EventItem,
}

impl Event {
    pub fn failed(&self) -> bool {
        self.status == "failure"
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = TypesError;

    fn try_from(record: EventRecord) -> TypesResult<Self> {
        let timestamp = parse_timestamp("timestamp", &record.timestamp)?;

        Ok(Self {
            node: record.certname,
            status: record.status,
            timestamp,
            hash_: record.report,
            item: EventItem {
                title: record.resource_title,
                type_: record.resource_type,
                property: record.property,
                message: record.message,
                old: record.old_value,
                new: record.new_value,
            },
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]/{}", self.item.type_, self.item.title, self.hash_)
    }
}

impl Displayable for Event {
    fn repr(&self) -> String {
        format!("Event: {}", self)
    }
}

/// Per-node event totals from `/pdb/query/v4/event-counts`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventCounts {
    pub successes: u64,
    pub failures: u64,
    pub noops: u64,
    pub skips: u64,
}
