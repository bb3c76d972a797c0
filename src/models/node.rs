//! Node data model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Displayable, EventCounts};
use crate::services::node_status::NodeStatusResolver;
use crate::utils::error::TypesResult;
use crate::utils::time::parse_optional_timestamp;

/// Whether a node has been deactivated, resolved once at construction.
///
/// PuppetDB reports `deactivated: null` for live nodes. That null becomes
/// `Active` here so callers branch on `is_deactivated()` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deactivation {
    #[default]
    Active,
    Since(DateTime<Utc>),
}

impl Deactivation {
    pub fn is_deactivated(&self) -> bool {
        matches!(self, Deactivation::Since(_))
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Deactivation::Active => None,
            Deactivation::Since(ts) => Some(*ts),
        }
    }
}

impl From<Option<DateTime<Utc>>> for Deactivation {
    fn from(ts: Option<DateTime<Utc>>) -> Self {
        ts.map_or(Deactivation::Active, Deactivation::Since)
    }
}

/// Status of a node
///
/// PuppetDB does not constrain the value, so unknown strings are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    Changed,
    Unchanged,
    Failed,
    Noop,
    Unreported,
    Other(String),
}

impl NodeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            NodeStatus::Changed => "changed",
            NodeStatus::Unchanged => "unchanged",
            NodeStatus::Failed => "failed",
            NodeStatus::Noop => "noop",
            NodeStatus::Unreported => "unreported",
            NodeStatus::Other(s) => s,
        }
    }
}

impl From<&str> for NodeStatus {
    fn from(s: &str) -> Self {
        match s {
            "changed" => NodeStatus::Changed,
            "unchanged" => NodeStatus::Unchanged,
            "failed" => NodeStatus::Failed,
            "noop" => NodeStatus::Noop,
            "unreported" => NodeStatus::Unreported,
            other => NodeStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node as returned by `/pdb/query/v4/nodes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeRecord {
    pub certname: String,
    #[serde(default)]
    pub deactivated: Option<String>,
    #[serde(default)]
    pub expired: Option<String>,
    #[serde(default)]
    pub report_timestamp: Option<String>,
    #[serde(default)]
    pub catalog_timestamp: Option<String>,
    #[serde(default)]
    pub facts_timestamp: Option<String>,
    #[serde(default)]
    pub catalog_environment: Option<String>,
    #[serde(default)]
    pub facts_environment: Option<String>,
    #[serde(default)]
    pub report_environment: Option<String>,
    #[serde(default)]
    pub latest_report_status: Option<String>,
    #[serde(default)]
    pub latest_report_hash: Option<String>,
}

/// A managed machine
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Certificate name (unique identifier)
    pub name: String,
    pub deactivated: Deactivation,
    pub expired: Option<DateTime<Utc>>,
    pub report_timestamp: Option<DateTime<Utc>>,
    pub catalog_timestamp: Option<DateTime<Utc>>,
    pub facts_timestamp: Option<DateTime<Utc>>,
    pub status: Option<NodeStatus>,
    /// Age of the last report, e.g. `0d 5h 20m`, set for unreported nodes
    pub unreported_time: Option<String>,
    pub catalog_environment: Option<String>,
    pub facts_environment: Option<String>,
    pub report_environment: Option<String>,
    pub latest_report_hash: Option<String>,
}

impl Node {
    /// An active node with no timestamps
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deactivated: Deactivation::Active,
            expired: None,
            report_timestamp: None,
            catalog_timestamp: None,
            facts_timestamp: None,
            status: None,
            unreported_time: None,
            catalog_environment: None,
            facts_environment: None,
            report_environment: None,
            latest_report_hash: None,
        }
    }

    /// Attach a status computed by the caller
    pub fn with_status(mut self, status: NodeStatus, unreported_time: Option<String>) -> Self {
        self.status = Some(status);
        self.unreported_time = unreported_time;
        self
    }

    /// Build a node and derive its status from report age and event counts
    pub fn from_record_with_status(
        record: NodeRecord,
        resolver: &NodeStatusResolver,
        event_counts: Option<&EventCounts>,
        now: DateTime<Utc>,
    ) -> TypesResult<Self> {
        let latest_status = record.latest_report_status.clone();
        let node = Node::try_from(record)?;
        let resolution = resolver.resolve(
            node.report_timestamp,
            latest_status.as_deref(),
            event_counts,
            now,
        );
        Ok(node.with_status(resolution.status, resolution.unreported_time))
    }

    pub fn is_deactivated(&self) -> bool {
        self.deactivated.is_deactivated()
    }
}

impl TryFrom<NodeRecord> for Node {
    type Error = crate::utils::error::TypesError;

    fn try_from(record: NodeRecord) -> TypesResult<Self> {
        Ok(Self {
            deactivated: parse_optional_timestamp("deactivated", record.deactivated.as_deref())?
                .into(),
            expired: parse_optional_timestamp("expired", record.expired.as_deref())?,
            report_timestamp: parse_optional_timestamp(
                "report_timestamp",
                record.report_timestamp.as_deref(),
            )?,
            catalog_timestamp: parse_optional_timestamp(
                "catalog_timestamp",
                record.catalog_timestamp.as_deref(),
            )?,
            facts_timestamp: parse_optional_timestamp(
                "facts_timestamp",
                record.facts_timestamp.as_deref(),
            )?,
            status: record.latest_report_status.as_deref().map(NodeStatus::from),
            unreported_time: None,
            catalog_environment: record.catalog_environment,
            facts_environment: record.facts_environment,
            report_environment: record.report_environment,
            latest_report_hash: record.latest_report_hash,
            name: record.certname,
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Displayable for Node {
    fn repr(&self) -> String {
        format!("<Node: {}>", self)
    }
}
