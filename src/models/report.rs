//! Report data model

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::Displayable;
use crate::query::Query;
use crate::utils::error::{TypesError, TypesResult};
use crate::utils::time::parse_timestamp;

/// A report as returned by `/pdb/query/v4/reports`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRecord {
    pub certname: String,
    pub hash: String,
    pub start_time: String,
    pub end_time: String,
    pub receive_time: String,
    pub configuration_version: String,
    pub report_format: u32,
    pub puppet_version: String,
    #[serde(default)]
    pub transaction_uuid: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub noop: Option<bool>,
    #[serde(default)]
    pub producer: Option<String>,
}

/// One configuration run on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub node: String,
    /// Report hash (primary key)
    pub hash_: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub received: DateTime<Utc>,
    /// Configuration version applied by the run
    pub version: String,
    /// Report format version
    pub format_: u32,
    pub agent_version: String,
    /// Transaction UUID
    pub transaction: String,
    pub environment: Option<String>,
    pub status: Option<String>,
    pub noop: Option<bool>,
    pub producer: Option<String>,
    query_scope: Query,
}

impl Report {
    /// Wall-clock duration of the run
    pub fn run_time(&self) -> Duration {
        self.end - self.start
    }

    /// `["=", "report", hash]`, for scoping event and resource queries to
    /// this run
    pub fn query_scope(&self) -> &Query {
        &self.query_scope
    }
}

impl TryFrom<ReportRecord> for Report {
    type Error = TypesError;

    fn try_from(record: ReportRecord) -> TypesResult<Self> {
        let start = parse_timestamp("start_time", &record.start_time)?;
        let end = parse_timestamp("end_time", &record.end_time)?;
        let received = parse_timestamp("receive_time", &record.receive_time)?;
        let query_scope = Query::equals("report", record.hash.as_str());

        Ok(Self {
            node: record.certname,
            hash_: record.hash,
            start,
            end,
            received,
            version: record.configuration_version,
            format_: record.report_format,
            agent_version: record.puppet_version,
            transaction: record.transaction_uuid.unwrap_or_default(),
            environment: record.environment,
            status: record.status,
            noop: record.noop,
            producer: record.producer,
            query_scope,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hash_)
    }
}

impl Displayable for Report {
    fn repr(&self) -> String {
        format!("Report: {}", self)
    }
}
