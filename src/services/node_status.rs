//! Node status derivation
//!
//! PuppetDB only stores the status of the latest report. Whether a node is
//! "unreported" depends on how long ago that report arrived, which is a
//! client-side judgement made against a configurable threshold.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::{EventCounts, NodeStatus};

/// Default threshold after which a silent node counts as unreported
pub const DEFAULT_UNREPORTED_HOURS: u32 = 2;

/// Outcome of resolving a node's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResolution {
    pub status: NodeStatus,
    pub unreported: bool,
    /// `{days}d {hours}h {minutes}m` since the last report, when it is stale
    pub unreported_time: Option<String>,
}

/// Derives node status from the latest report and its age
#[derive(Debug, Clone, Copy)]
pub struct NodeStatusResolver {
    unreported_after: Duration,
}

impl Default for NodeStatusResolver {
    fn default() -> Self {
        Self::from_hours(DEFAULT_UNREPORTED_HOURS)
    }
}

impl NodeStatusResolver {
    pub fn new(unreported_after: Duration) -> Self {
        Self { unreported_after }
    }

    pub fn from_hours(hours: u32) -> Self {
        Self::new(Duration::hours(i64::from(hours)))
    }

    pub fn unreported_after(&self) -> Duration {
        self.unreported_after
    }

    pub fn resolve(
        &self,
        report_timestamp: Option<DateTime<Utc>>,
        latest_report_status: Option<&str>,
        event_counts: Option<&EventCounts>,
        now: DateTime<Utc>,
    ) -> StatusResolution {
        let reported_status = match latest_report_status {
            Some(status) => NodeStatus::from(status),
            None => event_counts.map_or(NodeStatus::Unchanged, status_from_counts),
        };

        // A threshold reaching past the representable range never expires
        let cutoff = now.checked_sub_signed(self.unreported_after);
        let (unreported, unreported_time) = match (report_timestamp, cutoff) {
            (None, _) => (true, None),
            (Some(last_report), Some(cutoff)) if last_report < cutoff => {
                (true, Some(format_unreported_time(now - last_report)))
            }
            (Some(_), _) => (false, None),
        };

        let status = if unreported {
            NodeStatus::Unreported
        } else {
            reported_status
        };

        debug!(
            status = %status,
            unreported,
            unreported_time = unreported_time.as_deref().unwrap_or(""),
            "Resolved node status"
        );

        StatusResolution {
            status,
            unreported,
            unreported_time,
        }
    }
}

/// Failures win over noops, noops over changes
fn status_from_counts(counts: &EventCounts) -> NodeStatus {
    if counts.failures > 0 {
        NodeStatus::Failed
    } else if counts.noops > 0 {
        NodeStatus::Noop
    } else if counts.successes > 0 {
        NodeStatus::Changed
    } else {
        NodeStatus::Unchanged
    }
}

/// Render an age as `{days}d {hours}h {minutes}m`
pub fn format_unreported_time(age: Duration) -> String {
    let days = age.num_days();
    let remainder = age.num_seconds() - days * 86_400;
    format!("{}d {}h {}m", days, remainder / 3600, (remainder % 3600) / 60)
}
