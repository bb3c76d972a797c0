//! Value type construction and display tests

use chrono::Duration;
use rstest::rstest;
use serde_json::json;

use openvox_pdb_types::models::{EventRecord, NodeRecord, ReportRecord};
use openvox_pdb_types::services::NodeStatusResolver;
use openvox_pdb_types::{
    json_to_datetime, Deactivation, Displayable, Event, Fact, Node, NodeStatus, Report, Resource,
    TypesError,
};

use crate::common::*;

fn node(value: serde_json::Value) -> Node {
    let record: NodeRecord = serde_json::from_value(value).unwrap();
    Node::try_from(record).unwrap()
}

#[test]
fn test_node_deactivated_normalization() {
    let active = node(NodeFixtures::active());
    assert_eq!(active.deactivated, Deactivation::Active);
    assert!(!active.is_deactivated());

    let retired = node(NodeFixtures::deactivated());
    assert!(retired.is_deactivated());
    assert_eq!(
        retired.deactivated,
        Deactivation::Since(json_to_datetime(TIMESTAMP).unwrap())
    );
    assert!(retired.report_timestamp.is_none());
    assert_eq!(retired.repr(), "<Node: node2.puppet.board>");
}

#[test]
fn test_node_status_from_record() {
    let record: NodeRecord = serde_json::from_value(NodeFixtures::active()).unwrap();
    let now = json_to_datetime(TIMESTAMP).unwrap() + Duration::hours(5) + Duration::minutes(20);

    let node = Node::from_record_with_status(record, &NodeStatusResolver::default(), None, now)
        .unwrap();
    assert_eq!(node.status, Some(NodeStatus::Unreported));
    assert_eq!(node.unreported_time.as_deref(), Some("0d 5h 20m"));
    assert_eq!(node.to_string(), NODE1);
}

#[test]
fn test_fact_display() {
    let fact = Fact::new(NODE1, "osfamily", "Debian");
    assert_eq!(fact.value, json!("Debian"));
    assert_eq!(fact.to_string(), "osfamily/node1.puppet.board");
    assert_eq!(fact.repr(), "Fact: osfamily/node1.puppet.board");
}

#[test]
fn test_resource_display() {
    let resource = Resource::new(NODE1, "/etc/ssh/sshd_config", "file");
    assert_eq!(resource.to_string(), "file[/etc/ssh/sshd_config]");
    assert_eq!(resource.repr(), "<Resource: file[/etc/ssh/sshd_config]>");
}

#[test]
fn test_report_from_fixture() {
    let record: ReportRecord = serde_json::from_value(ReportFixtures::hour_long_run()).unwrap();
    let report = Report::try_from(record).unwrap();

    assert_eq!(report.run_time(), report.end - report.start);
    assert!(report.run_time() >= Duration::zero());
    assert_eq!(report.to_string(), REPORT_HASH);
    assert_eq!(report.repr(), "Report: hash#");
    assert_eq!(report.query_scope().to_string(), r#"["=", "report", "hash#"]"#);
}

#[rstest]
#[case("2013-08-01T09:57:00.000Z", "2013-08-01T09:57:00.000Z", 0)]
#[case("2013-08-01T09:57:00.000Z", "2013-08-01T09:57:42.500Z", 42)]
#[case("2013-08-01T23:59:00Z", "2013-08-02T00:01:00Z", 120)]
fn test_report_run_time(#[case] start: &str, #[case] end: &str, #[case] seconds: i64) {
    let mut doc = ReportFixtures::hour_long_run();
    doc["start_time"] = json!(start);
    doc["end_time"] = json!(end);
    let record: ReportRecord = serde_json::from_value(doc).unwrap();
    let report = Report::try_from(record).unwrap();

    assert_eq!(
        report.run_time(),
        json_to_datetime(end).unwrap() - json_to_datetime(start).unwrap()
    );
    assert_eq!(report.run_time().num_seconds(), seconds);
}

#[rstest]
#[case("failure", true)]
#[case("success", false)]
#[case("noop", false)]
#[case("skipped", false)]
fn test_event_failed_flag(#[case] status: &str, #[case] failed: bool) {
    let record: EventRecord = serde_json::from_value(EventFixtures::with_status(status)).unwrap();
    let event = Event::try_from(record).unwrap();
    assert_eq!(event.failed(), failed);
    assert_eq!(event.to_string(), "file[/etc/ssh/sshd_config]/hash#");
    assert_eq!(event.repr(), "Event: file[/etc/ssh/sshd_config]/hash#");
}

#[test]
fn test_malformed_timestamp_propagates() {
    let mut doc = EventFixtures::with_status("success");
    doc["timestamp"] = json!("2013-08-01 at noon");
    let record: EventRecord = serde_json::from_value(doc).unwrap();

    let err = Event::try_from(record).unwrap_err();
    assert!(matches!(err, TypesError::InvalidTimestamp { field: "timestamp", .. }));
}

#[test]
fn test_value_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Node>();
    assert_send_sync::<Fact>();
    assert_send_sync::<Resource>();
    assert_send_sync::<Report>();
    assert_send_sync::<Event>();
    assert_send_sync::<openvox_pdb_types::Catalog>();
    assert_send_sync::<openvox_pdb_types::Edge>();
}
