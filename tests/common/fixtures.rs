//! Test fixtures for common test data
//!
//! Fixtures are PuppetDB v4 documents in the shape the query endpoints
//! return them, so tests exercise record decoding as well as construction.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const NODE1: &str = "node1.puppet.board";
pub const NODE2: &str = "node2.puppet.board";
pub const TIMESTAMP: &str = "2013-08-01T09:57:00.000Z";
pub const REPORT_HASH: &str = "hash#";

/// Node documents
pub struct NodeFixtures;

impl NodeFixtures {
    pub fn active() -> Value {
        json!({
            "certname": NODE1,
            "deactivated": null,
            "expired": null,
            "report_timestamp": TIMESTAMP,
            "catalog_timestamp": TIMESTAMP,
            "facts_timestamp": TIMESTAMP,
            "report_environment": "production",
            "latest_report_status": "changed",
            "latest_report_hash": REPORT_HASH
        })
    }

    pub fn deactivated() -> Value {
        json!({
            "certname": NODE2,
            "deactivated": TIMESTAMP,
            "report_timestamp": null,
            "catalog_timestamp": null,
            "facts_timestamp": null
        })
    }
}

/// Report documents
pub struct ReportFixtures;

impl ReportFixtures {
    pub fn hour_long_run() -> Value {
        json!({
            "certname": NODE1,
            "hash": REPORT_HASH,
            "start_time": "2013-08-01T09:57:00.000Z",
            "end_time": "2013-08-01T10:57:00.000Z",
            "receive_time": "2013-08-01T10:58:00.000Z",
            "configuration_version": "1351535883",
            "report_format": 3,
            "puppet_version": "3.2.1",
            "transaction_uuid": "af9f16e3-75f6-4f90-acc6-f83d6524a6f3"
        })
    }
}

/// Event documents
pub struct EventFixtures;

impl EventFixtures {
    pub fn with_status(status: &str) -> Value {
        json!({
            "certname": NODE1,
            "status": status,
            "timestamp": "2013-08-01T10:57:00.000Z",
            "report": REPORT_HASH,
            "resource_title": "/etc/ssh/sshd_config",
            "resource_type": "file",
            "property": "ensure",
            "message": "Nothing to say",
            "new_value": "present",
            "old_value": "absent"
        })
    }
}

/// Catalog documents
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn empty() -> Value {
        json!({
            "certname": NODE1,
            "version": "unique",
            "transaction_uuid": null,
            "resources": [],
            "edges": []
        })
    }

    pub fn ssh() -> Value {
        json!({
            "certname": NODE1,
            "version": "1351535883",
            "transaction_uuid": "af9f16e3-75f6-4f90-acc6-f83d6524a6f3",
            "environment": "production",
            "resources": {
                "href": "/pdb/query/v4/catalogs/node1.puppet.board/resources",
                "data": [
                    {"type": "file", "title": "/etc/ssh/sshd_config", "tags": ["class", "ssh"],
                     "exported": false, "file": "/ssh/manifests/init.pp", "line": 15,
                     "parameters": {"ensure": "present", "owner": "root", "group": "root", "mode": "0600"}},
                    {"type": "service", "title": "sshd", "tags": ["class", "ssh"],
                     "exported": false, "file": "/ssh/manifests/init.pp", "line": 30,
                     "parameters": {"ensure": "running"}},
                    {"type": "package", "title": "openssh-server", "tags": ["class", "ssh"],
                     "exported": false, "file": "/ssh/manifests/init.pp", "line": 5,
                     "parameters": {"ensure": "installed"}}
                ]
            },
            "edges": {
                "href": "/pdb/query/v4/catalogs/node1.puppet.board/edges",
                "data": [
                    {"source_type": "package", "source_title": "openssh-server",
                     "target_type": "file", "target_title": "/etc/ssh/sshd_config",
                     "relationship": "before"},
                    {"source_type": "file", "source_title": "/etc/ssh/sshd_config",
                     "target_type": "service", "target_title": "sshd",
                     "relationship": "notify"}
                ]
            }
        })
    }
}
