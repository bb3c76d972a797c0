//! Fact data model

use std::fmt;

use serde::Deserialize;

use super::Displayable;

/// A fact as returned by `/pdb/query/v4/facts`
#[derive(Debug, Clone, Deserialize)]
pub struct FactRecord {
    pub certname: String,
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub environment: Option<String>,
}

/// A single observed attribute of a node
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    /// Certname of the node the fact belongs to
    pub node: String,
    pub name: String,
    /// String, number, boolean, or structured value
    pub value: serde_json::Value,
    pub environment: Option<String>,
}

impl Fact {
    pub fn new(
        node: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            node: node.into(),
            name: name.into(),
            value: value.into(),
            environment: None,
        }
    }
}

impl From<FactRecord> for Fact {
    fn from(record: FactRecord) -> Self {
        Self {
            node: record.certname,
            name: record.name,
            value: record.value,
            environment: record.environment,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.node)
    }
}

impl Displayable for Fact {
    fn repr(&self) -> String {
        format!("Fact: {}", self)
    }
}
