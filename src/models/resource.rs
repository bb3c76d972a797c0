//! Resource data model

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use super::Displayable;

/// Display identity of a resource: `type[title]`
pub fn resource_identity(type_: &str, title: &str) -> String {
    format!("{}[{}]", type_, title)
}

/// A resource as returned by `/pdb/query/v4/resources` or embedded in a
/// catalog (where `certname` is omitted)
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRecord {
    #[serde(default)]
    pub certname: String,
    pub title: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub exported: bool,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub parameters: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// A managed configuration item on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub node: String,
    /// Resource title
    pub name: String,
    /// Resource type, e.g. `file` or `service`
    pub type_: String,
    pub tags: Vec<String>,
    pub exported: bool,
    pub sourcefile: Option<String>,
    pub sourceline: Option<u64>,
    pub parameters: HashMap<String, serde_json::Value>,
    pub environment: Option<String>,
}

impl Resource {
    pub fn new(node: impl Into<String>, name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            name: name.into(),
            type_: type_.into(),
            tags: Vec::new(),
            exported: false,
            sourcefile: None,
            sourceline: None,
            parameters: HashMap::new(),
            environment: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Manifest location the resource was declared at
    pub fn with_source(mut self, file: impl Into<String>, line: u64) -> Self {
        self.sourcefile = Some(file.into());
        self.sourceline = Some(line);
        self
    }

    pub fn with_parameters(mut self, parameters: HashMap<String, serde_json::Value>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn identity(&self) -> String {
        resource_identity(&self.type_, &self.name)
    }
}

impl From<ResourceRecord> for Resource {
    fn from(record: ResourceRecord) -> Self {
        Self {
            node: record.certname,
            name: record.title,
            type_: record.type_,
            tags: record.tags,
            exported: record.exported,
            sourcefile: record.file,
            sourceline: record.line,
            parameters: record.parameters.unwrap_or_default(),
            environment: record.environment,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

impl Displayable for Resource {
    fn repr(&self) -> String {
        format!("<Resource: {}>", self)
    }
}
