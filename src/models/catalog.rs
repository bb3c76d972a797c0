//! Catalog and edge data models

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{resource_identity, Displayable, Resource, ResourceRecord};
use crate::utils::error::{TypesError, TypesResult};

/// A PuppetDB collection that is either inlined or expandable via `href`.
///
/// `{"data": null, "href": ...}` means the collection was not expanded and
/// decodes as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Collection<T> {
    Inline(Vec<T>),
    Reference {
        data: Option<Vec<T>>,
        href: Option<String>,
    },
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection::Inline(Vec::new())
    }
}

impl<T> Collection<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Collection::Inline(items) => items,
            Collection::Reference { data, .. } => data.unwrap_or_default(),
        }
    }
}

/// An edge as returned inside a catalog's `edges.data`
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub source_type: String,
    pub source_title: String,
    pub target_type: String,
    pub target_title: String,
    pub relationship: String,
}

/// A catalog as returned by `/pdb/query/v4/catalogs`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub certname: String,
    pub version: String,
    #[serde(default)]
    pub transaction_uuid: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub code_id: Option<String>,
    #[serde(default)]
    pub catalog_uuid: Option<String>,
    #[serde(default)]
    pub resources: Option<Collection<ResourceRecord>>,
    #[serde(default)]
    pub edges: Option<Collection<EdgeRecord>>,
}

/// A directed relationship between two catalog resources
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: Arc<Resource>,
    pub target: Arc<Resource>,
    /// e.g. `notify`, `require`, `contains`
    pub relationship: String,
}

impl Edge {
    pub fn new(source: Arc<Resource>, target: Arc<Resource>, relationship: impl Into<String>) -> Self {
        Self {
            source,
            target,
            relationship: relationship.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.source, self.relationship, self.target)
    }
}

impl Displayable for Edge {
    fn repr(&self) -> String {
        format!("<Edge: {}>", self)
    }
}

/// The desired-state document compiled for a node
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub node: String,
    pub version: String,
    pub transaction_uuid: Option<String>,
    /// Keyed by `type[title]`
    pub resources: HashMap<String, Arc<Resource>>,
    pub edges: Vec<Edge>,
    pub environment: Option<String>,
    pub code_id: Option<String>,
    pub catalog_uuid: Option<String>,
}

impl Catalog {
    pub fn new(
        node: impl Into<String>,
        version: impl Into<String>,
        transaction_uuid: Option<String>,
        resources: impl IntoIterator<Item = Resource>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            node: node.into(),
            version: version.into(),
            transaction_uuid,
            resources: index_resources(resources),
            edges,
            environment: None,
            code_id: None,
            catalog_uuid: None,
        }
    }

    pub fn resource(&self, type_: &str, title: &str) -> Option<&Arc<Resource>> {
        self.resources.get(&resource_identity(type_, title))
    }

    fn lookup(&self, type_: &str, title: &str) -> TypesResult<Arc<Resource>> {
        self.resource(type_, title)
            .cloned()
            .ok_or_else(|| TypesError::UnknownResource(resource_identity(type_, title)))
    }
}

/// Later duplicates replace earlier ones
fn index_resources(resources: impl IntoIterator<Item = Resource>) -> HashMap<String, Arc<Resource>> {
    let mut index = HashMap::new();
    for resource in resources {
        let identity = resource.identity();
        if index.insert(identity.clone(), Arc::new(resource)).is_some() {
            warn!(resource = %identity, "Duplicate resource in catalog, keeping the last one");
        }
    }
    index
}

impl TryFrom<CatalogRecord> for Catalog {
    type Error = TypesError;

    fn try_from(record: CatalogRecord) -> TypesResult<Self> {
        let certname = record.certname;
        let resources = record
            .resources
            .unwrap_or_default()
            .into_vec()
            .into_iter()
            .map(|r| {
                let mut resource = Resource::from(r);
                if resource.node.is_empty() {
                    resource.node = certname.clone();
                }
                resource
            });

        let mut catalog = Catalog::new(
            certname.clone(),
            record.version,
            record.transaction_uuid,
            resources,
            Vec::new(),
        );
        catalog.environment = record.environment;
        catalog.code_id = record.code_id;
        catalog.catalog_uuid = record.catalog_uuid;

        let edges = record
            .edges
            .unwrap_or_default()
            .into_vec()
            .into_iter()
            .map(|e| {
                Ok(Edge::new(
                    catalog.lookup(&e.source_type, &e.source_title)?,
                    catalog.lookup(&e.target_type, &e.target_title)?,
                    e.relationship,
                ))
            })
            .collect::<TypesResult<Vec<_>>>()?;
        catalog.edges = edges;

        debug!(
            certname = %catalog.node,
            resources = catalog.resources.len(),
            edges = catalog.edges.len(),
            "Assembled catalog"
        );

        Ok(catalog)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.node,
            self.transaction_uuid.as_deref().unwrap_or("None")
        )
    }
}

impl Displayable for Catalog {
    fn repr(&self) -> String {
        format!("<Catalog: {}>", self)
    }
}
