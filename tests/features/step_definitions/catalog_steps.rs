//! Catalog and edge step definitions

use std::sync::Arc;

use cucumber::{given, then, when};
use serde_json::json;

use crate::features::TestWorld;
use openvox_pdb_types::models::CatalogRecord;
use openvox_pdb_types::{Catalog, Displayable, Edge, Resource, TypesError};

#[given(expr = "an empty catalog for {string} with version {string}")]
async fn empty_catalog(world: &mut TestWorld, certname: String, version: String) {
    world.catalog = Some(Catalog::new(certname, version, None, Vec::new(), Vec::new()));
}

#[given(expr = "a resource {string} titled {string} on {string}")]
async fn resource_exists(world: &mut TestWorld, type_: String, title: String, certname: String) {
    let resource = Resource::new(certname, title, type_)
        .with_tags(["class", "ssh"])
        .with_source("/ssh/manifests/init.pp", 15);
    world
        .resources
        .insert(resource.identity(), Arc::new(resource));
}

/// Split `type[title]` into its parts
fn split_identity(identity: &str) -> (&str, &str) {
    let (type_, rest) = identity.split_once('[').expect("identity must be type[title]");
    (type_, rest.trim_end_matches(']'))
}

#[given(expr = "a catalog for {string} with an edge from {string} to {string}")]
async fn catalog_with_dangling_edge(
    world: &mut TestWorld,
    certname: String,
    source: String,
    target: String,
) {
    let (source_type, source_title) = split_identity(&source);
    let (target_type, target_title) = split_identity(&target);
    let record: CatalogRecord = serde_json::from_value(json!({
        "certname": certname,
        "version": "1",
        "resources": [],
        "edges": [{
            "source_type": source_type,
            "source_title": source_title,
            "target_type": target_type,
            "target_title": target_title,
            "relationship": "before"
        }]
    }))
    .unwrap();

    match Catalog::try_from(record) {
        Ok(catalog) => world.catalog = Some(catalog),
        Err(err) => world.record_error(err),
    }
}

#[when(expr = "{string} is linked to {string} with {string}")]
async fn link_resources(world: &mut TestWorld, source: String, target: String, relationship: String) {
    let source = world.resources.get(&source).expect("unknown source").clone();
    let target = world.resources.get(&target).expect("unknown target").clone();
    world.edge = Some(Edge::new(source, target, relationship));
}

fn catalog(world: &TestWorld) -> &Catalog {
    world.catalog.as_ref().expect("catalog was not built")
}

#[then(expr = "the catalog has {int} resources and {int} edges")]
async fn catalog_sizes(world: &mut TestWorld, resources: usize, edges: usize) {
    assert_eq!(catalog(world).resources.len(), resources);
    assert_eq!(catalog(world).edges.len(), edges);
}

#[then(expr = "the catalog displays as {string}")]
async fn catalog_display(world: &mut TestWorld, expected: String) {
    assert_eq!(catalog(world).to_string(), expected);
}

#[then(expr = "the catalog repr is {string}")]
async fn catalog_repr(world: &mut TestWorld, expected: String) {
    assert_eq!(catalog(world).repr(), expected);
}

#[then(expr = "the edge displays as {string}")]
async fn edge_display(world: &mut TestWorld, expected: String) {
    let edge = world.edge.as_ref().expect("edge was not built");
    assert_eq!(edge.to_string(), expected);
}

#[then(expr = "the edge repr is {string}")]
async fn edge_repr(world: &mut TestWorld, expected: String) {
    let edge = world.edge.as_ref().expect("edge was not built");
    assert_eq!(edge.repr(), expected);
}

#[then(expr = "building fails with an unknown resource {string}")]
async fn unknown_resource(world: &mut TestWorld, expected: String) {
    match world.last_error.as_ref() {
        Some(TypesError::UnknownResource(identity)) => assert_eq!(identity, &expected),
        other => panic!("expected an unknown resource error, got {:?}", other),
    }
}
