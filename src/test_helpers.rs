//! Shared test utilities for the cockpit-graph test suite.
//!
//! Provides in-memory stand-ins for the two external collaborators (node
//! sink, object emitter) plus fixture builders for records and lookup
//! tables, so tests exercise the build pipeline without a site-generation
//! registry.

use crate::build::NodeSink;
use crate::link::{LinkError, ObjectEmitter};
use crate::lookup::{LookupEntry, LookupTable, LookupTables};
use crate::types::{Field, Node, Record};
use serde_json::Value;

// =========================================================================
// Collaborator stand-ins
// =========================================================================

/// Sink that records every emitted node in emission order.
#[derive(Default)]
pub struct MemorySink {
    pub nodes: Vec<Node>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panic-on-missing lookup by node id, for assertions.
    pub fn find(&self, id: &str) -> &Node {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .unwrap_or_else(|| panic!("no emitted node with id {id}"))
    }
}

impl NodeSink for MemorySink {
    fn emit(&mut self, node: &Node) {
        self.nodes.push(node.clone());
    }
}

/// Object emitter that hands out sequential ids and records every value it
/// was asked to turn into a sub-node.
#[derive(Default)]
pub struct StubObjectEmitter {
    pub received: Vec<Value>,
}

impl StubObjectEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectEmitter for StubObjectEmitter {
    fn create(&mut self, value: Value) -> Result<String, LinkError> {
        self.received.push(value);
        Ok(format!("Cockpit__Object__{}", self.received.len()))
    }
}

// =========================================================================
// Fixture builders
// =========================================================================

/// Build a [`Record`] from a JSON literal. Panics on shape errors — a
/// malformed fixture is a test bug.
pub fn record(value: Value) -> Record {
    serde_json::from_value(value).expect("fixture record must deserialize")
}

/// Build a typed [`Field`].
pub fn field(field_type: &str, value: Value) -> Field {
    Field {
        field_type: Some(field_type.to_string()),
        value,
    }
}

/// Build a lookup table from `(key, node id)` pairs.
pub fn table(entries: &[(&str, &str)]) -> LookupTable {
    entries
        .iter()
        .map(|(key, id)| (key.to_string(), LookupEntry { id: id.to_string() }))
        .collect()
}

/// Lookup tables with only the image table populated.
pub fn tables_with_images(entries: &[(&str, &str)]) -> LookupTables {
    LookupTables {
        images: table(entries),
        ..LookupTables::default()
    }
}
