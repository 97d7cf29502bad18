//! Recursive node construction from collection-item trees.
//!
//! [`NodeBuilder`] is the orchestrator: it walks a record's `children`
//! depth-first, derives each node's id, runs the field linkers, wires up the
//! parent/child id cross-links and hands every finished node to the injected
//! [`NodeSink`].
//!
//! ## Emission order
//!
//! Nodes are emitted post-order — deepest descendants first, the top-level
//! node last. A child is emitted from its parent's frame, immediately after
//! its `parent` reference is set, so every node reaches the sink exactly
//! once and fully formed.
//!
//! ## Failure semantics
//!
//! A [`LinkError`] anywhere in the tree aborts the whole top-level build.
//! Nodes already emitted for earlier-processed descendants stay emitted —
//! there is no rollback.

use crate::id::derive_id;
use crate::link::{LinkContext, LinkError, ObjectEmitter, link_fields};
use crate::lookup::LookupTables;
use crate::types::{Node, Record};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Destination for finished nodes, owned by the downstream data layer.
///
/// Called once per node: once per top-level record, once per descendant
/// record, and (via the [`ObjectEmitter`]) once per embedded object.
pub trait NodeSink {
    fn emit(&mut self, node: &Node);
}

/// Builds nodes for one collection.
///
/// Construction-time configuration only: the collection name and the
/// prebuilt lookup tables. The sink and object emitter are threaded through
/// [`build`](NodeBuilder::build) explicitly so the builder itself holds no
/// ambient state and tests can run against in-memory stand-ins.
pub struct NodeBuilder<'a> {
    collection_name: &'a str,
    tables: &'a LookupTables,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(collection_name: &'a str, tables: &'a LookupTables) -> Self {
        Self {
            collection_name,
            tables,
        }
    }

    /// Build the node tree for one top-level record.
    ///
    /// Emits every produced node to `sink` and returns the top-level node,
    /// id included, so callers can link to it.
    pub fn build(
        &self,
        record: Record,
        sink: &mut dyn NodeSink,
        objects: &mut dyn ObjectEmitter,
    ) -> Result<Node, BuildError> {
        let node = self.build_node(record, sink, objects)?;
        sink.emit(&node);
        Ok(node)
    }

    /// Build one record and its subtree. Descendants are emitted here;
    /// the returned node is emitted by the caller once its parent link (if
    /// any) is known.
    fn build_node(
        &self,
        record: Record,
        sink: &mut dyn NodeSink,
        objects: &mut dyn ObjectEmitter,
    ) -> Result<Node, BuildError> {
        let Record {
            cockpit_id,
            lang,
            fields,
            children,
        } = record;

        // Children first: each child is fully built (id included) before
        // the parent links to it.
        let children = children
            .into_iter()
            .map(|child| self.build_node(child, sink, objects))
            .collect::<Result<Vec<Node>, BuildError>>()?;

        let id = derive_id(self.collection_name, &cockpit_id, &lang);
        let context = LinkContext {
            tables: self.tables,
            lang: &lang,
        };
        let fields = link_fields(fields, &context, objects)?;

        let node = Node {
            id,
            lang,
            fields,
            children: children.iter().map(|child| child.id.clone()).collect(),
            parent: None,
        };

        for mut child in children {
            child.parent = Some(node.id.clone());
            sink.emit(&child);
        }

        Ok(node)
    }
}
