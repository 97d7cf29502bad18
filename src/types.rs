//! Shared types for the record → node transformation.
//!
//! [`Record`] and [`Field`] are the raw input shapes as they arrive from the
//! CMS fetch layer (JSON). [`Node`], [`NodeField`] and [`NodeRef`] are the
//! output shapes handed to the data layer's node sink and serialized with
//! the `___ref` reference-attribute convention the downstream query layer
//! resolves against.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A raw collection-item record as fetched from the CMS.
///
/// Records form a tree: `children` holds nested records of the same
/// collection. The builder consumes the tree by value and never hands it
/// back — all output goes through [`Node`]s.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Stable, locale-independent identity assigned by the CMS.
    #[serde(rename = "cockpitId")]
    pub cockpit_id: String,
    /// Locale tag. The sentinel `"any"` marks locale-invariant records.
    pub lang: String,
    /// Named field slots. BTreeMap so iteration (and thus object sub-node
    /// emission) is deterministic.
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    /// Nested child records, in declaration order.
    #[serde(default)]
    pub children: Vec<Record>,
}

/// One named slot on a record: an optional type tag plus a JSON value.
///
/// The tag decides the linking rule applied by [`crate::link`]; untyped
/// fields (and fields with a tag outside [`LinkKind`]) pass through with
/// their value intact.
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// The closed set of field-type tags that get rewritten into references.
///
/// Keeping this a closed enum (rather than matching tag strings at each use
/// site) means every linking rule is checked for exhaustiveness at compile
/// time. Unknown tags map to `None` in [`LinkKind::from_tag`] and the field
/// passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Image,
    Gallery,
    Asset,
    Markdown,
    Layout,
    LayoutGrid,
    Object,
    CollectionLink,
}

impl LinkKind {
    /// Map a CMS field-type tag to its link kind, if it has one.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "image" => Some(Self::Image),
            "gallery" => Some(Self::Gallery),
            "asset" => Some(Self::Asset),
            "markdown" => Some(Self::Markdown),
            "layout" => Some(Self::Layout),
            "layout-grid" => Some(Self::LayoutGrid),
            "object" => Some(Self::Object),
            "collectionlink" => Some(Self::CollectionLink),
            _ => None,
        }
    }
}

/// A reference to one other node, or an ordered sequence of them.
///
/// Serializes untagged: a single link becomes a bare id string, a
/// one-to-many link becomes an array of id strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    One(String),
    Many(Vec<String>),
}

/// A field slot on a finished node.
///
/// Invariant: a field carries `value` or `reference`, never both. Linked
/// fields lose their inline `value`; untyped fields never gain a
/// `reference`. A gallery whose raw value was not a sequence ends up with
/// neither (the inline value is still dropped — accepted quirk inherited
/// from the source CMS plugin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeField {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "value___ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<NodeRef>,
}

/// The normalized output unit consumed by the downstream data layer.
///
/// Parent/child structure survives only as id strings — nodes never own
/// each other, so no cyclic object graph is retained once a node has been
/// handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Globally unique, derived by [`crate::id::derive_id`].
    pub id: String,
    pub lang: String,
    pub fields: BTreeMap<String, NodeField>,
    /// Ids of this node's children, in declaration order.
    #[serde(rename = "children___ref", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Id of this node's parent, absent on top-level nodes.
    #[serde(rename = "parent___ref", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}
