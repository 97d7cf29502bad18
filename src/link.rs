//! Field linking: rewriting inline values into node references.
//!
//! Each recognized field type ([`LinkKind`](crate::types::LinkKind)) has one
//! resolution rule that turns the field's inline value into the id (or
//! ordered ids) of another node:
//!
//! | Kind | Inline value | Resolves via |
//! |------|--------------|--------------|
//! | `image` | image record id | `images` table |
//! | `gallery` | sequence of `{value: id}` items | `images` table, per item |
//! | `asset` | asset record id | `assets` table |
//! | `markdown` | markdown record id | `markdowns` table |
//! | `layout`, `layout-grid` | embedded layout structure | `layouts` table, keyed by [`layout_hash`] |
//! | `object` | embedded object | [`ObjectEmitter`], which emits a sub-node |
//! | `collectionlink` | `{link, _id}` descriptor(s) | [`derive_id`], no existence check |
//!
//! Resolution is a pure transform from [`Field`] to [`NodeField`]: the
//! original value is consumed, never half-rewritten, so a failed link leaves
//! no partially-linked node behind.
//!
//! ## Quirks preserved from the source plugin
//!
//! A `gallery` field whose value is not a sequence loses its inline value
//! and gains no reference. Collection links are *predicted*, not checked —
//! a link may point at a node that is never built; broken links are the
//! downstream query layer's concern.

use crate::id::derive_id;
use crate::lookup::{LookupTable, LookupTables, layout_hash};
use crate::types::{Field, LinkKind, NodeField, NodeRef};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    /// One-to-many collection links must target a single collection.
    #[error(
        "one-to-many collection link in field `{field}` mixes target collections \
         (expected `{expected}`, found `{found}`)"
    )]
    MixedCollectionLink {
        field: String,
        expected: String,
        found: String,
    },
    /// A lookup table is missing a key the input data references. The
    /// tables are a precondition — this means the fetch layer built them
    /// incompletely, never that a default should be substituted.
    #[error("no `{table}` entry for key `{key}` (field `{field}`)")]
    LookupMiss {
        table: &'static str,
        key: String,
        field: String,
    },
    /// The field's value doesn't have the shape its type tag promises.
    #[error("malformed {kind} value in field `{field}`: {reason}")]
    MalformedValue {
        field: String,
        kind: &'static str,
        reason: &'static str,
    },
}

/// Collaborator that turns an inline object value into its own node.
///
/// Implementations emit the sub-node (recursing through these same linking
/// rules for the object's own fields) and return its id. Out of scope here
/// beyond this contract; tests use a stub.
pub trait ObjectEmitter {
    fn create(&mut self, value: Value) -> Result<String, LinkError>;
}

/// Read-only context shared by all linkers while one node is processed.
pub struct LinkContext<'a> {
    pub tables: &'a LookupTables,
    /// Locale of the *referencing* record — collection links qualify target
    /// ids with it, not with any locale of the target.
    pub lang: &'a str,
}

/// Link every field of a record, producing the finished field map.
///
/// Object fields are resolved after all other kinds, so their sub-nodes are
/// emitted only once every direct link on this node has resolved.
pub fn link_fields(
    fields: BTreeMap<String, Field>,
    ctx: &LinkContext<'_>,
    objects: &mut dyn ObjectEmitter,
) -> Result<BTreeMap<String, NodeField>, LinkError> {
    let mut linked = BTreeMap::new();
    let mut deferred = Vec::new();

    for (name, field) in fields {
        let kind = field.field_type.as_deref().and_then(LinkKind::from_tag);
        if kind == Some(LinkKind::Object) {
            deferred.push((name, field));
        } else {
            let resolved = resolve_field(&name, field, ctx, objects)?;
            linked.insert(name, resolved);
        }
    }

    for (name, field) in deferred {
        let resolved = resolve_field(&name, field, ctx, objects)?;
        linked.insert(name, resolved);
    }

    Ok(linked)
}

/// Resolve a single field according to its type tag.
///
/// Fields without a recognized tag pass through with their value intact.
pub fn resolve_field(
    name: &str,
    field: Field,
    ctx: &LinkContext<'_>,
    objects: &mut dyn ObjectEmitter,
) -> Result<NodeField, LinkError> {
    let Some(kind) = field.field_type.as_deref().and_then(LinkKind::from_tag) else {
        return Ok(NodeField {
            field_type: field.field_type,
            value: Some(field.value),
            reference: None,
        });
    };

    let reference = match kind {
        LinkKind::Image => Some(NodeRef::One(resolve_keyed(
            name,
            &field.value,
            &ctx.tables.images,
            "images",
        )?)),
        LinkKind::Gallery => resolve_gallery(name, &field.value, ctx)?,
        LinkKind::Asset => Some(NodeRef::One(resolve_keyed(
            name,
            &field.value,
            &ctx.tables.assets,
            "assets",
        )?)),
        LinkKind::Markdown => Some(NodeRef::One(resolve_keyed(
            name,
            &field.value,
            &ctx.tables.markdowns,
            "markdowns",
        )?)),
        LinkKind::Layout | LinkKind::LayoutGrid => {
            let key = layout_hash(&field.value);
            Some(NodeRef::One(table_get(
                &ctx.tables.layouts,
                "layouts",
                &key,
                name,
            )?))
        }
        LinkKind::Object => Some(NodeRef::One(objects.create(field.value)?)),
        LinkKind::CollectionLink => Some(resolve_collection_link(name, &field.value, ctx.lang)?),
    };

    Ok(NodeField {
        field_type: field.field_type,
        value: None,
        reference,
    })
}

/// Resolve a field whose value is a string key into a table.
fn resolve_keyed(
    field: &str,
    value: &Value,
    table: &LookupTable,
    table_name: &'static str,
) -> Result<String, LinkError> {
    let key = value.as_str().ok_or(LinkError::MalformedValue {
        field: field.to_string(),
        kind: table_name,
        reason: "expected a string lookup key",
    })?;
    table_get(table, table_name, key, field)
}

fn table_get(
    table: &LookupTable,
    table_name: &'static str,
    key: &str,
    field: &str,
) -> Result<String, LinkError> {
    table
        .get(key)
        .map(|entry| entry.id.clone())
        .ok_or_else(|| LinkError::LookupMiss {
            table: table_name,
            key: key.to_string(),
            field: field.to_string(),
        })
}

/// Galleries hold a sequence of items each carrying an image record id in
/// its `value` slot. A non-sequence value yields no reference at all.
fn resolve_gallery(
    field: &str,
    value: &Value,
    ctx: &LinkContext<'_>,
) -> Result<Option<NodeRef>, LinkError> {
    let Some(items) = value.as_array() else {
        return Ok(None);
    };

    let ids = items
        .iter()
        .map(|item| {
            let key =
                item.get("value")
                    .and_then(Value::as_str)
                    .ok_or(LinkError::MalformedValue {
                        field: field.to_string(),
                        kind: "gallery",
                        reason: "gallery items must carry a string `value`",
                    })?;
            table_get(&ctx.tables.images, "images", key, field)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(NodeRef::Many(ids)))
}

/// Resolve `collectionlink` descriptors into predicted node ids.
///
/// A sequence is a one-to-many link and must target a single collection;
/// target ids are locale-qualified with the referencing record's locale.
fn resolve_collection_link(field: &str, value: &Value, lang: &str) -> Result<NodeRef, LinkError> {
    if let Some(entries) = value.as_array() {
        let mut ids = Vec::with_capacity(entries.len());
        let mut target: Option<String> = None;

        for entry in entries {
            let (link, record_id) = link_descriptor(field, entry)?;
            match &target {
                None => target = Some(link.clone()),
                Some(expected) if *expected != link => {
                    return Err(LinkError::MixedCollectionLink {
                        field: field.to_string(),
                        expected: expected.clone(),
                        found: link,
                    });
                }
                Some(_) => {}
            }
            ids.push(derive_id(&link, &record_id, lang));
        }

        Ok(NodeRef::Many(ids))
    } else {
        let (link, record_id) = link_descriptor(field, value)?;
        Ok(NodeRef::One(derive_id(&link, &record_id, lang)))
    }
}

fn link_descriptor(field: &str, value: &Value) -> Result<(String, String), LinkError> {
    let link = value
        .get("link")
        .and_then(Value::as_str)
        .ok_or(LinkError::MalformedValue {
            field: field.to_string(),
            kind: "collectionlink",
            reason: "link descriptor missing string `link`",
        })?;
    let record_id = value
        .get("_id")
        .and_then(Value::as_str)
        .ok_or(LinkError::MalformedValue {
            field: field.to_string(),
            kind: "collectionlink",
            reason: "link descriptor missing string `_id`",
        })?;
    Ok((link.to_string(), record_id.to_string()))
}
