//! Prebuilt lookup tables and the structural layout key.
//!
//! The fetch layer builds one node per image, asset, markdown blob and
//! layout *before* collection items are processed, and hands their ids over
//! as lookup tables. This module defines the table shapes and the hash that
//! keys the layout table.
//!
//! ## Layout keys are content-addressed
//!
//! Images, assets and markdown blobs carry a record id the CMS assigned, so
//! their tables key on that id directly. Layouts don't — a layout value is
//! an anonymous JSON structure embedded in the record. Both the table
//! builder and the linker therefore key layouts by a SHA-256 digest of the
//! canonical JSON serialization ([`layout_hash`]). `serde_json` keeps object
//! keys sorted, so structurally equal values serialize identically and hash
//! identically regardless of the key order they arrived in.

use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// One entry in a lookup table. Extra attributes on the source object are
/// ignored; only the prebuilt node's id matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupEntry {
    pub id: String,
}

/// Mapping from lookup key to prebuilt node entry.
pub type LookupTable = HashMap<String, LookupEntry>;

/// The four prebuilt tables the field linkers resolve against.
///
/// Owned by the fetch layer, read-only here, and assumed complete: every
/// key referenced by input data must exist. A miss is a precondition
/// violation and surfaces as [`crate::link::LinkError::LookupMiss`].
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    /// Keyed by image record id.
    pub images: LookupTable,
    /// Keyed by asset record id.
    pub assets: LookupTable,
    /// Keyed by markdown record id.
    pub markdowns: LookupTable,
    /// Keyed by [`layout_hash`] of the layout value.
    pub layouts: LookupTable,
}

/// Structural key for a layout value: SHA-256 hex of its canonical JSON.
///
/// Stable across process runs and across structurally-equal values built in
/// different key orders. The external layout-table builder must key its
/// table with this same function.
pub fn layout_hash(value: &Value) -> String {
    let digest = Sha256::digest(value.to_string().as_bytes());
    format!("{:x}", digest)
}
