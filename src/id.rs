//! Deterministic node-identifier derivation.
//!
//! Every node id is a pure function of `(collection name, record id,
//! locale)`. This is what makes collection links resolvable without looking
//! anything up: a referencing record can predict the id of a target node
//! that hasn't been built yet — or never will be — from the link descriptor
//! alone.
//!
//! ## Locale qualification
//!
//! Records tagged with the locale sentinel `"any"` are locale-invariant and
//! keep their bare record id. Every other locale appends a `_<lang>` suffix,
//! so the same record translated into two locales yields two distinct nodes:
//!
//! ```text
//! derive_id("posts", "abc", "any")  →  Cockpit__Posts__abc
//! derive_id("posts", "abc", "en")   →  Cockpit__Posts__abc_en
//! derive_id("posts", "abc", "de")   →  Cockpit__Posts__abc_de
//! ```

/// Prefix namespacing all node ids produced by this crate.
pub const TYPE_PREFIX: &str = "Cockpit";

/// Locale sentinel marking a record as locale-invariant.
pub const LOCALE_ANY: &str = "any";

/// Derive the globally stable id for a node.
///
/// Pure: identical inputs yield the identical id across process runs. Any
/// string inputs are valid; there are no error conditions.
pub fn derive_id(collection: &str, record_id: &str, lang: &str) -> String {
    let type_name = type_name(collection);
    if lang == LOCALE_ANY {
        format!("{TYPE_PREFIX}__{type_name}__{record_id}")
    } else {
        format!("{TYPE_PREFIX}__{type_name}__{record_id}_{lang}")
    }
}

/// Node type name for a collection: the collection name with its first
/// character uppercased, so `posts` and `Posts` address the same nodes.
pub fn type_name(collection: &str) -> String {
    let mut chars = collection.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
