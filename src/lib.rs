//! # Cockpit Graph
//!
//! Normalizes hierarchical collection-item records from a
//! [Cockpit](https://getcockpit.com/) headless CMS into a flat graph of
//! linked, typed nodes consumable by a static-site data layer.
//!
//! # Architecture: One Pass, Three Concerns
//!
//! Given a tree of collection-item records, one build pass per top-level
//! record produces a normalized node for the record and every nested child
//! and embedded object, all wired together by id references:
//!
//! ```text
//! raw record tree
//!   → build children depth-first          (build)
//!   → derive a stable node id             (id)
//!   → rewrite typed fields to references  (link, against lookup tables)
//!   → cross-link parent/child ids, emit   (build → injected sink)
//! ```
//!
//! The pass is synchronous and deterministic: same records, same tables,
//! same nodes — which is what lets a record link to a node that hasn't been
//! built yet by *predicting* its id.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`build`] | Recursive node construction, parent/child wiring, emission to the sink |
//! | [`link`] | The six field-type linking rules, value → reference rewriting |
//! | [`id`] | Stable node-id derivation with locale qualification |
//! | [`lookup`] | Prebuilt lookup table shapes and the structural layout key |
//! | [`types`] | Record/field input shapes and node output shapes |
//!
//! # Design Decisions
//!
//! ## Typed Link Kinds Over Tag Strings
//!
//! The CMS tags fields with type strings (`"image"`, `"collectionlink"`,
//! ...). Those tags are folded into the closed [`types::LinkKind`] enum at
//! the edge, so the linking rules are an exhaustive `match` — adding a kind
//! without a rule is a compile error, not a silently-skipped field.
//!
//! ## Pure Field Transforms
//!
//! Linking consumes a [`types::Field`] and produces a [`types::NodeField`]
//! instead of rewriting fields on a shared node in place. A validation
//! failure therefore aborts with the input intact — there is no
//! half-rewritten node to reason about.
//!
//! ## Id References, Not Back-Pointers
//!
//! Parent/child structure is stored as id strings on otherwise independent
//! nodes. No node owns another, so the output graph is a flat stream with
//! no reference cycles, handed to the sink one finished node at a time.
//!
//! ## Explicit Collaborators
//!
//! The node sink and the object sub-node factory are trait parameters
//! threaded through every build call, never ambient state. Tests run
//! against in-memory stand-ins; production wires in the real registration
//! sink and object factory.

pub mod build;
pub mod id;
pub mod link;
pub mod lookup;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use build::{BuildError, NodeBuilder, NodeSink};
pub use id::{LOCALE_ANY, TYPE_PREFIX, derive_id};
pub use link::{LinkContext, LinkError, ObjectEmitter};
pub use lookup::{LookupEntry, LookupTable, LookupTables, layout_hash};
pub use types::{Field, LinkKind, Node, NodeField, NodeRef, Record};
