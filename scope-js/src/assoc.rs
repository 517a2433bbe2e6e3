//! Association helpers for the scope analyser.
//!
//! These let consumers read the ids the analyser attached to the `ast-js`
//! tree via `NodeAssocData`.

use crate::NodeId;
use crate::ScopeId;
use ast_js::ast::node::NodeAssocData;

/// Node id attached by the analyser, if any.
pub fn node_id(assoc: &NodeAssocData) -> Option<NodeId> {
  assoc.get::<NodeId>().copied()
}

/// Scope containing the node, if attached.
pub fn scope_of(assoc: &NodeAssocData) -> Option<ScopeId> {
  assoc.get::<ScopeId>().copied()
}
