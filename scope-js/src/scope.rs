//! The arena-backed scope tree: one node per lexical scope, each holding its
//! declarations and references and parented to the enclosing scope.
//!
//! Scope maps are `BTreeMap`s keyed by name so iteration is deterministic.

use crate::NodeId;
use crate::ScopeId;
use crate::ScopeKind;
use ahash::HashMap;
use std::collections::BTreeMap;

/// A name binding's record: definition site, mutation flag, usage count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
  pub name: String,
  /// The binding identifier's pattern node.
  pub node: NodeId,
  /// The scope owning the binding.
  pub scope: ScopeId,
  /// True once any write reference resolved to this declaration.
  pub modified: bool,
  pub reference_count: u32,
}

/// A single use of a name, tagged read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
  pub node: NodeId,
  /// The scope the reference occurred in.
  pub scope: ScopeId,
  pub write: bool,
}

#[derive(Debug)]
pub struct ScopeData {
  pub kind: ScopeKind,
  pub parent: Option<ScopeId>,
  /// The node that created this scope (program root or function).
  pub node: NodeId,
  pub declarations: BTreeMap<String, Declaration>,
  pub references: BTreeMap<String, Vec<Reference>>,
  pub children: Vec<ScopeId>,
}

/// Hierarchical symbol table for one module, stored as an arena indexed by
/// [`ScopeId`]. The root Program scope is always [`ScopeTree::ROOT`]; the
/// parent/child relation is acyclic by construction since scopes are only
/// created during a single top-down traversal.
#[derive(Debug)]
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
}

impl ScopeTree {
  pub const ROOT: ScopeId = ScopeId::from_raw(0);

  pub fn new(root_node: NodeId) -> Self {
    ScopeTree {
      scopes: vec![ScopeData {
        kind: ScopeKind::Program,
        parent: None,
        node: root_node,
        declarations: BTreeMap::new(),
        references: BTreeMap::new(),
        children: Vec::new(),
      }],
    }
  }

  pub fn root(&self) -> ScopeId {
    Self::ROOT
  }

  pub fn new_scope(&mut self, parent: ScopeId, kind: ScopeKind, node: NodeId) -> ScopeId {
    let id = ScopeId::from_raw(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      kind,
      parent: Some(parent),
      node,
      declarations: BTreeMap::new(),
      references: BTreeMap::new(),
      children: Vec::new(),
    });
    self.scope_mut(parent).children.push(id);
    id
  }

  /// Inserts a declaration with a fresh record. Redeclaring a name in the
  /// same scope overwrites the previous record (last-write-wins); that is the
  /// defined policy, not an error.
  pub fn add_declaration(&mut self, scope: ScopeId, name: &str, node: NodeId) {
    self.scope_mut(scope).declarations.insert(name.to_string(), Declaration {
      name: name.to_string(),
      node,
      scope,
      modified: false,
      reference_count: 0,
    });
  }

  /// Appends a reference to this scope's reference list, then resolves the
  /// name from this scope. A resolved reference bumps the declaration's
  /// count, and a write marks it modified; the count never decreases. An
  /// unresolved reference stays recorded (see
  /// [`ScopeTree::unresolved_references`]).
  pub fn add_reference(&mut self, scope: ScopeId, name: &str, node: NodeId, write: bool) {
    self
      .scope_mut(scope)
      .references
      .entry(name.to_string())
      .or_default()
      .push(Reference { node, scope, write });

    if let Some(owner) = self.declaring_scope(scope, name) {
      let declaration = self
        .scope_mut(owner)
        .declarations
        .get_mut(name)
        .expect("declaring scope has the declaration");
      declaration.reference_count += 1;
      if write {
        declaration.modified = true;
      }
    }
  }

  /// Returns the nearest enclosing declaration of `name`, starting at
  /// `scope`. Walks the parent chain at most `depth(scope)` times.
  pub fn find_declaration(&self, scope: ScopeId, name: &str) -> Option<&Declaration> {
    let owner = self.declaring_scope(scope, name)?;
    self.scope(owner).declarations.get(name)
  }

  /// Like [`ScopeTree::find_declaration`], but returns the owning scope.
  pub fn declaring_scope(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = self.scope(id);
      if data.declarations.contains_key(name) {
        return Some(id);
      }
      current = data.parent;
    }
    None
  }

  /// Union of own and inherited declarations, own taking precedence on name
  /// collision (shadowing semantics).
  pub fn all_declarations(&self, scope: ScopeId) -> HashMap<&str, &Declaration> {
    let mut out = HashMap::default();
    let mut current = Some(scope);
    while let Some(id) = current {
      let data = self.scope(id);
      for (name, declaration) in &data.declarations {
        out.entry(name.as_str()).or_insert(declaration);
      }
      current = data.parent;
    }
    out
  }

  /// Membership test restricted to `scope` itself; no chain walk.
  pub fn has_own_declaration(&self, scope: ScopeId, name: &str) -> bool {
    self.scope(scope).declarations.contains_key(name)
  }

  /// References recorded in this scope whose name resolves to no declaration
  /// anywhere on the chain. Does not recurse into child scopes. Deterministic
  /// order: name order, then insertion order.
  pub fn unresolved_references(&self, scope: ScopeId) -> Vec<&Reference> {
    let mut out = Vec::new();
    for (name, references) in &self.scope(scope).references {
      if self.declaring_scope(scope, name).is_none() {
        out.extend(references.iter());
      }
    }
    out
  }

  pub fn kind(&self, scope: ScopeId) -> ScopeKind {
    self.scope(scope).kind
  }

  pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
    self.scope(scope).parent
  }

  pub fn children(&self, scope: ScopeId) -> &[ScopeId] {
    &self.scope(scope).children
  }

  /// The node that created the scope.
  pub fn node_of(&self, scope: ScopeId) -> NodeId {
    self.scope(scope).node
  }

  pub fn scope(&self, id: ScopeId) -> &ScopeData {
    self.scopes.get(id.raw() as usize).expect("scope exists for id")
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  /// Iterates scopes in id (creation) order.
  pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &ScopeData)> {
    self
      .scopes
      .iter()
      .enumerate()
      .map(|(i, data)| (ScopeId::from_raw(i as u32), data))
  }

  fn scope_mut(&mut self, id: ScopeId) -> &mut ScopeData {
    self.scopes.get_mut(id.raw() as usize).expect("scope exists for id")
  }
}
