use ahash::HashMap;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Event;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// Type-keyed side table attached to every node. Analyses use it to attach
/// their own data (ids, scopes) without owning the AST.
#[derive(Default)]
pub struct NodeAssocData {
  // Make Node movable across threads by bounding values to Send + Sync too.
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).map(|v| v.downcast_ref().unwrap())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::from(v));
  }
}

// Driven as a leaf so blanket `NodeAssocData(enter)` visitor hooks fire once
// per node. The field is declared after `stx` in `Node`, so the hook fires
// after the node's subtree has been driven.
impl Drive for NodeAssocData {
  fn drive<V: Visitor>(&self, visitor: &mut V) {
    visitor.visit(self, Event::Enter);
    visitor.visit(self, Event::Exit);
  }
}

impl DriveMut for NodeAssocData {
  fn drive_mut<V: VisitorMut>(&mut self, visitor: &mut V) {
    visitor.visit(self, Event::Enter);
    visitor.visit(self, Event::Exit);
  }
}

/// A syntax node: boxed syntax plus associated data. Nodes carry no source
/// locations; positions belong to the external parser collaborator and are not
/// part of the interchange format.
#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  pub stx: Box<S>,
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(stx: S) -> Node<S> {
    Node {
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Maps the syntax, keeping the associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

impl<'de, S: Deserialize<'de> + Drive + DriveMut> Deserialize<'de> for Node<S> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Node::new(S::deserialize(deserializer)?))
  }
}

#[cfg(test)]
mod tests {
  use crate::ast::node::NodeAssocData;

  #[test]
  fn test_node_assoc_data() {
    struct MyType(u32);
    let mut assoc = NodeAssocData::default();
    assoc.set(MyType(32));
    let v = assoc.get::<MyType>().unwrap();
    assert_eq!(v.0, 32);
  }
}
