use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

use super::expr::Expr;
use super::node::Node;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, Deserialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

/// An identifier in binding or assignment-target position.
#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ArrPat {
  // Unnamed elements can exist (elisions).
  pub elements: Vec<Option<ArrPatElem>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ObjPatProp {
  #[drive(skip)]
  pub key: String,
  pub target: Node<Pat>,
}

// Not really a pattern but functions similarly so kept here in pat.rs. A
// separate node type so declaring a function name stays distinct from using
// one.
#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct FuncName {
  #[drive(skip)]
  pub name: String,
}
