use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

use crate::num::JsNumber;
use crate::operator::OperatorName;

use super::node::Node;
use super::pat::ArrPat;
use super::pat::IdPat;
use super::pat::ObjPat;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, Deserialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),

  // Literals.
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitStr(Node<LitStrExpr>),

  // Patterns in assignment-target position.
  ArrPat(Node<ArrPat>),
  IdPat(Node<IdPat>),
  ObjPat(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

/// An identifier in value (read) position.
#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct MemberExpr {
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
