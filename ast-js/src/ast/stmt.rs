use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

use super::expr::Expr;
use super::node::Node;
use super::pat::FuncName;
use super::pat::Pat;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, Deserialize, TryInto)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Expr(Node<ExprStmt>),
  If(Node<IfStmt>),
  Return(Node<ReturnStmt>),
  While(Node<WhileStmt>),

  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct FuncDecl {
  // Name can be omitted; an anonymous function declaration introduces no
  // binding.
  pub name: Option<Node<FuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct Func {
  pub params: Vec<Node<ParamDecl>>,
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct ParamDecl {
  pub pattern: Node<PatDecl>,
}

// A pattern in declaration position (var/let/const declarators, function
// parameters), as opposed to a pattern in an expression (e.g. assignment
// target). The distinction is what lets the analyser treat the former as
// bindings and the latter as writes.
#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub initializer: Option<Node<Expr>>,
}

/// Declaration keyword. The analyser does not model block-scoped binding
/// semantics; the mode only affects emitted text.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, Drive, DriveMut)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}
