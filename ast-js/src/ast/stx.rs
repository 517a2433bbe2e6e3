use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

/// The program root of one module.
#[derive(Debug, Drive, DriveMut, Serialize, Deserialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
