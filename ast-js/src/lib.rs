//! Syntax tree data model for the bundling pipeline.
//!
//! Parsing is an external collaborator: trees arrive pre-built in a
//! `$t`-tagged JSON interchange format and deserialize into
//! [`ast::node::Node`] values. The AST is a closed set of sum types, so an
//! unknown node kind is a deserialization failure at the boundary rather than
//! a condition any analysis has to tolerate.
//!
//! Traversal uses `derive-visitor`: every syntax type derives
//! [`derive_visitor::Drive`]/[`derive_visitor::DriveMut`], and analyses are
//! visitor structs with typed `enter_*`/`exit_*` hooks dispatched at compile
//! time. [`emit`] renders a tree back to JavaScript text.

pub mod ast;
pub mod emit;
pub mod num;
pub mod operator;
