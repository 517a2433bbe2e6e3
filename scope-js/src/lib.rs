//! Lexical scope analysis for pre-parsed module trees.
//!
//! [`analyze()`] runs two visitor passes over one module's tree:
//!
//! - The declare pass builds a [`scope::ScopeTree`] (an arena of scopes keyed
//!   by [`ScopeId`]), records declarations for simple-identifier binding
//!   targets, and attaches a [`NodeId`] and the enclosing [`ScopeId`] to every
//!   node's [`ast_js::ast::node::NodeAssocData`] so downstream consumers can
//!   query scope information without owning the AST.
//! - The resolve pass records identifier references against their enclosing
//!   scope and discovers inter-module dependencies from dependency-loader
//!   calls.
//!
//! Node ids are allocated lazily during one analysis run and are meaningless
//! outside of it; a visitor value is exclusive to one traversal, so
//! independent modules can be analysed in parallel by independent runs.
//!
//! References that resolve to no declaration anywhere on the scope chain are
//! not errors: they stay recorded and are queryable via
//! [`scope::ScopeTree::unresolved_references`], modelling free and
//! host-global variables.

pub mod analyze;
pub mod assoc;
pub mod scope;

pub use analyze::analyze;
pub use analyze::analyze_with_diagnostics;
pub use analyze::ModuleAnalysis;

/// Identifies a scope within one [`scope::ScopeTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
  pub const fn raw(self) -> u32 {
    self.0
  }

  pub const fn from_raw(raw: u32) -> Self {
    ScopeId(raw)
  }
}

/// Identifies a syntax node within one analysis run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
  pub const fn raw(self) -> u32 {
    self.0
  }

  pub const fn from_raw(raw: u32) -> Self {
    NodeId(raw)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
  /// The module's top level.
  Program,
  /// A function body, including its parameters.
  Function,
  /// Reserved: non-function block nesting currently shares the enclosing
  /// function or program scope.
  Block,
}
