//! The two-pass analyser: declare builds the scope tree and attaches ids,
//! resolve records references and discovers dependencies.

use crate::assoc::node_id;
use crate::assoc::scope_of;
use crate::scope::ScopeTree;
use crate::NodeId;
use crate::ScopeId;
use crate::ScopeKind;
use ahash::HashMap;
use ahash::HashSet;
use ast_js::ast::expr::CallExpr;
use ast_js::ast::expr::Expr;
use ast_js::ast::expr::IdExpr;
use ast_js::ast::node::Node;
use ast_js::ast::node::NodeAssocData;
use ast_js::ast::pat::IdPat;
use ast_js::ast::pat::Pat;
use ast_js::ast::stmt::Func;
use ast_js::ast::stmt::FuncDecl;
use ast_js::ast::stmt::PatDecl;
use ast_js::ast::stx::TopLevel;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use diagnostics::Diagnostic;

/// The callee name that marks a dependency-loading call.
pub const DEPENDENCY_LOADER: &str = "require";

type CallExprNode = Node<CallExpr>;
type FuncDeclNode = Node<FuncDecl>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type PatDeclNode = Node<PatDecl>;

/// The result of analysing one module's tree. Ids are bound to the run that
/// produced them and mean nothing to any other run.
#[derive(Debug)]
pub struct ModuleAnalysis {
  pub scopes: ScopeTree,
  /// Dependency ids in first-occurrence order, deduplicated.
  pub dependencies: Vec<String>,
  /// Enclosing scope per node, the arena-keyed form of the per-node scope
  /// query (also attached to each node's assoc data).
  pub node_scopes: HashMap<NodeId, ScopeId>,
}

pub fn analyze(top_level: &mut Node<TopLevel>) -> ModuleAnalysis {
  let (analysis, _) = analyze_with_diagnostics(top_level);
  analysis
}

pub fn analyze_with_diagnostics(
  top_level: &mut Node<TopLevel>,
) -> (ModuleAnalysis, Vec<Diagnostic>) {
  let mut ids = NodeIdAllocator::default();
  let root = ids.ensure(&mut top_level.assoc);

  let mut declare = DeclareVisitor::new(ScopeTree::new(root), ids);
  top_level.drive_mut(&mut declare);
  let (mut scopes, node_scopes, diagnostics) = declare.finish();

  let mut resolve = ResolveVisitor::new(&mut scopes);
  top_level.drive(&mut resolve);
  let dependencies = resolve.finish();

  (
    ModuleAnalysis {
      scopes,
      dependencies,
      node_scopes,
    },
    diagnostics,
  )
}

/// Hands out dense ids lazily; a node keeps the first id it was given.
#[derive(Default)]
struct NodeIdAllocator {
  next: u32,
}

impl NodeIdAllocator {
  fn ensure(&mut self, assoc: &mut NodeAssocData) -> NodeId {
    if let Some(id) = node_id(assoc) {
      return id;
    }
    let id = NodeId::from_raw(self.next);
    self.next += 1;
    assoc.set(id);
    id
  }
}

/// How identifier patterns under the innermost `PatDecl` are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatDeclRole {
  /// Simple identifier: declare it in the current scope.
  Declare,
  /// Destructuring pattern: analysis skips it, bindings included.
  Skip,
}

#[derive(VisitorMut)]
#[visitor(
  FuncDeclNode(enter),
  FuncNode(enter, exit),
  PatDeclNode(enter, exit),
  IdPatNode(enter),
  NodeAssocData(enter)
)]
struct DeclareVisitor {
  scopes: ScopeTree,
  scope_stack: Vec<ScopeId>,
  pat_decl_stack: Vec<PatDeclRole>,
  ids: NodeIdAllocator,
  node_scopes: HashMap<NodeId, ScopeId>,
  diagnostics: Vec<Diagnostic>,
}

impl DeclareVisitor {
  fn new(scopes: ScopeTree, ids: NodeIdAllocator) -> Self {
    let root = scopes.root();
    Self {
      scopes,
      scope_stack: vec![root],
      pat_decl_stack: Vec::new(),
      ids,
      node_scopes: HashMap::default(),
      diagnostics: Vec::new(),
    }
  }

  fn finish(self) -> (ScopeTree, HashMap<NodeId, ScopeId>, Vec<Diagnostic>) {
    (self.scopes, self.node_scopes, self.diagnostics)
  }

  fn current_scope(&self) -> ScopeId {
    *self.scope_stack.last().unwrap()
  }

  fn enter_func_decl_node(&mut self, node: &mut FuncDeclNode) {
    // The name binds in the enclosing scope, not the function's own scope.
    if let Some(name) = &mut node.stx.name {
      let id = self.ids.ensure(&mut name.assoc);
      let scope = self.current_scope();
      self.scopes.add_declaration(scope, &name.stx.name, id);
    }
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    let id = self.ids.ensure(&mut node.assoc);
    let scope = self
      .scopes
      .new_scope(self.current_scope(), ScopeKind::Function, id);
    self.scope_stack.push(scope);
  }

  fn exit_func_node(&mut self, _node: &mut FuncNode) {
    self.scope_stack.pop();
  }

  fn enter_pat_decl_node(&mut self, node: &mut PatDeclNode) {
    let role = match node.stx.pat.stx.as_ref() {
      Pat::Id(_) => PatDeclRole::Declare,
      Pat::Arr(_) | Pat::Obj(_) => {
        self.diagnostics.push(Diagnostic::warning(
          "SC0001",
          "destructuring pattern in declaration position was skipped; its bindings are not declared",
        ));
        PatDeclRole::Skip
      }
    };
    self.pat_decl_stack.push(role);
  }

  fn exit_pat_decl_node(&mut self, _node: &mut PatDeclNode) {
    self.pat_decl_stack.pop();
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    if self.pat_decl_stack.last() != Some(&PatDeclRole::Declare) {
      return;
    }
    let id = self.ids.ensure(&mut node.assoc);
    let scope = self.current_scope();
    self.scopes.add_declaration(scope, &node.stx.name, id);
  }

  // Fires once per node, after its subtree: `assoc` is driven as a leaf and
  // declared after `stx`. A function node therefore maps to the scope it
  // created, which is still on the stack here.
  fn enter_node_assoc_data(&mut self, assoc: &mut NodeAssocData) {
    let id = self.ids.ensure(assoc);
    let scope = self.current_scope();
    assoc.set(scope);
    self.node_scopes.insert(id, scope);
  }
}

#[derive(Visitor)]
#[visitor(
  CallExprNode(enter),
  IdExprNode(enter),
  IdPatNode(enter),
  PatDeclNode(enter, exit)
)]
struct ResolveVisitor<'a> {
  scopes: &'a mut ScopeTree,
  dependencies: Vec<String>,
  seen_dependencies: HashSet<String>,
  pat_decl_depth: usize,
}

impl<'a> ResolveVisitor<'a> {
  fn new(scopes: &'a mut ScopeTree) -> Self {
    Self {
      scopes,
      dependencies: Vec::new(),
      seen_dependencies: HashSet::default(),
      pat_decl_depth: 0,
    }
  }

  fn finish(self) -> Vec<String> {
    self.dependencies
  }

  fn add_reference(&mut self, assoc: &NodeAssocData, name: &str, write: bool) {
    // Both ids were attached by the declare pass; a node without them is
    // outside this run and contributes nothing.
    let (Some(scope), Some(node)) = (scope_of(assoc), node_id(assoc)) else {
      return;
    };
    self.scopes.add_reference(scope, name, node, write);
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.add_reference(&node.assoc, &node.stx.name, false);
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    // Inside a `PatDecl` the identifier is a binding, already handled by the
    // declare pass; elsewhere it is an assignment target, i.e. a write.
    if self.pat_decl_depth > 0 {
      return;
    }
    self.add_reference(&node.assoc, &node.stx.name, true);
  }

  fn enter_pat_decl_node(&mut self, _node: &PatDeclNode) {
    self.pat_decl_depth += 1;
  }

  fn exit_pat_decl_node(&mut self, _node: &PatDeclNode) {
    self.pat_decl_depth -= 1;
  }

  // The dependency rule is purely syntactic: a callee identifier named
  // `require` with exactly one string-literal argument. Shadowing
  // declarations do not exempt a call.
  fn enter_call_expr_node(&mut self, node: &CallExprNode) {
    let Expr::Id(callee) = node.stx.callee.stx.as_ref() else {
      return;
    };
    if callee.stx.name != DEPENDENCY_LOADER {
      return;
    }
    let [argument] = node.stx.arguments.as_slice() else {
      return;
    };
    let Expr::LitStr(lit) = argument.stx.as_ref() else {
      return;
    };
    if self.seen_dependencies.insert(lit.stx.value.clone()) {
      self.dependencies.push(lit.stx.value.clone());
    }
  }
}
