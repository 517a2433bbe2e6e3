use ast_js::ast::node::Node;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stx::TopLevel;
use scope_js::analyze;
use scope_js::analyze_with_diagnostics;
use scope_js::assoc::scope_of;
use scope_js::ScopeKind;

fn parse(json: &str) -> Node<TopLevel> {
  serde_json::from_str(json).expect("tree deserializes")
}

// const x = 1;
// function f(a) { var b; return a + b + x; }
// x = f(2);
const PROGRAM: &str = r#"{"body": [
  {"$t": "VarDecl", "mode": "Const", "declarators": [
    {"pattern": {"pat": {"$t": "Id", "name": "x"}},
     "initializer": {"$t": "LitNum", "value": 1.0}}
  ]},
  {"$t": "FunctionDecl",
   "name": {"name": "f"},
   "func": {
     "params": [{"pattern": {"pat": {"$t": "Id", "name": "a"}}}],
     "body": [
       {"$t": "VarDecl", "mode": "Var", "declarators": [
         {"pattern": {"pat": {"$t": "Id", "name": "b"}}}
       ]},
       {"$t": "Return", "value": {"$t": "Binary", "operator": "Addition",
         "left": {"$t": "Binary", "operator": "Addition",
           "left": {"$t": "Id", "name": "a"}, "right": {"$t": "Id", "name": "b"}},
         "right": {"$t": "Id", "name": "x"}}}
     ]
   }},
  {"$t": "Expr", "expr": {"$t": "Binary", "operator": "Assignment",
    "left": {"$t": "IdPat", "name": "x"},
    "right": {"$t": "Call", "callee": {"$t": "Id", "name": "f"},
      "arguments": [{"$t": "LitNum", "value": 2.0}]}}}
]}"#;

#[test]
fn declares_into_the_right_scopes() {
  let mut top = parse(PROGRAM);
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();

  assert_eq!(scopes.kind(root), ScopeKind::Program);
  assert!(scopes.has_own_declaration(root, "x"));
  assert!(scopes.has_own_declaration(root, "f"));

  let func = scopes.children(root)[0];
  assert_eq!(scopes.kind(func), ScopeKind::Function);
  assert!(scopes.has_own_declaration(func, "a"));
  assert!(scopes.has_own_declaration(func, "b"));
  assert!(!scopes.has_own_declaration(func, "x"));

  // Own and inherited, with own precedence.
  let all = scopes.all_declarations(func);
  assert_eq!(all.len(), 4);
  assert_eq!(all["x"].scope, root);
  assert_eq!(all["a"].scope, func);
}

#[test]
fn counts_references_and_marks_writes() {
  let mut top = parse(PROGRAM);
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();
  let func = scopes.children(root)[0];

  // `x`: read inside the function, written at the top level.
  let x = scopes.find_declaration(root, "x").unwrap();
  assert_eq!(x.reference_count, 2);
  assert!(x.modified);

  // `f`: one call, never reassigned.
  let f = scopes.find_declaration(root, "f").unwrap();
  assert_eq!(f.reference_count, 1);
  assert!(!f.modified);

  for name in ["a", "b"] {
    let declaration = scopes.find_declaration(func, name).unwrap();
    assert_eq!(declaration.reference_count, 1);
    assert!(!declaration.modified);
  }

  // Everything resolved; no unresolved references in either scope.
  assert!(scopes.unresolved_references(root).is_empty());
  assert!(scopes.unresolved_references(func).is_empty());
}

#[test]
fn parameters_shadow_outer_declarations() {
  // const a = 1; function f(a) { return a; } — the inner read resolves to
  // the parameter, leaving the outer `a` unreferenced.
  let mut top = parse(
    r#"{"body": [
      {"$t": "VarDecl", "mode": "Const", "declarators": [
        {"pattern": {"pat": {"$t": "Id", "name": "a"}},
         "initializer": {"$t": "LitNum", "value": 1.0}}
      ]},
      {"$t": "FunctionDecl",
       "name": {"name": "f"},
       "func": {
         "params": [{"pattern": {"pat": {"$t": "Id", "name": "a"}}}],
         "body": [{"$t": "Return", "value": {"$t": "Id", "name": "a"}}]
       }}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();
  let func = scopes.children(root)[0];

  let outer = scopes.find_declaration(root, "a").unwrap();
  assert_eq!(outer.reference_count, 0);
  let inner = scopes.find_declaration(func, "a").unwrap();
  assert_eq!(inner.scope, func);
  assert_eq!(inner.reference_count, 1);
}

#[test]
fn discovers_dependencies_in_first_occurrence_order() {
  // Only direct `require("<literal>")` calls count; duplicates collapse to
  // the first occurrence.
  let mut top = parse(
    r#"{"body": [
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": [{"$t": "LitStr", "value": "b.js"}]}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": [{"$t": "LitStr", "value": "c.js"}]}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": [{"$t": "LitStr", "value": "b.js"}]}}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  assert_eq!(analysis.dependencies, vec!["b.js", "c.js"]);
}

#[test]
fn ignores_non_dependency_call_shapes() {
  let mut top = parse(
    r#"{"body": [
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": [{"$t": "LitStr", "value": "a.js"}, {"$t": "LitStr", "value": "b.js"}]}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": [{"$t": "Id", "name": "dynamic"}]}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Id", "name": "require"},
        "arguments": []}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Member", "left": {"$t": "Id", "name": "ctx"}, "right": "require"},
        "arguments": [{"$t": "LitStr", "value": "c.js"}]}}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  assert!(analysis.dependencies.is_empty());
}

#[test]
fn shadowed_require_still_counts() {
  // The rule is syntactic; a local `require` declaration does not exempt the
  // call.
  let mut top = parse(
    r#"{"body": [
      {"$t": "FunctionDecl",
       "name": {"name": "g"},
       "func": {
         "params": [{"pattern": {"pat": {"$t": "Id", "name": "require"}}}],
         "body": [
           {"$t": "Expr", "expr": {"$t": "Call",
             "callee": {"$t": "Id", "name": "require"},
             "arguments": [{"$t": "LitStr", "value": "shadowed.js"}]}}
         ]
       }}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  assert_eq!(analysis.dependencies, vec!["shadowed.js"]);
}

#[test]
fn destructuring_declarators_are_skipped_with_a_warning() {
  // const [a] = xs; a is not declared, and the initializer read of `xs`
  // stays unresolved.
  let mut top = parse(
    r#"{"body": [
      {"$t": "VarDecl", "mode": "Const", "declarators": [
        {"pattern": {"pat": {"$t": "Arr", "elements": [
          {"target": {"$t": "Id", "name": "a"}}
        ]}},
         "initializer": {"$t": "Id", "name": "xs"}}
      ]},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Member", "left": {"$t": "Id", "name": "console"}, "right": "log"},
        "arguments": [{"$t": "Id", "name": "a"}]}}
    ]}"#,
  );
  let (analysis, diagnostics) = analyze_with_diagnostics(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();

  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].code, "SC0001");
  assert_eq!(diagnostics[0].severity, diagnostics::Severity::Warning);

  assert!(!scopes.has_own_declaration(root, "a"));
  // `xs`, `console` and the later read of `a` are all unresolved reads.
  let unresolved = scopes.unresolved_references(root);
  assert_eq!(unresolved.len(), 3);
  assert!(unresolved.iter().all(|r| !r.write));
}

#[test]
fn unresolved_writes_stay_queryable() {
  // y = 1; console.log(y); — `y` is never declared.
  let mut top = parse(
    r#"{"body": [
      {"$t": "Expr", "expr": {"$t": "Binary", "operator": "Assignment",
        "left": {"$t": "IdPat", "name": "y"},
        "right": {"$t": "LitNum", "value": 1.0}}},
      {"$t": "Expr", "expr": {"$t": "Call",
        "callee": {"$t": "Member", "left": {"$t": "Id", "name": "console"}, "right": "log"},
        "arguments": [{"$t": "Id", "name": "y"}]}}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();

  assert!(scopes.find_declaration(root, "y").is_none());
  let unresolved = scopes.unresolved_references(root);
  // BTreeMap name order: console, then both `y` references in source order.
  assert_eq!(unresolved.len(), 3);
  assert!(!unresolved[0].write);
  assert!(unresolved[1].write);
  assert!(!unresolved[2].write);
}

#[test]
fn attaches_scope_ids_to_every_node() {
  let mut top = parse(PROGRAM);
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();
  let func = scopes.children(root)[0];

  assert_eq!(scope_of(&top.assoc), Some(root));

  // The function's statements carry the function scope.
  let Stmt::FunctionDecl(decl) = top.stx.body[1].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert_eq!(scope_of(&decl.stx.func.assoc), Some(func));
  for stmt in &decl.stx.func.stx.body {
    assert_eq!(scope_of(&stmt.assoc), Some(func));
  }

  // Top-level statements carry the root scope.
  assert_eq!(scope_of(&top.stx.body[0].assoc), Some(root));
  assert_eq!(scope_of(&top.stx.body[2].assoc), Some(root));

  // Ids are dense and node_scopes has exactly one entry per node, so node
  // ids are exactly 0..len.
  assert!(!analysis.node_scopes.is_empty());
  for (&node, &scope) in &analysis.node_scopes {
    assert!(node.raw() < analysis.node_scopes.len() as u32);
    assert!(scope.raw() < scopes.len() as u32);
  }
}

#[test]
fn independent_runs_are_self_contained() {
  let mut a = parse(PROGRAM);
  let mut b = parse(PROGRAM);
  let analysis_a = analyze(&mut a);
  let analysis_b = analyze(&mut b);

  assert_eq!(analysis_a.scopes.len(), analysis_b.scopes.len());
  assert_eq!(analysis_a.dependencies, analysis_b.dependencies);
  assert_eq!(analysis_a.node_scopes.len(), analysis_b.node_scopes.len());
}

#[test]
fn nested_functions_nest_scopes() {
  let mut top = parse(
    r#"{"body": [
      {"$t": "FunctionDecl",
       "name": {"name": "outer"},
       "func": {
         "params": [],
         "body": [
           {"$t": "FunctionDecl",
            "name": {"name": "inner"},
            "func": {"params": [], "body": [
              {"$t": "Return", "value": {"$t": "Id", "name": "outer"}}
            ]}}
         ]
       }}
    ]}"#,
  );
  let analysis = analyze(&mut top);
  let scopes = &analysis.scopes;
  let root = scopes.root();
  let outer = scopes.children(root)[0];
  let inner = scopes.children(outer)[0];

  assert_eq!(scopes.parent(inner), Some(outer));
  // `inner`'s name binds in `outer`'s scope, not its own.
  assert!(scopes.has_own_declaration(outer, "inner"));
  assert!(!scopes.has_own_declaration(inner, "inner"));
  // The read of `outer` resolves through two scope hops.
  assert_eq!(scopes.find_declaration(root, "outer").unwrap().reference_count, 1);
  assert_eq!(scopes.declaring_scope(inner, "outer"), Some(root));
}
