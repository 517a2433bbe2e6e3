//! Bundles pre-parsed JavaScript module trees into one self-executing script.
//!
//! The pipeline: each input tree is analysed (scope-js attaches scope data
//! and discovers `require("<id>")` dependencies), registered in a
//! [`graph::ModuleGraph`], dependency ids with no registered module are
//! linked as [`external::ExternalModule`]s against the host, and the graph is
//! rendered into a module-registry runtime with a memoizing loader.
//!
//! All diagnostics are non-fatal: the bundle is always produced. Tolerant
//! mode (the default) reports only external load failures; strict mode also
//! surfaces skipped destructuring bindings, dangling dependency edges,
//! registration overwrites and a missing entry module.
//!
//! ```
//! use ast_js::ast::node::Node;
//! use ast_js::ast::stx::TopLevel;
//! use bundle_js::{bundle, BundleOptions, ModuleInput};
//! use bundle_js::external::HostCapabilities;
//!
//! let tree: Node<TopLevel> = serde_json::from_str(r#"{"body": []}"#).unwrap();
//! let output = bundle(
//!   &BundleOptions::default(),
//!   "a.js",
//!   vec![ModuleInput::new("a.js", tree)],
//!   &HostCapabilities::new(),
//! );
//! assert!(output.code.ends_with("require(\"a.js\");\n})({});"));
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod external;
pub mod graph;

use ast_js::ast::node::Node;
use ast_js::ast::stx::TopLevel;
use ast_js::emit::emit_top_level;
use diagnostics::sort_diagnostics;
use diagnostics::Diagnostic;
use external::ExternalHost;
use graph::ModuleGraph;
use scope_js::analyze_with_diagnostics;

#[derive(Clone, Copy, Debug, Default)]
pub struct BundleOptions {
  /// Surface tolerated anomalies (SC0001, BD0001, BD0003, BD0004) as
  /// diagnostics. External load failures are reported regardless.
  pub strict: bool,
}

/// One module to bundle: its id, its pre-parsed tree, and optionally its raw
/// body text. When `code` is absent the body is rendered from the tree.
#[derive(Debug)]
pub struct ModuleInput {
  pub id: String,
  pub top_level: Node<TopLevel>,
  pub code: Option<String>,
}

impl ModuleInput {
  pub fn new(id: impl Into<String>, top_level: Node<TopLevel>) -> Self {
    Self {
      id: id.into(),
      top_level,
      code: None,
    }
  }

  pub fn with_code(mut self, code: impl Into<String>) -> Self {
    self.code = Some(code.into());
    self
  }
}

#[derive(Debug)]
pub struct BundleOutput {
  pub code: String,
  /// Sorted into stable reporting order; never fatal.
  pub diagnostics: Vec<Diagnostic>,
}

pub fn bundle(
  options: &BundleOptions,
  entry: &str,
  modules: Vec<ModuleInput>,
  host: &dyn ExternalHost,
) -> BundleOutput {
  let mut graph = ModuleGraph::new(entry);
  let mut analysis_diagnostics = Vec::new();

  for mut input in modules {
    let (analysis, diagnostics) = analyze_with_diagnostics(&mut input.top_level);
    for diagnostic in diagnostics {
      analysis_diagnostics.push(diagnostic.with_module(input.id.as_str()));
    }
    let code = match input.code {
      Some(code) => code,
      None => emit_top_level(&input.top_level),
    };
    graph.add_module(&input.id, &code);
    for dependency in &analysis.dependencies {
      graph.add_dependency(&input.id, dependency);
    }
  }

  let mut diagnostics = graph.link_externals(host);
  if options.strict {
    diagnostics.append(&mut analysis_diagnostics);
    diagnostics.extend(graph.strict_diagnostics());
  }
  sort_diagnostics(&mut diagnostics);

  BundleOutput {
    code: graph.generate(),
    diagnostics,
  }
}
