//! The module graph: registered modules in insertion order, their dependency
//! edges, and the bundle generator.

use crate::external::ExternalHost;
use crate::external::ExternalModule;
use ahash::HashMap;
use ast_js::emit::escape::string_literal;
use diagnostics::Diagnostic;
use itertools::Itertools;

/// One registered module: its body text and its outgoing dependency edges in
/// first-occurrence order.
#[derive(Clone, Debug)]
pub struct ModuleRecord {
  pub id: String,
  pub code: String,
  pub dependencies: Vec<String>,
  /// True for entries appended by [`ModuleGraph::link_externals`].
  pub external: bool,
}

/// Modules keyed by id, iterated in registration order. The entry module id
/// is fixed at construction; everything else accumulates through
/// registration, dependency edges and external linking.
///
/// Anomalies (overwrites, dangling edges, a missing entry) never fail a
/// call: they are recorded and surfaced by [`ModuleGraph::strict_diagnostics`].
#[derive(Debug, Default)]
pub struct ModuleGraph {
  entry: String,
  records: Vec<ModuleRecord>,
  index: HashMap<String, usize>,
  /// (module, dependency) edges whose module was never registered.
  dangling: Vec<(String, String)>,
  /// Ids whose registration replaced an earlier one.
  overwritten: Vec<String>,
}

impl ModuleGraph {
  pub fn new(entry: impl Into<String>) -> Self {
    Self {
      entry: entry.into(),
      ..Default::default()
    }
  }

  /// Registers a module with an empty dependency set. Registering an id
  /// again overwrites in place, keeping the original insertion position; the
  /// overwrite is recorded for strict reporting.
  pub fn add_module(&mut self, id: &str, code: &str) {
    if let Some(&i) = self.index.get(id) {
      let record = &mut self.records[i];
      record.code = code.to_string();
      record.dependencies.clear();
      record.external = false;
      self.overwritten.push(id.to_string());
      return;
    }
    self.index.insert(id.to_string(), self.records.len());
    self.records.push(ModuleRecord {
      id: id.to_string(),
      code: code.to_string(),
      dependencies: Vec::new(),
      external: false,
    });
  }

  /// Appends a dependency edge with set semantics. An edge from an
  /// unregistered module is ignored but recorded as dangling.
  pub fn add_dependency(&mut self, module_id: &str, dependency_id: &str) {
    let Some(&i) = self.index.get(module_id) else {
      self
        .dangling
        .push((module_id.to_string(), dependency_id.to_string()));
      return;
    };
    let dependencies = &mut self.records[i].dependencies;
    if !dependencies.iter().any(|d| d == dependency_id) {
      dependencies.push(dependency_id.to_string());
    }
  }

  /// Appends an [`ExternalModule`] for every dependency id with no
  /// registered entry, asking `host` to provide each one. Load failures are
  /// reported (and always surfaced, strict or not); the wrapper entry is
  /// appended either way so the generated bundle stays loadable up to the
  /// missing module.
  pub fn link_externals(&mut self, host: &dyn ExternalHost) -> Vec<Diagnostic> {
    let mut missing = Vec::new();
    for record in &self.records {
      for dependency in &record.dependencies {
        if !self.index.contains_key(dependency) && !missing.contains(dependency) {
          missing.push(dependency.clone());
        }
      }
    }

    let mut diagnostics = Vec::new();
    for request in missing {
      let mut external = ExternalModule::new(request.as_str());
      if !external.load(host) {
        diagnostics.push(
          Diagnostic::error(
            "BD0002",
            format!("cannot load {}", external.identifier()),
          )
          .with_module(request.as_str())
          .with_note("no registered module has this id and the host does not provide it"),
        );
      }
      self.index.insert(request.clone(), self.records.len());
      self.records.push(ModuleRecord {
        id: request,
        code: external.generate(),
        dependencies: Vec::new(),
        external: true,
      });
    }
    diagnostics
  }

  /// Renders the bundle. A pure function of the current entries and their
  /// order: byte-identical across calls.
  pub fn generate(&self) -> String {
    let mut out = String::new();
    out.push_str("(function(modules) {\n");
    out.push_str("  const cache = {};\n");
    out.push_str("  function require(moduleId) {\n");
    // The cache entry is created before the factory runs so cyclic require
    // calls observe the in-progress exports object instead of recursing.
    out.push_str("    if (cache[moduleId]) {\n");
    out.push_str("      return cache[moduleId].exports;\n");
    out.push_str("    }\n");
    out.push_str("    const module = { exports: {} };\n");
    out.push_str("    cache[moduleId] = module;\n");
    out.push_str("    modules[moduleId](module, module.exports, require);\n");
    out.push_str("    return module.exports;\n");
    out.push_str("  }\n\n");

    out.push_str("  const modules = {\n");
    let entries = self
      .records
      .iter()
      .map(|record| {
        format!(
          "    {}: function(module, exports, require) {{\n    {}\n  }}",
          string_literal(&record.id),
          record.code,
        )
      })
      .join(",\n");
    out.push_str(&entries);
    out.push_str("\n  };\n\n");

    out.push_str(&format!("  require({});\n", string_literal(&self.entry)));
    out.push_str("})({});");
    out
  }

  /// Diagnostics for the anomalies tolerated during graph construction.
  pub fn strict_diagnostics(&self) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (module, dependency) in &self.dangling {
      diagnostics.push(
        Diagnostic::error(
          "BD0001",
          format!("dependency on \"{dependency}\" recorded for unregistered module \"{module}\""),
        )
        .with_module(module.as_str()),
      );
    }
    for id in &self.overwritten {
      diagnostics.push(
        Diagnostic::warning(
          "BD0003",
          format!("module \"{id}\" was registered again; the later registration replaced the earlier one"),
        )
        .with_module(id.as_str()),
      );
    }
    if !self.index.contains_key(&self.entry) {
      diagnostics.push(Diagnostic::error(
        "BD0004",
        format!("entry module \"{}\" is not registered", self.entry),
      ));
    }
    diagnostics
  }

  pub fn entry(&self) -> &str {
    &self.entry
  }

  pub fn module(&self, id: &str) -> Option<&ModuleRecord> {
    self.index.get(id).map(|&i| &self.records[i])
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Iterates records in registration order.
  pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
    self.records.iter()
  }
}
