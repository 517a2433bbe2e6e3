use bundle_js::graph::ModuleGraph;
use proptest::prelude::*;

// Module bodies drawn from an alphabet that cannot collide with the runtime
// scaffolding markers asserted on below.
const CODE: &str = "[a-z =0-9;]{0,24}";
const ID: &str = "[a-z]{1,6}\\.js";

proptest! {
  #[test]
  fn generate_is_byte_deterministic(
    modules in proptest::collection::btree_map(ID, CODE, 1..8),
    entry in ID,
  ) {
    let mut first = ModuleGraph::new(entry.as_str());
    let mut second = ModuleGraph::new(entry.as_str());
    for (id, code) in &modules {
      first.add_module(id, code);
      second.add_module(id, code);
    }
    // Identical construction and repeated calls both yield identical bytes.
    prop_assert_eq!(first.generate(), second.generate());
    prop_assert_eq!(first.generate(), first.generate());
  }

  #[test]
  fn one_factory_entry_per_registered_module(
    modules in proptest::collection::btree_map(ID, CODE, 1..8),
    entry in ID,
  ) {
    let mut graph = ModuleGraph::new(entry.as_str());
    for (id, code) in &modules {
      graph.add_module(id, code);
    }
    let bundle = graph.generate();
    let factories = bundle.matches(": function(module, exports, require) {").count();
    prop_assert_eq!(factories, modules.len());
    // Exactly one trailing entry invocation.
    prop_assert_eq!(bundle.matches("\n  require(").count(), 1);
    let closing = "})({});";
    prop_assert!(bundle.ends_with(closing));
  }

  #[test]
  fn reregistration_never_grows_the_graph(
    modules in proptest::collection::vec((ID, CODE), 1..16),
  ) {
    let mut graph = ModuleGraph::new("entry.js");
    let mut unique = std::collections::BTreeSet::new();
    for (id, code) in &modules {
      graph.add_module(id, code);
      unique.insert(id.clone());
    }
    prop_assert_eq!(graph.len(), unique.len());
  }
}
