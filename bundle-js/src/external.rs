//! External modules: dependency ids no registered module satisfies, fulfilled
//! by the host runtime at execution time.

use ast_js::emit::escape::string_literal;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// An opaque bundling-time handle describing a host-provided binding. The
/// bundler never inspects the implementation; holding the handle only proves
/// the host agreed to provide it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostExports {
  description: String,
}

impl HostExports {
  pub fn new(description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
    }
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

/// A failed host load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError {
  pub request: String,
  pub reason: String,
}

impl Display for HostError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "cannot load external module \"{}\": {}", self.request, self.reason)
  }
}

impl Error for HostError {}

/// The host-runtime collaborator: asked to provide every dependency id the
/// graph cannot satisfy itself.
pub trait ExternalHost {
  fn load(&self, request: &str) -> Result<HostExports, HostError>;
}

/// An allowlist of module names the host provides. The empty allowlist fails
/// every request, which is the right default for a host that promises
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct HostCapabilities {
  provided: BTreeSet<String>,
}

impl HostCapabilities {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn provide(mut self, name: impl Into<String>) -> Self {
    self.provided.insert(name.into());
    self
  }

  pub fn provides(&self, name: &str) -> bool {
    self.provided.contains(name)
  }
}

impl FromIterator<String> for HostCapabilities {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self {
      provided: iter.into_iter().collect(),
    }
  }
}

impl ExternalHost for HostCapabilities {
  fn load(&self, request: &str) -> Result<HostExports, HostError> {
    if self.provided.contains(request) {
      Ok(HostExports::new(format!("host-provided module \"{request}\"")))
    } else {
      Err(HostError {
        request: request.to_string(),
        reason: "not in the host's capability list".to_string(),
      })
    }
  }
}

/// A module fulfilled by the host rather than by registered code. Its body in
/// the bundle is a thin forwarding wrapper; no foreign code is inlined.
#[derive(Clone, Debug)]
pub struct ExternalModule {
  pub request: String,
  pub exports: Option<HostExports>,
}

impl ExternalModule {
  pub fn new(request: impl Into<String>) -> Self {
    Self {
      request: request.into(),
      exports: None,
    }
  }

  /// Asks the host for the implementation. On success the returned handle is
  /// stored and true is returned; on failure `exports` stays unset and false
  /// is returned. Nothing raises; the caller reports via diagnostics.
  pub fn load(&mut self, host: &dyn ExternalHost) -> bool {
    match host.load(&self.request) {
      Ok(exports) => {
        self.exports = Some(exports);
        true
      }
      Err(_) => false,
    }
  }

  pub fn is_loaded(&self) -> bool {
    self.exports.is_some()
  }

  /// The module's body in the bundle.
  pub fn generate(&self) -> String {
    format!("module.exports = require({});", string_literal(&self.request))
  }

  /// External modules have no dependencies of their own to resolve.
  pub fn dependencies(&self) -> &[String] {
    &[]
  }

  /// Display form for diagnostics.
  pub fn identifier(&self) -> String {
    format!("external \"{}\"", self.request)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_stores_exports_on_success() {
    let host = HostCapabilities::new().provide("path");
    let mut module = ExternalModule::new("path");
    assert!(module.load(&host));
    assert!(module.is_loaded());
  }

  #[test]
  fn load_leaves_exports_unset_on_failure() {
    let host = HostCapabilities::new();
    let mut module = ExternalModule::new("path");
    assert!(!module.load(&host));
    assert!(!module.is_loaded());
    assert!(module.dependencies().is_empty());
  }

  #[test]
  fn generates_a_forwarding_wrapper() {
    let module = ExternalModule::new("node:fs");
    assert_eq!(module.generate(), "module.exports = require(\"node:fs\");");
    assert_eq!(module.identifier(), "external \"node:fs\"");
  }

  #[test]
  fn wrapper_escapes_the_request() {
    let module = ExternalModule::new("we\"ird");
    assert_eq!(module.generate(), "module.exports = require(\"we\\\"ird\");");
  }
}
