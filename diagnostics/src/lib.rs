//! Shared diagnostics model and rendering utilities.
//!
//! The data structures here are intentionally minimal and deterministic so they
//! can be reused across analysis and bundling without pulling in any heavy
//! dependencies. Input trees carry no source positions, so diagnostics are
//! addressed by stable code and, where known, the module they concern.
//!
//! ```
//! use diagnostics::Diagnostic;
//!
//! let diag = Diagnostic::error("BD0002", "cannot load external module \"fs\"")
//!   .with_module("a.js");
//! assert_eq!(
//!   diag.to_string(),
//!   "error[BD0002]: cannot load external module \"fs\" (module \"a.js\")"
//! );
//! ```

use std::fmt::Display;
use std::fmt::Formatter;

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
      Severity::Help => "help",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A user-facing diagnostic with a stable code and optional notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  /// Module the diagnostic concerns, if any.
  pub module: Option<String>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(severity: Severity, code: &'static str, message: impl Into<String>) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      module: None,
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>) -> Self {
    Self::new(Severity::Error, code, message)
  }

  pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
    Self::new(Severity::Warning, code, message)
  }

  pub fn note(code: &'static str, message: impl Into<String>) -> Self {
    Self::new(Severity::Note, code, message)
  }

  pub fn help(code: &'static str, message: impl Into<String>) -> Self {
    Self::new(Severity::Help, code, message)
  }

  pub fn with_module(mut self, module: impl Into<String>) -> Self {
    self.module = Some(module.into());
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
    if let Some(module) = &self.module {
      write!(f, " (module \"{}\")", module)?;
    }
    for note in &self.notes {
      write!(f, "\n  note: {}", note)?;
    }
    Ok(())
  }
}

/// Sorts diagnostics into a stable reporting order: by module, then code, then
/// message. Severity is deliberately not a sort key so related diagnostics for
/// one module stay together.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
  diagnostics.sort_by(|a, b| {
    (&a.module, a.code, &a.message).cmp(&(&b.module, b.code, &b.message))
  });
}
