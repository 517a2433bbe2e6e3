use serde::Deserialize;
use serde::Serialize;

/// Binary operators representable in the interchange format. A closed set, so
/// the emitter can be exhaustive over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorName {
  Addition,
  Subtraction,
  Multiplication,
  Division,
  Remainder,
  Equality,
  Inequality,
  StrictEquality,
  StrictInequality,
  LessThan,
  LessThanOrEqual,
  GreaterThan,
  GreaterThanOrEqual,
  LogicalAnd,
  LogicalOr,
  Assignment,
  AdditionAssignment,
  SubtractionAssignment,
  MultiplicationAssignment,
  DivisionAssignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
  Left,
  Right,
}

impl OperatorName {
  pub fn symbol(self) -> &'static str {
    use OperatorName::*;
    match self {
      Addition => "+",
      Subtraction => "-",
      Multiplication => "*",
      Division => "/",
      Remainder => "%",
      Equality => "==",
      Inequality => "!=",
      StrictEquality => "===",
      StrictInequality => "!==",
      LessThan => "<",
      LessThanOrEqual => "<=",
      GreaterThan => ">",
      GreaterThanOrEqual => ">=",
      LogicalAnd => "&&",
      LogicalOr => "||",
      Assignment => "=",
      AdditionAssignment => "+=",
      SubtractionAssignment => "-=",
      MultiplicationAssignment => "*=",
      DivisionAssignment => "/=",
    }
  }

  /// ECMAScript binary operator precedence levels.
  pub fn precedence(self) -> u8 {
    use OperatorName::*;
    match self {
      Assignment
      | AdditionAssignment
      | SubtractionAssignment
      | MultiplicationAssignment
      | DivisionAssignment => 2,
      LogicalOr => 4,
      LogicalAnd => 5,
      Equality | Inequality | StrictEquality | StrictInequality => 9,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => 10,
      Addition | Subtraction => 12,
      Multiplication | Division | Remainder => 13,
    }
  }

  pub fn associativity(self) -> Associativity {
    if self.is_assignment() {
      Associativity::Right
    } else {
      Associativity::Left
    }
  }

  pub fn is_assignment(self) -> bool {
    use OperatorName::*;
    matches!(
      self,
      Assignment
        | AdditionAssignment
        | SubtractionAssignment
        | MultiplicationAssignment
        | DivisionAssignment
    )
  }
}
