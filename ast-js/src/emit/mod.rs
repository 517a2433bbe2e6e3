//! Renders a syntax tree back to JavaScript text.
//!
//! The output is canonical rather than pretty: one top-level statement per
//! line, nested statements space-separated inside braces, and parentheses
//! inserted only where binary operator precedence requires them. Identical
//! trees always produce identical text; the emitter is infallible over the
//! closed AST.

pub mod escape;

use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::pat::ArrPat;
use crate::ast::pat::ObjPat;
use crate::ast::pat::Pat;
use crate::ast::stmt::Func;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stx::TopLevel;
use crate::operator::Associativity;
use escape::write_string_literal;

/// Precedence floor that never forces parentheses.
const PREC_LOWEST: u8 = 0;
/// Precedence of call and member operators.
const PREC_CALL_MEMBER: u8 = 18;
/// Precedence of atomic expressions (identifiers, literals, patterns).
const PREC_PRIMARY: u8 = 19;

pub fn emit_top_level(top: &Node<TopLevel>) -> String {
  let mut em = Emitter::new();
  for (i, stmt) in top.stx.body.iter().enumerate() {
    if i > 0 {
      em.out.push('\n');
    }
    em.stmt(stmt);
  }
  em.finish()
}

pub fn emit_stmt(stmt: &Node<Stmt>) -> String {
  let mut em = Emitter::new();
  em.stmt(stmt);
  em.finish()
}

pub fn emit_expr(expr: &Node<Expr>) -> String {
  let mut em = Emitter::new();
  em.expr(expr, PREC_LOWEST);
  em.finish()
}

struct Emitter {
  out: String,
}

impl Emitter {
  fn new() -> Self {
    Emitter { out: String::new() }
  }

  fn finish(self) -> String {
    self.out
  }

  fn stmt(&mut self, stmt: &Node<Stmt>) {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.body(&block.stx.body),
      Stmt::Expr(expr_stmt) => {
        self.expr(&expr_stmt.stx.expr, PREC_LOWEST);
        self.out.push(';');
      }
      Stmt::If(if_stmt) => {
        self.out.push_str("if (");
        self.expr(&if_stmt.stx.test, PREC_LOWEST);
        self.out.push_str(") ");
        self.stmt(&if_stmt.stx.consequent);
        if let Some(alternate) = &if_stmt.stx.alternate {
          self.out.push_str(" else ");
          self.stmt(alternate);
        }
      }
      Stmt::Return(ret) => match &ret.stx.value {
        Some(value) => {
          self.out.push_str("return ");
          self.expr(value, PREC_LOWEST);
          self.out.push(';');
        }
        None => self.out.push_str("return;"),
      },
      Stmt::While(while_stmt) => {
        self.out.push_str("while (");
        self.expr(&while_stmt.stx.condition, PREC_LOWEST);
        self.out.push_str(") ");
        self.stmt(&while_stmt.stx.body);
      }
      Stmt::FunctionDecl(decl) => {
        self.out.push_str("function");
        if let Some(name) = &decl.stx.name {
          self.out.push(' ');
          self.out.push_str(&name.stx.name);
        }
        self.func(&decl.stx.func);
      }
      Stmt::VarDecl(decl) => {
        self.out.push_str(match decl.stx.mode {
          VarDeclMode::Const => "const ",
          VarDeclMode::Let => "let ",
          VarDeclMode::Var => "var ",
        });
        for (i, declarator) in decl.stx.declarators.iter().enumerate() {
          if i > 0 {
            self.out.push_str(", ");
          }
          self.pat(&declarator.pattern.stx.pat);
          if let Some(initializer) = &declarator.initializer {
            self.out.push_str(" = ");
            // An initializer is a single AssignmentExpression; comma-level
            // precedence never applies here.
            self.expr(initializer, PREC_LOWEST);
          }
        }
        self.out.push(';');
      }
    }
  }

  fn func(&mut self, func: &Node<Func>) {
    self.out.push('(');
    for (i, param) in func.stx.params.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      }
      self.pat(&param.stx.pattern.stx.pat);
    }
    self.out.push_str(") ");
    self.body(&func.stx.body);
  }

  fn body(&mut self, stmts: &[Node<Stmt>]) {
    if stmts.is_empty() {
      self.out.push_str("{}");
      return;
    }
    self.out.push_str("{ ");
    for (i, stmt) in stmts.iter().enumerate() {
      if i > 0 {
        self.out.push(' ');
      }
      self.stmt(stmt);
    }
    self.out.push_str(" }");
  }

  fn pat(&mut self, pat: &Node<Pat>) {
    match pat.stx.as_ref() {
      Pat::Id(id) => self.out.push_str(&id.stx.name),
      Pat::Arr(arr) => self.arr_pat(&arr.stx),
      Pat::Obj(obj) => self.obj_pat(&obj.stx),
    }
  }

  fn arr_pat(&mut self, arr: &ArrPat) {
    self.out.push('[');
    for (i, elem) in arr.elements.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      }
      if let Some(elem) = elem {
        self.pat(&elem.target);
        if let Some(default_value) = &elem.default_value {
          self.out.push_str(" = ");
          self.expr(default_value, PREC_LOWEST);
        }
      }
    }
    self.out.push(']');
  }

  fn obj_pat(&mut self, obj: &ObjPat) {
    if obj.properties.is_empty() {
      self.out.push_str("{}");
      return;
    }
    self.out.push_str("{ ");
    for (i, prop) in obj.properties.iter().enumerate() {
      if i > 0 {
        self.out.push_str(", ");
      }
      self.out.push_str(&prop.stx.key);
      self.out.push_str(": ");
      self.pat(&prop.stx.target);
    }
    self.out.push_str(" }");
  }

  fn expr(&mut self, expr: &Node<Expr>, min_prec: u8) {
    let prec = expr_prec(expr);
    let parens = prec < min_prec;
    if parens {
      self.out.push('(');
    }
    match expr.stx.as_ref() {
      Expr::Binary(binary) => {
        let op = binary.stx.operator;
        let (left_min, right_min) = match op.associativity() {
          Associativity::Left => (prec, prec + 1),
          Associativity::Right => (prec + 1, prec),
        };
        self.expr(&binary.stx.left, left_min);
        self.out.push(' ');
        self.out.push_str(op.symbol());
        self.out.push(' ');
        self.expr(&binary.stx.right, right_min);
      }
      Expr::Call(call) => {
        self.expr(&call.stx.callee, PREC_CALL_MEMBER);
        self.out.push('(');
        for (i, argument) in call.stx.arguments.iter().enumerate() {
          if i > 0 {
            self.out.push_str(", ");
          }
          self.expr(argument, PREC_LOWEST);
        }
        self.out.push(')');
      }
      Expr::Id(id) => self.out.push_str(&id.stx.name),
      Expr::Member(member) => {
        self.expr(&member.stx.left, PREC_CALL_MEMBER);
        self.out.push('.');
        self.out.push_str(&member.stx.right);
      }
      Expr::LitBool(lit) => self.out.push_str(if lit.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.out.push_str("null"),
      Expr::LitNum(lit) => self.out.push_str(&lit.stx.value.to_string()),
      Expr::LitStr(lit) => write_string_literal(&mut self.out, &lit.stx.value),
      Expr::ArrPat(arr) => self.arr_pat(&arr.stx),
      Expr::IdPat(id) => self.out.push_str(&id.stx.name),
      Expr::ObjPat(obj) => self.obj_pat(&obj.stx),
    }
    if parens {
      self.out.push(')');
    }
  }
}

fn expr_prec(expr: &Node<Expr>) -> u8 {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => binary.stx.operator.precedence(),
    Expr::Call(_) | Expr::Member(_) => PREC_CALL_MEMBER,
    _ => PREC_PRIMARY,
  }
}
