pub mod expr;
pub mod node;
pub mod pat;
pub mod stmt;
pub mod stx;
