//! Abstract syntax tree: one tagged union per grammar rule (`Statement`,
//! `Expr`, `LeftExpr`, `Data`) rather than a single flat node enum, per the
//! re-architecture `spec.md` §9 calls for in place of the teacher's
//! `ASTNode`/`TYPED_NODE` hierarchy.

pub mod data;
pub mod expr;
pub mod function;
pub mod ident;
pub mod left_expr;
pub mod literals;
pub mod operators;
pub mod program;
pub mod stmt;

pub use data::{Data, PrimitiveType, Type};
pub use expr::Expr;
pub use function::{Function, Parameter, VariableDecl};
pub use ident::Ident;
pub use left_expr::{LeftExpr, LeftExprKind};
pub use literals::Literal;
pub use operators::{ArithOp, LogicalOp, RelOp, UnaryOp};
pub use program::Program;
pub use stmt::Statement;
