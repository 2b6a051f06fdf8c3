//! Semantic analysis and three-address-code generation for ASL.
//!
//! Lexing and parsing are external collaborators — this crate starts from an
//! already-built [`ast::Program`] and runs it through [`passes::SymbolsPass`],
//! [`passes::TypeCheckPass`] and [`passes::CodeGenPass`] in sequence. See
//! [`pipeline::Pipeline`] for the single entry point that runs all three.

pub mod ast;
pub mod decoration;
pub mod errors;
pub mod passes;
pub mod pipeline;
pub mod span;
pub mod symtab;
pub mod types;

pub use decoration::{NodeId, TreeDecoration};
pub use errors::{SemError, SemErrorKind, SemErrors};
pub use pipeline::Pipeline;
pub use symtab::SymTable;
pub use types::{TypeId, TypesMgr};
