//! The three-pass pipeline: symbol/scope resolution, type checking, codegen.

pub mod codegen;
pub mod symbols;
pub mod typecheck;

pub use codegen::{CodeGenPass, Subroutine};
pub use symbols::SymbolsPass;
pub use typecheck::TypeCheckPass;
