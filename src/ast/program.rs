//! `program := function+ EOF` grammar rule: the compilation unit root.

use crate::ast::function::Function;
use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone)]
pub struct Program {
    pub id: NodeId,
    pub span: SourceSpan,
    pub functions: Vec<Function>,
}

impl Program {
    pub fn new(functions: Vec<Function>, span: SourceSpan) -> Self {
        Program {
            id: NodeId::fresh(),
            span,
            functions,
        }
    }
}
