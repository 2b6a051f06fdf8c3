//! `function`, `parameters`/`parameter`, `declarations`/`variable_decl` grammar rules.

use crate::ast::data::{Data, Type};
use crate::ast::stmt::Statement;
use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone)]
pub struct Parameter {
    pub id: NodeId,
    pub span: SourceSpan,
    pub name: String,
    pub data: Data,
}

impl Parameter {
    pub fn new(name: impl Into<String>, data: Data, span: SourceSpan) -> Self {
        Parameter {
            id: NodeId::fresh(),
            span,
            name: name.into(),
            data,
        }
    }
}

/// `var id_1, ..., id_k : data` — one declaration binds every name in `names`
/// to the same `data` type.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub id: NodeId,
    pub span: SourceSpan,
    pub names: Vec<String>,
    pub data: Data,
}

impl VariableDecl {
    pub fn new(names: Vec<String>, data: Data, span: SourceSpan) -> Self {
        VariableDecl {
            id: NodeId::fresh(),
            span,
            names,
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    pub id: NodeId,
    pub span: SourceSpan,
    pub name: String,
    pub name_span: SourceSpan,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub declarations: Vec<VariableDecl>,
    pub statements: Vec<Statement>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        name_span: SourceSpan,
        parameters: Vec<Parameter>,
        return_type: Option<Type>,
        declarations: Vec<VariableDecl>,
        statements: Vec<Statement>,
        span: SourceSpan,
    ) -> Self {
        Function {
            id: NodeId::fresh(),
            span,
            name: name.into(),
            name_span,
            parameters,
            return_type,
            declarations,
            statements,
        }
    }
}
