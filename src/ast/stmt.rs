//! `statement` grammar rule.

use crate::ast::expr::Expr;
use crate::ast::ident::Ident;
use crate::ast::left_expr::LeftExpr;
use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone)]
pub enum Statement {
    Assign {
        id: NodeId,
        span: SourceSpan,
        target: LeftExpr,
        assign_span: SourceSpan,
        value: Expr,
    },
    If {
        id: NodeId,
        span: SourceSpan,
        cond: Expr,
        then_branch: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
    },
    While {
        id: NodeId,
        span: SourceSpan,
        cond: Expr,
        body: Vec<Statement>,
    },
    /// `ident '(' exprs? ')' ';'` — a call used as a statement (`ProcCall`).
    Call {
        id: NodeId,
        span: SourceSpan,
        callee: Ident,
        args: Vec<Expr>,
    },
    Read {
        id: NodeId,
        span: SourceSpan,
        target: LeftExpr,
    },
    WriteExpr {
        id: NodeId,
        span: SourceSpan,
        value: Expr,
    },
    /// Raw text between (and excluding) the surrounding quotes, escapes intact.
    WriteString {
        id: NodeId,
        span: SourceSpan,
        text: String,
    },
    Return {
        id: NodeId,
        span: SourceSpan,
        return_span: SourceSpan,
        value: Option<Expr>,
    },
}

impl Statement {
    pub fn id(&self) -> NodeId {
        match self {
            Statement::Assign { id, .. }
            | Statement::If { id, .. }
            | Statement::While { id, .. }
            | Statement::Call { id, .. }
            | Statement::Read { id, .. }
            | Statement::WriteExpr { id, .. }
            | Statement::WriteString { id, .. }
            | Statement::Return { id, .. } => *id,
        }
    }

    pub fn assign(target: LeftExpr, assign_span: SourceSpan, value: Expr, span: SourceSpan) -> Self {
        Statement::Assign {
            id: NodeId::fresh(),
            span,
            target,
            assign_span,
            value,
        }
    }

    pub fn if_stmt(
        cond: Expr,
        then_branch: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
        span: SourceSpan,
    ) -> Self {
        Statement::If {
            id: NodeId::fresh(),
            span,
            cond,
            then_branch,
            else_branch,
        }
    }

    pub fn while_stmt(cond: Expr, body: Vec<Statement>, span: SourceSpan) -> Self {
        Statement::While {
            id: NodeId::fresh(),
            span,
            cond,
            body,
        }
    }

    pub fn call(callee: Ident, args: Vec<Expr>, span: SourceSpan) -> Self {
        Statement::Call {
            id: NodeId::fresh(),
            span,
            callee,
            args,
        }
    }

    pub fn read(target: LeftExpr, span: SourceSpan) -> Self {
        Statement::Read {
            id: NodeId::fresh(),
            span,
            target,
        }
    }

    pub fn write_expr(value: Expr, span: SourceSpan) -> Self {
        Statement::WriteExpr {
            id: NodeId::fresh(),
            span,
            value,
        }
    }

    pub fn write_string(text: impl Into<String>, span: SourceSpan) -> Self {
        Statement::WriteString {
            id: NodeId::fresh(),
            span,
            text: text.into(),
        }
    }

    pub fn return_stmt(value: Option<Expr>, return_span: SourceSpan, span: SourceSpan) -> Self {
        Statement::Return {
            id: NodeId::fresh(),
            span,
            return_span,
            value,
        }
    }
}
