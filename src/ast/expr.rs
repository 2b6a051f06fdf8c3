//! `expr` grammar rule, as a tagged union per alternative rather than one
//! flat polymorphic node — the re-architecture `spec.md` §9 calls for in place
//! of the teacher's single `ASTNode` enum with a virtual-listener hierarchy
//! behind it.

use crate::ast::ident::Ident;
use crate::ast::literals::Literal;
use crate::ast::operators::{ArithOp, LogicalOp, RelOp, UnaryOp};
use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone)]
pub enum Expr {
    Ident(Ident),
    ArrayAccess {
        id: NodeId,
        span: SourceSpan,
        base: Ident,
        index: Box<Expr>,
    },
    Literal {
        id: NodeId,
        span: SourceSpan,
        value: Literal,
    },
    Unary {
        id: NodeId,
        span: SourceSpan,
        op: UnaryOp,
        op_span: SourceSpan,
        operand: Box<Expr>,
    },
    Parenthesis {
        id: NodeId,
        span: SourceSpan,
        inner: Box<Expr>,
    },
    Arithmetic {
        id: NodeId,
        span: SourceSpan,
        op: ArithOp,
        op_span: SourceSpan,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Relational {
        id: NodeId,
        span: SourceSpan,
        op: RelOp,
        op_span: SourceSpan,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        id: NodeId,
        span: SourceSpan,
        op: LogicalOp,
        op_span: SourceSpan,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `funcid`: a call used in expression position; requires a non-Void callee.
    Call {
        id: NodeId,
        span: SourceSpan,
        callee: Ident,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Ident(ident) => ident.id,
            Expr::ArrayAccess { id, .. }
            | Expr::Literal { id, .. }
            | Expr::Unary { id, .. }
            | Expr::Parenthesis { id, .. }
            | Expr::Arithmetic { id, .. }
            | Expr::Relational { id, .. }
            | Expr::Logical { id, .. }
            | Expr::Call { id, .. } => *id,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Expr::Ident(ident) => ident.span,
            Expr::ArrayAccess { span, .. }
            | Expr::Literal { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Parenthesis { span, .. }
            | Expr::Arithmetic { span, .. }
            | Expr::Relational { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }

    pub fn ident(name: impl Into<String>, span: SourceSpan) -> Self {
        Expr::Ident(Ident::new(name, span))
    }

    pub fn array_access(base: Ident, index: Expr, span: SourceSpan) -> Self {
        Expr::ArrayAccess {
            id: NodeId::fresh(),
            span,
            base,
            index: Box::new(index),
        }
    }

    pub fn literal(value: Literal, span: SourceSpan) -> Self {
        Expr::Literal {
            id: NodeId::fresh(),
            span,
            value,
        }
    }

    pub fn unary(op: UnaryOp, op_span: SourceSpan, operand: Expr, span: SourceSpan) -> Self {
        Expr::Unary {
            id: NodeId::fresh(),
            span,
            op,
            op_span,
            operand: Box::new(operand),
        }
    }

    pub fn parenthesis(inner: Expr, span: SourceSpan) -> Self {
        Expr::Parenthesis {
            id: NodeId::fresh(),
            span,
            inner: Box::new(inner),
        }
    }

    pub fn arithmetic(op: ArithOp, op_span: SourceSpan, lhs: Expr, rhs: Expr, span: SourceSpan) -> Self {
        Expr::Arithmetic {
            id: NodeId::fresh(),
            span,
            op,
            op_span,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn relational(op: RelOp, op_span: SourceSpan, lhs: Expr, rhs: Expr, span: SourceSpan) -> Self {
        Expr::Relational {
            id: NodeId::fresh(),
            span,
            op,
            op_span,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn logical(op: LogicalOp, op_span: SourceSpan, lhs: Expr, rhs: Expr, span: SourceSpan) -> Self {
        Expr::Logical {
            id: NodeId::fresh(),
            span,
            op,
            op_span,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn call(callee: Ident, args: Vec<Expr>, span: SourceSpan) -> Self {
        Expr::Call {
            id: NodeId::fresh(),
            span,
            callee,
            args,
        }
    }
}
