//! `left_expr` grammar rule: the assignable/readable positions (`ident` or
//! `ident '[' expr ']'`).

use crate::ast::expr::Expr;
use crate::ast::ident::Ident;
use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone)]
pub enum LeftExprKind {
    Ident(Ident),
    ArrayAccess {
        id: NodeId,
        span: SourceSpan,
        base: Ident,
        index: Box<Expr>,
    },
}

/// Wraps a `LeftExprKind` with its own node id, mirroring the original
/// grammar's separate `left_expr` context around `ident`/`arrayid`.
#[derive(Debug, Clone)]
pub struct LeftExpr {
    pub id: NodeId,
    pub span: SourceSpan,
    pub kind: LeftExprKind,
}

impl LeftExpr {
    pub fn ident(ident: Ident) -> Self {
        let span = ident.span;
        LeftExpr {
            id: NodeId::fresh(),
            span,
            kind: LeftExprKind::Ident(ident),
        }
    }

    pub fn array_access(base: Ident, index: Expr, span: SourceSpan) -> Self {
        LeftExpr {
            id: NodeId::fresh(),
            span,
            kind: LeftExprKind::ArrayAccess {
                id: NodeId::fresh(),
                span,
                base,
                index: Box::new(index),
            },
        }
    }
}
