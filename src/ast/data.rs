//! `type` and `data`/`array` grammar rules: the declared-type surface for
//! parameters and variable declarations, kept separate from `types::TypeId`
//! (the canonicalized handle `SymbolsPass` resolves these nodes into).

use crate::decoration::NodeId;
use crate::span::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Float,
    Bool,
    Char,
}

#[derive(Debug, Clone)]
pub struct Type {
    pub id: NodeId,
    pub span: SourceSpan,
    pub primitive: PrimitiveType,
}

impl Type {
    pub fn new(primitive: PrimitiveType, span: SourceSpan) -> Self {
        Type {
            id: NodeId::fresh(),
            span,
            primitive,
        }
    }
}

/// `data := type | array`.
#[derive(Debug, Clone)]
pub enum Data {
    Scalar {
        id: NodeId,
        span: SourceSpan,
        ty: Type,
    },
    Array {
        id: NodeId,
        span: SourceSpan,
        size: u32,
        elem: Type,
    },
}

impl Data {
    pub fn scalar(ty: Type, span: SourceSpan) -> Self {
        Data::Scalar {
            id: NodeId::fresh(),
            span,
            ty,
        }
    }

    pub fn array(size: u32, elem: Type, span: SourceSpan) -> Self {
        Data::Array {
            id: NodeId::fresh(),
            span,
            size,
            elem,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Data::Scalar { id, .. } | Data::Array { id, .. } => *id,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Data::Scalar { span, .. } | Data::Array { span, .. } => *span,
        }
    }
}
