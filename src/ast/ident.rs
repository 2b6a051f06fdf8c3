use crate::decoration::NodeId;
use crate::span::SourceSpan;

/// A bare identifier reference, decorated independently of whatever syntactic
/// position wraps it (a `left_expr`, an `expr`, an `arrayid` base, a call
/// callee) — mirroring the original listener's separate `ident()` sub-context.
#[derive(Debug, Clone)]
pub struct Ident {
    pub id: NodeId,
    pub span: SourceSpan,
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: SourceSpan) -> Self {
        Ident {
            id: NodeId::fresh(),
            span,
            name: name.into(),
        }
    }
}
