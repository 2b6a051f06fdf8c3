//! Literal values, one variant per terminal in the `expr` grammar rule.
//!
//! Grounded in the teacher's own `Literal` enum
//! (`src/compiler/ast/literals.rs`: `FLOAT(f64)`, `INTEGER(u64)`, `BOOL(bool)`,
//! `PACKEDSTRING(f64)`), minus the Barracuda-specific packed-string encoding
//! (ASL has no such terminal) and with `CHARVAL` added for ASL's character type.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Character(char),
}
