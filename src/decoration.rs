//! TreeDecoration — a side table attaching pass-computed attributes to AST nodes.
//!
//! Grounded in the teacher's own id-generator idiom for `ScopeId`
//! (`src/compiler/ast/scope.rs`: an opaque `u64` minted by a private
//! constructor). Nodes here are owned by value and may be moved while passes
//! run, so pointer identity is not a stable key; every AST node instead carries
//! a `NodeId` minted once at construction, and decorations are keyed by that id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::symtab::ScopeId;
use crate::types::TypeId;
use crate::passes::codegen::instr::InstructionList;

/// Opaque identity for one AST node, stable across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

impl NodeId {
    /// Mints a fresh id. Called once per AST node, at construction.
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Default)]
struct Attrs {
    scope: Option<ScopeId>,
    ty: Option<TypeId>,
    is_lvalue: Option<bool>,
    addr: Option<String>,
    // offset(node): reserved by the data model, never written or read by any pass here.
    #[allow(dead_code)]
    offset: Option<String>,
    code: Option<InstructionList>,
}

/// Side table keyed by `NodeId`. Each (node, attribute) pair is written at
/// most once, by the single pass that owns that attribute.
#[derive(Debug, Default)]
pub struct TreeDecoration {
    entries: HashMap<NodeId, Attrs>,
}

impl TreeDecoration {
    pub fn new() -> Self {
        TreeDecoration::default()
    }

    fn entry(&mut self, node: NodeId) -> &mut Attrs {
        self.entries.entry(node).or_default()
    }

    pub fn put_scope(&mut self, node: NodeId, scope: ScopeId) {
        self.entry(node).scope = Some(scope);
    }
    pub fn get_scope(&self, node: NodeId) -> ScopeId {
        self.entries
            .get(&node)
            .and_then(|a| a.scope)
            .expect("scope decoration read before it was written")
    }

    pub fn put_type(&mut self, node: NodeId, ty: TypeId) {
        self.entry(node).ty = Some(ty);
    }
    pub fn get_type(&self, node: NodeId) -> TypeId {
        self.entries
            .get(&node)
            .and_then(|a| a.ty)
            .expect("type decoration read before it was written")
    }

    pub fn put_is_lvalue(&mut self, node: NodeId, b: bool) {
        self.entry(node).is_lvalue = Some(b);
    }
    pub fn get_is_lvalue(&self, node: NodeId) -> bool {
        self.entries
            .get(&node)
            .and_then(|a| a.is_lvalue)
            .expect("isLValue decoration read before it was written")
    }

    pub fn put_addr(&mut self, node: NodeId, addr: impl Into<String>) {
        self.entry(node).addr = Some(addr.into());
    }
    pub fn get_addr(&self, node: NodeId) -> &str {
        self.entries
            .get(&node)
            .and_then(|a| a.addr.as_deref())
            .expect("addr decoration read before it was written")
    }

    pub fn put_code(&mut self, node: NodeId, code: InstructionList) {
        self.entry(node).code = Some(code);
    }
    pub fn get_code(&self, node: NodeId) -> InstructionList {
        self.entries
            .get(&node)
            .and_then(|a| a.code.clone())
            .expect("code decoration read before it was written")
    }
}
