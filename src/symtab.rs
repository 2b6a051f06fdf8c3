//! SymTable — a stack of lexical scopes mapping identifiers to symbols.
//!
//! Grounded in the teacher's own scope tracker
//! (`compiler/src/compiler/semantic_analyser/scope_tracker.rs`), which is a
//! `Vec<HashMap<String, SymbolType>>` with `enter_scope`/`exit_scope`/`add_symbol`.
//! This version generalizes that shape two ways the teacher's did not need:
//! scopes are addressable by id so a later pass can re-enter exactly the scope
//! an earlier pass built (`pushThisScope`), and `add_symbol` reports failure
//! instead of panicking, since here duplicates are semantic errors to be
//! diagnosed, not programmer mistakes to abort on.

use std::collections::HashMap;

use crate::types::{TypeId, TypesMgr};

/// Identifies one lexical scope, independent of how many times it is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

pub const GLOBAL_SCOPE_NAME: &str = "$global$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVar,
    Parameter,
    Function,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeId,
}

#[derive(Debug, Default)]
struct Scope {
    #[allow(dead_code)]
    name: String,
    bindings: HashMap<String, Symbol>,
}

/// Lives for the whole compilation. `stack` is the chain of scopes currently
/// active (innermost last); `scopes` holds every scope ever created, indexed
/// by `ScopeId`, so a scope can be re-entered without rebuilding it.
#[derive(Debug, Default)]
pub struct SymTable {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
    current_function_ty: Option<TypeId>,
}

impl SymTable {
    pub fn new() -> Self {
        SymTable::default()
    }

    /// Allocates a fresh scope, pushes it as the active scope, and returns its id.
    pub fn push_new_scope(&mut self, name: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            name: name.to_string(),
            bindings: HashMap::new(),
        });
        self.stack.push(id);
        id
    }

    /// Re-enters a scope created earlier by `push_new_scope`, without clearing it.
    pub fn push_this_scope(&mut self, id: ScopeId) {
        self.stack.push(id);
    }

    pub fn pop_scope(&mut self) {
        self.stack.pop();
    }

    pub fn scope_depth(&self) -> usize {
        self.stack.len()
    }

    fn top(&self) -> ScopeId {
        *self
            .stack
            .last()
            .expect("no active scope: pushed and popped out of balance")
    }

    fn add(&mut self, name: &str, kind: SymbolKind, ty: TypeId) -> bool {
        let top = self.top();
        let scope = &mut self.scopes[top.0];
        if scope.bindings.contains_key(name) {
            return false;
        }
        scope.bindings.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
                ty,
            },
        );
        true
    }

    /// Returns `false` (and leaves the table unchanged) if `name` is already
    /// bound in the current scope; callers report the duplicate themselves.
    pub fn add_local_var(&mut self, name: &str, ty: TypeId) -> bool {
        self.add(name, SymbolKind::LocalVar, ty)
    }
    pub fn add_parameter(&mut self, name: &str, ty: TypeId) -> bool {
        self.add(name, SymbolKind::Parameter, ty)
    }
    pub fn add_function(&mut self, name: &str, ty: TypeId) -> bool {
        self.add(name, SymbolKind::Function, ty)
    }

    pub fn find_in_current_scope(&self, name: &str) -> bool {
        self.scopes[self.top().0].bindings.contains_key(name)
    }

    /// Searches from the innermost active scope outward. Returns the depth
    /// (0 = innermost) at which `name` was found, or `-1` if not found.
    pub fn find_in_stack(&self, name: &str) -> i64 {
        for (depth, scope_id) in self.stack.iter().rev().enumerate() {
            if self.scopes[scope_id.0].bindings.contains_key(name) {
                return depth as i64;
            }
        }
        -1
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.stack
            .iter()
            .rev()
            .find_map(|scope_id| self.scopes[scope_id.0].bindings.get(name))
    }

    pub fn get_type(&self, name: &str) -> TypeId {
        self.lookup(name)
            .expect("get_type called on an undeclared identifier")
            .ty
    }

    pub fn is_function_class(&self, name: &str) -> bool {
        matches!(
            self.lookup(name).map(|s| s.kind),
            Some(SymbolKind::Function)
        )
    }
    pub fn is_parameter_class(&self, name: &str) -> bool {
        matches!(
            self.lookup(name).map(|s| s.kind),
            Some(SymbolKind::Parameter)
        )
    }

    pub fn set_current_function_ty(&mut self, t: TypeId) {
        self.current_function_ty = Some(t);
    }
    pub fn get_current_function_ty(&self) -> TypeId {
        self.current_function_ty
            .expect("get_current_function_ty called outside of a function body")
    }

    /// True unless the global scope binds `main` to a zero-parameter, Void-returning function.
    pub fn no_main_properly_declared(&self, types: &TypesMgr) -> bool {
        let global = &self.scopes[0];
        match global.bindings.get("main") {
            Some(sym) if sym.kind == SymbolKind::Function => {
                let params = types.get_func_params_types(sym.ty);
                let ret = types.get_func_return_type(sym.ty);
                !(params.is_empty() && types.is_void_ty(ret))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_in_same_scope_is_rejected() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let mut symbols = SymTable::new();
        symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        assert!(symbols.add_local_var("x", int_ty));
        assert!(!symbols.add_local_var("x", int_ty));
    }

    #[test]
    fn push_this_scope_reenters_without_clearing() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let mut symbols = SymTable::new();
        let global = symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        let func = symbols.push_new_scope("f");
        symbols.add_parameter("x", int_ty);
        symbols.pop_scope();
        symbols.pop_scope();

        symbols.push_this_scope(global);
        symbols.push_this_scope(func);
        assert!(symbols.find_in_current_scope("x"));
    }

    #[test]
    fn find_in_stack_reports_depth_and_absence() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let mut symbols = SymTable::new();
        symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        symbols.add_function("f", int_ty);
        symbols.push_new_scope("f");
        symbols.add_local_var("x", int_ty);

        assert_eq!(symbols.find_in_stack("x"), 0);
        assert_eq!(symbols.find_in_stack("f"), 1);
        assert_eq!(symbols.find_in_stack("missing"), -1);
    }

    #[test]
    fn no_main_properly_declared_requires_zero_arg_void_main() {
        let mut types = TypesMgr::new();
        let void_ty = types.create_void_ty();
        let int_ty = types.create_integer_ty();
        let mut symbols = SymTable::new();
        symbols.push_new_scope(GLOBAL_SCOPE_NAME);

        assert!(symbols.no_main_properly_declared(&types));

        let bad_main_ty = types.create_function_ty(vec![int_ty], void_ty);
        symbols.add_function("main", bad_main_ty);
        assert!(symbols.no_main_properly_declared(&types));
    }

    #[test]
    fn main_with_no_params_and_void_return_satisfies_check() {
        let mut types = TypesMgr::new();
        let void_ty = types.create_void_ty();
        let mut symbols = SymTable::new();
        symbols.push_new_scope(GLOBAL_SCOPE_NAME);
        let main_ty = types.create_function_ty(vec![], void_ty);
        symbols.add_function("main", main_ty);
        assert!(!symbols.no_main_properly_declared(&types));
    }
}
