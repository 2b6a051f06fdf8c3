//! TypesMgr — canonicalizes type descriptors and answers type predicates.
//!
//! Canonical handles are opaque indices into an append-only arena. Two
//! structurally equal `TypeKind`s always share a handle, via a hash-consing
//! interner, so `TypeId` equality is handle equality, never structural
//! comparison.

use std::collections::HashMap;

/// An opaque handle identifying a canonical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TypeKind {
    Integer,
    Float,
    Boolean,
    Character,
    Void,
    Array(u32, TypeId),
    Function(Vec<TypeId>, TypeId),
    Error,
}

/// Canonicalizing pool of types. Lives for the whole compilation.
#[derive(Debug, Default)]
pub struct TypesMgr {
    arena: Vec<TypeKind>,
    interned: HashMap<TypeKind, TypeId>,
}

impl TypesMgr {
    pub fn new() -> Self {
        TypesMgr {
            arena: Vec::new(),
            interned: HashMap::new(),
        }
    }

    fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(id) = self.interned.get(&kind) {
            return *id;
        }
        let id = TypeId(self.arena.len());
        self.arena.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    fn kind(&self, t: TypeId) -> &TypeKind {
        &self.arena[t.0]
    }

    pub fn create_integer_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Integer)
    }
    pub fn create_float_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Float)
    }
    pub fn create_boolean_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Boolean)
    }
    pub fn create_character_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Character)
    }
    pub fn create_void_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Void)
    }
    pub fn create_error_ty(&mut self) -> TypeId {
        self.intern(TypeKind::Error)
    }
    pub fn create_array_ty(&mut self, size: u32, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Array(size, elem))
    }
    pub fn create_function_ty(&mut self, params: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.intern(TypeKind::Function(params, ret))
    }

    pub fn is_primitive_ty(&self, t: TypeId) -> bool {
        matches!(
            self.kind(t),
            TypeKind::Integer | TypeKind::Float | TypeKind::Boolean | TypeKind::Character
        )
    }
    pub fn is_numeric_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Integer | TypeKind::Float)
    }
    pub fn is_integer_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Integer)
    }
    pub fn is_float_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Float)
    }
    pub fn is_boolean_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Boolean)
    }
    pub fn is_character_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Character)
    }
    pub fn is_array_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Array(_, _))
    }
    pub fn is_function_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Function(_, _))
    }
    pub fn is_void_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Void)
    }
    pub fn is_error_ty(&self, t: TypeId) -> bool {
        matches!(self.kind(t), TypeKind::Error)
    }

    pub fn get_array_elem_type(&self, t: TypeId) -> TypeId {
        match self.kind(t) {
            TypeKind::Array(_, elem) => *elem,
            _ => unreachable!("get_array_elem_type called on a non-array type"),
        }
    }
    pub fn get_array_size(&self, t: TypeId) -> u32 {
        match self.kind(t) {
            TypeKind::Array(n, _) => *n,
            _ => unreachable!("get_array_size called on a non-array type"),
        }
    }
    pub fn get_func_params_types(&self, t: TypeId) -> Vec<TypeId> {
        match self.kind(t) {
            TypeKind::Function(params, _) => params.clone(),
            _ => unreachable!("get_func_params_types called on a non-function type"),
        }
    }
    pub fn get_func_return_type(&self, t: TypeId) -> TypeId {
        match self.kind(t) {
            TypeKind::Function(_, ret) => *ret,
            _ => unreachable!("get_func_return_type called on a non-function type"),
        }
    }

    /// Size of a type in machine words: primitives = 1, array = n * sizeOf(elem), function/void/error = 0.
    pub fn get_size_of_type(&self, t: TypeId) -> usize {
        match self.kind(t) {
            TypeKind::Integer | TypeKind::Float | TypeKind::Boolean | TypeKind::Character => 1,
            TypeKind::Array(n, elem) => *n as usize * self.get_size_of_type(*elem),
            TypeKind::Function(_, _) | TypeKind::Void | TypeKind::Error => 0,
        }
    }

    /// `copyable(dst, src)`: equal, or dst is Float and src is Integer, or either is Error.
    pub fn copyable_types(&self, dst: TypeId, src: TypeId) -> bool {
        if self.is_error_ty(dst) || self.is_error_ty(src) {
            return true;
        }
        if dst == src {
            return true;
        }
        self.is_float_ty(dst) && self.is_integer_ty(src)
    }

    /// `comparable(a, b, op)`: both numeric for ordering/equality ops, both Boolean or
    /// both Character for `==`/`!=`, or either side Error.
    pub fn comparable_types(&self, a: TypeId, b: TypeId, op: &str) -> bool {
        if self.is_error_ty(a) || self.is_error_ty(b) {
            return true;
        }
        if self.is_numeric_ty(a) && self.is_numeric_ty(b) {
            return true;
        }
        let equality_only = matches!(op, "==" | "!=");
        if !equality_only {
            return false;
        }
        (self.is_boolean_ty(a) && self.is_boolean_ty(b))
            || (self.is_character_ty(a) && self.is_character_ty(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structurally_equal_types_share_a_handle() {
        let mut types = TypesMgr::new();
        let a = types.create_integer_ty();
        let b = types.create_integer_ty();
        assert_eq!(a, b);
    }

    #[test]
    fn arrays_hash_cons_by_structure() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let arr1 = types.create_array_ty(4, int_ty);
        let arr2 = types.create_array_ty(4, int_ty);
        let arr3 = types.create_array_ty(5, int_ty);
        assert_eq!(arr1, arr2);
        assert_ne!(arr1, arr3);
    }

    #[test]
    fn copyable_allows_widening_not_narrowing() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let float_ty = types.create_float_ty();
        assert!(types.copyable_types(float_ty, int_ty));
        assert!(!types.copyable_types(int_ty, float_ty));
    }

    #[test]
    fn error_type_is_copyable_with_anything() {
        let mut types = TypesMgr::new();
        let err = types.create_error_ty();
        let bool_ty = types.create_boolean_ty();
        assert!(types.copyable_types(err, bool_ty));
        assert!(types.copyable_types(bool_ty, err));
    }

    #[test]
    fn comparable_rejects_boolean_ordering() {
        let mut types = TypesMgr::new();
        let b = types.create_boolean_ty();
        assert!(types.comparable_types(b, b, "=="));
        assert!(!types.comparable_types(b, b, "<"));
    }

    #[test]
    fn size_of_array_multiplies_element_size() {
        let mut types = TypesMgr::new();
        let int_ty = types.create_integer_ty();
        let arr = types.create_array_ty(4, int_ty);
        assert_eq!(types.get_size_of_type(arr), 4);
    }
}
