use crate::type_system::CheckedType;
use ast::{Expr, Ident, NodeId};
use std::collections::HashMap;
use strtab::Symbol;

/// What an identifier resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInfo<'src> {
    pub ty: CheckedType<'src>,
    /// false for formals and locals
    pub is_field: bool,
}

/// Resolution of a method invocation whose arguments could all be typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInfo<'src> {
    /// static type of the receiver, i.e. where the lookup started
    pub class: Symbol<'src>,
    pub arg_types: Vec<CheckedType<'src>>,
    pub return_ty: CheckedType<'src>,
}

/// Side tables filled by the second pass. Nodes are keyed by their `NodeId`,
/// so two analyses of identically built trees compare equal iff the
/// annotations are the same.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TypeAnalysis<'src> {
    expr_types: HashMap<NodeId, CheckedType<'src>>,
    vars: HashMap<NodeId, VarInfo<'src>>,
    calls: HashMap<NodeId, CallInfo<'src>>,
}

impl<'src> TypeAnalysis<'src> {
    pub fn new() -> TypeAnalysis<'src> {
        TypeAnalysis::default()
    }

    /// `None` if the type of `expr` could not be determined.
    pub fn expr_type(&self, expr: &Expr<'src>) -> Option<CheckedType<'src>> {
        self.expr_types.get(&expr.id).cloned()
    }

    pub fn set_expr_type(&mut self, id: NodeId, ty: CheckedType<'src>) {
        self.expr_types.insert(id, ty);
    }

    pub fn var_info(&self, ident: &Ident<'src>) -> Option<VarInfo<'src>> {
        self.vars.get(&ident.id).cloned()
    }

    pub fn set_var_info(&mut self, id: NodeId, info: VarInfo<'src>) {
        self.vars.insert(id, info);
    }

    pub fn call_info(&self, expr: &Expr<'src>) -> Option<&CallInfo<'src>> {
        self.calls.get(&expr.id)
    }

    pub fn set_call_info(&mut self, id: NodeId, info: CallInfo<'src>) {
        self.calls.insert(id, info);
    }

    pub fn typed_expr_count(&self) -> usize {
        self.expr_types.len()
    }
}
