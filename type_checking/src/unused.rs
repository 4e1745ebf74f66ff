use ast::{Span, Spanned, VarDecl};
use std::fmt;
use strtab::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum VarKind {
    #[display(fmt = "parameter")]
    Param,
    #[display(fmt = "local")]
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedVariable<'src> {
    pub class: Symbol<'src>,
    pub method: Symbol<'src>,
    pub name: Symbol<'src>,
    pub kind: VarKind,
    pub span: Span,
}

impl<'src> fmt::Display for UnusedVariable<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unused {} `{}` in `{}.{}` ({})",
            self.kind, self.name, self.class, self.method, self.span
        )
    }
}

/// Names of one method that were declared but not referenced yet.
///
/// Only identifier expressions count as a reference. Assigning to a
/// variable does not make it used.
#[derive(Debug)]
pub struct UnusedVariableTracker<'src> {
    class: Symbol<'src>,
    method: Symbol<'src>,
    pending: Vec<UnusedVariable<'src>>,
}

impl<'src> UnusedVariableTracker<'src> {
    /// Records every formal and local as unused. A local named like a
    /// formal is the same variable and keeps a single entry.
    pub fn seed(
        class: Symbol<'src>,
        method: Symbol<'src>,
        formals: &[Spanned<VarDecl<'src>>],
        locals: &[Spanned<VarDecl<'src>>],
    ) -> Self {
        let mut tracker = UnusedVariableTracker {
            class,
            method,
            pending: Vec::with_capacity(formals.len() + locals.len()),
        };
        let declared = formals
            .iter()
            .map(|decl| (decl, VarKind::Param))
            .chain(locals.iter().map(|decl| (decl, VarKind::Local)));
        for (decl, kind) in declared {
            tracker.declare(decl.name, kind, decl.span);
        }
        tracker
    }

    fn declare(&mut self, name: Symbol<'src>, kind: VarKind, span: Span) {
        match self.pending.iter_mut().find(|var| var.name == name) {
            Some(var) => {
                var.kind = kind;
                var.span = span;
            }
            None => self.pending.push(UnusedVariable {
                class: self.class,
                method: self.method,
                name,
                kind,
                span,
            }),
        }
    }

    /// Idempotent, names that were never declared are ignored.
    pub fn mark_used(&mut self, name: Symbol<'src>) {
        self.pending.retain(|var| var.name != name);
    }

    pub fn is_unused(&self, name: Symbol<'src>) -> bool {
        self.pending.iter().any(|var| var.name == name)
    }

    /// Remaining entries in declaration order.
    pub fn finish(self) -> Vec<UnusedVariable<'src>> {
        for var in &self.pending {
            log::debug!("{}", var);
        }
        self.pending
    }
}

/// Collected findings of all methods, in program order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UnusedVariableReport<'src> {
    entries: Vec<UnusedVariable<'src>>,
}

impl<'src> UnusedVariableReport<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, vars: Vec<UnusedVariable<'src>>) {
        self.entries.extend(vars);
    }

    pub fn entries(&self) -> &[UnusedVariable<'src>] {
        &self.entries
    }

    pub fn names<'a>(&'a self) -> impl Iterator<Item = &'src str> + 'a {
        self.entries.iter().map(|var| var.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'src> fmt::Display for UnusedVariableReport<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.entries {
            writeln!(f, "{}", var)?;
        }
        Ok(())
    }
}
