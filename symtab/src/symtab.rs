use std::{collections::HashMap, hash::Hash};

/// SymbolTable associates a Symbol `S` with a stored value `T`.
pub type SymbolTable<S, T> = HashMap<S, T>;

/// `MethodScope` is the flat table of formals and locals of the method that
/// is currently analysed. There are no nested scopes: a method body cannot
/// declare variables, so one table per method suffices.
///
/// A later definition of an already defined symbol silently replaces the
/// earlier one.
pub struct MethodScope<S, T>
where
    S: Hash + Eq + Copy,
{
    defs: SymbolTable<S, T>,
    /// first-definition order, for dumps
    order: Vec<S>,
}

#[allow(clippy::new_without_default)]
impl<S, T> MethodScope<S, T>
where
    S: Hash + Eq + Copy,
{
    pub fn new() -> Self {
        MethodScope {
            defs: SymbolTable::new(),
            order: Vec::new(),
        }
    }

    /// Forget the previous method and define `formals`, then `locals`.
    pub fn enter_method<F, L>(&mut self, formals: F, locals: L)
    where
        F: IntoIterator<Item = (S, T)>,
        L: IntoIterator<Item = (S, T)>,
    {
        self.clear();
        for (sym, val) in formals.into_iter().chain(locals) {
            self.define(sym, val);
        }
    }

    /// Returns the replaced definition, if there was one.
    pub fn define(&mut self, sym: S, val: T) -> Option<T> {
        let previous = self.defs.insert(sym, val);
        if previous.is_none() {
            self.order.push(sym);
        }
        previous
    }

    pub fn lookup(&self, sym: S) -> Option<&T> {
        self.defs.get(&sym)
    }

    pub fn contains(&self, sym: S) -> bool {
        self.defs.contains_key(&sym)
    }

    pub fn clear(&mut self) {
        self.defs.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All visible definitions in the order their names were first defined.
    pub fn iter(&self) -> impl Iterator<Item = (S, &T)> + '_ {
        self.order.iter().map(move |sym| {
            let val = self
                .defs
                .get(sym)
                .expect("order is consistent with defs");
            (*sym, val)
        })
    }

    /// All visible names, for "did you mean" style lookups.
    pub fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.order.iter().cloned()
    }
}
