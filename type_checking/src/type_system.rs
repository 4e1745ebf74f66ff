use ast::{MethodDeclaration, Type};
use itertools::Itertools;
use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    fmt,
};
use strtab::Symbol;

#[derive(Debug)]
pub struct ClassNotRegistered;

/// The semantic types of the language. Class types are referred to by name
/// only; a `TypeRef` may name a class that was never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckedType<'src> {
    Int,
    Boolean,
    IntArray,
    TypeRef(Symbol<'src>),
}

impl<'src> CheckedType<'src> {
    /// Two types are compatible iff they are equal. There is no subtype
    /// relation, a value of class `B` is never assignable to `A` even if
    /// `B extends A`.
    pub fn is_assignable_from(&self, other: &CheckedType<'src>) -> bool {
        self == other
    }
}

impl<'src> From<Type<'src>> for CheckedType<'src> {
    fn from(ty: Type<'src>) -> Self {
        match ty {
            Type::Int => CheckedType::Int,
            Type::Boolean => CheckedType::Boolean,
            Type::IntArray => CheckedType::IntArray,
            Type::Class(name) => CheckedType::TypeRef(name),
        }
    }
}

impl<'src> fmt::Display for CheckedType<'src> {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        use self::CheckedType::*;
        match self {
            Int => write!(f, "int"),
            Boolean => write!(f, "boolean"),
            IntArray => write!(f, "int[]"),
            TypeRef(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParamDef<'src> {
    pub name: Symbol<'src>,
    pub ty: CheckedType<'src>,
}

impl<'src> MethodParamDef<'src> {
    pub fn new(name: Symbol<'src>, ty: CheckedType<'src>) -> MethodParamDef<'src> {
        MethodParamDef { name, ty }
    }
}

/// The signature of a method: formal parameters in declaration order and the
/// declared return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMethodDef<'src> {
    pub name: Symbol<'src>,
    pub params: Vec<MethodParamDef<'src>>,
    pub return_ty: CheckedType<'src>,
}

impl<'src> ClassMethodDef<'src> {
    pub fn new(
        name: Symbol<'src>,
        params: Vec<MethodParamDef<'src>>,
        return_ty: CheckedType<'src>,
    ) -> ClassMethodDef<'src> {
        ClassMethodDef {
            name,
            params,
            return_ty,
        }
    }
}

impl<'src> From<&MethodDeclaration<'src>> for ClassMethodDef<'src> {
    fn from(decl: &MethodDeclaration<'src>) -> Self {
        let params = decl
            .params
            .iter()
            .map(|param| MethodParamDef::new(param.name, CheckedType::from(param.ty.data)))
            .collect();
        ClassMethodDef::new(decl.name.data, params, CheckedType::from(decl.return_ty.data))
    }
}

impl<'src> fmt::Display for ClassMethodDef<'src> {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|param| format!("{} {}", param.ty, param.name))
            .join(", ");
        write!(f, "{} {}({})", self.return_ty, self.name, params)
    }
}

#[derive(Debug, Clone)]
pub struct ClassDef<'src> {
    pub name: Symbol<'src>,
    pub superclass: Option<Symbol<'src>>,
    fields: HashMap<Symbol<'src>, CheckedType<'src>>,
    methods: HashMap<Symbol<'src>, ClassMethodDef<'src>>,
}

impl<'src> ClassDef<'src> {
    pub fn new(name: Symbol<'src>, superclass: Option<Symbol<'src>>) -> ClassDef<'src> {
        ClassDef {
            name,
            superclass,
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Returns the type of a field that was replaced by this one.
    pub fn add_field(
        &mut self,
        name: Symbol<'src>,
        ty: CheckedType<'src>,
    ) -> Option<CheckedType<'src>> {
        self.fields.insert(name, ty)
    }

    pub fn add_method(&mut self, method: ClassMethodDef<'src>) -> Option<ClassMethodDef<'src>> {
        self.methods.insert(method.name, method)
    }

    /// Own fields only, inherited ones are not considered.
    pub fn field(&self, name: Symbol<'src>) -> Option<CheckedType<'src>> {
        self.fields.get(&name).cloned()
    }

    pub fn method(&self, name: Symbol<'src>) -> Option<&ClassMethodDef<'src>> {
        self.methods.get(&name)
    }

    pub fn field_names<'a>(&'a self) -> impl Iterator<Item = Symbol<'src>> + 'a {
        self.fields.keys().cloned()
    }

    pub fn iter_fields<'a>(&'a self) -> impl Iterator<Item = (Symbol<'src>, CheckedType<'src>)> + 'a {
        self.fields.iter().map(|(name, ty)| (*name, *ty))
    }

    pub fn iter_methods<'a>(&'a self) -> impl Iterator<Item = &'a ClassMethodDef<'src>> + 'a {
        self.methods.values()
    }
}

/// Maps every class name to its fields, methods and superclass. Built once
/// per elaboration and read-only afterwards.
#[derive(Debug, Default)]
pub struct ClassTable<'src> {
    classes: HashMap<Symbol<'src>, ClassDef<'src>>,
    /// registration order, used for dumps
    order: Vec<Symbol<'src>>,
}

impl<'src> ClassTable<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh class definition. A class that is registered twice
    /// is replaced by the later definition.
    pub fn register_class(
        &mut self,
        name: Symbol<'src>,
        superclass: Option<Symbol<'src>>,
    ) -> &mut ClassDef<'src> {
        let class_def = ClassDef::new(name, superclass);
        match self.classes.entry(name) {
            Entry::Occupied(mut e) => {
                e.insert(class_def);
                e.into_mut()
            }
            Entry::Vacant(e) => {
                self.order.push(name);
                e.insert(class_def)
            }
        }
    }

    pub fn add_field(
        &mut self,
        class: Symbol<'src>,
        name: Symbol<'src>,
        ty: CheckedType<'src>,
    ) -> Result<(), ClassNotRegistered> {
        self.class_mut(class)?.add_field(name, ty);
        Ok(())
    }

    pub fn add_method(
        &mut self,
        class: Symbol<'src>,
        method: ClassMethodDef<'src>,
    ) -> Result<(), ClassNotRegistered> {
        self.class_mut(class)?.add_method(method);
        Ok(())
    }

    pub fn contains(&self, name: Symbol<'src>) -> bool {
        self.classes.contains_key(&name)
    }

    pub fn class(&self, name: Symbol<'src>) -> Option<&ClassDef<'src>> {
        self.classes.get(&name)
    }

    fn class_mut(&mut self, name: Symbol<'src>) -> Result<&mut ClassDef<'src>, ClassNotRegistered> {
        self.classes.get_mut(&name).ok_or(ClassNotRegistered)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes in registration order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a ClassDef<'src>> + 'a {
        self.order.iter().filter_map(move |name| self.classes.get(name))
    }

    /// `class` followed by its superclass chain. The walk ends at the first
    /// unregistered class or the first class that was already visited.
    pub fn ancestors<'a>(&'a self, class: Symbol<'src>) -> Ancestors<'a, 'src> {
        Ancestors {
            table: self,
            next: Some(class),
            visited: HashSet::new(),
        }
    }

    /// Nearest declaration of `field` along the superclass chain.
    pub fn lookup_field(
        &self,
        class: Symbol<'src>,
        field: Symbol<'src>,
    ) -> Option<CheckedType<'src>> {
        self.ancestors(class)
            .filter_map(|class_def| class_def.field(field))
            .next()
    }

    /// Nearest declaration of `method` along the superclass chain, so an
    /// override in a subclass shadows the inherited method.
    pub fn lookup_method(
        &self,
        class: Symbol<'src>,
        method: Symbol<'src>,
    ) -> Option<&ClassMethodDef<'src>> {
        self.ancestors(class)
            .filter_map(|class_def| class_def.method(method))
            .next()
    }

    /// All field names visible in `class`, own fields first.
    pub fn visible_fields(&self, class: Symbol<'src>) -> Vec<Symbol<'src>> {
        let mut fields = Vec::new();
        for class_def in self.ancestors(class) {
            let mut own: Vec<_> = class_def.field_names().collect();
            own.sort_by_key(|name| name.as_str());
            fields.extend(own);
        }
        fields
    }

    /// True if following the superclass chain of `class` leads back to
    /// `class` itself.
    pub fn is_on_cycle(&self, class: Symbol<'src>) -> bool {
        let superclass = match self.class(class).and_then(|def| def.superclass) {
            Some(superclass) => superclass,
            None => return false,
        };
        self.ancestors(superclass)
            .any(|class_def| class_def.name == class)
    }
}

pub struct Ancestors<'a, 'src> {
    table: &'a ClassTable<'src>,
    next: Option<Symbol<'src>>,
    visited: HashSet<Symbol<'src>>,
}

impl<'a, 'src> Iterator for Ancestors<'a, 'src> {
    type Item = &'a ClassDef<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.next.take()?;
        if !self.visited.insert(name) {
            return None;
        }
        let class_def = self.table.class(name)?;
        self.next = class_def.superclass;
        Some(class_def)
    }
}

impl<'src> fmt::Display for ClassTable<'src> {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        for class_def in self.iter() {
            write!(f, "class {}", class_def.name)?;
            if let Some(superclass) = class_def.superclass {
                write!(f, " extends {}", superclass)?;
            }
            writeln!(f)?;

            let fields = class_def
                .iter_fields()
                .sorted_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
            for (name, ty) in fields {
                writeln!(f, "    field {} {}", ty, name)?;
            }

            let methods = class_def
                .iter_methods()
                .sorted_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
            for method in methods {
                writeln!(f, "    method {}", method)?;
            }
        }
        Ok(())
    }
}
