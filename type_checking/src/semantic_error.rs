use crate::type_system::CheckedType;
use ast::BinaryOp;
use failure::Fail;
use std::fmt;

/// Where a type comparison failed. Used as the prefix of mismatch messages,
/// e.g. `add type mismatch` or `while condition type mismatch`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Site {
    #[display(fmt = "{}", _0)]
    Binary(BinaryOp),
    #[display(fmt = "not")]
    Not,
    #[display(fmt = "array")]
    ArrayBase,
    #[display(fmt = "array index")]
    ArrayIndex,
    #[display(fmt = "array length")]
    ArrayLength,
    #[display(fmt = "array size")]
    ArraySize,
    #[display(fmt = "assign")]
    Assign,
    #[display(fmt = "array assign target")]
    ArrayTarget,
    #[display(fmt = "array element")]
    ArrayElement,
    #[display(fmt = "if condition")]
    IfCondition,
    #[display(fmt = "while condition")]
    WhileCondition,
    #[display(fmt = "print")]
    Print,
    /// parameter name, method name
    #[display(fmt = "argument `{}` of method `{}`", _0, _1)]
    Argument(String, String),
    #[display(fmt = "return value of method `{}`", _0)]
    Return(String),
}

/// Optional "did you mean" hint of an unknown identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion(pub Option<String>);

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, ", did you mean `{}`?", name),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum SemanticError {
    #[fail(
        display = "{} type mismatch: expected `{}`, found `{}`",
        site, expected, found
    )]
    TypeMismatch {
        site: Site,
        expected: String,
        found: String,
    },

    #[fail(display = "unknown identifier `{}`{}", name, suggestion)]
    UnknownIdentifier { name: String, suggestion: Suggestion },

    #[fail(
        display = "method `{}` is not defined in class `{}` or its superclasses",
        method, class
    )]
    UnknownMember { method: String, class: String },

    #[fail(
        display = "method `{}` takes {} argument(s) but {} were supplied",
        method, expected, actual
    )]
    ArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[fail(
        display = "cannot call method `{}` on a value of type `{}`, the receiver must be an object",
        method, ty
    )]
    NotAClass { method: String, ty: String },

    #[fail(display = "class `{}` does not exist", class)]
    ClassDoesNotExist { class: String },

    #[fail(display = "class `{}` inherits from itself", class)]
    CyclicInheritance { class: String },
}

impl SemanticError {
    pub fn mismatch(site: Site, expected: CheckedType<'_>, found: CheckedType<'_>) -> Self {
        SemanticError::TypeMismatch {
            site,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_the_site() {
        let error = SemanticError::mismatch(
            Site::Binary(BinaryOp::Add),
            CheckedType::Int,
            CheckedType::Boolean,
        );
        assert_eq!(
            error.to_string(),
            "add type mismatch: expected `int`, found `boolean`"
        );

        let error = SemanticError::mismatch(
            Site::Argument("a".to_string(), "get".to_string()),
            CheckedType::IntArray,
            CheckedType::Int,
        );
        assert_eq!(
            error.to_string(),
            "argument `a` of method `get` type mismatch: expected `int[]`, found `int`"
        );
    }

    #[test]
    fn suggestion_is_appended_when_present() {
        let without = SemanticError::UnknownIdentifier {
            name: "cont".to_string(),
            suggestion: Suggestion(None),
        };
        assert_eq!(without.to_string(), "unknown identifier `cont`");

        let with = SemanticError::UnknownIdentifier {
            name: "cont".to_string(),
            suggestion: Suggestion(Some("count".to_string())),
        };
        assert_eq!(
            with.to_string(),
            "unknown identifier `cont`, did you mean `count`?"
        );
    }
}
