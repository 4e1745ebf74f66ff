#![warn(rust_2018_idioms)]
#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::match_same_arms
)]
//! Semantic analysis ("elaboration") of MiniJava programs.
//!
//! `check` builds the class table, resolves every identifier and method
//! invocation, and infers the type of every expression. Problems are
//! reported to the `Diagnostics` of the passed `Context`; the annotations
//! are returned in a `TypeAnalysis` side table keyed by `NodeId`.
#[macro_use]
extern crate derive_more;

pub mod checker;
pub mod method_body_type_checker;
pub mod options;
pub mod semantic_error;
pub mod type_analysis;
pub mod type_system;
pub mod unused;

pub use self::{
    checker::{check, Elaboration},
    options::{ElaborationOptions, StrictCheck, StrictChecks},
    semantic_error::{SemanticError, Site},
    type_analysis::{CallInfo, TypeAnalysis, VarInfo},
    type_system::{CheckedType, ClassDef, ClassMethodDef, ClassTable, MethodParamDef},
    unused::{UnusedVariable, UnusedVariableReport, VarKind},
};
