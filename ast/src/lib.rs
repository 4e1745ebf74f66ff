#![warn(rust_2018_idioms)]
#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::match_same_arms,
    clippy::use_self
)]
//! The already-parsed program tree consumed by semantic analysis.
//!
//! Lexing and parsing happen elsewhere. Front ends (and tests) construct
//! trees through [`ProgramBuilder`](builder/struct.ProgramBuilder.html),
//! which interns all names and hands out a fresh `NodeId` for every node
//! that later phases annotate.
#[macro_use]
extern crate derive_more;

pub mod builder;
pub mod nodes;
pub mod spanned;

pub use self::{
    builder::ProgramBuilder,
    nodes::*,
    spanned::{Span, Spanned},
};
