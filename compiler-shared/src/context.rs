//! All state shared by the phases of one elaboration run.
//!
//! A fresh `Context` is created per run; nothing in it outlives the run.
use crate::timing::Timings;
use diagnostics::Diagnostics;

#[derive(Default)]
pub struct Context {
    pub diagnostics: Diagnostics,
    pub timings: Timings,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
