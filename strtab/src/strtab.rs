#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::use_self,
    clippy::use_debug
)]

//! String table with zero-copy and amortised O(1) insert.
//!
//! Every identifier of a program (class, method, field and variable names)
//! is interned exactly once, so comparing two `Symbol`s is a pointer
//! comparison.

use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
};

/// Maximum edit distance at which two symbols are still considered related.
const MAX_RELATED_DISTANCE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Unrelated,
    Related { distance: usize },
}

impl Relation {
    pub fn is_related(self) -> bool {
        match self {
            Relation::Unrelated => false,
            Relation::Related { .. } => true,
        }
    }
}

impl std::cmp::Ord for Relation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use self::Relation::*;
        match (self, other) {
            (Unrelated, Unrelated) => std::cmp::Ordering::Equal,
            (Unrelated, _) => std::cmp::Ordering::Greater,
            (_, Unrelated) => std::cmp::Ordering::Less,
            (Related { distance: d1 }, Related { distance: d2 }) => d1.cmp(d2),
        }
    }
}

impl std::cmp::PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub trait Relational {
    fn relation(&self, other: &Self) -> Relation;
}

#[derive(Debug, Clone, Copy, Eq, PartialOrd, Ord)]
pub struct Symbol<'f>(&'f str);

impl<'f> Symbol<'f> {
    fn as_raw(&self) -> *const str {
        self.0 as *const str
    }

    pub fn as_str(&self) -> &'f str {
        self.0
    }

    /// The candidate closest to `self` by edit distance, if any candidate is
    /// related at all. Ties are broken by the order of `candidates`.
    /// `self` itself is never suggested.
    pub fn closest<I>(self, candidates: I) -> Option<Symbol<'f>>
    where
        I: IntoIterator<Item = Symbol<'f>>,
    {
        candidates
            .into_iter()
            .filter(|candidate| *candidate != self)
            .map(|candidate| (self.relation(&candidate), candidate))
            .filter(|(relation, _)| relation.is_related())
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, candidate)| candidate)
    }
}

impl<'f> Relational for Symbol<'f> {
    fn relation(&self, other: &Symbol<'f>) -> Relation {
        let distance = levenshtein::levenshtein(self.0, other.0);
        if distance <= MAX_RELATED_DISTANCE {
            Relation::Related { distance }
        } else {
            Relation::Unrelated
        }
    }
}

impl Hash for Symbol<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_raw().hash(state)
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Symbol<'_>) -> bool {
        self.as_raw() as *const u8 as usize == other.as_raw() as *const u8 as usize
    }
}

impl PartialEq<str> for Symbol<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct StringTable<'f> {
    entries: HashSet<&'f str>,
}

impl<'f> StringTable<'f> {
    pub fn new() -> Self {
        StringTable::default()
    }

    pub fn intern(&mut self, value: &'f str) -> Symbol<'f> {
        match self.entries.get(value) {
            Some(interned) => Symbol(*interned),
            None => {
                self.entries.insert(value);
                Symbol(value)
            }
        }
    }

    /// Look up an already interned string without inserting it.
    pub fn lookup(&self, value: &str) -> Option<Symbol<'f>> {
        self.entries.get(value).map(|s| Symbol(*s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
