use std::{fmt, ops::Deref};

/// Source location of a node. Only the line survives parsing; rows are one
/// indexed, exactly as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "line {}", line)]
pub struct Span {
    line: usize,
}

impl Span {
    pub fn new(line: usize) -> Self {
        Self { line }
    }

    pub fn line(self) -> usize {
        self.line
    }
}

#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub span: Span,
    pub data: T,
}

impl<T> Eq for Spanned<T> where T: Eq {}
impl<T> PartialEq for Spanned<T>
where
    T: PartialEq,
{
    /// This only compares the `data`! I.e. two `Spanned`s are equal even if
    /// they stem from different lines, as long as the content is the same.
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> fmt::Display for Spanned<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.data, self.span)
    }
}

impl<T> Spanned<T> {
    pub fn new(span: Span, data: T) -> Self {
        Spanned { span, data }
    }

    pub fn map<U, F>(&self, f: F) -> Spanned<U>
    where
        F: FnOnce(&T) -> U,
    {
        Spanned {
            span: self.span,
            data: f(&self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_span() {
        let a = Spanned::new(Span::new(1), 42);
        let b = Spanned::new(Span::new(7), 42);
        assert_eq!(a, b);
        assert_ne!(a, Spanned::new(Span::new(1), 43));
    }

    #[test]
    fn display_mentions_line() {
        let spanned = Spanned::new(Span::new(3), "x");
        assert_eq!("x at line 3", spanned.to_string());
        assert_eq!(3, spanned.map(|s| s.len()).span.line());
    }
}
