//! The diagnostics object collects the warnings and errors generated during
//! semantic analysis. Nothing is printed while analysing; the caller decides
//! whether and how to present the collected messages.
//!
//! This implementation is NOT thread-safe.
use ast::{Span, Spanned};
use failure::Fail;
use std::{
    cell::{Ref, RefCell},
    io::{self, Write},
};
use termcolor::{Color, WriteColor};
use utils::color::ColorOutput;

/// Instead of writing errors and warnings directly to stdout, they are
/// collected in this object.
///
/// This has several advantages:
/// - all errors of a run are available to the caller, in emission order.
/// - we have a single source responsible for formatting compiler messages.
#[derive(Default)]
pub struct Diagnostics {
    messages: RefCell<Vec<Message>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum MessageLevel {
    Error,
    Warning,
}

impl MessageLevel {
    fn color(self) -> Option<Color> {
        // `None` means default color
        match self {
            MessageLevel::Error => Some(Color::Red),
            MessageLevel::Warning => Some(Color::Yellow),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
        }
    }
}

/// A single diagnostic record.
#[derive(Debug)]
pub struct Message {
    pub level: MessageLevel,
    pub span: Option<Span>,
    pub kind: Box<dyn Fail>,
}

impl Message {
    pub fn line(&self) -> Option<usize> {
        self.span.map(Span::line)
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Access the concrete error type that was reported.
    pub fn downcast_ref<T: Fail>(&self) -> Option<&T> {
        self.kind.downcast_ref::<T>()
    }

    fn write_colored(&self, writer: &mut dyn WriteColor) -> io::Result<()> {
        let mut output = ColorOutput::new(writer);
        output.set_color(self.level.color());
        output.set_bold(true);
        write!(output.writer(), "{}: ", self.level.name())?;

        output.set_color(None);
        writeln!(output.writer(), "{}", self.kind)?;

        if let Some(span) = self.span {
            output.set_color(HIGHLIGHT);
            writeln!(output.writer(), "  --> {}", span)?;
        }
        Ok(())
    }
}

const HIGHLIGHT: Option<Color> = Some(Color::Cyan);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when an error message was emitted, false
    /// if only warnings were emitted.
    pub fn errored(&self) -> bool {
        self.count(MessageLevel::Error) > 0
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|msg| msg.level == level)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn emit<E: Fail>(&self, level: MessageLevel, span: Option<Span>, kind: E) {
        self.messages.borrow_mut().push(Message {
            level,
            span,
            kind: Box::new(kind),
        });
    }

    pub fn error<E: Fail>(&self, spanned: Spanned<E>) {
        self.emit(MessageLevel::Error, Some(spanned.span), spanned.data)
    }

    pub fn warning<E: Fail>(&self, spanned: Spanned<E>) {
        self.emit(MessageLevel::Warning, Some(spanned.span), spanned.data)
    }

    /// All messages in emission order.
    pub fn messages(&self) -> Ref<'_, [Message]> {
        Ref::map(self.messages.borrow(), |messages| messages.as_slice())
    }

    pub fn write_to(&self, writer: &mut dyn WriteColor) -> io::Result<()> {
        for msg in self.messages.borrow().iter() {
            msg.write_colored(writer)?;
        }
        Ok(())
    }

    pub fn write_statistics(&self, writer: &mut dyn WriteColor) -> io::Result<()> {
        let mut output = ColorOutput::new(writer);

        output.set_bold(true);

        if self.errored() {
            output.set_color(MessageLevel::Error.color());
            writeln!(
                output.writer(),
                "Elaboration failed with {}",
                match self.count(MessageLevel::Error) {
                    1 => "an error".to_string(),
                    n => format!("{} errors", n),
                }
            )
        } else {
            output.set_color(Some(Color::Green));
            writeln!(
                output.writer(),
                "Elaboration finished successfully {}",
                match self.count(MessageLevel::Warning) {
                    0 => "without warnings".to_string(),
                    1 => "with a warning".to_string(),
                    n => format!("with {} warnings", n),
                }
            )
        }
    }
}
