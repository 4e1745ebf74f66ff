//! Helper for writing colors and font styles to the terminal.
//!
//! It primarily ensures that you do not forget to reset the terminal colors
//! and styles after writing through a drop(.) guard/destructor.
//!
//! Calls to functions should pass the raw writer, each function should create
//! its own `ColorOutput` object that is dropped on return.
//!
//! NOT thread-safe.
use termcolor::{Color, ColorSpec, WriteColor};

pub struct ColorOutput<'a> {
    writer: &'a mut dyn WriteColor,
    spec: ColorSpec,
}

impl<'a> ColorOutput<'a> {
    pub fn new(writer: &'a mut dyn WriteColor) -> Self {
        writer.reset().ok();

        Self {
            writer,
            spec: ColorSpec::new(),
        }
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        // coloring failures are not fatal
        self.spec.set_fg(color);
        self.writer.set_color(&self.spec).ok();
    }

    pub fn set_bold(&mut self, yes: bool) {
        self.spec.set_bold(yes);
        self.writer.set_color(&self.spec).ok();
    }

    pub fn writer(&mut self) -> &mut dyn WriteColor {
        self.writer
    }
}

impl<'a> Drop for ColorOutput<'a> {
    fn drop(&mut self) {
        self.writer.reset().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use termcolor::Buffer;

    #[test]
    fn plain_buffer_receives_text_only() {
        let mut buffer = Buffer::no_color();
        {
            let mut output = ColorOutput::new(&mut buffer);
            output.set_color(Some(Color::Red));
            output.set_bold(true);
            write!(output.writer(), "error").unwrap();
        }
        assert_eq!(b"error", buffer.as_slice());
    }
}
