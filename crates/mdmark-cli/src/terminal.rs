//! Terminal host: prompts and pickers over line-based stdin.
//!
//! Prompts and errors go to stderr so stdout carries only results and
//! confirmations. End of input dismisses any prompt.

use std::io::{self, BufRead, Write};

use mdmark_core::{ActiveDocument, Notifier, Picker, Prompt, SourceLocation, TextPrompt};

/// Host capabilities backed by a reader and two writers.
pub struct Terminal<R, O, E> {
    input: R,
    out: O,
    err: E,
    location: Option<SourceLocation>,
}

impl Terminal<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Terminal on the process's standard streams.
    pub fn stdio(location: Option<SourceLocation>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr(), location)
    }
}

impl<R: BufRead, O: Write, E: Write> Terminal<R, O, E> {
    pub fn new(input: R, out: O, err: E, location: Option<SourceLocation>) -> Self {
        Self {
            input,
            out,
            err,
            location,
        }
    }

    /// One line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                None
            }
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<R: BufRead, O: Write, E: Write> TextPrompt for Terminal<R, O, E> {
    fn ask(&mut self, prompt: Prompt<'_>) -> Option<String> {
        let _ = write!(self.err, "{} [{}]: ", prompt.message, prompt.default);
        let _ = self.err.flush();
        let line = self.read_line()?;
        // A blank line accepts the suggestion.
        if line.trim().is_empty() {
            Some(prompt.default.to_string())
        } else {
            Some(line)
        }
    }
}

impl<R: BufRead, O: Write, E: Write> Picker for Terminal<R, O, E> {
    fn pick(&mut self, placeholder: &str, items: &[String]) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        let _ = writeln!(self.err, "{placeholder}");
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(self.err, "  {}) {item}", i + 1);
        }
        loop {
            let _ = write!(self.err, "Choose 1-{}: ", items.len());
            let _ = self.err.flush();
            let line = self.read_line()?;
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            if let Ok(n) = line.parse::<usize>() {
                if (1..=items.len()).contains(&n) {
                    return Some(n - 1);
                }
            }
            if let Some(i) = items.iter().position(|item| item == line) {
                return Some(i);
            }
            let _ = writeln!(self.err, "'{line}' is not one of the choices.");
        }
    }
}

impl<R, O, E> ActiveDocument for Terminal<R, O, E> {
    fn location(&self) -> Option<SourceLocation> {
        self.location.clone()
    }
}

impl<R, O: Write, E: Write> Notifier for Terminal<R, O, E> {
    fn info(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(self.err, "error: {message}");
    }
}
