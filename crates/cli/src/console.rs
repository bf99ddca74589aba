//! Terminal [`Surface`].
//!
//! Writes every surface update as plain lines to a writer. Fragments are
//! printed as rendered HTML under a header naming their target.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use trendx_dashboard::{ConnectionStatus, Counter, FormKind, Section, Surface, Target};

/// How `confirm` prompts are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Answer every prompt with the given value without asking.
    Assume(bool),
    /// Ask on the terminal and read the answer from stdin.
    Ask,
}

/// A surface printing to `out`.
pub struct ConsoleSurface<W> {
    out: W,
    confirm: Confirm,
}

impl ConsoleSurface<io::Stdout> {
    pub fn stdout(confirm: Confirm) -> Self {
        Self::new(io::stdout(), confirm)
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub const fn new(out: W, confirm: Confirm) -> Self {
        Self { out, confirm }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to write to console");
        }
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn show_section(&mut self, section: Section) {
        self.line(&format!("== {section} =="));
    }

    fn replace(&mut self, target: Target, html: &str) {
        self.line(&format!("-- {} --", target.id()));
        self.line(html.trim_end());
    }

    fn set_counter(&mut self, counter: Counter, text: &str) {
        self.line(&format!("{}: {text}", counter.id()));
    }

    fn set_status(&mut self, status: ConnectionStatus) {
        self.line(&format!("status: {status}"));
    }

    fn alert(&mut self, message: &str) {
        self.line(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        match self.confirm {
            Confirm::Assume(answer) => {
                debug!(prompt = message, answer, "Confirmation answered without prompting");
                answer
            }
            Confirm::Ask => {
                if let Err(e) = write!(self.out, "{message} [y/N] ").and_then(|()| self.out.flush())
                {
                    warn!(error = %e, "Failed to write to console");
                }
                let mut answer = String::new();
                match io::stdin().lock().read_line(&mut answer) {
                    Ok(_) => is_yes(&answer),
                    Err(e) => {
                        warn!(error = %e, "Failed to read confirmation");
                        false
                    }
                }
            }
        }
    }

    fn reset_form(&mut self, form: FormKind) {
        debug!(form = form.id(), "Form reset");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
