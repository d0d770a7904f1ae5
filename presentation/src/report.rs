use colored::{ColoredString, Colorize};
use domain::models::Verdict;
use std::io::{self, Write};

pub const CLEAN_MESSAGE: &str = "No hallucinations detected.";
pub const FLAGGED_LABEL: &str = "⚠️ Hallucinations flagged:";

/// Writes the final answer and the hallucination verdict.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    /// With `color` set, labels are styled; `colored` still turns styling off
    /// for non-terminals and when `NO_COLOR` is set.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn report<W: Write>(&self, out: &mut W, answer: &str, verdict: &Verdict) -> io::Result<()> {
        writeln!(out, "{}", self.label("Original Answer:", |t| t.bold()))?;
        writeln!(out, "{}", answer)?;
        writeln!(out)?;
        match verdict {
            Verdict::Clean => writeln!(out, "{}", self.label(CLEAN_MESSAGE, |t| t.green()))?,
            Verdict::Flagged(report) => writeln!(
                out,
                "{} {}",
                self.label(FLAGGED_LABEL, |t| t.yellow().bold()),
                report
            )?,
        }
        out.flush()
    }

    fn label(&self, text: &str, paint: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
