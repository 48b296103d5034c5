//! Operator-facing transcript
//!
//! The transfer operations narrate each step as a human-readable line. The
//! transcript is advisory: writes are best-effort and never fail an
//! operation (the exit code is the contract). Generic over the sink so
//! tests can capture output in a buffer.

use std::fmt::Display;
use std::io::{self, Write};

/// Line-oriented transcript sink
pub struct Transcript<W: Write> {
    out: W,
}

impl Transcript<io::Stdout> {
    /// Transcript writing to stdout, as the CLI uses
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Transcript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// A completed step
    pub fn step(&mut self, msg: impl Display) {
        let _ = writeln!(self.out, "✓ {}", msg);
    }

    /// A non-fatal condition the operator should know about
    pub fn warn(&mut self, msg: impl Display) {
        let _ = writeln!(self.out, "! {}", msg);
    }

    /// A failure line; the caller still returns the error itself
    pub fn fail(&mut self, msg: impl Display) {
        let _ = writeln!(self.out, "✗ {}", msg);
    }

    /// Consume the transcript and hand back its sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
