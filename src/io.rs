use std::cell::RefCell;
use std::rc::Rc;

/// Trait for receiving diagnostic output from the interpreter layer.
///
/// Implement this to capture or redirect what the layer would otherwise write
/// to the terminal: exception reports from
/// [`ExitPolicy::Report`](crate::ExitPolicy::Report) and the output of
/// [`print_value`](crate::Interp::print_value). There is no global logger; the
/// host owns the channel.
pub trait DiagnosticSink {
    /// Called once per complete line of output, without a trailing newline.
    fn write_line(&mut self, line: &str);
}

/// Default sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StdSink;

impl DiagnosticSink for StdSink {
    fn write_line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// A sink that collects all output into a shared string buffer.
///
/// Uses interior mutability via `Rc<RefCell>` so a clone of the sink can be
/// handed to the interpreter while the original stays with the caller for
/// inspection. Useful for testing or capturing diagnostics programmatically.
#[derive(Debug, Clone, Default)]
pub struct CollectStringSink(Rc<RefCell<String>>);

impl CollectStringSink {
    /// Creates a new empty `CollectStringSink`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the collected output.
    ///
    /// # Panics
    /// Panics if the internal buffer is currently borrowed mutably.
    #[must_use]
    pub fn output(&self) -> String {
        self.0.borrow().clone()
    }
}

impl DiagnosticSink for CollectStringSink {
    fn write_line(&mut self, line: &str) {
        let mut buf = self.0.borrow_mut();
        buf.push_str(line);
        buf.push('\n');
    }
}

/// A sink that ignores all output.
///
/// Useful for suppressing diagnostics during testing or benchmarking.
#[derive(Debug, Default)]
pub struct NoSink;

impl DiagnosticSink for NoSink {
    fn write_line(&mut self, _line: &str) {}
}
