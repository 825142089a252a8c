use std::ops::{Deref, DerefMut};

use crate::interp::Interp;

/// What to do with a pending exception when a guarded region closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Discard any pending exception silently.
    Clear,
    /// Write the pending exception to the diagnostic sink, then discard it.
    #[default]
    Report,
    /// Leave the pending exception in place for the caller to inspect,
    /// re-raise or clear.
    Propagate,
}

/// Brackets a region of interpreter operations.
///
/// A scope captures the operand stack depth when it opens; closing it restores
/// that depth (popping anything the region pushed but did not consume) and
/// resolves any pending exception according to the chosen [`ExitPolicy`].
/// The stack is restored on *every* exit path: explicit [`end`](Scope::end),
/// early return, or drop.
///
/// `Scope` dereferences to [`Interp`], so the guarded region runs its
/// operations straight through the guard:
///
/// ```
/// use lanyard::{ExitPolicy, Interp, Scope, Value};
///
/// let mut vm = Interp::new();
/// let mut scope = Scope::begin(&mut vm);
/// scope.push(Value::Int(1));
/// scope.push(Value::Int(2));
/// assert!(scope.end(ExitPolicy::Report));
/// assert_eq!(vm.stack_depth(), 0);
/// ```
///
/// [`end`](Scope::end) consumes the guard, so a scope cannot be closed twice.
/// A scope that is dropped without being ended resolves with
/// [`ExitPolicy::Clear`]: depth restored, any pending exception silently
/// discarded.
#[derive(Debug)]
pub struct Scope<'i> {
    interp: &'i mut Interp,
    entry_depth: usize,
    closed: bool,
}

impl<'i> Scope<'i> {
    /// Opens a guarded region, capturing the current stack depth.
    pub fn begin(interp: &'i mut Interp) -> Scope<'i> {
        let entry_depth = interp.stack_depth();
        Scope {
            interp,
            entry_depth,
            closed: false,
        }
    }

    /// The stack depth captured when this scope opened.
    #[must_use]
    pub fn entry_depth(&self) -> usize {
        self.entry_depth
    }

    /// Closes the region: restores the stack and resolves any pending
    /// exception per `policy`.
    ///
    /// Returns `true` if no exception was pending at close time. Under
    /// [`ExitPolicy::Propagate`] a `false` return means the exception is still
    /// pending afterwards; under the other policies the cell is empty either
    /// way.
    pub fn end(mut self, policy: ExitPolicy) -> bool {
        self.resolve(policy)
    }

    fn resolve(&mut self, policy: ExitPolicy) -> bool {
        self.closed = true;
        self.interp.truncate_stack(self.entry_depth);
        match policy {
            ExitPolicy::Propagate => !self.interp.has_pending(),
            ExitPolicy::Clear => self.interp.take_pending().is_none(),
            ExitPolicy::Report => match self.interp.take_pending() {
                Some(exc) => {
                    self.interp.write_diagnostic(&exc.to_string());
                    false
                }
                None => true,
            },
        }
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if !self.closed {
            self.resolve(ExitPolicy::Clear);
        }
    }
}

impl Deref for Scope<'_> {
    type Target = Interp;

    fn deref(&self) -> &Interp {
        self.interp
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Interp {
        self.interp
    }
}

impl Interp {
    /// Runs `op` inside a scope and closes it with `policy`.
    ///
    /// Returns the closure's output together with the close result (`true` if
    /// no exception was pending). This is the bracket behind every "do one
    /// guarded thing" pattern; the dispatcher uses the same mechanics
    /// internally.
    pub fn guarded<T>(&mut self, policy: ExitPolicy, op: impl FnOnce(&mut Interp) -> T) -> (T, bool) {
        let mut scope = Scope::begin(self);
        let output = op(&mut scope);
        let ok = scope.end(policy);
        (output, ok)
    }
}
