//! The call dispatcher: resolve a target, invoke it inside a scope, hand back
//! a result with a chosen storage policy.

use crate::exceptions::ExcType;
use crate::interp::Interp;
use crate::scope::{ExitPolicy, Scope};
use crate::slot::{SlotId, SlotRef};
use crate::value::Value;

/// What to call.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A callable looked up in the global namespace. A missing name becomes a
    /// pending `NameError`.
    Global(&'a str),
    /// A callable reference held by the host.
    Callable(Value),
    /// A method resolved on a receiver. A missing method becomes a pending
    /// `AttributeError`, with the stack left exactly as it was.
    Method(Value, &'a str),
}

/// Where the call result lives afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Store {
    /// The result stays in the volatile slot; the next constructor or call
    /// overwrites it. Read it before doing anything else.
    #[default]
    Volatile,
    /// The result is copied into the named register immediately after a
    /// successful invocation, before anything else can touch the volatile
    /// slot. A failed call leaves the register untouched.
    Stable(SlotId),
}

/// Exception policy and storage policy for one dispatched call.
///
/// The default matches the fire-and-forget shape: report the exception to the
/// diagnostic sink, result in the volatile slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    pub policy: ExitPolicy,
    pub store: Store,
}

impl CallOptions {
    /// Discard any exception silently; volatile result.
    #[must_use]
    pub fn silent() -> Self {
        CallOptions {
            policy: ExitPolicy::Clear,
            store: Store::Volatile,
        }
    }

    /// Leave any exception pending for the caller; volatile result.
    #[must_use]
    pub fn propagate() -> Self {
        CallOptions {
            policy: ExitPolicy::Propagate,
            store: Store::Volatile,
        }
    }

    /// Copy the result into `slot` on success; default exception policy.
    #[must_use]
    pub fn stable(slot: SlotId) -> Self {
        CallOptions {
            policy: ExitPolicy::default(),
            store: Store::Stable(slot),
        }
    }

    /// Replaces the exception policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ExitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the storage policy with stable storage into `slot`.
    #[must_use]
    pub fn stored_in(mut self, slot: SlotId) -> Self {
        self.store = Store::Stable(slot);
        self
    }
}

/// The outcome of one dispatched call.
///
/// Carries success and, on success, a view of where the result lives. The type
/// deliberately does not say *why* a call failed — under
/// [`ExitPolicy::Propagate`] the pending exception has the details, under the
/// clearing policies the caller asked not to care.
#[derive(Debug)]
pub struct CallResult {
    value: Option<SlotRef>,
}

impl CallResult {
    fn success(value: SlotRef) -> Self {
        CallResult { value: Some(value) }
    }

    fn failure() -> Self {
        CallResult { value: None }
    }

    /// True if the call succeeded.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.value.is_some()
    }

    /// A view of the result's storage, or `None` if the call failed.
    #[must_use]
    pub fn value(&self) -> Option<&SlotRef> {
        self.value.as_ref()
    }

    /// Consumes the result, yielding the storage view.
    #[must_use]
    pub fn into_value(self) -> Option<SlotRef> {
        self.value
    }
}

impl Interp {
    /// Dispatches one call: resolve `target`, invoke it with `args`, resolve
    /// the exception and storage policies in `options`.
    ///
    /// The whole operation runs inside an internal [`Scope`], so the operand
    /// stack is balanced on every path — including a method-lookup failure,
    /// where the pushed receiver is popped back off before the error is
    /// raised. An empty `args` slice is a zero-argument call.
    ///
    /// With [`Store::Stable`], the volatile result is copied into the
    /// requested register before the scope closes; a failed call never writes
    /// the register.
    pub fn call(&mut self, target: Target<'_>, args: &[Value], options: CallOptions) -> CallResult {
        let mut scope = Scope::begin(self);
        let invoked = match target {
            Target::Global(name) => match scope.get_global(name) {
                Some(callable) => scope.invoke(callable, args),
                None => {
                    scope.raise(ExcType::name_error(name));
                    false
                }
            },
            Target::Callable(callable) => scope.invoke(callable, args),
            Target::Method(receiver, name) => {
                scope.push(receiver);
                if scope.push_method(name) {
                    for &arg in args {
                        scope.push(arg);
                    }
                    scope.vector_call(args.len())
                } else {
                    // Lookup failed without raising: take the receiver back off
                    // so depth is exactly as it was before resolution.
                    let _ = scope.pop();
                    scope.raise(ExcType::no_method_error(receiver.type_name(), name));
                    false
                }
            }
        };
        let result = if invoked {
            match options.store {
                Store::Volatile => CallResult::success(SlotRef::volatile()),
                Store::Stable(slot) => {
                    scope.copy_register(SlotId::VOLATILE, slot);
                    CallResult::success(SlotRef::new(slot))
                }
            }
        } else {
            CallResult::failure()
        };
        scope.end(options.policy);
        result
    }

    /// Calls a global by name with default options (report, volatile).
    pub fn call_global(&mut self, name: &str, args: &[Value]) -> CallResult {
        self.call(Target::Global(name), args, CallOptions::default())
    }

    /// Calls a callable reference with default options (report, volatile).
    pub fn call_value(&mut self, callable: Value, args: &[Value]) -> CallResult {
        self.call(Target::Callable(callable), args, CallOptions::default())
    }

    /// Calls a method on a receiver with default options (report, volatile).
    pub fn call_method(&mut self, receiver: Value, name: &str, args: &[Value]) -> CallResult {
        self.call(Target::Method(receiver, name), args, CallOptions::default())
    }
}
