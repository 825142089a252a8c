use strum::{Display, IntoStaticStr};

use crate::exceptions::ScriptException;
use crate::heap::HeapId;
use crate::interp::Interp;

/// The result type native functions return.
///
/// An `Err` is transferred into the interpreter's pending-exception cell by
/// [`Interp::invoke`]; it never propagates as a Rust panic or host error.
pub type NativeResult = Result<Value, ScriptException>;

/// A native function callable from dispatched calls.
///
/// Plain function pointers keep [`Value`] `Copy`; closures that need captured
/// state should read it from interpreter globals instead. When invoked as a
/// method, `args[0]` is the receiver.
pub type NativeFn = fn(&mut Interp, &[Value]) -> NativeResult;

/// A script value handle.
///
/// Small values are stored inline; strings, lists, dicts and objects live on the
/// interpreter's heap and are referenced by [`HeapId`]. Every variant is `Copy`,
/// so moving a `Value` between the stack, a register, a global or a container
/// copies the handle, never the payload — exactly the interpreter's own
/// assignment semantics.
///
/// `Value` deliberately does not implement `PartialEq`: comparing heap handles
/// would compare identity, not content. Use the extraction helpers
/// ([`as_int`](Value::as_int) and friends) or [`Interp::str_value`] to compare
/// through the payload.
#[derive(Debug, Clone, Copy)]
pub enum Value {
    /// Unset/invalid sentinel: a register that was never written, or a missing
    /// optional argument. Distinct from `None`, which is a real script value.
    Nil,
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(HeapId),
    List(HeapId),
    Dict(HeapId),
    Object(HeapId),
    Function(NativeFn),
}

/// Script-level type of a [`Value`], used in diagnostics and type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Type {
    #[strum(serialize = "nil")]
    Nil,
    #[strum(serialize = "NoneType")]
    NoneType,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "str")]
    Str,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "dict")]
    Dict,
    #[strum(serialize = "object")]
    Object,
    #[strum(serialize = "function")]
    Function,
}

impl Value {
    /// The script-level type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::None => Type::NoneType,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::List(_) => Type::List,
            Value::Dict(_) => Type::Dict,
            Value::Object(_) => Type::Object,
            Value::Function(_) => Type::Function,
        }
    }

    /// The short type name, e.g. `"int"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.value_type().into()
    }

    /// Extracts an integer, or returns `default` if this is not an int.
    ///
    /// Bools and floats do not coerce; an int is an int.
    #[must_use]
    pub fn as_int(&self, default: i64) -> i64 {
        match self {
            Value::Int(v) => *v,
            _ => default,
        }
    }

    /// Extracts a float, accepting ints, or returns `default`.
    #[must_use]
    pub fn as_float(&self, default: f64) -> f64 {
        match self {
            Value::Float(v) => *v,
            Value::Int(v) => *v as f64,
            _ => default,
        }
    }

    /// Extracts a bool, or returns `default` if this is not a bool.
    ///
    /// This is strict extraction, not truthiness; see [`Interp::truthy`].
    #[must_use]
    pub fn as_bool(&self, default: bool) -> bool {
        match self {
            Value::Bool(v) => *v,
            _ => default,
        }
    }

    /// True if this is the script `None` value.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// True if this is the unset sentinel.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// True for values that can be invoked directly.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::None
    }
}
