use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Exception categories recognised by the interpreter.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>`
/// implementations. The string representation matches the variant name exactly
/// (e.g., `NameError` -> "NameError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ExcType {
    /// Base exception class.
    Exception,
    TypeError,
    ValueError,
    NameError,
    AttributeError,
    IndexError,
    KeyError,
    ZeroDivisionError,
    RuntimeError,
}

impl ExcType {
    /// Creates a NameError for an undefined global.
    ///
    /// Format: `NameError: name 'x' is not defined`
    #[must_use]
    pub fn name_error(name: &str) -> ScriptException {
        exc_fmt!(Self::NameError; "name '{name}' is not defined")
    }

    /// Creates an AttributeError for a missing method on a receiver.
    ///
    /// Format: `AttributeError: '<type>' object has no method 'm'`
    #[must_use]
    pub fn no_method_error(type_name: &str, method: &str) -> ScriptException {
        exc_fmt!(Self::AttributeError; "'{type_name}' object has no method '{method}'")
    }

    /// Creates an AttributeError for a missing or unsupported attribute.
    #[must_use]
    pub fn attribute_error(type_name: &str, attr: &str) -> ScriptException {
        exc_fmt!(Self::AttributeError; "'{type_name}' object has no attribute '{attr}'")
    }

    /// Creates a TypeError with a custom message.
    #[must_use]
    pub fn type_error(msg: impl Into<String>) -> ScriptException {
        ScriptException::new(Self::TypeError, Some(msg.into()))
    }

    /// Creates a TypeError for calling a value that is not callable.
    #[must_use]
    pub fn not_callable(type_name: &str) -> ScriptException {
        exc_fmt!(Self::TypeError; "'{type_name}' object is not callable")
    }

    /// Creates a TypeError for a missing required argument.
    #[must_use]
    pub fn missing_argument(index: usize) -> ScriptException {
        exc_fmt!(Self::TypeError; "missing required argument at index {index}")
    }

    /// Creates a TypeError for an argument of the wrong type.
    #[must_use]
    pub fn argument_type_error(index: usize, expected: &str, actual: &str) -> ScriptException {
        exc_fmt!(Self::TypeError; "argument {index} must be {expected}, not '{actual}'")
    }

    /// Creates a ZeroDivisionError.
    #[must_use]
    pub fn zero_division() -> ScriptException {
        exc_static!(Self::ZeroDivisionError; "division by zero")
    }

    /// Creates an IndexError for list access out of range.
    #[must_use]
    pub fn list_index_error() -> ScriptException {
        exc_static!(Self::IndexError; "list index out of range")
    }

    /// Creates a KeyError for a missing dict key.
    #[must_use]
    pub fn key_error(key: &str) -> ScriptException {
        exc_fmt!(Self::KeyError; "'{key}'")
    }
}

/// A script-level exception: a category plus an optional message.
///
/// This is the payload of the interpreter's pending-exception cell and the error
/// type returned by native functions. It carries no traceback; the layer resolves
/// exceptions at scope exit, it does not unwind frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptException {
    exc_type: ExcType,
    message: Option<String>,
}

impl ScriptException {
    /// Creates a new exception with the given category and optional message.
    #[must_use]
    pub fn new(exc_type: ExcType, message: Option<String>) -> Self {
        ScriptException { exc_type, message }
    }

    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the exception formatted the way a script would repr it,
    /// e.g. `ValueError("bad input")`.
    #[must_use]
    pub fn repr(&self) -> String {
        let type_str: &'static str = self.exc_type.into();
        match &self.message {
            Some(msg) => format!("{type_str}({msg:?})"),
            None => format!("{type_str}()"),
        }
    }
}

impl fmt::Display for ScriptException {
    /// Diagnostic form: `ExceptionType: message`, or just the type name
    /// when there is no message.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str: &'static str = self.exc_type.into();
        match &self.message {
            Some(msg) => write!(f, "{type_str}: {msg}"),
            None => f.write_str(type_str),
        }
    }
}

macro_rules! exc_static {
    ($exc_type:expr; $msg:expr) => {
        crate::exceptions::ScriptException::new($exc_type, Some($msg.into()))
    };
}
pub(crate) use exc_static;

macro_rules! exc_fmt {
    ($exc_type:expr; $($fmt_args:tt)*) => {
        crate::exceptions::ScriptException::new($exc_type, Some(format!($($fmt_args)*)))
    };
}
pub(crate) use exc_fmt;
