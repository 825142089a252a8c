//! Argument extraction for native functions.
//!
//! Required-argument helpers raise `TypeError` (as a returned
//! [`ScriptException`], propagated with `?`) when the argument is missing or
//! has the wrong type. Optional-argument helpers treat a missing argument,
//! `Nil` or `None` as "use the default".
//!
//! ```
//! use lanyard::{Interp, NativeResult, Value};
//! use lanyard::args;
//!
//! fn clamp(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
//!     let x = args::int_arg(argv, 0)?;
//!     let lo = args::opt_int_arg(argv, 1, 0)?;
//!     Ok(Value::Int(x.max(lo)))
//! }
//! ```

use crate::exceptions::{ExcType, ScriptException};
use crate::interp::Interp;
use crate::value::Value;

/// A required argument, untyped.
pub fn ref_arg(args: &[Value], index: usize) -> Result<Value, ScriptException> {
    args.get(index)
        .copied()
        .ok_or_else(|| ExcType::missing_argument(index))
}

/// A required int argument.
pub fn int_arg(args: &[Value], index: usize) -> Result<i64, ScriptException> {
    match ref_arg(args, index)? {
        Value::Int(v) => Ok(v),
        other => Err(ExcType::argument_type_error(index, "int", other.type_name())),
    }
}

/// A required float argument; ints coerce.
pub fn float_arg(args: &[Value], index: usize) -> Result<f64, ScriptException> {
    match ref_arg(args, index)? {
        Value::Float(v) => Ok(v),
        Value::Int(v) => Ok(v as f64),
        other => Err(ExcType::argument_type_error(index, "float", other.type_name())),
    }
}

/// A required bool argument.
pub fn bool_arg(args: &[Value], index: usize) -> Result<bool, ScriptException> {
    match ref_arg(args, index)? {
        Value::Bool(v) => Ok(v),
        other => Err(ExcType::argument_type_error(index, "bool", other.type_name())),
    }
}

/// A required string argument.
///
/// The returned slice borrows the interpreter's heap; copy it out before the
/// function mutates the interpreter again.
pub fn str_arg<'a>(vm: &'a Interp, args: &[Value], index: usize) -> Result<&'a str, ScriptException> {
    match ref_arg(args, index)? {
        Value::Str(id) => vm
            .heap
            .get_str(id)
            .ok_or_else(|| ExcType::argument_type_error(index, "str", "object")),
        other => Err(ExcType::argument_type_error(index, "str", other.type_name())),
    }
}

/// An argument counts as absent when it is missing, `Nil` or `None`.
fn present(args: &[Value], index: usize) -> Option<Value> {
    match args.get(index).copied() {
        None | Some(Value::Nil | Value::None) => None,
        some => some,
    }
}

/// An optional int argument with a default.
pub fn opt_int_arg(args: &[Value], index: usize, default: i64) -> Result<i64, ScriptException> {
    match present(args, index) {
        None => Ok(default),
        Some(Value::Int(v)) => Ok(v),
        Some(other) => Err(ExcType::argument_type_error(index, "int", other.type_name())),
    }
}

/// An optional float argument with a default; ints coerce.
pub fn opt_float_arg(args: &[Value], index: usize, default: f64) -> Result<f64, ScriptException> {
    match present(args, index) {
        None => Ok(default),
        Some(Value::Float(v)) => Ok(v),
        Some(Value::Int(v)) => Ok(v as f64),
        Some(other) => Err(ExcType::argument_type_error(index, "float", other.type_name())),
    }
}

/// An optional bool argument with a default.
pub fn opt_bool_arg(args: &[Value], index: usize, default: bool) -> Result<bool, ScriptException> {
    match present(args, index) {
        None => Ok(default),
        Some(Value::Bool(v)) => Ok(v),
        Some(other) => Err(ExcType::argument_type_error(index, "bool", other.type_name())),
    }
}

/// An optional string argument with a default.
pub fn opt_str_arg<'a>(
    vm: &'a Interp,
    args: &[Value],
    index: usize,
    default: &'a str,
) -> Result<&'a str, ScriptException> {
    match present(args, index) {
        None => Ok(default),
        Some(_) => str_arg(vm, args, index),
    }
}
