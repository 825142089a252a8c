//! Built-in method tables for str/list/dict receivers.
//!
//! Method resolution ([`Interp::push_method`](crate::Interp::push_method))
//! consults these after object attributes. Each method is an ordinary native
//! function with the receiver as `args[0]`.

use crate::args;
use crate::exceptions::ExcType;
use crate::heap::HeapData;
use crate::interp::Interp;
use crate::value::{NativeFn, NativeResult, Type, Value};

/// Looks up a built-in method for a receiver type.
pub(crate) fn builtin_method(receiver: Type, name: &str) -> Option<NativeFn> {
    match (receiver, name) {
        (Type::Str, "upper") => Some(str_upper),
        (Type::Str, "lower") => Some(str_lower),
        (Type::List, "append") => Some(list_append),
        (Type::List, "copy") => Some(list_copy),
        (Type::List, "clear") => Some(list_clear),
        (Type::Dict, "get") => Some(dict_get),
        _ => None,
    }
}

fn receiver(args: &[Value]) -> Value {
    args.first().copied().unwrap_or(Value::Nil)
}

fn str_upper(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::Str(id) = receiver(args) else {
        return Err(ExcType::type_error("upper() requires a str receiver"));
    };
    let upper = match vm.heap.get(id) {
        HeapData::Str(s) => s.to_uppercase(),
        _ => return Err(ExcType::type_error("upper() requires a str receiver")),
    };
    Ok(vm.new_str(&upper))
}

fn str_lower(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::Str(id) = receiver(args) else {
        return Err(ExcType::type_error("lower() requires a str receiver"));
    };
    let lower = match vm.heap.get(id) {
        HeapData::Str(s) => s.to_lowercase(),
        _ => return Err(ExcType::type_error("lower() requires a str receiver")),
    };
    Ok(vm.new_str(&lower))
}

fn list_append(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::List(id) = receiver(args) else {
        return Err(ExcType::type_error("append() requires a list receiver"));
    };
    let item = args::ref_arg(args, 1)?;
    if let HeapData::List(items) = vm.heap.get_mut(id) {
        items.push(item);
    }
    Ok(Value::None)
}

fn list_copy(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::List(id) = receiver(args) else {
        return Err(ExcType::type_error("copy() requires a list receiver"));
    };
    let items = match vm.heap.get(id) {
        HeapData::List(items) => items.clone(),
        _ => return Err(ExcType::type_error("copy() requires a list receiver")),
    };
    Ok(vm.alloc_list(items))
}

fn list_clear(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::List(id) = receiver(args) else {
        return Err(ExcType::type_error("clear() requires a list receiver"));
    };
    if let HeapData::List(items) = vm.heap.get_mut(id) {
        items.clear();
    }
    Ok(Value::None)
}

/// `dict.get(key, default=None)` — missing keys return the default instead of
/// raising KeyError.
fn dict_get(vm: &mut Interp, args: &[Value]) -> NativeResult {
    let Value::Dict(id) = receiver(args) else {
        return Err(ExcType::type_error("get() requires a dict receiver"));
    };
    let key = args::str_arg(vm, args, 1)?.to_owned();
    let default = args.get(2).copied().unwrap_or(Value::None);
    match vm.heap.get(id) {
        HeapData::Dict(map) => Ok(map.get(&key).copied().unwrap_or(default)),
        _ => Err(ExcType::type_error("get() requires a dict receiver")),
    }
}
