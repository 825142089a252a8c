use lanyard::{args, CallOptions, ExcType, Interp, NativeResult, NoSink, Target, Value};

fn divide(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    let a = args::int_arg(argv, 0)?;
    let b = args::int_arg(argv, 1)?;
    if b == 0 {
        return Err(ExcType::zero_division());
    }
    Ok(Value::Int(a / b))
}

fn strlen(vm: &mut Interp, argv: &[Value]) -> NativeResult {
    let s = args::str_arg(vm, argv, 0)?;
    Ok(Value::Int(s.chars().count() as i64))
}

fn is_positive(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Bool(args::float_arg(argv, 0)? > 0.0))
}

fn noop(_vm: &mut Interp, _argv: &[Value]) -> NativeResult {
    Ok(Value::None)
}

fn shout(vm: &mut Interp, argv: &[Value]) -> NativeResult {
    let word = args::opt_str_arg(vm, argv, 0, "hey")?.to_owned();
    Ok(vm.new_str(&word.to_uppercase()))
}

fn repeat(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    let n = args::opt_int_arg(argv, 1, 2)?;
    Ok(Value::Int(args::int_arg(argv, 0)? * n))
}

fn vm_with(bindings: &[(&str, lanyard::NativeFn)]) -> Interp {
    let mut vm = Interp::with_sink(NoSink);
    for (name, func) in bindings {
        vm.bind(name, *func);
    }
    vm
}

#[test]
fn bound_function_is_callable_by_name() {
    let mut vm = vm_with(&[("divide", divide)]);
    let result = vm.call_global("divide", &[Value::Int(10), Value::Int(2)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(5));
}

#[test]
fn native_error_becomes_pending_exception() {
    let mut vm = vm_with(&[("divide", divide)]);
    let result = vm.call(
        Target::Global("divide"),
        &[Value::Int(1), Value::Int(0)],
        CallOptions::propagate(),
    );
    assert!(!result.ok());
    let pending = vm.take_pending().expect("ZeroDivisionError should be pending");
    assert_eq!(pending.exc_type(), ExcType::ZeroDivisionError);
}

#[test]
fn string_arguments_extract() {
    let mut vm = vm_with(&[("strlen", strlen)]);
    let arg = vm.new_str("héllo");
    let result = vm.call_global("strlen", &[arg]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(5));
}

#[test]
fn float_argument_accepts_int() {
    let mut vm = vm_with(&[("is_positive", is_positive)]);
    let result = vm.call_global("is_positive", &[Value::Int(3)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_bool(false)), Some(true));

    let result = vm.call_global("is_positive", &[Value::Float(-0.5)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_bool(true)), Some(false));
}

#[test]
fn none_returning_function() {
    let mut vm = vm_with(&[("noop", noop)]);
    let result = vm.call_global("noop", &[]);
    assert!(result.ok());
    assert_eq!(result.value().map(|r| vm.read(r).is_none()), Some(true));
}

#[test]
fn optional_string_argument() {
    let mut vm = vm_with(&[("shout", shout)]);

    let result = vm.call_global("shout", &[]);
    let value = result.into_value().map(|r| vm.read(&r)).expect("ok");
    assert_eq!(vm.str_value(value, ""), "HEY");

    let arg = vm.new_str("quiet");
    let result = vm.call_global("shout", &[arg]);
    let value = result.into_value().map(|r| vm.read(&r)).expect("ok");
    assert_eq!(vm.str_value(value, ""), "QUIET");

    // Passing None explicitly also selects the default.
    let result = vm.call_global("shout", &[Value::None]);
    let value = result.into_value().map(|r| vm.read(&r)).expect("ok");
    assert_eq!(vm.str_value(value, ""), "HEY");
}

#[test]
fn optional_int_argument() {
    let mut vm = vm_with(&[("repeat", repeat)]);
    let result = vm.call_global("repeat", &[Value::Int(21)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(42));

    let result = vm.call_global("repeat", &[Value::Int(21), Value::Int(3)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(63));
}

#[test]
fn wrong_argument_count_is_a_type_error() {
    let mut vm = vm_with(&[("divide", divide)]);
    let result = vm.call(Target::Global("divide"), &[Value::Int(1)], CallOptions::propagate());
    assert!(!result.ok());
    let pending = vm.take_pending().expect("TypeError should be pending");
    assert_eq!(pending.exc_type(), ExcType::TypeError);
    assert_eq!(pending.message(), Some("missing required argument at index 1"));
}

#[test]
fn wrong_argument_type_is_a_type_error() {
    let mut vm = vm_with(&[("divide", divide)]);
    let arg = vm.new_str("ten");
    let result = vm.call(
        Target::Global("divide"),
        &[arg, Value::Int(2)],
        CallOptions::propagate(),
    );
    assert!(!result.ok());
    let pending = vm.take_pending().expect("TypeError should be pending");
    assert_eq!(pending.exc_type(), ExcType::TypeError);
    assert_eq!(pending.message(), Some("argument 0 must be int, not 'str'"));
}

#[test]
fn globals_round_trip() {
    let mut vm = vm_with(&[]);
    vm.set_global("answer", Value::Int(42));
    assert_eq!(vm.get_global("answer").map(|v| v.as_int(0)), Some(42));
    assert!(vm.get_global("undefined_name").is_none());

    // Rebinding overwrites.
    vm.set_global("answer", Value::Int(43));
    assert_eq!(vm.get_global("answer").map(|v| v.as_int(0)), Some(43));
}

#[test]
fn functions_bound_in_modules() {
    let mut vm = vm_with(&[]);
    let math = vm.module("math");
    assert!(vm.bind_in(math, "double", |_vm, argv| {
        Ok(Value::Int(args::int_arg(argv, 0)? * 2))
    }));

    // Module lookups return the same object.
    let again = vm.module("math");
    let func = vm.get_attr(again, "double").expect("attribute was bound");
    let result = vm.call_value(func, &[Value::Int(4)]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(8));
}

#[test]
fn bind_in_rejects_non_objects() {
    let mut vm = vm_with(&[]);
    assert!(!vm.bind_in(Value::Int(1), "f", noop));
    let pending = vm.take_pending().expect("TypeError should be pending");
    assert_eq!(pending.exc_type(), ExcType::TypeError);
}
