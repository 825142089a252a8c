#![allow(dead_code)]
//! Shared fixtures: an interpreter with a quiet sink and a handful of native
//! functions bound as globals.

use lanyard::args;
use lanyard::{ExcType, Interp, NativeResult, NoSink, ScriptException, Value};

/// An interpreter with diagnostics suppressed and the fixture functions bound.
pub fn test_vm() -> Interp {
    let mut vm = Interp::with_sink(NoSink);
    bind_fixtures(&mut vm);
    vm
}

pub fn bind_fixtures(vm: &mut Interp) {
    vm.bind("get_value", get_value);
    vm.bind("double", double);
    vm.bind("add_ten", add_ten);
    vm.bind("add", add);
    vm.bind("sum3", sum3);
    vm.bind("multiply", multiply);
    vm.bind("greet", greet);
    vm.bind("fail", fail);
}

fn get_value(_vm: &mut Interp, _argv: &[Value]) -> NativeResult {
    Ok(Value::Int(42))
}

fn double(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Int(args::int_arg(argv, 0)? * 2))
}

fn add_ten(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Int(args::int_arg(argv, 0)? + 10))
}

fn add(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Int(args::int_arg(argv, 0)? + args::int_arg(argv, 1)?))
}

fn sum3(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Int(
        args::int_arg(argv, 0)? + args::int_arg(argv, 1)? + args::int_arg(argv, 2)?,
    ))
}

fn multiply(_vm: &mut Interp, argv: &[Value]) -> NativeResult {
    Ok(Value::Int(args::int_arg(argv, 0)? * args::int_arg(argv, 1)?))
}

fn greet(vm: &mut Interp, argv: &[Value]) -> NativeResult {
    let name = args::str_arg(vm, argv, 0)?.to_owned();
    Ok(vm.new_str(&format!("Hello, {name}")))
}

fn fail(_vm: &mut Interp, _argv: &[Value]) -> NativeResult {
    Err(ScriptException::new(ExcType::ValueError, Some("oops".to_owned())))
}
