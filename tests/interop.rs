//! The layer and the raw substrate API are designed to mix freely; these tests
//! drive them together.

mod common;

use common::test_vm;
use lanyard::{ExitPolicy, Scope, SlotId, Value};

#[test]
fn raw_stack_ops_inside_a_scope() {
    let mut vm = test_vm();
    let mut scope = Scope::begin(&mut vm);
    scope.push(Value::Int(1));
    scope.push(Value::Int(2));
    assert_eq!(scope.peek().map(|v| v.as_int(0)), Some(2));
    scope.shrink(1);
    assert_eq!(scope.stack_depth(), 1);
    assert!(scope.end(ExitPolicy::Report));
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn raw_invoke_then_dispatched_call() {
    let mut vm = test_vm();

    // Raw invoke: result lands in the volatile register.
    let callable = vm.get_global("double").expect("fixture is bound");
    assert!(vm.invoke(callable, &[Value::Int(4)]));
    assert_eq!(vm.register(SlotId::R0).as_int(0), 8);

    // Feed it straight into a dispatched call.
    let arg = vm.register(SlotId::R0);
    let result = vm.call_global("add_ten", &[arg]);
    assert_eq!(result.value().map(|r| vm.read(r).as_int(0)), Some(18));
}

#[test]
fn manual_method_calling_convention() {
    let mut vm = test_vm();
    let text = vm.new_str("abc");
    let depth = vm.stack_depth();

    // The raw sequence the dispatcher automates: receiver, method, vectorcall.
    vm.push(text);
    assert!(vm.push_method("upper"));
    assert!(vm.vector_call(0));
    assert_eq!(vm.stack_depth(), depth);
    assert_eq!(vm.str_value(vm.register(SlotId::R0), ""), "ABC");
}

#[test]
fn failed_manual_method_lookup_leaves_receiver() {
    let mut vm = test_vm();
    let text = vm.new_str("abc");
    vm.push(text);
    assert!(!vm.push_method("no_such_method"));
    // Lookup failure leaves the stack as found: receiver still on top.
    assert_eq!(vm.stack_depth(), 1);
    assert_eq!(vm.str_value(vm.peek().expect("receiver"), ""), "abc");
    let _ = vm.pop();
}

#[test]
fn raw_raise_is_resolved_by_scope() {
    let mut vm = test_vm();
    let mut scope = Scope::begin(&mut vm);
    scope.raise(lanyard::ExcType::type_error("manual"));
    assert!(scope.has_pending());
    assert!(!scope.end(ExitPolicy::Clear));
    assert!(!vm.has_pending());
}

#[test]
fn register_reuse_pattern() {
    let mut vm = test_vm();

    // Phase 1: r4 holds an intermediate.
    vm.int_at(SlotId::R4, 10);
    let arg = vm.register(SlotId::R4);
    let result = vm.call_global("double", &[arg]);
    assert!(result.ok());

    // Phase 2: r4 is reused for something else entirely.
    vm.str_at(SlotId::R4, "phase two");
    assert_eq!(vm.str_value(vm.register(SlotId::R4), ""), "phase two");
}

#[test]
fn dispatcher_inside_explicit_scope() {
    let mut vm = test_vm();
    let mut scope = Scope::begin(&mut vm);
    scope.push(Value::Int(99));

    // The dispatcher's internal scope nests inside this one.
    let result = scope.call_global("double", &[Value::Int(3)]);
    assert!(result.ok());
    assert_eq!(scope.stack_depth(), 1);

    assert!(scope.end(ExitPolicy::Report));
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn guarded_bracket_mixes_raw_and_layer() {
    let mut vm = test_vm();
    let (sum, ok) = vm.guarded(ExitPolicy::Report, |vm| {
        vm.push(Value::Int(1));
        let result = vm.call_global("get_value", &[]);
        let call_part = result.value().map_or(0, |r| vm.read(r).as_int(0));
        let stack_part = vm.peek().map_or(0, |v| v.as_int(0));
        call_part + stack_part
    });
    assert!(ok);
    assert_eq!(sum, 43);
    assert_eq!(vm.stack_depth(), 0);
}
