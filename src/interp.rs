use std::fmt;

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::exceptions::{exc_static, ExcType, ScriptException};
use crate::heap::{Heap, HeapData};
use crate::io::{DiagnosticSink, StdSink};
use crate::methods::builtin_method;
use crate::slot::{SlotId, SlotRef, SLOT_COUNT};
use crate::value::{NativeFn, Value};

/// One interpreter instance: the operand stack, the register bank, the
/// pending-exception cell, the global namespace and the heap, owned together
/// and passed by `&mut` into every operation.
///
/// The layer assumes exactly one logical thread drives one `Interp` at a time;
/// `&mut` threading makes that invariant a compile-time fact rather than a
/// documentation rule. Hosts that want parallelism run one instance per thread.
///
/// The low-level operations on this type (`push`/`pop`/`raise`/`invoke`/…)
/// mirror the interpreter's own calling convention and are fully usable on
/// their own; the safety layer ([`Scope`](crate::Scope), the value
/// constructors, [`call`](Interp::call)) is built from them and interoperates
/// freely with raw use.
pub struct Interp {
    stack: Vec<Value>,
    registers: [Value; SLOT_COUNT],
    exception: Option<ScriptException>,
    globals: AHashMap<String, Value>,
    pub(crate) heap: Heap,
    sink: Box<dyn DiagnosticSink>,
}

impl fmt::Debug for Interp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interp")
            .field("stack", &self.stack)
            .field("registers", &self.registers)
            .field("exception", &self.exception)
            .field("globals", &self.globals.len())
            .finish_non_exhaustive()
    }
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

impl Interp {
    /// Creates an interpreter that reports diagnostics to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(StdSink)
    }

    /// Creates an interpreter with a custom diagnostic sink.
    #[must_use]
    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        Interp {
            stack: Vec::new(),
            registers: [Value::Nil; SLOT_COUNT],
            exception: None,
            globals: AHashMap::new(),
            heap: Heap::new(),
            sink: Box::new(sink),
        }
    }

    // --- operand stack ---

    /// Pushes a value onto the operand stack.
    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pops the top of the operand stack, or `None` if it is empty.
    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    /// Copies the top of the operand stack without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<Value> {
        self.stack.last().copied()
    }

    /// Pops `n` values from the operand stack (saturating at empty).
    pub fn shrink(&mut self, n: usize) {
        let keep = self.stack.len().saturating_sub(n);
        self.stack.truncate(keep);
    }

    /// Current operand stack depth.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Truncates the stack down to `depth`; never extends it.
    pub(crate) fn truncate_stack(&mut self, depth: usize) {
        if self.stack.len() > depth {
            self.stack.truncate(depth);
        }
    }

    // --- register bank ---

    /// Reads a register. Unwritten registers hold [`Value::Nil`].
    #[must_use]
    pub fn register(&self, slot: SlotId) -> Value {
        self.registers[slot.index()]
    }

    /// Writes a register, overwriting whatever reference existed before.
    pub fn set_register(&mut self, slot: SlotId, value: Value) {
        self.registers[slot.index()] = value;
    }

    /// Copies one register into another.
    pub fn copy_register(&mut self, src: SlotId, dst: SlotId) {
        self.registers[dst.index()] = self.registers[src.index()];
    }

    /// Materializes the value a [`SlotRef`] currently points at.
    ///
    /// This is the explicit copy-out step: the returned [`Value`] is an owned
    /// handle unaffected by later writes to the slot, while the `SlotRef`
    /// keeps observing whatever the slot holds next.
    #[must_use]
    pub fn read(&self, slot_ref: &SlotRef) -> Value {
        self.register(slot_ref.slot())
    }

    // --- pending-exception cell ---

    /// Sets the pending exception. If one is already pending the first wins;
    /// the cell holds exactly one exception at a time.
    pub fn raise(&mut self, exc: ScriptException) {
        if self.exception.is_none() {
            self.exception = Some(exc);
        }
    }

    /// True if an exception is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.exception.is_some()
    }

    /// Clears the pending exception, if any.
    pub fn clear_pending(&mut self) {
        self.exception = None;
    }

    /// Removes and returns the pending exception.
    pub fn take_pending(&mut self) -> Option<ScriptException> {
        self.exception.take()
    }

    /// Returns the pending exception without removing it.
    #[must_use]
    pub fn pending(&self) -> Option<&ScriptException> {
        self.exception.as_ref()
    }

    /// Formats the pending exception for display, without clearing it.
    #[must_use]
    pub fn format_pending(&self) -> Option<String> {
        self.exception.as_ref().map(ScriptException::to_string)
    }

    /// Writes one line to the diagnostic sink.
    pub(crate) fn write_diagnostic(&mut self, line: &str) {
        self.sink.write_line(line);
    }

    // --- globals and attributes ---

    /// Looks up a global by name.
    #[must_use]
    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).copied()
    }

    /// Sets a global, overwriting any previous binding.
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    /// Reads an attribute from an object, or `None` if the value is not an
    /// object or has no such attribute.
    #[must_use]
    pub fn get_attr(&self, obj: Value, name: &str) -> Option<Value> {
        match obj {
            Value::Object(id) => match self.heap.get(id) {
                HeapData::Object(attrs) => attrs.get(name).copied(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Writes an attribute on an object.
    ///
    /// Raises `TypeError` and returns `false` if the value is not an object.
    pub fn set_attr(&mut self, obj: Value, name: &str, value: Value) -> bool {
        match obj {
            Value::Object(id) => {
                if let HeapData::Object(attrs) = self.heap.get_mut(id) {
                    attrs.insert(name.to_owned(), value);
                    return true;
                }
                false
            }
            other => {
                self.raise(ExcType::type_error(format!(
                    "'{}' object does not support attribute assignment",
                    other.type_name()
                )));
                false
            }
        }
    }

    // --- heap constructors ---

    /// Allocates a string value.
    pub fn new_str(&mut self, value: &str) -> Value {
        Value::Str(self.heap.alloc(HeapData::Str(value.to_owned())))
    }

    /// Allocates an empty list value.
    pub fn new_list(&mut self) -> Value {
        self.alloc_list(Vec::new())
    }

    /// Allocates an empty dict value.
    pub fn new_dict(&mut self) -> Value {
        Value::Dict(self.heap.alloc(HeapData::Dict(IndexMap::new())))
    }

    /// Allocates an empty object value (an attribute bag).
    pub fn new_object(&mut self) -> Value {
        Value::Object(self.heap.alloc(HeapData::Object(IndexMap::new())))
    }

    pub(crate) fn alloc_list(&mut self, items: Vec<Value>) -> Value {
        Value::List(self.heap.alloc(HeapData::List(items)))
    }

    /// Extracts string content, or returns `default` if the value is not a
    /// string.
    ///
    /// The returned slice borrows the heap, so it is valid only while no
    /// mutable operation runs — the borrow checker enforces what the
    /// underlying interpreter can only document.
    #[must_use]
    pub fn str_value<'a>(&'a self, value: Value, default: &'a str) -> &'a str {
        match value {
            Value::Str(id) => self.heap.get_str(id).unwrap_or(default),
            _ => default,
        }
    }

    /// Script truthiness: `Nil`/`None`/`False`/`0`/`0.0` and empty
    /// strings/lists/dicts are falsy; everything else is truthy.
    #[must_use]
    pub fn truthy(&self, value: Value) -> bool {
        match value {
            Value::Nil | Value::None => false,
            Value::Bool(b) => b,
            Value::Int(v) => v != 0,
            Value::Float(v) => v != 0.0,
            Value::Str(id) => !matches!(self.heap.get(id), HeapData::Str(s) if s.is_empty()),
            Value::List(id) => !matches!(self.heap.get(id), HeapData::List(v) if v.is_empty()),
            Value::Dict(id) => !matches!(self.heap.get(id), HeapData::Dict(m) if m.is_empty()),
            Value::Object(_) | Value::Function(_) => true,
        }
    }

    // --- invocation primitives ---

    /// Invokes a callable with a contiguous argument slice.
    ///
    /// On success the result lands in register 0 (the volatile slot) and
    /// `true` is returned. On failure the pending-exception cell is set and
    /// `false` is returned; register 0 is left untouched. A zero-length call
    /// passes an empty slice.
    pub fn invoke(&mut self, callable: Value, args: &[Value]) -> bool {
        let func = match callable {
            Value::Function(f) => f,
            other => {
                self.raise(ExcType::not_callable(other.type_name()));
                return false;
            }
        };
        match func(self, args) {
            Ok(value) => {
                self.registers[SlotId::VOLATILE.index()] = value;
                true
            }
            Err(exc) => {
                self.raise(exc);
                false
            }
        }
    }

    /// Resolves a method on the receiver at the top of the stack.
    ///
    /// On success the top of the stack becomes `[method, receiver]` and `true`
    /// is returned. On failure the stack is left exactly as found and `false`
    /// is returned without raising — the caller decides what a missing method
    /// means.
    ///
    /// Resolution order: object attributes first, then the built-in method
    /// table for the receiver's type.
    pub fn push_method(&mut self, name: &str) -> bool {
        let Some(receiver) = self.peek() else {
            return false;
        };
        let method = self
            .get_attr(receiver, name)
            .filter(Value::is_callable)
            .or_else(|| builtin_method(receiver.value_type(), name).map(Value::Function));
        match method {
            Some(method) => {
                let top = self.stack.len() - 1;
                self.stack[top] = method;
                self.stack.push(receiver);
                true
            }
            None => false,
        }
    }

    /// Invokes the method prepared by [`push_method`](Interp::push_method).
    ///
    /// Expects `[method, receiver, arg0, …, argN-1]` on top of the stack and
    /// always consumes all `argc + 2` entries. The receiver is prepended to
    /// the arguments, so the method sees it as `args[0]`. Result and error
    /// behavior match [`invoke`](Interp::invoke).
    pub fn vector_call(&mut self, argc: usize) -> bool {
        if self.stack.len() < argc + 2 {
            self.raise(exc_static!(
                ExcType::RuntimeError;
                "operand stack underflow in method call"
            ));
            return false;
        }
        let argv = self.stack.split_off(self.stack.len() - argc - 1);
        let method = self.stack.pop().unwrap_or(Value::Nil);
        self.invoke(method, &argv)
    }

    // --- binding helpers ---

    /// Binds a native function as a global.
    pub fn bind(&mut self, name: &str, func: NativeFn) {
        self.set_global(name, Value::Function(func));
    }

    /// Gets or creates a module: an object-valued global usable as an
    /// attribute namespace.
    pub fn module(&mut self, path: &str) -> Value {
        if let Some(existing @ Value::Object(_)) = self.get_global(path) {
            return existing;
        }
        let module = self.new_object();
        self.set_global(path, module);
        module
    }

    /// Binds a native function as an attribute of a module.
    ///
    /// Returns `false` (with `TypeError` pending) if `module` is not an
    /// object.
    pub fn bind_in(&mut self, module: Value, name: &str, func: NativeFn) -> bool {
        self.set_attr(module, name, Value::Function(func))
    }
}
