#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod args;
mod call;
mod construct;
mod debug;
mod exceptions;
mod heap;
mod interp;
mod io;
mod list;
mod methods;
mod scope;
mod slot;
mod value;

pub use crate::{
    call::{CallOptions, CallResult, Store, Target},
    exceptions::{ExcType, ScriptException},
    heap::HeapId,
    interp::Interp,
    io::{CollectStringSink, DiagnosticSink, NoSink, StdSink},
    scope::{ExitPolicy, Scope},
    slot::{SlotId, SlotRef, SLOT_COUNT},
    value::{NativeFn, NativeResult, Type, Value},
};
