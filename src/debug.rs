//! Repr and print helpers for development and diagnostics.

use crate::call::{CallOptions, Target};
use crate::heap::HeapData;
use crate::interp::Interp;
use crate::value::Value;

/// Containers nested deeper than this repr as `...` instead of recursing,
/// which also keeps self-referential lists from looping.
const MAX_REPR_DEPTH: usize = 8;

impl Interp {
    /// Formats a value the way a script would repr it.
    ///
    /// Primitives and containers are formatted directly. Objects with a
    /// callable `__repr__` attribute have it dispatched through the call
    /// dispatcher under a silent scope; a missing or failing `__repr__` falls
    /// back to `"<object>"` / `"<repr failed>"`. Because that dispatch is a
    /// real call, it writes the volatile slot — take `&mut self` at face
    /// value.
    pub fn repr(&mut self, value: Value) -> String {
        self.repr_depth(value, 0)
    }

    fn repr_depth(&mut self, value: Value, depth: usize) -> String {
        if depth > MAX_REPR_DEPTH {
            return "...".to_owned();
        }
        match value {
            Value::Nil => "nil".to_owned(),
            Value::None => "None".to_owned(),
            Value::Bool(true) => "True".to_owned(),
            Value::Bool(false) => "False".to_owned(),
            Value::Int(v) => v.to_string(),
            // Debug formatting keeps the trailing ".0" on whole floats.
            Value::Float(v) => format!("{v:?}"),
            Value::Str(id) => match self.heap.get(id) {
                HeapData::Str(s) => string_repr(s),
                _ => "<repr failed>".to_owned(),
            },
            Value::List(id) => {
                let items = match self.heap.get(id) {
                    HeapData::List(items) => items.clone(),
                    _ => return "<repr failed>".to_owned(),
                };
                let parts: Vec<String> = items.iter().map(|&item| self.repr_depth(item, depth + 1)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Dict(id) => {
                let pairs: Vec<(String, Value)> = match self.heap.get(id) {
                    HeapData::Dict(map) => map.iter().map(|(k, &v)| (k.clone(), v)).collect(),
                    _ => return "<repr failed>".to_owned(),
                };
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", string_repr(k), self.repr_depth(*v, depth + 1)))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Object(_) => self.object_repr(value),
            Value::Function(_) => "<native function>".to_owned(),
        }
    }

    fn object_repr(&mut self, value: Value) -> String {
        let has_repr = self.get_attr(value, "__repr__").is_some_and(|m| m.is_callable());
        if !has_repr {
            return "<object>".to_owned();
        }
        let result = self.call(Target::Method(value, "__repr__"), &[], CallOptions::silent());
        match result.into_value() {
            Some(slot_ref) => match self.read(&slot_ref) {
                Value::Str(id) => self
                    .heap
                    .get_str(id)
                    .map_or_else(|| "<repr failed>".to_owned(), str::to_owned),
                _ => "<repr failed>".to_owned(),
            },
            None => "<repr failed>".to_owned(),
        }
    }

    /// Writes a value's repr to the diagnostic sink, as one line.
    pub fn print_value(&mut self, value: Value) {
        let line = self.repr(value);
        self.write_diagnostic(&line);
    }
}

/// Script-style string repr: single quotes by default, double quotes when the
/// content contains a single quote and no double quote.
fn string_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
