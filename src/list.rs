//! Bulk list and dict helpers.
//!
//! Thin conveniences over the heap constructors: build a whole container from
//! host data in one call, or walk one with a callback. Nothing here touches
//! the operand stack, registers or the exception cell except where noted.

use crate::exceptions::ExcType;
use crate::heap::HeapData;
use crate::interp::Interp;
use crate::value::Value;

impl Interp {
    /// Builds a list from a slice of values.
    pub fn list_from_values(&mut self, values: &[Value]) -> Value {
        self.alloc_list(values.to_vec())
    }

    /// Builds a list of ints.
    pub fn list_from_ints(&mut self, values: &[i64]) -> Value {
        let items = values.iter().map(|&v| Value::Int(v)).collect();
        self.alloc_list(items)
    }

    /// Builds a list of floats.
    pub fn list_from_floats(&mut self, values: &[f64]) -> Value {
        let items = values.iter().map(|&v| Value::Float(v)).collect();
        self.alloc_list(items)
    }

    /// Builds a list of bools.
    pub fn list_from_bools(&mut self, values: &[bool]) -> Value {
        let items = values.iter().map(|&v| Value::Bool(v)).collect();
        self.alloc_list(items)
    }

    /// Builds a list of strings.
    pub fn list_from_strs(&mut self, values: &[&str]) -> Value {
        let items: Vec<Value> = values.iter().map(|s| self.new_str(s)).collect();
        self.alloc_list(items)
    }

    /// Length of a list, or `None` if the value is not a list.
    #[must_use]
    pub fn list_len(&self, list: Value) -> Option<usize> {
        match list {
            Value::List(id) => match self.heap.get(id) {
                HeapData::List(items) => Some(items.len()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Reads one element, or `None` if the value is not a list or the index is
    /// out of range.
    #[must_use]
    pub fn list_get(&self, list: Value, index: usize) -> Option<Value> {
        match list {
            Value::List(id) => match self.heap.get(id) {
                HeapData::List(items) => items.get(index).copied(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Overwrites one element.
    ///
    /// Raises `TypeError` for non-lists and `IndexError` for out-of-range
    /// indices, returning `false`.
    pub fn list_set(&mut self, list: Value, index: usize, value: Value) -> bool {
        let Value::List(id) = list else {
            self.raise(ExcType::type_error(format!(
                "'{}' object does not support item assignment",
                list.type_name()
            )));
            return false;
        };
        if let HeapData::List(items) = self.heap.get_mut(id) {
            if let Some(slot) = items.get_mut(index) {
                *slot = value;
                return true;
            }
        }
        self.raise(ExcType::list_index_error());
        false
    }

    /// Appends one element. Raises `TypeError` and returns `false` for
    /// non-lists.
    pub fn list_push(&mut self, list: Value, value: Value) -> bool {
        let Value::List(id) = list else {
            self.raise(ExcType::type_error(format!(
                "cannot append to '{}' object",
                list.type_name()
            )));
            return false;
        };
        if let HeapData::List(items) = self.heap.get_mut(id) {
            items.push(value);
            return true;
        }
        false
    }

    /// Walks a list, calling `f(index, item)` for each element.
    ///
    /// Stops early and returns `false` as soon as `f` returns `false`; returns
    /// `true` after a complete walk. A non-list walks zero elements.
    pub fn list_for_each(&self, list: Value, mut f: impl FnMut(usize, Value) -> bool) -> bool {
        let len = self.list_len(list).unwrap_or(0);
        for index in 0..len {
            let Some(item) = self.list_get(list, index) else {
                break;
            };
            if !f(index, item) {
                return false;
            }
        }
        true
    }

    /// Builds a dict from string-keyed pairs. Later duplicates win.
    pub fn dict_from_pairs(&mut self, pairs: &[(&str, Value)]) -> Value {
        let dict = self.new_dict();
        for (key, value) in pairs {
            self.dict_set(dict, key, *value);
        }
        dict
    }

    /// Inserts or overwrites one entry. Raises `TypeError` and returns `false`
    /// for non-dicts.
    pub fn dict_set(&mut self, dict: Value, key: &str, value: Value) -> bool {
        let Value::Dict(id) = dict else {
            self.raise(ExcType::type_error(format!(
                "'{}' object does not support item assignment",
                dict.type_name()
            )));
            return false;
        };
        if let HeapData::Dict(map) = self.heap.get_mut(id) {
            map.insert(key.to_owned(), value);
            return true;
        }
        false
    }

    /// Reads one entry, or `None` if the value is not a dict or the key is
    /// absent.
    #[must_use]
    pub fn dict_get(&self, dict: Value, key: &str) -> Option<Value> {
        match dict {
            Value::Dict(id) => match self.heap.get(id) {
                HeapData::Dict(map) => map.get(key).copied(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Number of entries, or `None` if the value is not a dict.
    #[must_use]
    pub fn dict_len(&self, dict: Value) -> Option<usize> {
        match dict {
            Value::Dict(id) => match self.heap.get(id) {
                HeapData::Dict(map) => Some(map.len()),
                _ => None,
            },
            _ => None,
        }
    }
}
