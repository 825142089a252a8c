//! Value constructors: write a primitive into a register, return a view of it.
//!
//! The `tmp_*` family writes the volatile slot (`r0`) and is meant for
//! immediate consumption — pass the value on in the same breath. Each call
//! overwrites the previous one:
//!
//! ```
//! use lanyard::Interp;
//!
//! let mut vm = Interp::new();
//! let a = vm.tmp_int(1);
//! let b = vm.tmp_int(2);
//! // Both views now read 2: r0 was overwritten.
//! assert_eq!(vm.read(&a).as_int(0), 2);
//! assert_eq!(vm.read(&b).as_int(0), 2);
//! ```
//!
//! The `*_at` family writes a named register and is meant for values that must
//! coexist. Slot indices are validated once, at
//! [`SlotId::new`](crate::SlotId::new); no constructor can reach an
//! out-of-range register.

use crate::interp::Interp;
use crate::slot::{SlotId, SlotRef};
use crate::value::Value;

impl Interp {
    /// Writes an int into the volatile slot.
    pub fn tmp_int(&mut self, value: i64) -> SlotRef {
        self.int_at(SlotId::VOLATILE, value)
    }

    /// Writes a float into the volatile slot.
    pub fn tmp_float(&mut self, value: f64) -> SlotRef {
        self.float_at(SlotId::VOLATILE, value)
    }

    /// Writes a bool into the volatile slot.
    pub fn tmp_bool(&mut self, value: bool) -> SlotRef {
        self.bool_at(SlotId::VOLATILE, value)
    }

    /// Writes a string into the volatile slot.
    pub fn tmp_str(&mut self, value: &str) -> SlotRef {
        self.str_at(SlotId::VOLATILE, value)
    }

    /// Writes an int into the named register.
    pub fn int_at(&mut self, slot: SlotId, value: i64) -> SlotRef {
        self.set_register(slot, Value::Int(value));
        SlotRef::new(slot)
    }

    /// Writes a float into the named register.
    pub fn float_at(&mut self, slot: SlotId, value: f64) -> SlotRef {
        self.set_register(slot, Value::Float(value));
        SlotRef::new(slot)
    }

    /// Writes a bool into the named register.
    pub fn bool_at(&mut self, slot: SlotId, value: bool) -> SlotRef {
        self.set_register(slot, Value::Bool(value));
        SlotRef::new(slot)
    }

    /// Writes a string into the named register.
    pub fn str_at(&mut self, slot: SlotId, value: &str) -> SlotRef {
        let v = self.new_str(value);
        self.set_register(slot, v);
        SlotRef::new(slot)
    }
}
