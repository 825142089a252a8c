use indexmap::IndexMap;

use crate::value::Value;

/// Unique identifier for data stored on the heap.
///
/// `HeapId` is a plain index; it stays valid for the lifetime of the owning
/// [`Interp`](crate::Interp). The heap is an arena: the layer adds no reference
/// counting or collection, so a handle never dangles and never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeapId(u32);

impl HeapId {
    fn new(index: usize) -> Self {
        HeapId(index.try_into().expect("HeapId overflow"))
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Compound payloads referenced from [`Value`] handles.
///
/// Dict entries and object attributes use insertion-ordered maps so iteration
/// and repr output are deterministic.
#[derive(Debug)]
pub enum HeapData {
    Str(String),
    List(Vec<Value>),
    Dict(IndexMap<String, Value>),
    Object(IndexMap<String, Value>),
}

/// Arena storage for all compound values of one interpreter instance.
#[derive(Debug, Default)]
pub struct Heap {
    data: Vec<HeapData>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a payload and returns its handle.
    pub fn alloc(&mut self, data: HeapData) -> HeapId {
        let id = HeapId::new(self.data.len());
        self.data.push(data);
        id
    }

    /// Gets a reference to the payload for `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this heap.
    pub fn get(&self, id: HeapId) -> &HeapData {
        &self.data[id.index()]
    }

    /// Gets a mutable reference to the payload for `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this heap.
    pub fn get_mut(&mut self, id: HeapId) -> &mut HeapData {
        &mut self.data[id.index()]
    }

    /// Gets the string payload for `id`, or `None` if it is not a string.
    pub fn get_str(&self, id: HeapId) -> Option<&str> {
        match self.get(id) {
            HeapData::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
