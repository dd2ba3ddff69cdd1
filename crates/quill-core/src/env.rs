use hashbrown::HashMap;
use lasso::Spur;

use crate::value::Value;

/// Case-insensitive binding table. Keys are the interned upper-cased
/// form of the symbol (see [`crate::value::intern_upper`]).
#[derive(Default, Clone)]
pub struct Env {
    bindings: HashMap<Spur, Value>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: HashMap::new(),
        }
    }

    pub fn get(&self, key: Spur) -> Option<Value> {
        self.bindings.get(&key).cloned()
    }

    pub fn set(&mut self, key: Spur, value: Value) {
        self.bindings.insert(key, value);
    }

    /// The frame a method body runs in: a snapshot of the caller's
    /// bindings plus the formal parameter. Writes in the frame never
    /// reach the caller.
    pub fn call_frame(&self, param: Spur, value: Value) -> Env {
        let mut frame = self.clone();
        frame.bindings.insert(param, value);
        frame
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
