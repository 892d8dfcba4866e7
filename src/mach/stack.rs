use super::{Allocator, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Operand stack
///
/// Every value is charged to the [`Allocator`] while it sits here, so the
/// pool is what bounds the depth.

#[derive(Debug, Default)]
pub struct Stack {
    vals: Vec<Val>,
}

impl Stack {
    pub fn new() -> Stack {
        Stack::default()
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    pub fn push(&mut self, memory: &mut Allocator, val: Val) -> Result<()> {
        memory.allocate(val.footprint())?;
        self.vals.push(val);
        Ok(())
    }

    pub fn pop(&mut self, memory: &mut Allocator) -> Result<Val> {
        match self.vals.pop() {
            Some(val) => {
                memory.free(val.footprint());
                Ok(val)
            }
            None => Err(underflow()),
        }
    }

    /// The top `len` values, deepest first.
    pub fn pop_n(&mut self, memory: &mut Allocator, len: usize) -> Result<Vec<Val>> {
        if len > self.vals.len() {
            return Err(underflow());
        }
        let vals: Vec<Val> = self.vals.drain(self.vals.len() - len..).collect();
        for val in &vals {
            memory.free(val.footprint());
        }
        Ok(vals)
    }

    pub fn clear(&mut self, memory: &mut Allocator) {
        for val in self.vals.drain(..) {
            memory.free(val.footprint());
        }
    }
}

fn underflow() -> Error {
    error!(InternalError; "STACK UNDERFLOW")
}
