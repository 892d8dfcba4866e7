/*!
## Rust Machine Module

This Rust module is a compiler and virtual machine for tinyc.
Memory use is bounded by a simulated pool shared by the operand stack
and the variable table.

*/

pub type Address = usize;

mod alloc;
mod compile;
mod link;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod symtab;
mod val;

pub use alloc::{Allocator, Block, DEFAULT_MEMORY};
pub use compile::compile;
pub use link::Link;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::{Patch, Program, Word};
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use symtab::{Pair, SymbolTable, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use val::Val;
