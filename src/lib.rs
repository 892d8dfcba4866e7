//! # tinyc
//!
//! A tiny C-like scripting language compiled to bytecode for a stack machine.
//!
//! ```text
//! i = 0;
//! while (i < 3) {
//!     puts i;
//!     i = i + 1;
//! }
//! ```
//!
//! Source is lexed and parsed by [`lang`] into an [`lang::ast::Node`] tree,
//! then [`mach::compile`] emits a [`mach::Program`] that a [`mach::Runtime`]
//! executes. Every value the program keeps alive is charged to a simulated
//! memory pool; running out of it stops the program with `OUT OF MEMORY`.
//!
//! Run a script with `tinyc path/to/script.tc`. Use `--listing` to see the
//! bytecode instead of running it.

pub mod lang;
pub mod mach;
