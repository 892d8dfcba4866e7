//! # tinyc
//!
//! Command line runner for tinyc scripts.
//!

mod term;

fn main() {
    term::main()
}
