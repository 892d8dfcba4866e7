use super::{Address, Opcode, Val};
use std::rc::Rc;

/// ## Compiled bytecode
///
/// A flat sequence of words. An instruction is an opcode word,
/// optionally followed by exactly one operand word.

#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    Opcode(Opcode),
    /// Jump destination. `None` until the destination is known.
    Target(Option<Address>),
    Literal(Val),
    Name(Rc<str>),
}

/// A jump operand emitted before its destination was known.
/// Consumed by [`Program::patch`] so it can only be resolved once.
#[derive(Debug, PartialEq, Eq)]
pub struct Patch {
    slot: Address,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }
    pub fn len(&self) -> usize {
        self.words.len()
    }
    pub fn words(&self) -> &[Word] {
        &self.words
    }
    pub fn get(&self, addr: Address) -> Option<&Word> {
        self.words.get(addr)
    }
    pub fn push(&mut self, op: Opcode) {
        debug_assert!(!op.has_operand());
        self.words.push(Word::Opcode(op));
    }
    pub fn push_with(&mut self, op: Opcode, operand: Word) {
        debug_assert!(op.has_operand());
        self.words.push(Word::Opcode(op));
        self.words.push(operand);
    }
    pub fn push_jump(&mut self, op: Opcode, target: Address) {
        self.push_with(op, Word::Target(Some(target)));
    }
    /// Emit a jump whose destination will be written later.
    pub fn push_placeholder(&mut self, op: Opcode) -> Patch {
        self.push_with(op, Word::Target(None));
        Patch {
            slot: self.words.len() - 1,
        }
    }
    pub fn patch(&mut self, patch: Patch, target: Address) {
        if let Some(word) = self.words.get_mut(patch.slot) {
            *word = Word::Target(Some(target));
        }
    }

    /// One instruction in listing form, if `addr` starts one.
    pub fn instruction(&self, addr: Address) -> Option<String> {
        match self.words.get(addr)? {
            Word::Opcode(op) if op.has_operand() => match self.words.get(addr + 1) {
                Some(operand) => Some(format!("{} {}", op, operand)),
                None => Some(format!("{} ?", op)),
            },
            Word::Opcode(op) => Some(op.to_string()),
            word => Some(format!("?? {}", word)),
        }
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Program {
        Program { words }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Word::Opcode(op) => write!(f, "{}", op),
            Word::Target(Some(addr)) => write!(f, "{}", addr),
            Word::Target(None) => write!(f, "-1"),
            Word::Literal(Val::String(s)) => write!(f, "{:?}", s),
            Word::Literal(val) => write!(f, "{}", val),
            Word::Name(name) => write!(f, "{}", name),
        }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut addr = 0;
        while addr < self.words.len() {
            let width = match &self.words[addr] {
                Word::Opcode(op) => op.width(),
                _ => 1,
            };
            if let Some(s) = self.instruction(addr) {
                writeln!(f, "{:>5} {}", addr, s)?;
            }
            addr += width;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_patch() {
        let mut prog = Program::new();
        let patch = prog.push_placeholder(Opcode::Jz);
        assert_eq!(prog.get(1), Some(&Word::Target(None)));
        prog.push(Opcode::Finish);
        prog.patch(patch, 3);
        assert_eq!(prog.get(1), Some(&Word::Target(Some(3))));
    }

    #[test]
    fn test_listing() {
        let mut prog = Program::new();
        prog.push_with(Opcode::Push, Word::Literal(Val::from("hi")));
        prog.push(Opcode::Output);
        let _ = prog.push_placeholder(Opcode::Jmp);
        prog.push(Opcode::Finish);
        assert_eq!(
            prog.to_string(),
            "    0 PUSH \"hi\"\n    2 OUTPUT\n    3 JMP -1\n    5 FINISH\n"
        );
    }
}
