use super::{Address, Opcode, Patch, Program};
use crate::error;
use crate::lang::{Column, Error};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Label linking
///
/// Backward gotos are emitted with their destination. Forward gotos are
/// emitted as placeholders and patched when the label is declared.
/// A label that is never declared leaves its gotos unresolved, which is
/// only an error if one of them is executed.

#[derive(Debug, Default)]
pub struct Link {
    labels: HashMap<Rc<str>, Address>,
    unlinked: HashMap<Rc<str>, Vec<Patch>>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn mark(
        &mut self,
        prog: &mut Program,
        label: &Rc<str>,
        addr: Address,
        col: &Column,
    ) -> Result<()> {
        if self.labels.contains_key(label) {
            return Err(error!(DuplicateLabel, ..col; label));
        }
        self.labels.insert(label.clone(), addr);
        for patch in self.unlinked.remove(label).unwrap_or_default() {
            prog.patch(patch, addr);
        }
        Ok(())
    }

    pub fn goto(&mut self, prog: &mut Program, label: &Rc<str>) {
        match self.labels.get(label) {
            Some(addr) => prog.push_jump(Opcode::Jmp, *addr),
            None => {
                let patch = prog.push_placeholder(Opcode::Jmp);
                self.unlinked.entry(label.clone()).or_default().push(patch);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Word;

    #[test]
    fn test_forward_gotos_share_label() {
        let mut prog = Program::new();
        let mut link = Link::new();
        let label: Rc<str> = "done".into();
        link.goto(&mut prog, &label);
        link.goto(&mut prog, &label);
        assert_eq!(prog.get(1), Some(&Word::Target(None)));
        link.mark(&mut prog, &label, 4, &(0..0)).unwrap();
        assert_eq!(prog.get(1), Some(&Word::Target(Some(4))));
        assert_eq!(prog.get(3), Some(&Word::Target(Some(4))));
        link.goto(&mut prog, &label);
        assert_eq!(prog.get(5), Some(&Word::Target(Some(4))));
    }

    #[test]
    fn test_duplicate_label() {
        let mut prog = Program::new();
        let mut link = Link::new();
        let label: Rc<str> = "top".into();
        link.mark(&mut prog, &label, 0, &(0..0)).unwrap();
        link.goto(&mut prog, &label);
        assert_eq!(prog.get(1), Some(&Word::Target(Some(0))));
        let err = link.mark(&mut prog, &label, 2, &(0..3)).unwrap_err();
        assert!(err.is(crate::lang::ErrorCode::DuplicateLabel));
    }
}
