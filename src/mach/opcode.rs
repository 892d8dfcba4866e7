/// ## Virtual machine instruction set
///
/// The tinyc virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `x = 3 * y;` compiles to
/// `[PUSH 3, FETCH y, MULT, STORE x]`
///
/// FETCH, STORE, PUSH, JZ, JNZ and JMP are followed by one operand word.
/// Every other opcode stands alone.

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push the value of the named variable.
    Fetch,
    /// Pop the stack into the named variable.
    Store,
    /// Push the literal operand.
    Push,
    /// Discard the top of the stack.
    Pop,

    // *** Expression operations
    Add,
    Sub,
    Mult,
    Div,
    Lt,
    NotEqual,
    Equal,

    // *** Branch control
    /// Pop and branch to the operand address if zero.
    Jz,
    /// Pop and branch to the operand address if not zero.
    Jnz,
    /// Unconditional branch to the operand address.
    Jmp,

    // *** Statements
    Finish,
    /// Replace the top of the stack with a line of user input.
    Input,
    Output,
    /// Pop a count then that many values; push them as one array.
    Array,
    /// Pop an index then an array; push the element.
    Index,
    /// Pop a value and stop with it as the error message.
    Raise,
}

impl Opcode {
    pub fn has_operand(self) -> bool {
        use Opcode::*;
        matches!(self, Fetch | Store | Push | Jz | Jnz | Jmp)
    }

    /// Number of program words the instruction occupies.
    pub fn width(self) -> usize {
        if self.has_operand() {
            2
        } else {
            1
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        let s = match self {
            Fetch => "FETCH",
            Store => "STORE",
            Push => "PUSH",
            Pop => "POP",
            Add => "ADD",
            Sub => "SUB",
            Mult => "MULT",
            Div => "DIV",
            Lt => "LT",
            NotEqual => "NOT_EQUAL",
            Equal => "EQUAL",
            Jz => "JZ",
            Jnz => "JNZ",
            Jmp => "JMP",
            Finish => "FINISH",
            Input => "INPUT",
            Output => "OUTPUT",
            Array => "ARRAY",
            Index => "INDEX",
            Raise => "RAISE",
        };
        write!(f, "{}", s)
    }
}
