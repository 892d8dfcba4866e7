use super::{Address, Allocator, Opcode, Operation, Program, Stack, SymbolTable, Val, Word};
use crate::error;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Names the language owns. Reading one as a variable is an error.
const RESERVED: [&str; 3] = ["puts", "gets", "raise"];

/// ## Stack machine
///
/// Executes a compiled [`Program`] in slices so the host stays in
/// control of I/O and interrupts. Every value held by the operand stack
/// or the variable table is charged to the [`Allocator`].

pub struct Runtime {
    program: Program,
    pc: Address,
    stack: Stack,
    vars: SymbolTable,
    memory: Allocator,
    state: State,
    pending: Option<Error>,
    tron: bool,
    traced: bool,
}

/// Host events returned from [`Runtime::execute`].
#[derive(Debug, PartialEq)]
pub enum Event {
    /// The program finished or failed. Nothing left to run.
    Stopped,
    /// The cycle budget ran out.
    Running,
    /// The program is waiting for [`Runtime::enter`].
    Input,
    Print(String),
    /// The instruction about to execute, when tracing.
    Trace(String),
    Error(Error),
}

#[derive(Debug, PartialEq)]
enum State {
    Running,
    Input,
    Stopped,
}

impl Runtime {
    pub fn new(program: Program, memory: Allocator) -> Runtime {
        Runtime {
            program,
            pc: 0,
            stack: Stack::new(),
            vars: SymbolTable::new(),
            memory,
            state: State::Running,
            pending: None,
            tron: false,
            traced: false,
        }
    }

    pub fn vars(&self) -> &SymbolTable {
        &self.vars
    }

    pub fn memory(&self) -> &Allocator {
        &self.memory
    }

    pub fn set_trace(&mut self, tron: bool) {
        self.tron = tron;
    }

    /// Stop at the next opportunity with a BREAK error.
    pub fn interrupt(&mut self) {
        if self.state != State::Stopped {
            self.pending = Some(error!(Break).at_address(self.pc));
            self.state = State::Running;
        }
    }

    /// Answer an `Event::Input`. Returns false if no input was wanted.
    pub fn enter(&mut self, line: &str) -> bool {
        if self.state != State::Input {
            return false;
        }
        self.state = State::Running;
        let val = Val::from_input(line);
        if let Err(error) = self.pop().and_then(|_| self.push(val)) {
            self.pending = Some(error.at_address(self.pc));
        }
        true
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(error) = self.pending.take() {
            self.stop();
            return Event::Error(error);
        }
        match self.state {
            State::Stopped => return Event::Stopped,
            State::Input => return Event::Input,
            State::Running => {}
        }
        for _ in 0..cycles {
            let pc = self.pc;
            if self.tron && !self.traced {
                if let Some(s) = self.program.instruction(pc) {
                    self.traced = true;
                    return Event::Trace(format!("{:>5} {}", pc, s));
                }
            }
            self.traced = false;
            match self.step() {
                Ok(None) => continue,
                Ok(Some(event)) => return event,
                Err(error) => {
                    self.stop();
                    return Event::Error(error.at_address(pc));
                }
            }
        }
        Event::Running
    }

    fn stop(&mut self) {
        self.state = State::Stopped;
        self.stack.clear(&mut self.memory);
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let op = match self.program.get(self.pc) {
            Some(Word::Opcode(op)) => *op,
            Some(_) => return Err(error!(InternalError; "EXPECTED OPCODE")),
            None => return Err(error!(InternalError; "RAN PAST END OF PROGRAM")),
        };
        let mut next = self.pc + op.width();
        match op {
            Opcode::Fetch => {
                let name = self.name_operand()?;
                if RESERVED.contains(&&*name) {
                    return Err(error!(ReservedName; &name));
                }
                let val = self.vars.get(&name)?.clone();
                self.push(val)?;
            }
            Opcode::Store => {
                let name = self.name_operand()?;
                let val = self.pop()?;
                self.vars.set(&mut self.memory, name, val)?;
            }
            Opcode::Push => {
                let val = self.literal_operand()?;
                self.push(val)?;
            }
            Opcode::Pop => {
                self.pop()?;
            }
            Opcode::Add => self.binary(Operation::sum)?,
            Opcode::Sub => self.binary(Operation::subtract)?,
            Opcode::Mult => {
                let rhs = self.pop()?;
                let lhs = self.pop()?;
                let budget = self.memory.free_memory();
                self.push(Operation::multiply(lhs, rhs, budget)?)?;
            }
            Opcode::Div => self.binary(Operation::divide)?,
            Opcode::Lt => self.binary(Operation::less)?,
            Opcode::NotEqual => self.binary(Operation::not_equal)?,
            Opcode::Equal => self.binary(Operation::equal)?,
            Opcode::Index => self.binary(Operation::index)?,
            Opcode::Jz => {
                let target = self.target_operand()?;
                if self.pop()?.is_zero() {
                    next = target;
                }
            }
            Opcode::Jnz => {
                let target = self.target_operand()?;
                if !self.pop()?.is_zero() {
                    next = target;
                }
            }
            Opcode::Jmp => next = self.target_operand()?,
            Opcode::Finish => {
                self.pc = next;
                self.stop();
                return Ok(Some(Event::Stopped));
            }
            Opcode::Input => {
                self.pc = next;
                self.state = State::Input;
                return Ok(Some(Event::Input));
            }
            Opcode::Output => {
                let val = self.pop()?;
                self.pc = next;
                return Ok(Some(Event::Print(format!("{}\n", val))));
            }
            Opcode::Array => {
                let len = match self.pop()? {
                    Val::Integer(n) => usize::try_from(n).map_err(|_| error!(IndexOutOfRange))?,
                    _ => return Err(error!(TypeMismatch; "ARRAY LENGTH MUST BE AN INTEGER")),
                };
                let vals = self.pop_n(len)?;
                self.push(Val::from(vals))?;
            }
            Opcode::Raise => {
                let val = self.pop()?;
                return Err(error!(Raised; &val.to_string()));
            }
        }
        self.pc = next;
        Ok(None)
    }

    fn operand(&self) -> Result<&Word> {
        match self.program.get(self.pc + 1) {
            Some(word) => Ok(word),
            None => Err(error!(InternalError; "MISSING OPERAND")),
        }
    }

    fn name_operand(&self) -> Result<Rc<str>> {
        match self.operand()? {
            Word::Name(name) => Ok(name.clone()),
            _ => Err(error!(InternalError; "EXPECTED NAME OPERAND")),
        }
    }

    fn literal_operand(&self) -> Result<Val> {
        match self.operand()? {
            Word::Literal(val) => Ok(val.clone()),
            _ => Err(error!(InternalError; "EXPECTED LITERAL OPERAND")),
        }
    }

    fn target_operand(&self) -> Result<Address> {
        match self.operand()? {
            Word::Target(Some(addr)) => Ok(*addr),
            Word::Target(None) => Err(error!(UndefinedLabel)),
            _ => Err(error!(InternalError; "EXPECTED JUMP TARGET")),
        }
    }

    fn push(&mut self, val: Val) -> Result<()> {
        self.stack.push(&mut self.memory, val)
    }

    fn pop(&mut self) -> Result<Val> {
        self.stack.pop(&mut self.memory)
    }

    fn pop_n(&mut self, len: usize) -> Result<Vec<Val>> {
        self.stack.pop_n(&mut self.memory, len)
    }

    fn binary(&mut self, op: fn(Val, Val) -> Result<Val>) -> Result<()> {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        self.push(op(lhs, rhs)?)
    }
}
