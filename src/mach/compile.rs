use super::{Link, Opcode, Program, Val, Word};
use crate::lang::ast::Node;
use crate::lang::Error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Generate bytecode for a parsed program.
///
/// `if` and `while` are lowered to conditional jumps patched once the
/// code they skip has been emitted. The only compile-time failure is a
/// label declared twice.
pub fn compile(ast: &Node) -> Result<Program> {
    let mut compiler = Compiler {
        prog: Program::new(),
        link: Link::new(),
    };
    compiler.node(ast)?;
    Ok(compiler.prog)
}

struct Compiler {
    prog: Program,
    link: Link,
}

impl Compiler {
    fn node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Var(_, name) => self.prog.push_with(Opcode::Fetch, Word::Name(name.clone())),
            Node::Const(_, lit) => self.prog.push_with(Opcode::Push, Word::Literal(Val::from(lit))),
            Node::Add(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Add)?,
            Node::Sub(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Sub)?,
            Node::Mult(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Mult)?,
            Node::Div(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Div)?,
            Node::Lt(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Lt)?,
            Node::NotEqual(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::NotEqual)?,
            Node::Equal(_, lhs, rhs) => self.binary(lhs, rhs, Opcode::Equal)?,
            Node::Set(_, name, expr) => {
                self.value(expr)?;
                self.prog.push_with(Opcode::Store, Word::Name(name.clone()));
            }
            Node::If1(_, cond, then) => {
                self.value(cond)?;
                let skip = self.prog.push_placeholder(Opcode::Jz);
                self.node(then)?;
                let end = self.prog.len();
                self.prog.patch(skip, end);
            }
            Node::If2(_, cond, then, other) => {
                self.value(cond)?;
                let to_else = self.prog.push_placeholder(Opcode::Jz);
                self.node(then)?;
                let to_end = self.prog.push_placeholder(Opcode::Jmp);
                let else_addr = self.prog.len();
                self.prog.patch(to_else, else_addr);
                self.node(other)?;
                let end = self.prog.len();
                self.prog.patch(to_end, end);
            }
            Node::While(_, cond, body) => {
                let top = self.prog.len();
                self.value(cond)?;
                let exit = self.prog.push_placeholder(Opcode::Jz);
                self.node(body)?;
                self.prog.push_jump(Opcode::Jmp, top);
                let end = self.prog.len();
                self.prog.patch(exit, end);
            }
            Node::Seq(_, nodes) => {
                for node in nodes {
                    self.node(node)?;
                }
            }
            // An assignment statement leaves nothing on the stack.
            Node::Expr(_, expr) => match expr.as_ref() {
                Node::Set(..) => self.node(expr)?,
                _ => {
                    self.value(expr)?;
                    self.prog.push(Opcode::Pop);
                }
            },
            Node::Main(body) => {
                self.node(body)?;
                self.prog.push(Opcode::Finish);
            }
            Node::Stdout(_, expr) => {
                self.value(expr)?;
                self.prog.push(Opcode::Output);
            }
            Node::Stdin(_) => {
                self.prog.push_with(Opcode::Push, Word::Literal(Val::Integer(0)));
                self.prog.push(Opcode::Input);
            }
            Node::Raise(_, expr) => {
                self.value(expr)?;
                self.prog.push(Opcode::Raise);
            }
            Node::Goto(_, label) => self.link.goto(&mut self.prog, label),
            Node::Mark(col, label) => {
                let here = self.prog.len();
                self.link.mark(&mut self.prog, label, here, col)?;
            }
            Node::Array(_, items) => {
                for item in items {
                    self.value(item)?;
                }
                let len = Val::Integer(items.len() as i64);
                self.prog.push_with(Opcode::Push, Word::Literal(len));
                self.prog.push(Opcode::Array);
            }
            Node::ArrayGet(_, array, index) => self.binary(array, index, Opcode::Index)?,
            Node::Empty(_) => {}
        }
        Ok(())
    }

    /// Compile a node whose result must be left on the stack.
    fn value(&mut self, node: &Node) -> Result<()> {
        self.node(node)?;
        if let Node::Set(_, name, _) = node {
            self.fetch(name);
        }
        Ok(())
    }

    fn fetch(&mut self, name: &Rc<str>) {
        self.prog.push_with(Opcode::Fetch, Word::Name(name.clone()));
    }

    fn binary(&mut self, lhs: &Node, rhs: &Node, op: Opcode) -> Result<()> {
        self.value(lhs)?;
        self.value(rhs)?;
        self.prog.push(op);
        Ok(())
    }
}
