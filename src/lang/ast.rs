use super::Column;
use std::rc::Rc;

/// ## Abstract syntax tree
///
/// One variant per node kind. The shape of each variant fixes the arity of
/// its operands, so the compiler never has to check child counts.

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Var(Column, Rc<str>),
    Const(Column, Literal),
    Add(Column, Box<Node>, Box<Node>),
    Sub(Column, Box<Node>, Box<Node>),
    Mult(Column, Box<Node>, Box<Node>),
    Div(Column, Box<Node>, Box<Node>),
    Lt(Column, Box<Node>, Box<Node>),
    NotEqual(Column, Box<Node>, Box<Node>),
    Equal(Column, Box<Node>, Box<Node>),
    Set(Column, Rc<str>, Box<Node>),
    If1(Column, Box<Node>, Box<Node>),
    If2(Column, Box<Node>, Box<Node>, Box<Node>),
    While(Column, Box<Node>, Box<Node>),
    Seq(Column, Vec<Node>),
    Expr(Column, Box<Node>),
    Main(Box<Node>),
    Stdout(Column, Box<Node>),
    Stdin(Column),
    Raise(Column, Box<Node>),
    Goto(Column, Rc<str>),
    Mark(Column, Rc<str>),
    Array(Column, Vec<Node>),
    ArrayGet(Column, Box<Node>, Box<Node>),
    Empty(Column),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    String(Rc<str>),
}

impl Node {
    pub fn column(&self) -> Column {
        use Node::*;
        match self {
            Var(col, ..)
            | Const(col, ..)
            | Add(col, ..)
            | Sub(col, ..)
            | Mult(col, ..)
            | Div(col, ..)
            | Lt(col, ..)
            | NotEqual(col, ..)
            | Equal(col, ..)
            | Set(col, ..)
            | If1(col, ..)
            | If2(col, ..)
            | While(col, ..)
            | Seq(col, ..)
            | Expr(col, ..)
            | Stdout(col, ..)
            | Stdin(col)
            | Raise(col, ..)
            | Goto(col, ..)
            | Mark(col, ..)
            | Array(col, ..)
            | ArrayGet(col, ..)
            | Empty(col) => col.clone(),
            Main(body) => body.column(),
        }
    }
}
