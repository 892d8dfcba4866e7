use super::ast::*;
use super::token::{Operator, Token, Word};
use super::{Column, Error};
use crate::error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

pub fn parse(tokens: &[Token]) -> Result<Node> {
    Parser::parse(tokens)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Node> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        let mut statements: Vec<Node> = vec![];
        while parse.peek().is_some() {
            statements.push(parse.statement()?);
        }
        let body = match statements.len() {
            0 => Node::Empty(0..0),
            1 => statements.remove(0),
            _ => Node::Seq(0..parse.col.end, statements),
        };
        Ok(Node::Main(Box::new(body)))
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked
    }

    fn statement(&mut self) -> Result<Node> {
        match self.peek() {
            Some(Token::Word(Word::If)) => {
                self.next();
                let col = self.column();
                let cond = self.paren_expression()?;
                let then = self.statement()?;
                if let Some(Token::Word(Word::Else)) = self.peek() {
                    self.next();
                    let other = self.statement()?;
                    return Ok(Node::If2(
                        col,
                        Box::new(cond),
                        Box::new(then),
                        Box::new(other),
                    ));
                }
                Ok(Node::If1(col, Box::new(cond), Box::new(then)))
            }
            Some(Token::Word(Word::While)) => {
                self.next();
                let col = self.column();
                let cond = self.paren_expression()?;
                let body = self.statement()?;
                Ok(Node::While(col, Box::new(cond), Box::new(body)))
            }
            Some(Token::Word(Word::Puts)) => {
                self.next();
                let col = self.column();
                let expr = self.expression()?;
                self.expect(Token::Semicolon)?;
                Ok(Node::Stdout(col, Box::new(expr)))
            }
            Some(Token::Word(Word::Raise)) => {
                self.next();
                let col = self.column();
                let expr = self.expression()?;
                self.expect(Token::Semicolon)?;
                Ok(Node::Raise(col, Box::new(expr)))
            }
            Some(Token::Word(Word::Goto)) => {
                self.next();
                let col = self.column();
                let (_, label) = self.ident()?;
                self.expect(Token::Semicolon)?;
                Ok(Node::Goto(col, label))
            }
            Some(Token::Semicolon) => {
                self.next();
                Ok(Node::Empty(self.column()))
            }
            Some(Token::LBrace) => {
                self.next();
                let col = self.column();
                let mut statements: Vec<Node> = vec![];
                loop {
                    match self.peek() {
                        Some(Token::RBrace) => {
                            self.next();
                            break;
                        }
                        None => {
                            return Err(error!(SyntaxError, ..&self.column(); "EXPECTED RIGHT BRACE"))
                        }
                        _ => statements.push(self.statement()?),
                    }
                }
                if statements.is_empty() {
                    Ok(Node::Empty(col))
                } else {
                    Ok(Node::Seq(col, statements))
                }
            }
            Some(_) => {
                let expr = self.expression()?;
                if let Node::Var(col, label) = &expr {
                    if let Some(Token::Colon) = self.peek() {
                        self.next();
                        return Ok(Node::Mark(col.clone(), label.clone()));
                    }
                }
                self.expect(Token::Semicolon)?;
                Ok(Node::Expr(expr.column(), Box::new(expr)))
            }
            None => Err(error!(SyntaxError, ..&self.column(); "EXPECTED STATEMENT")),
        }
    }

    fn paren_expression(&mut self) -> Result<Node> {
        self.expect(Token::LParen)?;
        let expr = self.expression()?;
        self.expect(Token::RParen)?;
        Ok(expr)
    }

    fn expression(&mut self) -> Result<Node> {
        let lhs = self.test()?;
        if let Node::Var(col, name) = &lhs {
            if let Some(Token::Operator(Operator::Assign)) = self.peek() {
                self.next();
                let rhs = self.expression()?;
                return Ok(Node::Set(col.clone(), name.clone(), Box::new(rhs)));
            }
        }
        Ok(lhs)
    }

    fn test(&mut self) -> Result<Node> {
        let lhs = self.sum()?;
        match self.peek() {
            Some(Token::Operator(op @ Operator::Less))
            | Some(Token::Operator(op @ Operator::Equal))
            | Some(Token::Operator(op @ Operator::NotEqual)) => {
                self.next();
                let column = self.column();
                let rhs = self.sum()?;
                Ok(Node::for_binary_op(column, op, lhs, rhs))
            }
            _ => Ok(lhs),
        }
    }

    fn sum(&mut self) -> Result<Node> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Node> {
            let mut lhs = this.term()?;
            while let Some(Token::Operator(op)) = this.peek() {
                let op_precedence = match Node::op_precedence(op) {
                    Some(p) => p,
                    None => break,
                };
                if op_precedence < precedence {
                    break;
                }
                this.next();
                let column = this.column();
                let rhs = parse(this, op_precedence + 1)?;
                lhs = Node::for_binary_op(column, op, lhs, rhs);
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn term(&mut self) -> Result<Node> {
        if let Some(Token::Operator(Operator::Minus)) = self.peek() {
            self.next();
            let column = self.column();
            let operand = self.term()?;
            let zero = Node::Const(column.clone(), Literal::Integer(0));
            return Ok(Node::Sub(column, Box::new(zero), Box::new(operand)));
        }
        let mut lhs = self.primary()?;
        while let Some(Token::LBracket) = self.peek() {
            self.next();
            let column = self.column();
            let index = self.expression()?;
            self.expect(Token::RBracket)?;
            lhs = Node::ArrayGet(column, Box::new(lhs), Box::new(index));
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Node> {
        match self.next() {
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Ident(s)) => Ok(Node::Var(self.column(), s.as_str().into())),
            Some(Token::Literal(l)) => Node::for_literal(self.column(), l),
            Some(Token::Word(Word::Gets)) => Ok(Node::Stdin(self.column())),
            Some(Token::LBracket) => {
                let column = self.column();
                Ok(Node::Array(column, self.expression_list()?))
            }
            _ => Err(error!(SyntaxError, ..&self.column(); "EXPECTED EXPRESSION")),
        }
    }

    fn expression_list(&mut self) -> Result<Vec<Node>> {
        let mut v: Vec<Node> = vec![];
        if let Some(Token::RBracket) = self.peek() {
            self.next();
            return Ok(v);
        }
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RBracket) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => {
                    return Err(error!(SyntaxError, ..&self.column(); "EXPECTED END OR SEPARATOR"))
                }
            }
        }
    }

    fn ident(&mut self) -> Result<(Column, Rc<str>)> {
        let ident = match self.next() {
            Some(Token::Ident(i)) => i.as_str().into(),
            _ => return Err(error!(SyntaxError, ..&self.column(); "EXPECTED IDENTIFIER")),
        };
        Ok((self.column(), ident))
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError, ..&self.column();
            match token {
                Unknown(_) | Whitespace(_) => {"UNEXPECTED TOKEN"}
                Literal(_) => {"EXPECTED LITERAL"}
                Word(_) => {"EXPECTED RESERVED WORD"}
                Operator(_) => {"EXPECTED OPERATOR"}
                Ident(_) => {"EXPECTED IDENTIFIER"}
                LParen => {"EXPECTED LEFT PARENTHESIS"}
                RParen => {"EXPECTED RIGHT PARENTHESIS"}
                LBrace => {"EXPECTED LEFT BRACE"}
                RBrace => {"EXPECTED RIGHT BRACE"}
                LBracket => {"EXPECTED LEFT BRACKET"}
                RBracket => {"EXPECTED RIGHT BRACKET"}
                Comma => {"EXPECTED COMMA"}
                Colon => {"EXPECTED COLON"}
                Semicolon => {"EXPECTED SEMICOLON"}
            }
        ))
    }
}

impl Node {
    fn for_binary_op(col: Column, op: &Operator, lhs: Node, rhs: Node) -> Node {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Plus => Node::Add(col, lhs, rhs),
            Minus => Node::Sub(col, lhs, rhs),
            Multiply => Node::Mult(col, lhs, rhs),
            Divide => Node::Div(col, lhs, rhs),
            Less => Node::Lt(col, lhs, rhs),
            Equal => Node::Equal(col, lhs, rhs),
            NotEqual => Node::NotEqual(col, lhs, rhs),
            Assign => unreachable!("assignment is parsed by expression()"),
        }
    }

    fn op_precedence(op: &Operator) -> Option<usize> {
        use Operator::*;
        match op {
            Plus | Minus => Some(10),
            Multiply | Divide => Some(20),
            Less | Assign | Equal | NotEqual => None,
        }
    }

    fn for_literal(col: Column, lit: &super::token::Literal) -> Result<Node> {
        use super::token::Literal as Lit;
        let literal = match lit {
            Lit::Integer(s) => match s.parse::<i64>() {
                Ok(n) => Literal::Integer(n),
                Err(_) => return Err(error!(Overflow, ..&col; "INTEGER LITERAL TOO LARGE")),
            },
            Lit::Real(s) => match s.parse::<f64>() {
                Ok(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                    Literal::Integer(n as i64)
                }
                Ok(n) => Literal::Real(n),
                Err(_) => return Err(error!(SyntaxError, ..&col; "INVALID NUMBER")),
            },
            Lit::String(s) => Literal::String(s.as_str().into()),
        };
        Ok(Node::Const(col, literal))
    }
}
