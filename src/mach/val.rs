use crate::lang::ast::Literal;
use std::rc::Rc;

/// ## Runtime values

#[derive(Debug, Clone)]
pub enum Val {
    Integer(i64),
    Real(f64),
    String(Rc<str>),
    Array(Rc<[Val]>),
}

impl Val {
    /// Bytes charged to the allocator while this value is held by the
    /// operand stack or the symbol table.
    pub fn footprint(&self) -> usize {
        std::mem::size_of::<Val>()
            + match self {
                Val::Integer(_) | Val::Real(_) => 0,
                Val::String(s) => s.len(),
                Val::Array(a) => a.iter().map(Val::footprint).sum(),
            }
    }

    /// Only numeric zero makes a conditional jump fire.
    pub fn is_zero(&self) -> bool {
        match self {
            Val::Integer(n) => *n == 0,
            Val::Real(n) => *n == 0.0,
            Val::String(_) | Val::Array(_) => false,
        }
    }

    /// Interpret one line of user input: integer, else real, else text.
    pub fn from_input(s: &str) -> Val {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Val::Integer(n);
        }
        if let Ok(n) = s.parse::<f64>() {
            return Val::Real(n);
        }
        Val::String(s.into())
    }

    pub fn from_bool(b: bool) -> Val {
        Val::Integer(b as i64)
    }

    /// Reals that hold a whole number collapse to integers.
    pub fn from_real(n: f64) -> Val {
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Val::Integer(n as i64)
        } else {
            Val::Real(n)
        }
    }
}

impl PartialEq for Val {
    fn eq(&self, other: &Val) -> bool {
        use Val::*;
        match (self, other) {
            (Integer(l), Integer(r)) => l == r,
            (Integer(l), Real(r)) => *l as f64 == *r,
            (Real(l), Integer(r)) => *l == *r as f64,
            (Real(l), Real(r)) => l == r,
            (String(l), String(r)) => l == r,
            (Array(l), Array(r)) => l == r,
            _ => false,
        }
    }
}

impl From<i64> for Val {
    fn from(n: i64) -> Val {
        Val::Integer(n)
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Val {
        Val::Real(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::String(s.into())
    }
}

impl From<Vec<Val>> for Val {
    fn from(v: Vec<Val>) -> Val {
        Val::Array(v.into())
    }
}

impl From<&Literal> for Val {
    fn from(lit: &Literal) -> Val {
        match lit {
            Literal::Integer(n) => Val::Integer(*n),
            Literal::Real(n) => Val::Real(*n),
            Literal::String(s) => Val::String(s.clone()),
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            Real(n) => write!(f, "{:?}", n),
            String(s) => write!(f, "{}", s),
            Array(a) => {
                write!(f, "[")?;
                for (index, val) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    match val {
                        String(s) => write!(f, "{:?}", s)?,
                        _ => write!(f, "{}", val)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}
