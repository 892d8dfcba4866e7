use super::Column;
use crate::mach::Address;
use std::rc::Rc;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: u16,
    address: Option<Address>,
    column: Column,
    message: Rc<str>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            address: None,
            column: 0..0,
            message: "".into(),
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code as u16
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    /// Process exit status for a run that ended with this error.
    /// A `raise` from the program is told apart from every other failure.
    pub fn exit_code(&self) -> i32 {
        if self.is(ErrorCode::Raised) {
            2
        } else {
            1
        }
    }

    pub fn at_address(&self, address: Address) -> Error {
        if self.address.is_some() {
            return self.clone();
        }
        Error {
            code: self.code,
            address: Some(address),
            column: self.column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            address: self.address,
            column: column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            address: self.address,
            column: self.column.clone(),
            message: message.into(),
        }
    }
}

pub enum ErrorCode {
    Break = 1,
    SyntaxError = 2,
    Overflow = 6,
    OutOfMemory = 7,
    UndefinedLabel = 8,
    IndexOutOfRange = 9,
    DuplicateLabel = 10,
    DivisionByZero = 11,
    TypeMismatch = 13,
    KeyNotFound = 18,
    ReservedName = 19,
    Raised = 20,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.code == ErrorCode::Raised as u16 {
            return write!(f, "{}", self.message);
        }
        let code_str = match self.code {
            1 => "BREAK",
            2 => "SYNTAX ERROR",
            6 => "OVERFLOW",
            7 => "OUT OF MEMORY",
            8 => "UNDEFINED LABEL",
            9 => "INDEX OUT OF RANGE",
            10 => "DUPLICATE LABEL",
            11 => "DIVISION BY ZERO",
            13 => "TYPE MISMATCH",
            18 => "KEY NOT FOUND",
            19 => "RESERVED NAME",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(address) = self.address {
            suffix.push_str(&format!(" {}", address));
        }
        if (0..0) != self.column {
            suffix.push_str(&format!(" ({}..{})", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            if suffix.is_empty() {
                write!(f, "PROGRAM ERROR {}", self.code)
            } else {
                write!(f, "PROGRAM ERROR {} IN{}", self.code, suffix)
            }
        } else if suffix.is_empty() {
            write!(f, "{}", code_str)
        } else {
            write!(f, "{} IN{}", code_str, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(error!(DivisionByZero).to_string(), "DIVISION BY ZERO");
        let e = error!(KeyNotFound; "x").at_address(12);
        assert_eq!(e.to_string(), "KEY NOT FOUND IN 12; x");
        let e = error!(SyntaxError, ..&(3..5); "EXPECTED SEMICOLON");
        assert_eq!(e.to_string(), "SYNTAX ERROR IN (3..5); EXPECTED SEMICOLON");
    }

    #[test]
    fn test_raised_is_bare_message() {
        let e = error!(Raised; "bad input");
        assert_eq!(e.to_string(), "bad input");
        assert_eq!(e.exit_code(), 2);
        assert_eq!(error!(OutOfMemory).exit_code(), 1);
    }
}
