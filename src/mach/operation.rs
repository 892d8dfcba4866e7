use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 + r)),
            (Real(l), Integer(r)) => Ok(Real(l + r as f64)),
            (Real(l), Real(r)) => Ok(Real(l + r)),
            (String(l), String(r)) => {
                let mut s = std::string::String::with_capacity(l.len() + r.len());
                s.push_str(&l);
                s.push_str(&r);
                Ok(String(s.into()))
            }
            (Array(l), Array(r)) => Ok(Array(l.iter().chain(r.iter()).cloned().collect())),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 - r)),
            (Real(l), Integer(r)) => Ok(Real(l - r as f64)),
            (Real(l), Real(r)) => Ok(Real(l - r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// A repeated string or array may not have a footprint larger than
    /// `budget` bytes. The limit is checked before the result is built.
    pub fn multiply(lhs: Val, rhs: Val, budget: usize) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(r) {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 * r)),
            (Real(l), Integer(r)) => Ok(Real(l * r as f64)),
            (Real(l), Real(r)) => Ok(Real(l * r)),
            (String(s), Integer(n)) | (Integer(n), String(s)) => {
                let n = Operation::repeat_count(s.len(), n, budget)?;
                Ok(String(s.repeat(n).into()))
            }
            (Array(a), Integer(n)) | (Integer(n), Array(a)) => {
                let unit = a.iter().map(Val::footprint).sum();
                let n = Operation::repeat_count(unit, n, budget)?;
                let mut v = Vec::with_capacity(a.len() * n);
                for _ in 0..n {
                    v.extend(a.iter().cloned());
                }
                Ok(Array(v.into()))
            }
            _ => Err(error!(TypeMismatch)),
        }
    }

    /// Repeating by a negative count yields an empty result.
    /// `unit` is the payload footprint of one repetition.
    fn repeat_count(unit: usize, n: i64, budget: usize) -> Result<usize> {
        let n = usize::try_from(n.max(0)).unwrap_or(usize::MAX);
        let footprint = unit
            .checked_mul(n)
            .and_then(|payload| payload.checked_add(std::mem::size_of::<Val>()));
        match footprint {
            Some(bytes) if bytes <= budget => Ok(n),
            _ => Err(error!(OutOfMemory)),
        }
    }

    /// Exact integer quotients stay integers, anything else is real.
    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if rhs.is_zero() && matches!(lhs, Integer(_) | Real(_)) {
            return Err(error!(DivisionByZero));
        }
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_rem(r) {
                Some(0) => match l.checked_div(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Some(_) => Ok(Real(l as f64 / r as f64)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Val::from_real(l as f64 / r)),
            (Real(l), Integer(r)) => Ok(Val::from_real(l / r as f64)),
            (Real(l), Real(r)) => Ok(Val::from_real(l / r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        let lt = match (lhs, rhs) {
            (Integer(l), Integer(r)) => l < r,
            (Integer(l), Real(r)) => (l as f64) < r,
            (Real(l), Integer(r)) => l < r as f64,
            (Real(l), Real(r)) => l < r,
            (String(l), String(r)) => l < r,
            _ => return Err(error!(TypeMismatch)),
        };
        Ok(Val::from_bool(lt))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(lhs == rhs))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(lhs != rhs))
    }

    pub fn index(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        let index = match rhs {
            Integer(n) => n,
            _ => return Err(error!(TypeMismatch; "INDEX MUST BE AN INTEGER")),
        };
        let position = usize::try_from(index).map_err(|_| error!(IndexOutOfRange))?;
        match lhs {
            Array(a) => match a.get(position) {
                Some(val) => Ok(val.clone()),
                None => Err(error!(IndexOutOfRange)),
            },
            String(s) => match s.chars().nth(position) {
                Some(ch) => Ok(String(ch.to_string().into())),
                None => Err(error!(IndexOutOfRange)),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }
}
