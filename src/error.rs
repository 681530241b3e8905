//! Error taxonomy for the control bridge
//!
//! Design: every failure surfaces synchronously to the immediate caller.
//! Nothing is retried, nothing is masked, and native codes are carried as
//! stable symbolic names rather than bare integers.

use core::ffi::c_int;

use crate::ctl::errno_symbol;

pub type CtlResult<T> = Result<T, CtlError>;

/// Errors raised by the marshaling and dispatch layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtlError {
    /// Wrong number of arguments to an entry point.
    Arity { expected: usize, got: usize },
    /// An argument's runtime type does not match the entry's contract.
    Type {
        expected: &'static str,
        got: &'static str,
    },
    /// The native control interface returned a nonzero code.
    Native { code: c_int },
    /// The allocator's control interface was not found at startup.
    ///
    /// Raised only by the high-level tools; the namespace surface
    /// expresses absence structurally instead.
    Unavailable,
}

impl CtlError {
    /// Symbolic errno name for a `Native` error, when the code is known.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            CtlError::Native { code } => errno_symbol(*code),
            _ => None,
        }
    }
}

impl core::fmt::Display for CtlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CtlError::Arity { expected, got } => {
                write!(f, "Expected {} arguments, got {}", expected, got)
            }
            CtlError::Type { expected, got } => {
                write!(f, "Expected {}, got {}", expected, got)
            }
            CtlError::Native { code } => match errno_symbol(*code) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "errno {}", code),
            },
            CtlError::Unavailable => write!(f, "allocator control interface is not loaded"),
        }
    }
}

impl std::error::Error for CtlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_both_counts() {
        let err = CtlError::Arity {
            expected: 2,
            got: 1,
        };
        assert_eq!(err.to_string(), "Expected 2 arguments, got 1");
    }

    #[test]
    fn type_message_names_both_types() {
        let err = CtlError::Type {
            expected: "bool",
            got: "int",
        };
        assert_eq!(err.to_string(), "Expected bool, got int");
    }

    #[test]
    fn native_error_displays_symbol_not_number() {
        let err = CtlError::Native {
            code: crate::ctl::codes::ENOENT,
        };
        assert_eq!(err.to_string(), "ENOENT");
        assert_eq!(err.symbol(), Some("ENOENT"));
    }

    #[test]
    fn unknown_native_code_still_names_errno() {
        let err = CtlError::Native { code: 99_999 };
        assert_eq!(err.symbol(), None);
        assert_eq!(err.to_string(), "errno 99999");
    }
}
