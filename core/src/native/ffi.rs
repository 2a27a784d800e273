//! FFI signatures of computation module entry points.
//!
//! These are resolved at runtime from a dynamically loaded library. Use the
//! safe wrappers in the `module` module instead of calling them directly.

use serde::Deserialize;
use std::fmt;
use std::os::raw::{c_char, c_int};
use std::str::FromStr;

use crate::error::RunnerError;

/// `void run_demo(const char* path)`
pub type VoidEntryFn = unsafe extern "C" fn(path: *const c_char);

/// `int entry(const char* path)`, zero on success.
pub type StatusEntryFn = unsafe extern "C" fn(path: *const c_char) -> c_int;

/// Calling convention expected from the entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySignature {
    /// No return value; failures inside the library are invisible.
    #[default]
    Void,
    /// Integer status; non-zero is reported as a native call failure.
    Status,
}

impl FromStr for EntrySignature {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "void" => Ok(Self::Void),
            "status" => Ok(Self::Status),
            other => Err(RunnerError::config(format!(
                "Invalid entry signature: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EntrySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Status => write!(f, "status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signatures() {
        assert_eq!("void".parse::<EntrySignature>().unwrap(), EntrySignature::Void);
        assert_eq!(" Status ".parse::<EntrySignature>().unwrap(), EntrySignature::Status);
        assert!("fastcall".parse::<EntrySignature>().is_err());
        assert_eq!(EntrySignature::Status.to_string(), "status");
    }
}
