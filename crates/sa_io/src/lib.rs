//! sa_io — the only crate in the workspace that touches raw text: the
//! ISCAS-style netlist loader and the command-script loader.
//! Both are pure parse functions; nothing here opens a `File` directly —
//! that's left to the CLI layer.

#![forbid(unsafe_code)]

pub mod bench;
pub mod commands;

pub use bench::{load_circuit, parse_bench};
pub use commands::{parse_commands, Command, CommandKind};

use sa_core::CoreError;
use thiserror::Error;

/// Every way C8/C9 can fail to turn text into workspace types.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("reference to undeclared gate: {0}")]
    UnknownGate(String),

    #[error("gate declared more than once: {0}")]
    DuplicateGate(String),

    #[error("circuit graph contains a cycle")]
    Cycle,

    #[error("malformed command at line {line}")]
    BadCommand { line: usize },
}

impl From<CoreError> for LoadError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownGate(g) => LoadError::UnknownGate(g),
            CoreError::DuplicateGate(g) => LoadError::DuplicateGate(g),
            CoreError::Cycle => LoadError::Cycle,
            other => LoadError::Parse { line: 0, msg: other.to_string() },
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
