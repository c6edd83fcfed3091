//! Core-domain error types. Kept dependency-free (no `thiserror`) to match
//! `sa_core`'s role as the crate every other crate depends on.

use core::fmt;

/// Errors raised while constructing or mutating core domain values
/// (the [`crate::value`], [`crate::gate`], [`crate::circuit`] and
/// [`crate::fault`] modules).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoreError {
    /// A stuck-at fault was constructed with a polarity other than 0 or 1.
    InvalidPolarity,
    /// A gate name did not satisfy the token charset (non-empty, no whitespace).
    InvalidGateName(String),
    /// A gate declares itself as one of its own fan-in names.
    SelfLoop(String),
    /// Two gates were declared with the same name.
    DuplicateGate(String),
    /// A gate's fan-in list names a gate that was never declared.
    UnknownGate(String),
    /// The fan-in/fan-out graph contains a cycle, so it cannot be a
    /// combinational circuit.
    Cycle,
    /// A gate of this type was given the wrong number of fan-in wires
    /// (e.g. `NOT` with two inputs, or `AND` with none).
    WrongArity { gate: String, gate_type: &'static str, got: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidPolarity => write!(f, "stuck-at polarity must be 0 or 1"),
            CoreError::InvalidGateName(s) => write!(f, "invalid gate name: {s:?}"),
            CoreError::SelfLoop(g) => write!(f, "gate {g:?} lists itself as a fan-in"),
            CoreError::DuplicateGate(g) => write!(f, "gate {g:?} declared more than once"),
            CoreError::UnknownGate(g) => write!(f, "reference to undeclared gate {g:?}"),
            CoreError::Cycle => write!(f, "circuit graph contains a cycle"),
            CoreError::WrongArity { gate, gate_type, got } => write!(
                f,
                "gate {gate:?} of type {gate_type} has {got} fan-in wire(s), which is not a valid arity for that type"
            ),
        }
    }
}

impl std::error::Error for CoreError {}
