//! sa_core — the five-valued algebra, circuit graph, and fault/fault-class
//! model shared by the collapser and implication engine.
//!
//! This crate is I/O-free; parsing and report rendering live in `sa_io` and
//! `sa_report`.

#![forbid(unsafe_code)]

pub mod circuit;
pub mod errors;
pub mod fault;
pub mod gate;
pub mod value;

pub use circuit::{Circuit, GateDecl};
pub use errors::CoreError;
pub use fault::{Fault, FaultClass, Polarity};
pub use gate::{evaluate_gate, Gate, GateName, GateType};
pub use value::{op, OpKind, Value};
