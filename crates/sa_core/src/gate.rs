//! Gate identity and type (part of C2's `Circuit` graph model).

use crate::errors::CoreError;
use crate::value::{op, OpKind, Value};
use std::fmt;
use std::str::FromStr;

/// A validated gate name: non-empty, no ASCII whitespace.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GateName(String);

impl GateName {
    pub fn new(s: impl Into<String>) -> Result<GateName, CoreError> {
        let s = s.into();
        if s.is_empty() || s.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(CoreError::InvalidGateName(s));
        }
        Ok(GateName(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GateName {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<GateName, CoreError> {
        GateName::new(s)
    }
}

impl std::borrow::Borrow<str> for GateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The gate types supported: `INPUT` has no fan-in, the rest are ordinary
/// combinational primitives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GateType {
    Input,
    Buff,
    Not,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl GateType {
    pub fn is_input(self) -> bool {
        matches!(self, GateType::Input)
    }

    /// INPUT has no fan-in; BUFF/NOT take exactly one; the rest take two or
    /// more (the algebra's `op` is n-ary, so wide AND/OR/XOR gates are legal).
    pub fn min_fanin(self) -> usize {
        match self {
            GateType::Input => 0,
            GateType::Buff | GateType::Not => 1,
            GateType::And | GateType::Nand | GateType::Or | GateType::Nor | GateType::Xor | GateType::Xnor => 2,
        }
    }

    pub fn max_fanin(self) -> Option<usize> {
        match self {
            GateType::Input => Some(0),
            GateType::Buff | GateType::Not => Some(1),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GateType::Input => "INPUT",
            GateType::Buff => "BUFF",
            GateType::Not => "NOT",
            GateType::And => "AND",
            GateType::Nand => "NAND",
            GateType::Or => "OR",
            GateType::Nor => "NOR",
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
        }
    }

    /// The controlling value of a gate's inputs for backward justification's
    /// controlling-value shortcut: AND/NAND are controlled by 0, OR/NOR
    /// by 1. BUFF/NOT/XOR/XNOR/INPUT have none.
    pub fn controlling_value(self) -> Option<Value> {
        match self {
            GateType::And | GateType::Nand => Some(Value::Zero),
            GateType::Or | GateType::Nor => Some(Value::One),
            _ => None,
        }
    }

    /// The value every X fan-in is forced to when the gate's output is
    /// non-controlling, or when the gate acts as the unique D-frontier
    /// during unique D-drive.
    pub fn non_controlling_value(self) -> Option<Value> {
        match self {
            GateType::And | GateType::Nand => Some(Value::One),
            GateType::Or | GateType::Nor => Some(Value::Zero),
            GateType::Xor | GateType::Xnor => Some(Value::Zero),
            _ => None,
        }
    }

    pub fn is_inverting(self) -> bool {
        matches!(self, GateType::Nand | GateType::Nor | GateType::Not | GateType::Xnor)
    }
}

impl FromStr for GateType {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<GateType, CoreError> {
        match s {
            "INPUT" => Ok(GateType::Input),
            "BUFF" => Ok(GateType::Buff),
            "NOT" => Ok(GateType::Not),
            "AND" => Ok(GateType::And),
            "NAND" => Ok(GateType::Nand),
            "OR" => Ok(GateType::Or),
            "NOR" => Ok(GateType::Nor),
            "XOR" => Ok(GateType::Xor),
            "XNOR" => Ok(GateType::Xnor),
            other => Err(CoreError::InvalidGateName(other.to_string())),
        }
    }
}

/// Evaluate a gate's equation over its (possibly partially unknown) fan-in
/// values. `GateType` is exhaustively matched: every variant is handled, so
/// there is no "unknown gate type" path to reach from validated data.
pub fn evaluate_gate(gate_type: GateType, inputs: &[Value]) -> Value {
    match gate_type {
        GateType::Input => Value::X, // an INPUT has no fan-in equation; callers never call this for INPUT
        GateType::Buff => inputs.first().copied().unwrap_or(Value::X),
        GateType::Not => inputs.first().copied().unwrap_or(Value::X).invert(),
        GateType::And => op(OpKind::And, inputs),
        GateType::Nand => op(OpKind::And, inputs).invert(),
        GateType::Or => op(OpKind::Or, inputs),
        GateType::Nor => op(OpKind::Or, inputs).invert(),
        GateType::Xor => op(OpKind::Xor, inputs),
        GateType::Xnor => op(OpKind::Xor, inputs).invert(),
    }
}

/// A named gate: its type, ordered fan-in, fan-out set, current value and
/// the collapser's visited-flag.
#[derive(Clone, Debug)]
pub struct Gate {
    pub name: GateName,
    pub gate_type: GateType,
    pub fanin: Vec<GateName>,
    pub fanout: Vec<GateName>,
    pub value: Value,
    pub(crate) visited: bool,
}

impl Gate {
    pub fn new(name: GateName, gate_type: GateType, fanin: Vec<GateName>) -> Gate {
        Gate {
            name,
            gate_type,
            fanin,
            fanout: Vec::new(),
            value: Value::X,
            visited: false,
        }
    }

    pub fn is_primary_input(&self) -> bool {
        self.gate_type.is_input()
    }

    /// A line is a stem (bears distinct branches) when more than one gate
    /// reads it.
    pub fn is_stem(&self) -> bool {
        self.fanout.len() > 1
    }
}
