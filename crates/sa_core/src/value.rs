//! Roth's five-valued algebra: `{Zero, One, X, D, DBar}`.
//!
//! `D` means "good circuit drives 1, faulty circuit drives 0"; `DBar` is its
//! dual. Every value decomposes into a `(good, bad)` pair of ordinary
//! 2-valued-or-unknown bits; `op` recombines those pairs per operand and
//! re-encodes the result.

use std::fmt;

/// One of the five values a line can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    Zero,
    One,
    X,
    D,
    DBar,
}

impl Value {
    /// `{0↔1, D↔D̄, X↔X}`.
    pub fn invert(self) -> Value {
        match self {
            Value::Zero => Value::One,
            Value::One => Value::Zero,
            Value::X => Value::X,
            Value::D => Value::DBar,
            Value::DBar => Value::D,
        }
    }

    /// Whether this value is fully defined (not `X`). `D`/`D̄` count as defined.
    pub fn is_definite(self) -> bool {
        !matches!(self, Value::X)
    }

    /// The "good machine" bit this value carries (`One`/`D` → `true`,
    /// `Zero`/`D̄` → `false`), or `None` for `X`. Used by the implication
    /// engine to compare a stored `D`/`D̄` against a plain 0/1 requirement.
    pub fn good_bit(self) -> Option<bool> {
        self.good()
    }

    /// The "good machine" bit this value carries, or `None` for `X`.
    fn good(self) -> Option<bool> {
        match self {
            Value::Zero | Value::DBar => Some(false),
            Value::One | Value::D => Some(true),
            Value::X => None,
        }
    }

    /// The "faulty machine" bit this value carries, or `None` for `X`.
    fn bad(self) -> Option<bool> {
        match self {
            Value::Zero | Value::D => Some(false),
            Value::One | Value::DBar => Some(true),
            Value::X => None,
        }
    }

    fn from_rails(good: Option<bool>, bad: Option<bool>) -> Value {
        match (good, bad) {
            (Some(false), Some(false)) => Value::Zero,
            (Some(true), Some(true)) => Value::One,
            (Some(true), Some(false)) => Value::D,
            (Some(false), Some(true)) => Value::DBar,
            _ => Value::X,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Value::Zero => "0",
            Value::One => "1",
            Value::X => "X",
            Value::D => "D",
            Value::DBar => "Db",
        })
    }
}

impl std::str::FromStr for Value {
    type Err = ();
    fn from_str(s: &str) -> Result<Value, ()> {
        match s {
            "0" => Ok(Value::Zero),
            "1" => Ok(Value::One),
            "X" | "x" => Ok(Value::X),
            "D" => Ok(Value::D),
            "Db" | "DB" | "D'" | "db" => Ok(Value::DBar),
            _ => Err(()),
        }
    }
}

/// The three n-ary reducible operators of the algebra.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpKind {
    And,
    Or,
    Xor,
}

fn kleene_and(bits: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    let mut saw_x = false;
    for b in bits {
        match b {
            Some(false) => return Some(false),
            None => saw_x = true,
            Some(true) => {}
        }
    }
    if saw_x { None } else { Some(true) }
}

fn kleene_or(bits: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    let mut saw_x = false;
    for b in bits {
        match b {
            Some(true) => return Some(true),
            None => saw_x = true,
            Some(false) => {}
        }
    }
    if saw_x { None } else { Some(false) }
}

fn kleene_xor(bits: impl Iterator<Item = Option<bool>>) -> Option<bool> {
    let mut parity = false;
    for b in bits {
        match b {
            Some(bit) => parity ^= bit,
            None => return None,
        }
    }
    Some(parity)
}

/// Evaluate an n-ary operator over the given operands.
///
/// AND/OR apply the absorbing-value short circuit on the *good* rail only
/// (a plain `Zero` or a `D̄` makes an AND output `Zero` outright, a plain
/// `One` or a `D` makes an OR output `One` outright — this is the rule
/// spelled out in the algebra's testable laws), then combine both rails with
/// ordinary Kleene three-valued logic when no operand forces the result.
/// XOR has no controlling value, so both rails are always combined by parity.
pub fn op(kind: OpKind, values: &[Value]) -> Value {
    match kind {
        OpKind::And => {
            if values.iter().any(|v| v.good() == Some(false)) {
                return Value::Zero;
            }
            let good = kleene_and(values.iter().map(|v| v.good()));
            let bad = kleene_and(values.iter().map(|v| v.bad()));
            Value::from_rails(good, bad)
        }
        OpKind::Or => {
            if values.iter().any(|v| v.good() == Some(true)) {
                return Value::One;
            }
            let good = kleene_or(values.iter().map(|v| v.good()));
            let bad = kleene_or(values.iter().map(|v| v.bad()));
            Value::from_rails(good, bad)
        }
        OpKind::Xor => {
            let good = kleene_xor(values.iter().map(|v| v.good()));
            let bad = kleene_xor(values.iter().map(|v| v.bad()));
            Value::from_rails(good, bad)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Zero),
            Just(Value::One),
            Just(Value::X),
            Just(Value::D),
            Just(Value::DBar),
        ]
    }

    proptest! {
        #[test]
        fn invert_is_always_an_involution(v in any_value()) {
            prop_assert_eq!(v.invert().invert(), v);
        }

        #[test]
        fn and_commutes(a in any_value(), b in any_value()) {
            prop_assert_eq!(op(OpKind::And, &[a, b]), op(OpKind::And, &[b, a]));
        }

        #[test]
        fn or_commutes(a in any_value(), b in any_value()) {
            prop_assert_eq!(op(OpKind::Or, &[a, b]), op(OpKind::Or, &[b, a]));
        }

        #[test]
        fn xor_commutes(a in any_value(), b in any_value()) {
            prop_assert_eq!(op(OpKind::Xor, &[a, b]), op(OpKind::Xor, &[b, a]));
        }

        #[test]
        fn and_associates(a in any_value(), b in any_value(), c in any_value()) {
            let left = op(OpKind::And, &[op(OpKind::And, &[a, b]), c]);
            let right = op(OpKind::And, &[a, op(OpKind::And, &[b, c])]);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn or_associates(a in any_value(), b in any_value(), c in any_value()) {
            let left = op(OpKind::Or, &[op(OpKind::Or, &[a, b]), c]);
            let right = op(OpKind::Or, &[a, op(OpKind::Or, &[b, c])]);
            prop_assert_eq!(left, right);
        }

        #[test]
        fn xor_associates(a in any_value(), b in any_value(), c in any_value()) {
            let left = op(OpKind::Xor, &[op(OpKind::Xor, &[a, b]), c]);
            let right = op(OpKind::Xor, &[a, op(OpKind::Xor, &[b, c])]);
            prop_assert_eq!(left, right);
        }

        /// AND with an X collapses to X unless an operand is Zero/D̄, which force Zero.
        #[test]
        fn and_with_x_is_x_unless_forced(v in any_value()) {
            let result = op(OpKind::And, &[v, Value::X]);
            if matches!(v, Value::Zero | Value::DBar) {
                prop_assert_eq!(result, Value::Zero);
            } else {
                prop_assert_eq!(result, Value::X);
            }
        }

        /// OR with an X collapses to X unless an operand is One/D, which force One.
        #[test]
        fn or_with_x_is_x_unless_forced(v in any_value()) {
            let result = op(OpKind::Or, &[v, Value::X]);
            if matches!(v, Value::One | Value::D) {
                prop_assert_eq!(result, Value::One);
            } else {
                prop_assert_eq!(result, Value::X);
            }
        }
    }
}
