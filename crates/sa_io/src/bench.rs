//! ISCAS-style netlist loader.
//!
//! Grammar (one declaration per line, blank lines and `#` comments ignored):
//!   INPUT(name)
//!   OUTPUT(name)
//!   name = TYPE(fanin, fanin, ...)

use crate::{LoadError, LoadResult};
use sa_core::{Circuit, GateDecl, GateName, GateType};
use std::collections::BTreeSet;
use std::str::FromStr;

fn strip_call<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.trim())
}

fn gate_name(s: &str, line: usize) -> LoadResult<GateName> {
    GateName::new(s).map_err(|_| LoadError::Parse { line, msg: format!("invalid gate name '{s}'") })
}

/// Parse bench-style text into a flat declaration list and output set,
/// without building the `Circuit` (so callers can inspect the raw
/// declarations before validation, e.g. for diagnostics).
pub fn parse_bench(text: &str) -> LoadResult<(Vec<GateDecl>, BTreeSet<GateName>)> {
    let mut decls = Vec::new();
    let mut outputs = BTreeSet::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(inner) = strip_call(line, "INPUT") {
            decls.push(GateDecl { name: gate_name(inner, line_no)?, gate_type: GateType::Input, fanin: Vec::new() });
            continue;
        }
        if let Some(inner) = strip_call(line, "OUTPUT") {
            outputs.insert(gate_name(inner, line_no)?);
            continue;
        }

        let (lhs, rhs) = line
            .split_once('=')
            .ok_or_else(|| LoadError::Parse { line: line_no, msg: "expected 'name = TYPE(...)'".to_string() })?;
        let name = gate_name(lhs.trim(), line_no)?;
        let rhs = rhs.trim();
        let open = rhs
            .find('(')
            .ok_or_else(|| LoadError::Parse { line: line_no, msg: "missing '(' in gate declaration".to_string() })?;
        let close = rhs
            .rfind(')')
            .ok_or_else(|| LoadError::Parse { line: line_no, msg: "missing ')' in gate declaration".to_string() })?;
        if close < open {
            return Err(LoadError::Parse { line: line_no, msg: "malformed gate declaration".to_string() });
        }

        let type_token = rhs[..open].trim();
        let gate_type = GateType::from_str(type_token)
            .map_err(|_| LoadError::Parse { line: line_no, msg: format!("unknown gate type '{type_token}'") })?;

        let fanin = rhs[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| gate_name(s, line_no))
            .collect::<LoadResult<Vec<_>>>()?;

        decls.push(GateDecl { name, gate_type, fanin });
    }

    Ok((decls, outputs))
}

/// Parse and validate in one step: the `Circuit` returned has already passed
/// every invariant check from `sa_core::Circuit::build` (arity, duplicates,
/// dangling references, acyclicity).
pub fn load_circuit(text: &str) -> LoadResult<Circuit> {
    let (decls, outputs) = parse_bench(text)?;
    Ok(Circuit::build(decls, outputs)?)
}
