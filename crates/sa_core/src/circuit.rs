//! Circuit graph: gates keyed by name, ordered primary inputs, a
//! primary-output set, and the structural invariants (acyclicity, fan-in/
//! fan-out consistency) that keep the graph well-formed.

use crate::errors::CoreError;
use crate::gate::{Gate, GateName, GateType};
use std::collections::{BTreeMap, BTreeSet};

/// One parsed gate declaration, independent of how it was read (bench file,
/// hand-built test fixture, ...).
#[derive(Clone, Debug)]
pub struct GateDecl {
    pub name: GateName,
    pub gate_type: GateType,
    pub fanin: Vec<GateName>,
}

/// A combinational netlist: every name referenced by a fan-in/fan-out list
/// resolves in `gates`, fan-in/fan-out are mutually consistent, and the
/// graph is acyclic.
#[derive(Debug)]
pub struct Circuit {
    gates: BTreeMap<GateName, Gate>,
    inputs: Vec<GateName>,
    outputs: BTreeSet<GateName>,
}

impl Circuit {
    /// Build and validate a circuit from a flat declaration list plus the
    /// independently-declared output set. Two passes: the first registers
    /// every gate with its fan-in, the second derives fan-out lists by
    /// inverting fan-in edges and validates every reference resolves.
    pub fn build(decls: Vec<GateDecl>, outputs: BTreeSet<GateName>) -> Result<Circuit, CoreError> {
        let mut gates = BTreeMap::new();
        let mut inputs = Vec::new();

        for decl in decls {
            if gates.contains_key(&decl.name) {
                return Err(CoreError::DuplicateGate(decl.name.as_str().to_string()));
            }
            if decl.fanin.iter().any(|f| *f == decl.name) {
                return Err(CoreError::SelfLoop(decl.name.as_str().to_string()));
            }
            let got = decl.fanin.len();
            if got < decl.gate_type.min_fanin() || decl.gate_type.max_fanin().is_some_and(|m| got > m) {
                return Err(CoreError::WrongArity {
                    gate: decl.name.as_str().to_string(),
                    gate_type: decl.gate_type.as_str(),
                    got,
                });
            }
            if decl.gate_type.is_input() {
                inputs.push(decl.name.clone());
            }
            gates.insert(decl.name.clone(), Gate::new(decl.name, decl.gate_type, decl.fanin));
        }

        for gate in gates.values() {
            for fanin_name in &gate.fanin {
                if !gates.contains_key(fanin_name) {
                    return Err(CoreError::UnknownGate(fanin_name.as_str().to_string()));
                }
            }
        }
        for name in &outputs {
            if !gates.contains_key(name) {
                return Err(CoreError::UnknownGate(name.as_str().to_string()));
            }
        }

        let fanout_edges: Vec<(GateName, GateName)> = gates
            .values()
            .flat_map(|g| g.fanin.iter().map(move |fi| (fi.clone(), g.name.clone())))
            .collect();
        for (driver, reader) in fanout_edges {
            gates.get_mut(&driver).expect("checked above").fanout.push(reader);
        }

        let mut circuit = Circuit { gates, inputs, outputs };
        circuit.check_acyclic()?;
        Ok(circuit)
    }

    fn check_acyclic(&self) -> Result<(), CoreError> {
        let mut state: BTreeMap<&GateName, u8> = BTreeMap::new(); // 0=unseen,1=on-stack,2=done
        for start in self.gates.keys() {
            if state.get(start).copied().unwrap_or(0) != 0 {
                continue;
            }
            let mut stack = vec![(start, false)];
            while let Some((name, exiting)) = stack.pop() {
                if exiting {
                    state.insert(name, 2);
                    continue;
                }
                match state.get(name).copied().unwrap_or(0) {
                    2 => continue,
                    1 => return Err(CoreError::Cycle),
                    _ => {}
                }
                state.insert(name, 1);
                stack.push((name, true));
                for fanin in &self.gates[name].fanin {
                    match state.get(fanin).copied().unwrap_or(0) {
                        0 => stack.push((fanin, false)),
                        1 => return Err(CoreError::Cycle),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    pub fn gate(&self, name: &GateName) -> Option<&Gate> {
        self.gates.get(name)
    }

    pub fn gate_mut(&mut self, name: &GateName) -> Option<&mut Gate> {
        self.gates.get_mut(name)
    }

    /// All gate names, in the deterministic order `BTreeMap` iterates them.
    pub fn gate_names(&self) -> impl Iterator<Item = &GateName> {
        self.gates.keys()
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.values()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn inputs(&self) -> &[GateName] {
        &self.inputs
    }

    pub fn outputs(&self) -> &BTreeSet<GateName> {
        &self.outputs
    }

    pub fn is_primary_output(&self, name: &GateName) -> bool {
        self.outputs.contains(name)
    }

    pub fn is_visited(&self, name: &GateName) -> bool {
        self.gates.get(name).map(|g| g.visited).unwrap_or(false)
    }

    pub fn mark_visited(&mut self, name: &GateName) {
        if let Some(g) = self.gates.get_mut(name) {
            g.visited = true;
        }
    }

    /// Reset every gate's visited-flag. Called by the collapser before each
    /// run; the implication engine never touches this flag.
    pub fn reset_visited(&mut self) {
        for g in self.gates.values_mut() {
            g.visited = false;
        }
    }

    /// One-line human-readable summary (gate count by type, input/output
    /// counts) — the Rust analogue of the original `circ.print_summary()`.
    pub fn summary(&self) -> String {
        let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
        for g in self.gates.values() {
            *by_type.entry(g.gate_type.as_str()).or_insert(0) += 1;
        }
        let counts = by_type
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} gates ({}), {} primary inputs, {} primary outputs",
            self.gates.len(),
            counts,
            self.inputs.len(),
            self.outputs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(s: &str) -> GateName {
        GateName::new(s).unwrap()
    }

    fn decl(name: &str, t: GateType, fanin: &[&str]) -> GateDecl {
        GateDecl { name: n(name), gate_type: t, fanin: fanin.iter().map(|s| n(s)).collect() }
    }

    #[test]
    fn builds_fanout_from_fanin() {
        let decls = vec![
            decl("A", GateType::Input, &[]),
            decl("B", GateType::Input, &[]),
            decl("G", GateType::Nand, &["A", "B"]),
        ];
        let outputs = BTreeSet::from([n("G")]);
        let circ = Circuit::build(decls, outputs).unwrap();
        assert_eq!(circ.gate(&n("A")).unwrap().fanout, vec![n("G")]);
        assert!(circ.is_primary_output(&n("G")));
        assert_eq!(circ.inputs(), &[n("A"), n("B")]);
    }

    #[test]
    fn rejects_cycles() {
        let decls = vec![
            decl("A", GateType::Buff, &["B"]),
            decl("B", GateType::Buff, &["A"]),
        ];
        let err = Circuit::build(decls, BTreeSet::new()).unwrap_err();
        assert_eq!(err, CoreError::Cycle);
    }

    #[test]
    fn rejects_dangling_fanin() {
        let decls = vec![decl("G", GateType::Not, &["A"])];
        let err = Circuit::build(decls, BTreeSet::new()).unwrap_err();
        assert_eq!(err, CoreError::UnknownGate("A".to_string()));
    }

    #[test]
    fn rejects_duplicate_names() {
        let decls = vec![
            decl("A", GateType::Input, &[]),
            decl("A", GateType::Input, &[]),
        ];
        let err = Circuit::build(decls, BTreeSet::new()).unwrap_err();
        assert_eq!(err, CoreError::DuplicateGate("A".to_string()));
    }

    #[test]
    fn branch_fanout_marks_a_stem() {
        let decls = vec![
            decl("S", GateType::Input, &[]),
            decl("X", GateType::Input, &[]),
            decl("Y", GateType::Input, &[]),
            decl("U", GateType::And, &["S", "X"]),
            decl("V", GateType::Or, &["S", "Y"]),
        ];
        let circ = Circuit::build(decls, BTreeSet::new()).unwrap();
        assert!(circ.gate(&n("S")).unwrap().is_stem());
        assert!(!circ.gate(&n("X")).unwrap().is_stem());
    }
}
