//! J-frontier / D-frontier / X-path analysis. Pure, read-only queries
//! over a circuit's current value assignment — none of these mutate state.

use sa_core::{evaluate_gate, Circuit, GateName, GateType, Value};
use std::collections::BTreeSet;

/// Gates with a definite output that their current fan-in values don't yet
/// justify: not an `INPUT`, value is definite, but evaluating the gate's
/// equation over its fan-ins still yields `X`.
pub fn j_frontier(circuit: &Circuit) -> Vec<GateName> {
    circuit
        .gates()
        .filter(|g| !g.is_primary_input())
        .filter(|g| g.value.is_definite())
        .filter(|g| {
            let fanin_values: Vec<Value> = g.fanin.iter().map(|f| circuit.gate(f).unwrap().value).collect();
            evaluate_gate(g.gate_type, &fanin_values) == Value::X
        })
        .map(|g| g.name.clone())
        .collect()
}

/// Gates with an `X` output but at least one fan-in carrying `D`/`D̄`: where
/// the fault's effect could still propagate forward.
pub fn d_frontier(circuit: &Circuit) -> Vec<GateName> {
    circuit
        .gates()
        .filter(|g| g.value == Value::X)
        .filter(|g| g.fanin.iter().any(|f| matches!(circuit.gate(f).unwrap().value, Value::D | Value::DBar)))
        .map(|g| g.name.clone())
        .collect()
}

/// Whether `gate_name` still permits the fault effect through it, arriving
/// via the edge from `from`: some *other* fan-in of `gate_name` (not the one
/// the path just came in on) is still `X`, or `gate_name` is a `NOT` (which
/// always passes D/D̄ through by inversion regardless of its other fan-ins,
/// since it has only the one). Excluding the entry edge matters: the gate the
/// path is leaving is itself still `X` at this point (it's the D-frontier
/// gate or another gate already queued on the walk), so counting it would
/// make every immediate fan-out trivially "permit" the path.
fn permits_x_path(circuit: &Circuit, from: &GateName, gate_name: &GateName) -> bool {
    let gate = circuit.gate(gate_name).expect("fanout name resolves in the circuit");
    gate.gate_type == GateType::Not
        || gate.fanin.iter().any(|f| f != from && circuit.gate(f).unwrap().value == Value::X)
}

/// Whether `start` reaches a primary output through a chain of gates that
/// each still permit the fault effect to pass.
fn has_x_path_to_output(circuit: &Circuit, start: &GateName) -> bool {
    if circuit.is_primary_output(start) {
        return true;
    }
    let mut stack = vec![start.clone()];
    let mut seen = BTreeSet::new();
    while let Some(cur) = stack.pop() {
        if !seen.insert(cur.clone()) {
            continue;
        }
        let gate = circuit.gate(&cur).expect("frontier gate name resolves in the circuit");
        for fo in &gate.fanout {
            if circuit.is_primary_output(fo) {
                return true;
            }
            if permits_x_path(circuit, &cur, fo) {
                stack.push(fo.clone());
            }
        }
    }
    false
}

/// Every D-frontier gate that still has a path to a primary output — all
/// of them, not just the first found.
pub fn x_path(circuit: &Circuit) -> Vec<GateName> {
    d_frontier(circuit).into_iter().filter(|g| has_x_path_to_output(circuit, g)).collect()
}
