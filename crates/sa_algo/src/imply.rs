//! Implication engine: Roth's five-step contract — combine with the
//! active fault list, assign, backward-justify, optionally unique-D-drive,
//! then forward-propagate. Returns `false` on the first conflict, exactly as
//! spec'd; callers abort the whole command stream on that signal.

use sa_core::{evaluate_gate, Circuit, Fault, GateName, GateType, Polarity, Value};

/// Which half of the implication to run. `Fault`/`Imply` commands always use
/// `Both`; `Both` is also what the engine re-enters itself with for most
/// recursive forced assignments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Both,
    Forward,
    Backward,
}

/// Step 1: fold in an active stuck-at fault at `location`, if any.
/// `Err(())` signals an immediate conflict (opposing D value asserted
/// against an already-faulted line).
fn combine_with_active_fault(active: Option<Polarity>, incoming: Value) -> Result<Value, ()> {
    match active {
        None => Ok(incoming),
        Some(Polarity::Zero) => match incoming {
            Value::One => Ok(Value::D),
            Value::Zero => Ok(Value::Zero),
            Value::D => Ok(Value::D),
            Value::DBar => Err(()),
            Value::X => Ok(Value::X),
        },
        Some(Polarity::One) => match incoming {
            Value::Zero => Ok(Value::DBar),
            Value::One => Ok(Value::One),
            Value::DBar => Ok(Value::DBar),
            Value::D => Err(()),
            Value::X => Ok(Value::X),
        },
    }
}

/// Entry point. Recursive; every forced consequence re-enters this function.
pub fn imply_and_check(
    circuit: &mut Circuit,
    active_faults: &[Fault],
    location: &GateName,
    value: Value,
    unique_d_drive: bool,
    direction: Direction,
) -> bool {
    let active = active_faults.iter().find(|f| &f.stem == location).map(|f| f.polarity);
    let effective = match combine_with_active_fault(active, value) {
        Ok(v) => v,
        Err(()) => return false,
    };

    let current = circuit.gate(location).expect("imply target must name a real gate").value;
    match current {
        Value::X => circuit.gate_mut(location).unwrap().value = effective,
        v if v == effective => {}
        _ => return false,
    }

    let gate_type = circuit.gate(location).unwrap().gate_type;

    if direction != Direction::Forward && !gate_type.is_input() {
        if !backward_justify(circuit, active_faults, location, gate_type, unique_d_drive) {
            return false;
        }
    }

    if unique_d_drive && direction != Direction::Backward {
        if !apply_unique_d_drive(circuit, active_faults, location, unique_d_drive) {
            return false;
        }
    }

    if direction != Direction::Backward && !forward_propagate(circuit, active_faults, location, unique_d_drive) {
        return false;
    }

    true
}

/// Step 3. Returns `false` on conflict (from a forced recursive implication,
/// or from the "all fan-ins known" consistency check).
fn backward_justify(
    circuit: &mut Circuit,
    active_faults: &[Fault],
    location: &GateName,
    gate_type: GateType,
    unique_d_drive: bool,
) -> bool {
    let gate = circuit.gate(location).unwrap();
    let fanins = gate.fanin.clone();
    let output_value = gate.value;
    let fanin_values: Vec<Value> = fanins.iter().map(|f| circuit.gate(f).unwrap().value).collect();

    let x_positions: Vec<usize> = fanin_values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == Value::X)
        .map(|(i, _)| i)
        .collect();
    let has_d = fanin_values.iter().any(|v| *v == Value::D);
    let has_dbar = fanin_values.iter().any(|v| *v == Value::DBar);

    let mut forced: Vec<(GateName, Value)> = Vec::new();

    match gate_type {
        GateType::And | GateType::Nand | GateType::Or | GateType::Nor => {
            let output_good = output_value.good_bit();
            let noncontrolling_output = matches!(
                (gate_type, output_good),
                (GateType::And, Some(true))
                    | (GateType::Nand, Some(false))
                    | (GateType::Or, Some(false))
                    | (GateType::Nor, Some(true))
            );
            if noncontrolling_output {
                let force_to = gate_type.non_controlling_value().expect("AND/NAND/OR/NOR has a non-controlling value");
                for &i in &x_positions {
                    forced.push((fanins[i].clone(), force_to));
                }
            } else if x_positions.len() == 1 && !(has_d && has_dbar) {
                let controlling_input = gate_type.controlling_value().expect("AND/NAND/OR/NOR has a controlling value");
                let lone_x = x_positions[0];
                let other_matches_controlling = fanin_values
                    .iter()
                    .enumerate()
                    .any(|(i, v)| i != lone_x && v.good_bit() == controlling_input.good_bit());
                if !other_matches_controlling {
                    forced.push((fanins[lone_x].clone(), controlling_input));
                }
            }
        }
        GateType::Buff => {
            if let [only] = x_positions.as_slice() {
                forced.push((fanins[*only].clone(), output_value));
            }
        }
        GateType::Not => {
            if let [only] = x_positions.as_slice() {
                forced.push((fanins[*only].clone(), output_value.invert()));
            }
        }
        GateType::Xor | GateType::Xnor => {
            if let [only] = x_positions.as_slice() {
                let only = *only;
                if !has_d && !has_dbar {
                    let known_parity = fanin_values
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != only)
                        .fold(false, |acc, (_, v)| acc ^ (*v == Value::One));
                    let output_bit = output_value.good_bit().expect("gate value is definite at this point");
                    let required_xor_parity = if gate_type == GateType::Xnor { !output_bit } else { output_bit };
                    let x_bit = known_parity ^ required_xor_parity;
                    forced.push((fanins[only].clone(), if x_bit { Value::One } else { Value::Zero }));
                }
            }
        }
        GateType::Input => unreachable!("backward justification is skipped for INPUT by the caller"),
    }

    if x_positions.is_empty() {
        let recomputed = evaluate_gate(gate_type, &fanin_values);
        let consistent = recomputed == output_value
            || (output_value == Value::D && recomputed == Value::One)
            || (output_value == Value::DBar && recomputed == Value::Zero);
        if !consistent {
            return false;
        }
    }

    for (fanin_name, forced_value) in forced {
        if !imply_and_check(circuit, active_faults, &fanin_name, forced_value, unique_d_drive, Direction::Backward) {
            return false;
        }
        let siblings: Vec<GateName> = circuit
            .gate(&fanin_name)
            .unwrap()
            .fanout
            .iter()
            .filter(|f| *f != location)
            .cloned()
            .collect();
        for sib in siblings {
            let sib_gate = circuit.gate(&sib).unwrap();
            if sib_gate.value.is_definite() {
                let v = sib_gate.value;
                if !imply_and_check(circuit, active_faults, &sib, v, unique_d_drive, Direction::Backward) {
                    return false;
                }
            } else {
                let sib_type = sib_gate.gate_type;
                let sib_fanin_values: Vec<Value> = sib_gate.fanin.iter().map(|f| circuit.gate(f).unwrap().value).collect();
                let computed = evaluate_gate(sib_type, &sib_fanin_values);
                if !imply_and_check(circuit, active_faults, &sib, computed, unique_d_drive, Direction::Both) {
                    return false;
                }
            }
        }
    }

    true
}

/// Step 4, run only when `-u`/`--unique-d-drive` is enabled.
fn apply_unique_d_drive(circuit: &mut Circuit, active_faults: &[Fault], location: &GateName, unique_d_drive: bool) -> bool {
    let frontier: Vec<GateName> = circuit
        .gates()
        .filter(|g| {
            g.value == Value::X
                && g.fanin
                    .iter()
                    .any(|f| matches!(circuit.gate(f).unwrap().value, Value::D | Value::DBar))
        })
        .map(|g| g.name.clone())
        .collect();

    if frontier.len() != 1 {
        return true;
    }
    let unique = &frontier[0];
    let gate = circuit.gate(unique).unwrap();
    if !gate.fanin.iter().any(|f| f == location) {
        return true;
    }
    let Some(force_to) = gate.gate_type.non_controlling_value() else { return true };
    let xs: Vec<GateName> = gate.fanin.iter().filter(|f| circuit.gate(f).unwrap().value == Value::X).cloned().collect();

    for x in xs {
        if !imply_and_check(circuit, active_faults, &x, force_to, unique_d_drive, Direction::Forward) {
            return false;
        }
    }
    true
}

/// Step 5.
fn forward_propagate(circuit: &mut Circuit, active_faults: &[Fault], location: &GateName, unique_d_drive: bool) -> bool {
    let fanouts = circuit.gate(location).unwrap().fanout.clone();
    for fo in fanouts {
        let fo_gate = circuit.gate(&fo).unwrap();
        let fo_type = fo_gate.gate_type;
        let fo_fanin_values: Vec<Value> = fo_gate.fanin.iter().map(|f| circuit.gate(f).unwrap().value).collect();
        let computed = evaluate_gate(fo_type, &fo_fanin_values);

        if computed.is_definite() {
            if !imply_and_check(circuit, active_faults, &fo, computed, unique_d_drive, Direction::Both) {
                return false;
            }
        } else {
            let current = circuit.gate(&fo).unwrap().value;
            if current.is_definite() && !imply_and_check(circuit, active_faults, &fo, current, unique_d_drive, Direction::Backward) {
                return false;
            }
        }
    }
    true
}
