//! Fault collapser: reverse traversal from primary outputs building a
//! forest of fault-equivalence/dominance classes, plus the derived
//! `.order`/`.not_dominating`/`.not_dominating_checkpoint` listings.

use sa_core::{Circuit, Fault, FaultClass, GateName, GateType, Polarity};
use std::collections::BTreeSet;

enum Relation {
    Equivalent,
    Dominated,
}

/// Table for a given gate type and output-fault polarity: the
/// induced fan-in polarity and whether that fan-in fault is equivalent to
/// (folds into the same class as) or dominated by (becomes a child class
/// of) the output fault. XOR/XNOR are handled separately by the caller —
/// every fan-in fault there is promoted to a fresh top-level class instead.
fn fanin_rule(gate_type: GateType, out_polarity: Polarity) -> (Polarity, Relation) {
    use Polarity::{One, Zero};
    use Relation::{Dominated, Equivalent};
    match (gate_type, out_polarity) {
        (GateType::And, Zero) => (Zero, Equivalent),
        (GateType::And, One) => (One, Dominated),
        (GateType::Nand, Zero) => (One, Dominated),
        (GateType::Nand, One) => (Zero, Equivalent),
        (GateType::Or, Zero) => (Zero, Dominated),
        (GateType::Or, One) => (One, Equivalent),
        (GateType::Nor, Zero) => (One, Equivalent),
        (GateType::Nor, One) => (Zero, Dominated),
        (GateType::Not, Zero) => (One, Equivalent),
        (GateType::Not, One) => (Zero, Equivalent),
        (GateType::Buff, Zero) => (Zero, Equivalent),
        (GateType::Buff, One) => (One, Equivalent),
        (GateType::Xor | GateType::Xnor, _) => {
            unreachable!("XOR/XNOR fan-in faults are promoted to top-level, not looked up here")
        }
        (GateType::Input, _) => unreachable!("INPUT gates have no fan-in to collapse into"),
    }
}

/// The candidate fault on the line from `driver` into `reader`: a branch
/// fault if `driver` fans out to more than one reader (a stem), a stem
/// fault otherwise.
fn fault_on_line(circuit: &Circuit, driver: &GateName, reader: &GateName, polarity: Polarity) -> Fault {
    let driver_gate = circuit.gate(driver).expect("fan-in name resolves to a real gate");
    if driver_gate.is_stem() {
        Fault::on_branch(driver.clone(), reader.clone(), polarity)
    } else {
        Fault::on_stem(driver.clone(), polarity)
    }
}

/// Recursively collapse `fault`, owned by `owner`, promoting XOR/XNOR
/// fan-in faults into `top`. Returns the gate names that must be re-enqueued
/// in the outer work set.
pub fn collapse_fault(fault: &Fault, owner: &mut FaultClass, top: &mut Vec<FaultClass>, circuit: &Circuit) -> Vec<GateName> {
    if fault.is_branch() {
        return vec![fault.stem.clone()];
    }
    let gate = circuit.gate(&fault.stem).expect("fault location must be a real gate");
    if gate.is_primary_input() {
        return Vec::new();
    }

    let mut enqueue = Vec::new();

    if matches!(gate.gate_type, GateType::Xor | GateType::Xnor) {
        // The SA0 root and SA1 root for this gate both call in here, but a
        // branch fan-in's two top-level classes must be created exactly
        // once — so only the SA0 call creates them (the SA1 call is a
        // deliberate no-op on that front, matching the asymmetry in the
        // original `collapse_fault`'s XOR/XNOR handling). A non-branch
        // fan-in (single fan-out) gets no top-level class here at all: its
        // own SA0/SA1 roots are created when it is popped from the outer
        // work set in its own right.
        for fanin in &gate.fanin {
            let fanin_gate = circuit.gate(fanin).expect("fan-in name resolves to a real gate");
            if fanin_gate.is_stem() && fault.polarity == Polarity::Zero {
                let sa0 = fault_on_line(circuit, fanin, &fault.stem, Polarity::Zero);
                let sa1 = fault_on_line(circuit, fanin, &fault.stem, Polarity::One);
                top.push(FaultClass::new(sa0));
                top.push(FaultClass::new(sa1));
            }
            enqueue.push(fanin.clone());
        }
        return enqueue;
    }

    for fanin in &gate.fanin {
        let (induced, relation) = fanin_rule(gate.gate_type, fault.polarity);
        let fanin_fault = fault_on_line(circuit, fanin, &fault.stem, induced);
        match relation {
            Relation::Equivalent => {
                owner.add_equivalent(fanin_fault.clone());
                enqueue.extend(collapse_fault(&fanin_fault, owner, top, circuit));
            }
            Relation::Dominated => {
                let mut child = FaultClass::new(fanin_fault.clone());
                enqueue.extend(collapse_fault(&fanin_fault, &mut child, top, circuit));
                owner.add_dominated(child);
            }
        }
    }
    enqueue
}

/// Run the collapser over every primary output, producing the top-level
/// forest. Resets every gate's visited-flag first; the flag is the
/// collapser's alone.
pub fn collapse_circuit(circuit: &mut Circuit) -> Vec<FaultClass> {
    circuit.reset_visited();
    let mut work: BTreeSet<GateName> = circuit.outputs().iter().cloned().collect();
    let mut top = Vec::new();

    while let Some(gate_name) = work.pop_first() {
        if circuit.is_visited(&gate_name) {
            continue;
        }
        for polarity in [Polarity::Zero, Polarity::One] {
            let root_fault = Fault::on_stem(gate_name.clone(), polarity);
            let mut root = FaultClass::new(root_fault.clone());
            let more = collapse_fault(&root_fault, &mut root, &mut top, circuit);
            top.push(root);
            work.extend(more);
        }
        circuit.mark_visited(&gate_name);
    }
    top
}

/// Pre-order walk: the class itself, then each dominated child in turn.
/// Leaves and internal nodes are both emitted.
pub fn order<'a>(roots: &'a [FaultClass], out: &mut Vec<&'a FaultClass>) {
    for fc in roots {
        out.push(fc);
        order(&fc.dominated, out);
    }
}

/// Classes with an empty `dominated` list.
pub fn not_dominating<'a>(roots: &'a [FaultClass], out: &mut Vec<&'a FaultClass>) {
    for fc in roots {
        if fc.is_leaf() {
            out.push(fc);
        } else {
            not_dominating(&fc.dominated, out);
        }
    }
}

/// Like [`not_dominating`], but only classes whose representative is a
/// branch fault or whose stem is a primary input qualify; a leaf that is
/// neither is simply dropped (matches the original traversal exactly: a
/// non-qualifying leaf is not recursed into either, since it has no
/// children — it just disappears from this listing).
pub fn not_dominating_checkpoint<'a>(circuit: &Circuit, roots: &'a [FaultClass], out: &mut Vec<&'a FaultClass>) {
    for fc in roots {
        let flt = fc.representative();
        let is_checkpoint = flt.is_branch()
            || circuit.gate(&flt.stem).map(|g| g.is_primary_input()).unwrap_or(false);
        if fc.is_leaf() {
            if is_checkpoint {
                out.push(fc);
            }
        } else {
            not_dominating_checkpoint(circuit, &fc.dominated, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_core::circuit::GateDecl;
    use std::collections::BTreeSet as Set;

    fn n(s: &str) -> GateName {
        GateName::new(s).unwrap()
    }

    fn decl(name: &str, t: GateType, fanin: &[&str]) -> GateDecl {
        GateDecl { name: n(name), gate_type: t, fanin: fanin.iter().map(|s| n(s)).collect() }
    }

    /// Single NAND, SA0 on output.
    #[test]
    fn single_nand_sa0_dominates_both_inputs_sa1() {
        let decls = vec![
            decl("A", GateType::Input, &[]),
            decl("B", GateType::Input, &[]),
            decl("G", GateType::Nand, &["A", "B"]),
        ];
        let mut circ = Circuit::build(decls, Set::from([n("G")])).unwrap();
        let forest = collapse_circuit(&mut circ);

        let sa0_root = forest
            .iter()
            .find(|fc| fc.representative() == &Fault::on_stem(n("G"), Polarity::Zero))
            .unwrap();
        assert_eq!(sa0_root.equivalent, vec![Fault::on_stem(n("G"), Polarity::Zero)]);
        let dominated_faults: Vec<_> = sa0_root.dominated.iter().map(|c| c.representative().clone()).collect();
        assert_eq!(dominated_faults.len(), 2);
        assert!(dominated_faults.contains(&Fault::on_stem(n("A"), Polarity::One)));
        assert!(dominated_faults.contains(&Fault::on_stem(n("B"), Polarity::One)));

        let sa1_root = forest
            .iter()
            .find(|fc| fc.representative() == &Fault::on_stem(n("G"), Polarity::One))
            .unwrap();
        assert_eq!(sa1_root.equivalent.len(), 3);
        assert!(sa1_root.equivalent.contains(&Fault::on_stem(n("G"), Polarity::One)));
        assert!(sa1_root.equivalent.contains(&Fault::on_stem(n("A"), Polarity::Zero)));
        assert!(sa1_root.equivalent.contains(&Fault::on_stem(n("B"), Polarity::Zero)));

        let mut ordered = Vec::new();
        order(&forest, &mut ordered);
        assert_eq!(ordered.len(), 5);
    }

    /// End-to-end scenario 2: a stem with two branches.
    #[test]
    fn branch_fault_reaches_the_stem() {
        let decls = vec![
            decl("S", GateType::Input, &[]),
            decl("X", GateType::Input, &[]),
            decl("Y", GateType::Input, &[]),
            decl("U", GateType::And, &["S", "X"]),
            decl("V", GateType::Or, &["S", "Y"]),
        ];
        let mut circ = Circuit::build(decls, Set::from([n("U"), n("V")])).unwrap();
        let forest = collapse_circuit(&mut circ);

        // S is a stem, so faults reaching it via U or V are on the branch,
        // and S itself gets its own SA0/SA1 roots from the outer work set.
        assert!(forest.iter().any(|fc| fc.representative() == &Fault::on_stem(n("S"), Polarity::Zero)));
        assert!(forest.iter().any(|fc| fc.representative() == &Fault::on_stem(n("S"), Polarity::One)));
    }

    #[test]
    fn checkpoint_listing_is_subset_of_not_dominating() {
        let decls = vec![
            decl("A", GateType::Input, &[]),
            decl("B", GateType::Input, &[]),
            decl("G", GateType::Nand, &["A", "B"]),
        ];
        let mut circ = Circuit::build(decls, Set::from([n("G")])).unwrap();
        let forest = collapse_circuit(&mut circ);

        let mut nd = Vec::new();
        not_dominating(&forest, &mut nd);
        let mut cp = Vec::new();
        not_dominating_checkpoint(&circ, &forest, &mut cp);

        for c in &cp {
            assert!(nd.iter().any(|fc| fc.representative() == c.representative()));
        }
    }

    #[test]
    fn xor_faults_become_fresh_top_level_classes() {
        let decls = vec![
            decl("A", GateType::Input, &[]),
            decl("B", GateType::Input, &[]),
            decl("G", GateType::Xor, &["A", "B"]),
        ];
        let mut circ = Circuit::build(decls, Set::from([n("G")])).unwrap();
        let forest = collapse_circuit(&mut circ);
        // A and B each get independent SA0/SA1 roots, not folded into G's classes.
        for g in ["A", "B"] {
            assert!(forest.iter().any(|fc| fc.representative() == &Fault::on_stem(n(g), Polarity::Zero)));
            assert!(forest.iter().any(|fc| fc.representative() == &Fault::on_stem(n(g), Polarity::One)));
        }
    }

    /// A stem feeding two XOR gates must still only get one branch-fault
    /// pair per edge: the SA0 and SA1 roots of each XOR reader both call
    /// into `collapse_fault` for the shared fan-in, but only the SA0 call
    /// may push a top-level class for it.
    #[test]
    fn stem_shared_by_two_xor_readers_is_not_promoted_twice() {
        let decls = vec![
            decl("S", GateType::Input, &[]),
            decl("X", GateType::Input, &[]),
            decl("Y", GateType::Input, &[]),
            decl("G1", GateType::Xor, &["S", "X"]),
            decl("G2", GateType::Xor, &["S", "Y"]),
        ];
        let mut circ = Circuit::build(decls, Set::from([n("G1"), n("G2")])).unwrap();
        let forest = collapse_circuit(&mut circ);

        let mut ordered = Vec::new();
        order(&forest, &mut ordered);
        let count = |target: &Fault| ordered.iter().filter(|fc| fc.representative() == target).count();

        for reader in ["G1", "G2"] {
            assert_eq!(count(&Fault::on_branch(n("S"), n(reader), Polarity::Zero)), 1);
            assert_eq!(count(&Fault::on_branch(n("S"), n(reader), Polarity::One)), 1);
        }
        // S itself still gets its own independent stem roots from the outer work set.
        assert_eq!(count(&Fault::on_stem(n("S"), Polarity::Zero)), 1);
        assert_eq!(count(&Fault::on_stem(n("S"), Polarity::One)), 1);
    }
}

/// Random small acyclic netlist generation for the property tests below:
/// shared by this crate's proptest module. Each internal gate's fan-in
/// indices are reduced modulo the count of gates declared so far, which is
/// what keeps every generated netlist acyclic by construction.
#[cfg(test)]
mod random_netlist {
    use sa_core::circuit::GateDecl;
    use sa_core::{Circuit, GateName, GateType};
    use std::collections::BTreeSet;

    const INTERNAL_TYPES: [GateType; 8] = [
        GateType::Buff,
        GateType::Not,
        GateType::And,
        GateType::Nand,
        GateType::Or,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
    ];

    /// `specs[i] = (type_index mod 8, raw_fanin_indices)`. Every gate name is
    /// its declaration position (`"g0"`, `"g1"`, ...); the last gate declared
    /// is always a primary output so the collapser's work set is never empty.
    /// Every internal gate's *first* fan-in is forced to be the immediately
    /// preceding gate, so the whole netlist is one connected chain with no
    /// dead (backward-unreachable) gates — the fault-count invariant below
    /// assumes every declared line is actually visited by the collapser.
    pub fn build(n_inputs: usize, specs: &[(u8, Vec<usize>)]) -> Circuit {
        let mut decls = Vec::new();
        for i in 0..n_inputs {
            decls.push(GateDecl { name: GateName::new(format!("g{i}")).unwrap(), gate_type: GateType::Input, fanin: Vec::new() });
        }
        for (offset, (type_idx, raw_fanins)) in specs.iter().enumerate() {
            let idx = n_inputs + offset;
            let gate_type = INTERNAL_TYPES[(*type_idx as usize) % INTERNAL_TYPES.len()];
            let arity = if gate_type.max_fanin() == Some(1) { 1 } else { 2 };
            let prev = idx - 1;
            let fanin: Vec<GateName> = (0..arity)
                .map(|k| {
                    let bounded = if k == 0 {
                        prev
                    } else {
                        let raw = raw_fanins.get(k % raw_fanins.len().max(1)).copied().unwrap_or(0);
                        raw % idx
                    };
                    GateName::new(format!("g{bounded}")).unwrap()
                })
                .collect();
            decls.push(GateDecl { name: GateName::new(format!("g{idx}")).unwrap(), gate_type, fanin });
        }
        let last = n_inputs + specs.len() - 1;
        let outputs = BTreeSet::from([GateName::new(format!("g{last}")).unwrap()]);
        Circuit::build(decls, outputs).expect("generator only ever produces acyclic, well-formed netlists")
    }
}
