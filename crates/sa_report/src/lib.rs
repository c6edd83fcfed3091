//! sa_report — the report writers. Pure functions from already-computed
//! collapser/implication state to `String`; nothing here touches a
//! filesystem `File` (that's left to the CLI layer).
//!
//! `.order`/`.not_dominating*` use 1-based `"{num+1:>5}: {fault}"` lines and
//! `.analysis` carries a fixed trailer sentence; frontier sections use a
//! header line, one gate name per line, and a `$` terminator followed by a
//! blank line. The `.fclass` bracketed form and the `Display` state dump have
//! no surviving reference format to match; both are this crate's own
//! rendering choice, recorded in DESIGN.md.

#![forbid(unsafe_code)]

use sa_core::{Circuit, FaultClass, GateName, Value};

/// Render the `.fclass` report: one header comment line naming the source
/// circuit file, then every root class's subtree, blank-line separated.
/// Each class is one line of bracketed, comma-separated equivalent faults;
/// dominated children are indented two spaces deeper than their parent.
pub fn render_fclass(circuit_file: &str, roots: &[FaultClass]) -> String {
    let mut out = format!("# Fault class tree for {circuit_file}\n");
    for fc in roots {
        write_fault_class(fc, 0, &mut out);
        out.push('\n');
    }
    out
}

fn write_fault_class(fc: &FaultClass, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push(' ');
    }
    out.push('[');
    for (i, f) in fc.equivalent.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&f.to_string());
    }
    out.push_str("]\n");
    for child in &fc.dominated {
        write_fault_class(child, indent + 2, out);
    }
}

/// Render a `"{num:>5}: {fault}"` listing (shared shape of `.order`,
/// `.not_dominating`, `.not_dominating_checkpoint`): one line per class,
/// 1-based index, showing the class's representative fault.
pub fn render_numbered(classes: &[&FaultClass]) -> String {
    let mut out = String::new();
    for (i, fc) in classes.iter().enumerate() {
        out.push_str(&format!("{:>5}: {}\n", i + 1, fc.representative()));
    }
    out
}

/// Render the `.analysis` report: faults present in the plain
/// `not_dominating` listing but absent (by representative fault) from the
/// checkpoint listing, plus the explanatory trailer sentence.
pub fn render_analysis(not_dominating: &[&FaultClass], checkpoint: &[&FaultClass]) -> String {
    let mut out = String::from("normal version has these more faults than checkpoint versions:\n");
    for fc in not_dominating {
        let rep = fc.representative();
        let in_checkpoint = checkpoint.iter().any(|c| c.representative() == rep);
        if !in_checkpoint {
            out.push_str(&format!("{rep}\n"));
        }
    }
    out.push_str(
        "These faults are in the normal version but not in the checkpoint version because they \
         are not on primary inputs and branches. Checkpoint faults are those on primary inputs \
         and branches.\n",
    );
    out
}

/// Render one frontier section (`J-Frontier`, `D-Frontier`, `X-PATH`): the
/// header, one gate name per line, a `$` terminator, then a blank line.
pub fn render_frontier_section(header: &str, gates: &[GateName]) -> String {
    let mut out = String::new();
    out.push_str(header);
    out.push('\n');
    for g in gates {
        out.push_str(g.as_str());
        out.push('\n');
    }
    out.push_str("$\n\n");
    out
}

/// Render a full circuit-state dump for the `Display` command: every gate's
/// current value, one `name = value` line per gate in declaration order,
/// terminated the same way as the frontier sections so `.result` stays a
/// uniform sequence of `$`-closed blocks.
pub fn render_state_dump(circuit: &Circuit) -> String {
    let mut out = String::from("STATE\n");
    for name in circuit.gate_names() {
        let gate = circuit.gate(name).expect("gate_names only yields keys present in the map");
        out.push_str(&format!("{name} = {}\n", gate.value));
    }
    out.push_str("$\n\n");
    out
}

/// Count of gates whose value is still `X`; used nowhere by the CLI output
/// contract but handy for a one-line progress log in C11.
pub fn undetermined_count(circuit: &Circuit) -> usize {
    circuit.gates().filter(|g| g.value == Value::X).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sa_core::{Fault, Polarity};

    fn n(s: &str) -> GateName {
        GateName::new(s).unwrap()
    }

    #[test]
    fn fclass_nests_dominated_children() {
        let mut root = FaultClass::new(Fault::on_stem(n("G"), Polarity::Zero));
        root.add_dominated(FaultClass::new(Fault::on_stem(n("A"), Polarity::One)));
        let rendered = render_fclass("x.bench", &[root]);
        assert!(rendered.starts_with("# Fault class tree for x.bench\n"));
        assert!(rendered.contains("[G/0]\n"));
        assert!(rendered.contains("  [A/1]\n"));
    }

    #[test]
    fn numbered_listing_is_one_based() {
        let a = FaultClass::new(Fault::on_stem(n("A"), Polarity::Zero));
        let b = FaultClass::new(Fault::on_stem(n("B"), Polarity::One));
        let rendered = render_numbered(&[&a, &b]);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "    1: A/0");
        assert_eq!(lines[1], "    2: B/1");
    }

    #[test]
    fn analysis_reports_the_set_difference() {
        let a = FaultClass::new(Fault::on_stem(n("A"), Polarity::Zero));
        let b = FaultClass::new(Fault::on_stem(n("B"), Polarity::One));
        let rendered = render_analysis(&[&a, &b], &[&b]);
        assert!(rendered.contains("A/0"));
        assert!(!rendered.contains("B/1\n"));
        assert!(rendered.contains("not on primary inputs and branches"));
    }

    #[test]
    fn frontier_section_is_dollar_terminated() {
        let rendered = render_frontier_section("J-Frontier", &[n("G"), n("H")]);
        assert_eq!(rendered, "J-Frontier\nG\nH\n$\n\n");
    }

    #[test]
    fn empty_frontier_section_still_has_header_and_terminator() {
        let rendered = render_frontier_section("D-Frontier", &[]);
        assert_eq!(rendered, "D-Frontier\n$\n\n");
    }
}
