//! Write logic networks to DOT graph format

use std::io::{Result, Write};

use crate::network::BinaryType;
use crate::{Gate, Network, Signal};

/// Get a string representation of a gate type for DOT labels
fn gate_type_label(gate: &Gate) -> &'static str {
    match gate {
        Gate::Binary(_, BinaryType::And) => "And2",
        Gate::Binary(_, BinaryType::Xor) => "Xor2",
    }
}

/// Get the DOT node ID for a signal source
fn signal_source_id(s: &Signal) -> String {
    if s.is_constant() {
        if s.is_inverted() {
            "const_1".to_string()
        } else {
            "const_0".to_string()
        }
    } else if s.is_input() {
        format!("input_{}", s.input())
    } else {
        format!("node_{}", s.var())
    }
}

fn edge_style(s: &Signal) -> &'static str {
    if s.is_inverted() && !s.is_constant() {
        " [style=dashed]"
    } else {
        ""
    }
}

/// Write a network in DOT graph format
///
/// - Complemented edges are drawn with dashed lines
/// - Each gate shows its type
/// - Primary inputs use down triangle shape (▼)
/// - Primary outputs use up triangle shape (▲)
/// - Dead gates are not shown
pub fn write_dot<W: Write>(w: &mut W, aig: &Network) -> Result<()> {
    writeln!(w, "digraph network {{")?;
    writeln!(w, "    rankdir=TB;")?;
    writeln!(w, "    node [fontname=\"Helvetica\"];")?;
    writeln!(w, "    edge [fontname=\"Helvetica\"];")?;
    writeln!(w)?;

    // Write constant nodes if they are used
    let mut has_const_0 = false;
    let mut has_const_1 = false;
    let used = aig
        .gates()
        .flat_map(|i| aig.gate(i).dependencies().iter().copied())
        .chain((0..aig.nb_outputs()).map(|i| aig.output(i)));
    for s in used {
        if s.is_constant() {
            if s.is_inverted() {
                has_const_1 = true;
            } else {
                has_const_0 = true;
            }
        }
    }

    if has_const_0 || has_const_1 {
        writeln!(w, "    // Constant nodes")?;
        if has_const_0 {
            writeln!(w, "    const_0 [label=\"0\" shape=plaintext fontsize=14];")?;
        }
        if has_const_1 {
            writeln!(w, "    const_1 [label=\"1\" shape=plaintext fontsize=14];")?;
        }
        writeln!(w)?;
    }

    writeln!(w, "    // Primary inputs")?;
    writeln!(w, "    subgraph cluster_inputs {{")?;
    writeln!(w, "        rank=source;")?;
    writeln!(w, "        style=invis;")?;
    for i in 0..aig.nb_inputs() {
        writeln!(
            w,
            "        input_{i} [label=\"i{i}\" shape=invtriangle style=filled fillcolor=\"#90EE90\"];"
        )?;
    }
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    // Internal nodes")?;
    for i in aig.gates() {
        let label = gate_type_label(aig.gate(i));
        writeln!(w, "    node_{i} [label=\"x{i}\\n{label}\" shape=ellipse];")?;
    }
    writeln!(w)?;

    writeln!(w, "    // Primary outputs")?;
    writeln!(w, "    subgraph cluster_outputs {{")?;
    writeln!(w, "        rank=sink;")?;
    writeln!(w, "        style=invis;")?;
    for i in 0..aig.nb_outputs() {
        writeln!(
            w,
            "        output_{i} [label=\"o{i}\" shape=triangle style=filled fillcolor=\"#FFB6C1\"];"
        )?;
    }
    writeln!(w, "    }}")?;
    writeln!(w)?;

    writeln!(w, "    // Edges")?;
    for i in aig.gates() {
        for s in aig.gate(i).dependencies() {
            let src = signal_source_id(&s.without_inversion());
            writeln!(w, "    {} -> node_{}{};", src, i, edge_style(s))?;
        }
    }
    writeln!(w)?;

    writeln!(w, "    // Output edges")?;
    for i in 0..aig.nb_outputs() {
        let s = aig.output(i);
        let src = if s.is_constant() {
            signal_source_id(&s)
        } else {
            signal_source_id(&s.without_inversion())
        };
        writeln!(w, "    {} -> output_{}{};", src, i, edge_style(&s))?;
    }

    writeln!(w, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_dot_basic() {
        let mut aig = Network::default();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let x3 = aig.add_input();
        let x4 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(x3, x4);
        let f3 = aig.and(x1, x3);
        let f4 = aig.and(f1, f2);
        let f5 = aig.and(f3, f4);

        aig.add_output(f5);
        aig.add_output(!f5);
        aig.add_output(Signal::one());

        let mut buf = Vec::new();
        write_dot(&mut buf, &aig).unwrap();
        let dot = String::from_utf8(buf).unwrap();

        assert!(dot.contains("digraph network"));
        assert!(dot.contains("shape=invtriangle")); // inputs
        assert!(dot.contains("shape=triangle")); // outputs
        assert!(dot.contains("And2"));
        assert!(dot.contains("node_4 -> output_1 [style=dashed];"));
        assert!(dot.contains("const_1 -> output_2;"));
        assert!(!dot.contains("const_0"));
    }

    #[test]
    fn test_write_dot_skips_dead() {
        let mut aig = Network::default();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let x3 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(f1, !x3);
        aig.add_output(f2);
        aig.substitute_node(f2.var() as usize, f1);

        let mut buf = Vec::new();
        write_dot(&mut buf, &aig).unwrap();
        let dot = String::from_utf8(buf).unwrap();
        assert!(dot.contains("node_0 ["));
        assert!(!dot.contains("node_1"));
        assert!(dot.contains("node_0 -> output_0;"));
    }
}
