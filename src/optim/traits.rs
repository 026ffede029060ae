//! Capabilities required from a network by the rewriting engine

use std::fmt;
use std::ops::Not;

use crate::{Network, Signal};

/// Operations on an And-Inverter Graph used by the rewriting rules
///
/// A node is a gate, a primary input or a constant. A signal is a node together with
/// a polarity; the `!` operator complements it.
pub trait AigNetwork {
    /// Identifier of a node
    type Node: Copy + Eq + fmt::Debug + fmt::Display;
    /// Possibly complemented reference to a node's output
    type Signal: Copy + Eq + fmt::Debug + fmt::Display + Not<Output = Self::Signal>;

    /// Apply `f` to every live gate, in a fixed order
    fn foreach_gate(&self, f: impl FnMut(Self::Node));

    /// Apply `f` to each fanin of a node, in fanin order
    fn foreach_fanin(&self, n: Self::Node, f: impl FnMut(Self::Signal));

    /// Number of fanins: 2 for a gate, 0 for inputs and constants
    fn fanin_size(&self, n: Self::Node) -> usize;

    /// Node driving a signal
    fn get_node(&self, s: Self::Signal) -> Self::Node;

    /// Polarity of a signal
    fn is_complemented(&self, s: Self::Signal) -> bool;

    /// Create a 2-input And, or return an equivalent existing signal
    fn create_and(&mut self, a: Self::Signal, b: Self::Signal) -> Self::Signal;

    /// Replace every use of a node by a signal
    fn substitute_node(&mut self, n: Self::Node, s: Self::Signal);

    /// A live gate that is not a 2-input And, if any
    fn find_non_and_gate(&self) -> Option<Self::Node>;
}

/// Level and critical path information on top of [`AigNetwork`]
pub trait DepthNetwork: AigNetwork {
    /// Logic depth of a node; primary inputs are at level 0 unless configured otherwise
    fn level(&self, n: Self::Node) -> u32;

    /// Maximum level of the outputs
    fn depth(&self) -> u32;

    /// Whether the node lies on a longest input-to-output path
    fn is_on_critical_path(&self, n: Self::Node) -> bool;

    /// Recompute levels and critical paths after the network changed
    fn update_levels(&mut self);
}

impl AigNetwork for Network {
    type Node = Signal;
    type Signal = Signal;

    fn foreach_gate(&self, mut f: impl FnMut(Signal)) {
        for i in self.gates() {
            f(self.node(i));
        }
    }

    fn foreach_fanin(&self, n: Signal, mut f: impl FnMut(Signal)) {
        if n.is_var() {
            for s in self.gate(n.var() as usize).dependencies() {
                f(*s);
            }
        }
    }

    fn fanin_size(&self, n: Signal) -> usize {
        if n.is_var() {
            self.gate(n.var() as usize).dependencies().len()
        } else {
            0
        }
    }

    fn get_node(&self, s: Signal) -> Signal {
        s.without_inversion()
    }

    fn is_complemented(&self, s: Signal) -> bool {
        s.is_inverted()
    }

    fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        self.and(a, b)
    }

    fn substitute_node(&mut self, n: Signal, s: Signal) {
        assert!(n.is_var(), "Only gates can be substituted, got {n}");
        Network::substitute_node(self, n.var() as usize, s);
    }

    fn find_non_and_gate(&self) -> Option<Signal> {
        self.first_non_and().map(|i| self.node(i))
    }
}
