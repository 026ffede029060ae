//! Local algebraic rules reducing the depth of the critical path
//!
//! Each rule looks at a gate on the critical path and at its fanins up to two or three
//! levels below. When the levels show that a deep signal could be moved closer to the
//! output, the gate is rebuilt with an equivalent, shallower structure.

use std::fmt;

use log::debug;

use crate::optim::resubstitute::{
    absorption_modify_network, distributivity_modify_network, exchange_f1_f2,
    three_layer_modify_network,
};
use crate::optim::{AigNetwork, DepthNetwork};

/// An algebraic rewriting rule
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rule {
    /// `(g0 & g1) & f1` becomes `g0 & (g1 & f1)` when `g0` is the deepest signal
    Associativity,
    /// `(x & a) & (x & b)` becomes `x & (a & b)`, and the dual form with complemented fanins
    Distributivity,
    /// Associativity through two layers of complemented And gates
    ThreeLayerDistributivity,
    /// `x & !(!x & y)` becomes `x`
    ///
    /// Not part of [`Rule::DEFAULT`].
    Absorption,
}

impl Rule {
    /// Rules tried on each gate by default, in priority order
    pub const DEFAULT: [Rule; 3] = [
        Rule::Associativity,
        Rule::Distributivity,
        Rule::ThreeLayerDistributivity,
    ];

    /// All available rules
    pub const ALL: [Rule; 4] = [
        Rule::Associativity,
        Rule::Distributivity,
        Rule::ThreeLayerDistributivity,
        Rule::Absorption,
    ];

    /// Short name, used in logs and statistics
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Associativity => "associativity",
            Rule::Distributivity => "distributivity",
            Rule::ThreeLayerDistributivity => "three-layer distributivity",
            Rule::Absorption => "absorption",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Rule::Associativity => 0,
            Rule::Distributivity => 1,
            Rule::ThreeLayerDistributivity => 2,
            Rule::Absorption => 3,
        }
    }

    /// Try the rule on a gate. Return true if the network was modified
    ///
    /// Levels must be up to date; they are stale when this returns true.
    pub fn try_apply<N: DepthNetwork>(&self, ntk: &mut N, n: N::Node) -> bool {
        match self {
            Rule::Associativity => try_associativity(ntk, n),
            Rule::Distributivity => try_distributivity(ntk, n),
            Rule::ThreeLayerDistributivity => try_three_layer_distributivity(ntk, n),
            Rule::Absorption => try_absorption(ntk, n),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The two fanins of a gate, in fanin order
fn fanins<N: AigNetwork>(ntk: &N, n: N::Node) -> Option<[N::Signal; 2]> {
    if ntk.fanin_size(n) != 2 {
        return None;
    }
    let mut ret = Vec::with_capacity(2);
    ntk.foreach_fanin(n, |s| ret.push(s));
    match ret[..] {
        [s0, s1] => Some([s0, s1]),
        _ => None,
    }
}

fn signal_level<N: DepthNetwork>(ntk: &N, s: N::Signal) -> u32 {
    ntk.level(ntk.get_node(s))
}

/// Put the deepest signal first; on a tie, the fanin order is kept
fn by_level<N: DepthNetwork>(ntk: &N, [s0, s1]: [N::Signal; 2]) -> [N::Signal; 2] {
    if signal_level(ntk, s1) > signal_level(ntk, s0) {
        [s1, s0]
    } else {
        [s0, s1]
    }
}

fn critical_fanins<N: DepthNetwork>(ntk: &N, n: N::Node) -> Option<[N::Signal; 2]> {
    if !ntk.is_on_critical_path(n) {
        return None;
    }
    fanins(ntk, n)
}

fn try_associativity<N: DepthNetwork>(ntk: &mut N, n: N::Node) -> bool {
    let Some(top) = critical_fanins(ntk, n) else {
        return false;
    };
    let [f0, f1] = by_level(ntk, top);
    if signal_level(ntk, f0) <= signal_level(ntk, f1) + 1 || ntk.is_complemented(f0) {
        return false;
    }

    let Some(children) = fanins(ntk, ntk.get_node(f0)) else {
        return false;
    };
    let [g0, g1] = by_level(ntk, children);
    if signal_level(ntk, g0) <= signal_level(ntk, g1) {
        return false;
    }

    debug!(
        "{} on {n}: critical {g0} at level {}, moving {g1} and {f1}",
        Rule::Associativity,
        signal_level(ntk, g0)
    );
    exchange_f1_f2(ntk, f1, g1, g0, n);
    true
}

fn try_distributivity<N: DepthNetwork>(ntk: &mut N, n: N::Node) -> bool {
    let Some([f0, f1]) = critical_fanins(ntk, n) else {
        return false;
    };
    let or_top = match (ntk.is_complemented(f0), ntk.is_complemented(f1)) {
        (false, false) => false,
        (true, true) => true,
        _ => return false,
    };
    let (Some(c0), Some(c1)) = (
        fanins(ntk, ntk.get_node(f0)),
        fanins(ntk, ntk.get_node(f1)),
    ) else {
        return false;
    };

    // First match wins
    for (i, j) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        if c0[i] == c1[j] && ntk.is_on_critical_path(ntk.get_node(c0[i])) {
            debug!(
                "{} on {n}: factoring {} out of {f0} and {f1}",
                Rule::Distributivity,
                c0[i]
            );
            distributivity_modify_network(ntk, n, c0[i], c0[1 - i], c1[1 - j], or_top);
            return true;
        }
    }
    false
}

fn try_three_layer_distributivity<N: DepthNetwork>(ntk: &mut N, n: N::Node) -> bool {
    let Some(top) = critical_fanins(ntk, n) else {
        return false;
    };
    let [f0, f1] = by_level(ntk, top);
    if signal_level(ntk, f0) <= signal_level(ntk, f1) + 2 || !ntk.is_complemented(f0) {
        return false;
    }

    let Some(children) = fanins(ntk, ntk.get_node(f0)) else {
        return false;
    };
    let [g0, g1] = by_level(ntk, children);
    if signal_level(ntk, g0) <= signal_level(ntk, g1) + 1 || !ntk.is_complemented(g0) {
        return false;
    }

    let Some(gchildren) = fanins(ntk, ntk.get_node(g0)) else {
        return false;
    };
    let [h0, h1] = by_level(ntk, gchildren);
    if signal_level(ntk, h0) <= signal_level(ntk, h1) + 1 {
        return false;
    }

    debug!(
        "{} on {n}: critical {h0} at level {}",
        Rule::ThreeLayerDistributivity,
        signal_level(ntk, h0)
    );
    three_layer_modify_network(ntk, n, h1, g1, f1, h0);
    true
}

fn try_absorption<N: DepthNetwork>(ntk: &mut N, n: N::Node) -> bool {
    let Some(top) = critical_fanins(ntk, n) else {
        return false;
    };
    let [f0, f1] = by_level(ntk, top);
    if signal_level(ntk, f0) <= signal_level(ntk, f1) || !ntk.is_complemented(f0) {
        return false;
    }

    let Some(children) = fanins(ntk, ntk.get_node(f0)) else {
        return false;
    };
    let f1_node = ntk.get_node(f1);
    if !children
        .iter()
        .any(|&c| ntk.get_node(c) == f1_node && c != f1)
    {
        return false;
    }

    debug!("{} on {n}: keeping {f1}", Rule::Absorption);
    absorption_modify_network(ntk, n, f1);
    true
}
