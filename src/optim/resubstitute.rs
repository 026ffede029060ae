//! Rewriting by substituting nodes with newly built signals
//!
//! These are the only places where the rewriting engine modifies the network.
//! Each one builds the replacement through structural hashing, then substitutes the
//! rewritten node everywhere it is used. Levels are stale afterwards.

use crate::optim::AigNetwork;

/// Rebalance `(critical & non_critical_child) & non_critical_fanin` into
/// `(non_critical_fanin & non_critical_child) & critical`
pub fn exchange_f1_f2<N: AigNetwork>(
    ntk: &mut N,
    non_critical_fanin: N::Signal,
    non_critical_child: N::Signal,
    critical_child: N::Signal,
    n: N::Node,
) {
    let new_fanin = ntk.create_and(non_critical_fanin, non_critical_child);
    let new_out = ntk.create_and(new_fanin, critical_child);
    ntk.substitute_node(n, new_out);
}

/// Factor a signal shared by both fanins of `n`
///
/// With `or_top` unset, `(common & s0) & (common & s1)` becomes `common & (s0 & s1)`.
/// With `or_top` set, `!(common & s0) & !(common & s1)` becomes `!(common & !(!s0 & !s1))`.
pub fn distributivity_modify_network<N: AigNetwork>(
    ntk: &mut N,
    n: N::Node,
    common: N::Signal,
    s0: N::Signal,
    s1: N::Signal,
    or_top: bool,
) {
    if !or_top {
        let new_fanin = ntk.create_and(s0, s1);
        let new_out = ntk.create_and(new_fanin, common);
        ntk.substitute_node(n, new_out);
    } else {
        let new_fanin = ntk.create_and(!s0, !s1);
        let new_out = ntk.create_and(!new_fanin, common);
        ntk.substitute_node(n, !new_out);
    }
}

/// Rebuild `f & !(g & !(h & h_critical))` as `(h_critical & (h & f)) | (!g & f)`
///
/// The critical signal ends up two levels below the new root.
pub fn three_layer_modify_network<N: AigNetwork>(
    ntk: &mut N,
    n: N::Node,
    non_critical_gchild: N::Signal,
    non_critical_child: N::Signal,
    non_critical_fanin: N::Signal,
    critical: N::Signal,
) {
    let out1 = ntk.create_and(non_critical_gchild, non_critical_fanin);
    let out2 = ntk.create_and(critical, out1);
    let out3 = ntk.create_and(!non_critical_child, non_critical_fanin);
    let out4 = ntk.create_and(!out2, !out3);
    ntk.substitute_node(n, !out4);
}

/// Replace `x & !(!x & y)` by `x`
pub fn absorption_modify_network<N: AigNetwork>(ntk: &mut N, n: N::Node, kept: N::Signal) {
    ntk.substitute_node(n, kept);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate_exhaustive;
    use crate::Network;

    #[test]
    fn test_exchange_f1_f2() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let d = aig.add_input();

        let f1 = aig.and(a, b);
        let f2 = aig.and(f1, c);
        let f3 = aig.and(f2, d);
        aig.add_output(f3);
        let expected = simulate_exhaustive(&aig);

        exchange_f1_f2(&mut aig, d, c, f1, f3);
        assert_eq!(simulate_exhaustive(&aig), expected);
        assert!(aig.is_dead(f3.var() as usize));
        aig.cleanup();
        assert_eq!(aig.nb_nodes(), 3);
    }

    #[test]
    fn test_distributivity_and() {
        let mut aig = Network::default();
        let x = aig.add_input();
        let a = aig.add_input();
        let b = aig.add_input();

        let f1 = aig.and(x, a);
        let f2 = aig.and(x, b);
        let n = aig.and(f1, f2);
        aig.add_output(n);
        let expected = simulate_exhaustive(&aig);

        distributivity_modify_network(&mut aig, n, x, a, b, false);
        assert_eq!(simulate_exhaustive(&aig), expected);
        aig.cleanup();
        assert_eq!(aig.nb_nodes(), 2);
    }

    #[test]
    fn test_distributivity_or() {
        let mut aig = Network::default();
        let x = aig.add_input();
        let a = aig.add_input();
        let b = aig.add_input();

        let f1 = aig.and(!x, a);
        let f2 = aig.and(b, !x);
        let n = aig.and(!f1, !f2);
        aig.add_output(n);
        aig.add_output(!n);
        let expected = simulate_exhaustive(&aig);

        distributivity_modify_network(&mut aig, n, !x, a, b, true);
        assert_eq!(simulate_exhaustive(&aig), expected);
    }

    #[test]
    fn test_three_layer() {
        let mut aig = Network::default();
        let h0 = aig.add_input();
        let h1 = aig.add_input();
        let g1 = aig.add_input();
        let f1 = aig.add_input();

        let g0 = aig.and(h0, h1);
        let f0 = aig.and(!g0, g1);
        let n = aig.and(!f0, f1);
        aig.add_output(n);
        let expected = simulate_exhaustive(&aig);

        three_layer_modify_network(&mut aig, n, h1, g1, f1, h0);
        assert_eq!(simulate_exhaustive(&aig), expected);
    }

    #[test]
    fn test_absorption() {
        let mut aig = Network::default();
        let x = aig.add_input();
        let y = aig.add_input();
        let z = aig.add_input();

        let xz = aig.and(x, z);
        let f0 = aig.and(xz, y);
        let n = aig.and(!f0, !xz);
        aig.add_output(n);
        let expected = simulate_exhaustive(&aig);

        absorption_modify_network(&mut aig, n, !xz);
        assert_eq!(aig.output(0), !xz);
        assert_eq!(simulate_exhaustive(&aig), expected);
    }
}
