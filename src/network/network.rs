use std::fmt;

use fxhash::FxHashMap;

use crate::network::{BinaryType, Gate, Signal};

/// Representation of an And-Inverter Graph
///
/// Gates are kept in creation order. Inverters are implicit, occupying one bit in [`Signal`].
///
/// Gates built through [`Network::and`] are structurally hashed: asking for the same
/// fanin pair twice returns the same gate. When a gate is replaced through
/// [`Network::substitute_node`], it becomes dead: it is skipped by [`Network::gates`] and
/// never referenced again, until [`Network::cleanup`] removes it.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nb_inputs: usize,
    nodes: Vec<Gate>,
    dead: Vec<bool>,
    outputs: Vec<Signal>,
    strash: FxHashMap<Gate, u32>,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of gates, including dead ones
    pub fn nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of gates that have not been substituted
    pub fn nb_live_gates(&self) -> usize {
        self.dead.iter().filter(|d| !**d).count()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> Signal {
        assert!(i < self.nb_inputs());
        Signal::from_input(i as u32)
    }

    /// Get the output at index i
    pub fn output(&self, i: usize) -> Signal {
        self.outputs[i]
    }

    /// Get the output signal of the gate at index i
    pub fn node(&self, i: usize) -> Signal {
        Signal::from_var(i as u32)
    }

    /// Get the gate at index i
    pub fn gate(&self, i: usize) -> &Gate {
        &self.nodes[i]
    }

    /// Return true if the gate at index i has been substituted
    pub fn is_dead(&self, i: usize) -> bool {
        self.dead[i]
    }

    /// Iterate over the indices of the live gates, in creation order
    pub fn gates(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nb_nodes()).filter(|&i| !self.dead[i])
    }

    /// Add a new primary input
    pub fn add_input(&mut self) -> Signal {
        self.nb_inputs += 1;
        Signal::from_input((self.nb_inputs - 1) as u32)
    }

    /// Add multiple primary inputs
    pub fn add_inputs(&mut self, nb: usize) {
        self.nb_inputs += nb;
    }

    /// Add a new primary output based on an existing literal
    pub fn add_output(&mut self, l: Signal) -> usize {
        self.check_signal(&l);
        self.outputs.push(l);
        self.outputs.len() - 1
    }

    /// Add a new gate as is, without simplification or deduplication
    ///
    /// The gate is still registered for structural hashing if its fanin pair is new.
    pub fn add(&mut self, gate: Gate) -> Signal {
        for s in gate.dependencies() {
            self.check_signal(s);
        }
        let i = self.nodes.len() as u32;
        self.nodes.push(gate);
        self.dead.push(false);
        self.strash.entry(gate.make_canonical()).or_insert(i);
        Signal::from_var(i)
    }

    /// Create an And gate, reusing an existing one if possible
    ///
    /// Trivial cases are folded: `a & a`, `a & !a` and constant fanins do not create a gate.
    pub fn and(&mut self, a: Signal, b: Signal) -> Signal {
        self.hashed(Gate::and(a, b))
    }

    /// Create a Xor gate, reusing an existing one if possible
    pub fn xor(&mut self, a: Signal, b: Signal) -> Signal {
        self.hashed(Gate::xor(a, b))
    }

    fn hashed(&mut self, gate: Gate) -> Signal {
        let gate = gate.make_canonical();
        if let Some(s) = Self::simplify(&gate) {
            return s;
        }
        if let Some(&i) = self.strash.get(&gate) {
            return Signal::from_var(i);
        }
        self.add(gate)
    }

    /// Return the signal a gate reduces to, if it is trivial
    fn simplify(gate: &Gate) -> Option<Signal> {
        let Gate::Binary([a, b], tp) = *gate;
        match tp {
            BinaryType::And => {
                if a == b {
                    Some(a)
                } else if a == !b || a == Signal::zero() || b == Signal::zero() {
                    Some(Signal::zero())
                } else if a == Signal::one() {
                    Some(b)
                } else if b == Signal::one() {
                    Some(a)
                } else {
                    None
                }
            }
            BinaryType::Xor => {
                if a == b {
                    Some(Signal::zero())
                } else if a == !b {
                    Some(Signal::one())
                } else if a.is_constant() {
                    Some(b ^ a.is_inverted())
                } else if b.is_constant() {
                    Some(a ^ b.is_inverted())
                } else {
                    None
                }
            }
        }
    }

    fn check_signal(&self, s: &Signal) {
        if s.is_input() {
            assert!((s.input() as usize) < self.nb_inputs, "Unknown input {s}");
        } else if s.is_var() {
            assert!((s.var() as usize) < self.nodes.len(), "Unknown gate {s}");
            assert!(!self.dead[s.var() as usize], "Dead gate {s} cannot be used");
        }
    }

    fn kill(&mut self, i: usize) {
        self.dead[i] = true;
        self.unhash(i);
    }

    fn unhash(&mut self, i: usize) {
        let g = self.nodes[i].make_canonical();
        if self.strash.get(&g) == Some(&(i as u32)) {
            self.strash.remove(&g);
        }
    }

    /// Replace every use of a gate by another signal
    ///
    /// All live fanins and outputs referring to the gate are redirected, keeping their
    /// polarity. Each modified gate is hashed again: if it becomes trivial or identical
    /// to an existing gate, it is substituted in turn. Replaced gates are marked dead.
    pub fn substitute_node(&mut self, node: usize, by: Signal) {
        self.check_signal(&by);
        let mut forward: FxHashMap<u32, Signal> = FxHashMap::default();
        let mut worklist = vec![(node, by)];
        while let Some((old, by)) = worklist.pop() {
            if self.dead[old] {
                continue;
            }
            let mut by = by;
            while by.is_var() {
                match forward.get(&by.var()) {
                    Some(&f) => by = f ^ by.is_inverted(),
                    None => break,
                }
            }
            let old_sig = self.node(old);
            if by.without_inversion() == old_sig {
                continue;
            }
            let remap = |s: &Signal| {
                if s.without_inversion() == old_sig {
                    by ^ s.is_inverted()
                } else {
                    *s
                }
            };

            for o in self.outputs.iter_mut() {
                *o = remap(o);
            }
            for i in 0..self.nodes.len() {
                if self.dead[i] || i == old {
                    continue;
                }
                let g = self.nodes[i];
                if !g.dependencies().iter().any(|s| s.without_inversion() == old_sig) {
                    continue;
                }
                self.unhash(i);
                let g = g.remap(remap).make_canonical();
                self.nodes[i] = g;
                if let Some(s) = Self::simplify(&g) {
                    worklist.push((i, s));
                } else if let Some(&e) = self.strash.get(&g) {
                    worklist.push((i, Signal::from_var(e)));
                } else {
                    self.strash.insert(g, i as u32);
                }
            }
            self.kill(old);
            forward.insert(old as u32, by);
        }
    }

    /// Returns true if all live gates are 2-input And gates
    pub fn is_aig(&self) -> bool {
        self.first_non_and().is_none()
    }

    /// Returns the index of the first live gate that is not a 2-input And
    pub fn first_non_and(&self) -> Option<usize> {
        self.gates().find(|&i| !self.nodes[i].is_and())
    }

    /// Live gates reachable from the outputs, each one after its fanins
    pub fn topo_order(&self) -> Vec<usize> {
        // 0: unvisited, 1: expanded, 2: emitted
        let mut state = vec![0u8; self.nb_nodes()];
        let mut order = Vec::new();
        let mut stack: Vec<(usize, bool)> = self
            .outputs
            .iter()
            .rev()
            .filter(|s| s.is_var())
            .map(|s| (s.var() as usize, false))
            .collect();
        while let Some((i, expanded)) = stack.pop() {
            if expanded {
                if state[i] != 2 {
                    state[i] = 2;
                    order.push(i);
                }
                continue;
            }
            if state[i] != 0 {
                continue;
            }
            state[i] = 1;
            stack.push((i, true));
            for s in self.nodes[i].dependencies().iter().rev() {
                if s.is_var() && state[s.var() as usize] == 0 {
                    stack.push((s.var() as usize, false));
                }
            }
        }
        order
    }

    /// Remove dead and unreachable gates, and put the network in topological order
    ///
    /// Inputs and outputs keep their indices.
    pub fn cleanup(&mut self) {
        let order = self.topo_order();
        let mut ret = Network::new();
        ret.add_inputs(self.nb_inputs);
        let mut translation: FxHashMap<u32, Signal> = FxHashMap::default();
        let translate = |s: &Signal, t: &FxHashMap<u32, Signal>| -> Signal {
            if s.is_var() {
                t[&s.var()] ^ s.is_inverted()
            } else {
                *s
            }
        };
        for i in order {
            let Gate::Binary([a, b], tp) = self.nodes[i];
            let a = translate(&a, &translation);
            let b = translate(&b, &translation);
            let s = match tp {
                BinaryType::And => ret.and(a, b),
                BinaryType::Xor => ret.xor(a, b),
            };
            translation.insert(i as u32, s);
        }
        for o in &self.outputs {
            ret.add_output(translate(o, &translation));
        }
        *self = ret;
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs:",
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for i in self.gates() {
            writeln!(f, "\t{} = {}", self.node(i), self.gate(i))?;
        }
        for (i, o) in self.outputs.iter().enumerate() {
            writeln!(f, "\to{} = {}", i, o)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_hashing() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(x2, x1);
        assert_eq!(f1, f2);
        assert_eq!(aig.nb_nodes(), 1);

        let f3 = aig.and(!x1, x2);
        assert_ne!(f1, f3);
        assert_eq!(aig.nb_nodes(), 2);
    }

    #[test]
    fn test_trivial_and() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();

        assert_eq!(aig.and(x1, x1), x1);
        assert_eq!(aig.and(x1, !x1), Signal::zero());
        assert_eq!(aig.and(x1, Signal::zero()), Signal::zero());
        assert_eq!(aig.and(Signal::one(), x2), x2);
        assert_eq!(aig.and(!x2, Signal::one()), !x2);
        assert_eq!(aig.nb_nodes(), 0);
        assert_eq!(aig.xor(x1, !x1), Signal::one());
        assert_eq!(aig.xor(Signal::one(), x2), !x2);
    }

    #[test]
    fn test_substitute_outputs() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let x3 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(f1, x3);
        aig.add_output(f2);
        aig.add_output(!f2);

        let g = aig.and(x1, x3);
        aig.substitute_node(f2.var() as usize, !g);
        assert_eq!(aig.output(0), !g);
        assert_eq!(aig.output(1), g);
        assert!(aig.is_dead(f2.var() as usize));
        assert!(!aig.is_dead(f1.var() as usize));
        assert_eq!(aig.nb_live_gates(), 2);
    }

    #[test]
    fn test_substitute_rehash() {
        let mut aig = Network::new();
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
        assert_eq!(aig.nb_live_gates(), 5);

        // f4 becomes f1 & x3, then f5 = (x1 & x3) & (x1 & x2 & x3)
        aig.substitute_node(f2.var() as usize, x3);
        assert_eq!(aig.nb_live_gates(), 4);
        assert_eq!(*aig.gate(f4.var() as usize), Gate::and(x3, f1).make_canonical());

        // f5 collapses to its remaining fanin when f3 becomes constant one
        aig.substitute_node(f3.var() as usize, Signal::one());
        assert_eq!(aig.output(0), f4);
        assert!(aig.is_dead(f5.var() as usize));
        aig.cleanup();
        assert_eq!(aig.nb_nodes(), 2);
    }

    #[test]
    fn test_substitute_merges_duplicates() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let x3 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(x1, x3);
        let g1 = aig.and(f1, x3);
        let g2 = aig.and(f2, x2);
        aig.add_output(g1);
        aig.add_output(g2);

        // g2 becomes f1 & x2
        aig.substitute_node(f2.var() as usize, f1);
        let g2_gate = *aig.gate(g2.var() as usize);
        assert_eq!(g2_gate, Gate::and(f1, x2).make_canonical());

        // Now make g2 identical to g1: it must be merged
        let h = aig.and(f1, x3);
        assert_eq!(h, g1);
        aig.substitute_node(g2.var() as usize, g1);
        assert_eq!(aig.output(1), g1);
    }

    #[test]
    fn test_is_aig() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let f1 = aig.and(x1, x2);
        aig.add_output(f1);
        assert!(aig.is_aig());
        let f2 = aig.xor(f1, x1);
        aig.add_output(f2);
        assert!(!aig.is_aig());
        assert_eq!(aig.first_non_and(), Some(f2.var() as usize));
    }

    #[test]
    fn test_topo_order_after_substitution() {
        let mut aig = Network::new();
        let x1 = aig.add_input();
        let x2 = aig.add_input();
        let x3 = aig.add_input();

        let f1 = aig.and(x1, x2);
        let f2 = aig.and(f1, x3);
        aig.add_output(f2);

        let g1 = aig.and(x2, x3);
        let g2 = aig.and(g1, x1);
        aig.substitute_node(f2.var() as usize, g2);

        let order = aig.topo_order();
        assert_eq!(order, vec![g1.var() as usize, g2.var() as usize]);

        aig.cleanup();
        assert_eq!(aig.nb_nodes(), 2);
        assert_eq!(aig.topo_order(), vec![0, 1]);
    }
}
