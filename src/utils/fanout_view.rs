use crate::{Network, Signal};

/// View of the fanout of each node in a network
///
/// The network only stores fanins, so this view is built by scanning all live gates.
/// Dead gates neither appear as fanouts nor get fanouts of their own.
/// It is a snapshot: it must be rebuilt after the network is modified.
#[derive(Debug, Clone, Default)]
pub struct FanoutView {
    pi_fanout: Vec<Vec<u32>>,
    node_fanout: Vec<Vec<u32>>,
}

impl FanoutView {
    /// Build the fanout lists of a network
    pub fn new(ntk: &Network) -> Self {
        let mut fanout_view = FanoutView {
            pi_fanout: vec![vec![]; ntk.nb_inputs()],
            node_fanout: vec![vec![]; ntk.nb_nodes()],
        };

        for i in ntk.gates() {
            for fanin in ntk.gate(i).dependencies() {
                let list = if fanin.is_input() {
                    &mut fanout_view.pi_fanout[fanin.input() as usize]
                } else if fanin.is_var() {
                    &mut fanout_view.node_fanout[fanin.var() as usize]
                } else {
                    continue;
                };
                if list.last() != Some(&(i as u32)) {
                    list.push(i as u32);
                }
            }
        }
        fanout_view
    }

    /// Gates using this signal, in increasing index order
    pub fn fanouts(&self, s: Signal) -> &[u32] {
        if s.is_input() {
            &self.pi_fanout[s.input() as usize]
        } else if s.is_var() {
            &self.node_fanout[s.var() as usize]
        } else {
            &[]
        }
    }
}
