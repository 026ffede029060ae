use crate::utils::FanoutView;
use crate::{Network, Signal};

struct LevelViewBuilder<'a> {
    ntk: &'a Network,
    pi_levels: Option<&'a [u32]>,
}

impl<'a> LevelViewBuilder<'a> {
    /// Compute the levels of the network
    ///
    /// # Arguments
    /// * `ntk` - The network to compute the levels of
    /// * `pi_levels_config` - The arrival levels of the primary inputs
    ///
    /// # Returns
    /// A vector of levels for each gate in the network
    pub fn compute_levels(ntk: &'a Network, pi_levels_config: Option<&'a [u32]>) -> Vec<u32> {
        if let Some(levels) = pi_levels_config {
            assert_eq!(
                levels.len(),
                ntk.nb_inputs(),
                "Number of PI levels config must match number of PIs"
            );
        }

        LevelViewBuilder {
            ntk,
            pi_levels: pi_levels_config,
        }
        .build()
    }

    pub fn build(&self) -> Vec<u32> {
        let mut levels = vec![0; self.ntk.nb_nodes()];

        // Fanins always come first in topological order
        for node in self.ntk.topo_order() {
            let lv = self
                .ntk
                .gate(node)
                .dependencies()
                .iter()
                .map(|s| self.signal_level(*s, &levels))
                .max()
                .unwrap_or(0);
            levels[node] = lv + 1;
        }

        levels
    }

    fn signal_level(&self, s: Signal, levels: &[u32]) -> u32 {
        if s.is_input() {
            self.pi_levels
                .map(|levels| levels[s.input() as usize])
                .unwrap_or(0)
        } else if s.is_var() {
            levels[s.var() as usize]
        } else {
            0
        }
    }
}

/// Distance from each node to the furthest primary output, counted in gates
///
/// For a gate, the count includes the gate itself: a gate driving an output directly
/// has reverse level 1. For a primary input, only the gates after it are counted.
/// Nodes from which no output can be reached have no reverse level.
#[derive(Debug, Clone, Default)]
pub struct ReverseLevels {
    input: Vec<Option<u32>>,
    node: Vec<Option<u32>>,
}

impl ReverseLevels {
    /// Reverse level of the node driving this signal
    pub fn get(&self, s: Signal) -> Option<u32> {
        if s.is_input() {
            self.input[s.input() as usize]
        } else if s.is_var() {
            self.node[s.var() as usize]
        } else {
            None
        }
    }
}

struct ReverseLevelViewBuilder<'a> {
    ntk: &'a Network,
    fanout_view: &'a FanoutView,
    is_output: Vec<bool>,
}

impl<'a> ReverseLevelViewBuilder<'a> {
    pub fn compute_levels(ntk: &'a Network, fanout_view: &'a FanoutView) -> ReverseLevels {
        let mut is_output = vec![false; ntk.nb_inputs() + ntk.nb_nodes()];
        for po in 0..ntk.nb_outputs() {
            let s = ntk.output(po);
            if s.is_input() {
                is_output[s.input() as usize] = true;
            } else if s.is_var() {
                is_output[ntk.nb_inputs() + s.var() as usize] = true;
            }
        }

        ReverseLevelViewBuilder {
            ntk,
            fanout_view,
            is_output,
        }
        .build()
    }

    pub fn build(&self) -> ReverseLevels {
        let mut levels = ReverseLevels {
            input: vec![None; self.ntk.nb_inputs()],
            node: vec![None; self.ntk.nb_nodes()],
        };

        // Fanouts of a gate reachable from the outputs are processed before it
        for node in self.ntk.topo_order().into_iter().rev() {
            let lv = self.fanout_level(self.ntk.node(node), self.ntk.nb_inputs() + node, &levels);
            levels.node[node] = lv.map(|lv| lv + 1);
        }
        for pi in 0..self.ntk.nb_inputs() {
            levels.input[pi] = self.fanout_level(self.ntk.input(pi), pi, &levels);
        }

        levels
    }

    fn fanout_level(&self, sig: Signal, idx: usize, levels: &ReverseLevels) -> Option<u32> {
        let mut lv = if self.is_output[idx] { Some(0) } else { None };
        for &fanout in self.fanout_view.fanouts(sig) {
            if let Some(l) = levels.node[fanout as usize] {
                lv = Some(lv.map_or(l, |lv: u32| lv.max(l)));
            }
        }
        lv
    }
}

/// Compute the levels of the network
///
/// # Arguments
/// * `ntk` - The network to compute the levels of
/// * `pi_levels` - The arrival levels of the primary inputs, 0 if not given
///
/// # Returns
/// A vector of levels for each gate in the network; gates not reachable from an output get 0
pub fn compute_levels(ntk: &Network, pi_levels: Option<&[u32]>) -> Vec<u32> {
    LevelViewBuilder::compute_levels(ntk, pi_levels)
}

/// Compute the reverse levels of the network
///
/// # Arguments
/// * `ntk` - The network to compute the reverse levels of
///
/// # Returns
/// The distance of each input and gate to the furthest output
pub fn compute_reverse_levels(ntk: &Network) -> ReverseLevels {
    ReverseLevelViewBuilder::compute_levels(ntk, &FanoutView::new(ntk))
}
